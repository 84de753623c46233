//! Size guards consulted before exact integer arithmetic.
//!
//! A guard that trips never raises: the caller leaves the expression
//! unevaluated instead.

use num_bigint::BigInt;

use crate::config::Context;

/// Length of the minimal two's-complement encoding of `n`.
pub fn byte_len(n: &BigInt) -> usize {
    n.to_signed_bytes_le().len()
}

/// Whether `base^exponent` stays within the configured byte budget.
pub fn should_compute_power(base: &BigInt, exponent: &BigInt, ctx: &Context) -> bool {
    let projected = BigInt::from(byte_len(base)) * exponent;
    projected <= BigInt::from(ctx.config().max_size_of_numbers_in_bytes)
}

/// Whether `a * b` stays within the configured byte budget.
pub fn should_compute_product(a: &BigInt, b: &BigInt, ctx: &Context) -> bool {
    byte_len(a) + byte_len(b) <= ctx.config().max_size_of_numbers_in_bytes + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_lengths() {
        assert_eq!(byte_len(&BigInt::from(0)), 1);
        assert_eq!(byte_len(&BigInt::from(127)), 1);
        assert_eq!(byte_len(&BigInt::from(128)), 2);
        assert_eq!(byte_len(&BigInt::from(-128)), 1);
    }

    #[test]
    fn power_guard_scales_with_exponent() {
        let ctx = Context::default();
        assert!(should_compute_power(&BigInt::from(2), &BigInt::from(15), &ctx));
        assert!(!should_compute_power(&BigInt::from(2), &BigInt::from(16), &ctx));
        assert!(!should_compute_power(&BigInt::from(300), &BigInt::from(8), &ctx));
    }

    #[test]
    fn product_guard_allows_one_spare_byte() {
        let ctx = Context::default();
        let eight_bytes = BigInt::from(1u64 << 62);
        assert!(should_compute_product(&eight_bytes, &eight_bytes, &ctx));
        let nine_bytes = BigInt::from(1u128 << 64);
        assert!(!should_compute_product(&nine_bytes, &eight_bytes, &ctx));
    }
}
