//! Exact number theory: prime-bounded factorization, fraction cancellation,
//! partial roots, power extraction and the size guards around them.

pub mod complexity;
pub mod decompose;
mod rational;

pub use complexity::{byte_len, should_compute_power, should_compute_product};
pub use decompose::{
    cancel_fraction, decompose, decompose_fully, partial_root, partial_root_full,
    power_and_remainder,
};
pub use rational::Rational;
