#![forbid(unsafe_code)]

// the capability
pub mod set;

// not concurrent
pub mod non_concurrent;

pub use non_concurrent::{InvariantViolation, RBTree};
pub use set::Set;
