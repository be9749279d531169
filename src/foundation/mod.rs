//! Shared primitives: frame/time math, the error type, and the injectable clock.

pub mod clock;
pub mod core;
pub mod error;
