//! Shared primitives: time, 3D transforms, damped smoothing and the error type.

pub mod core;
pub mod error;
pub mod math;
