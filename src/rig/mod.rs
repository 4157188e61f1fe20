//! Page mesh skinning and bone-chain forward kinematics.

pub mod chain;
pub mod skin;
