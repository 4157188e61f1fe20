//! Per-frame animation: page curl, whole-book pose and viewport scale.

pub mod bend;
pub mod book_pose;
pub mod scale;
