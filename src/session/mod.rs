//! Navigation state and the frame-driven book session.
//!
//! Timers here never touch wall time; they fire from [`book::BookSession::advance`]
//! as the session clock crosses their due time.

pub mod autoplay;
pub mod book;
pub mod cursor;
pub mod timer;
