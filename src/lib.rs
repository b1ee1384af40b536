//! Entry flow for Fake Artist Goes to New York.
//!
//! - `entry`    — form state, room code normalization, validity, commands
//! - `dispatch` — emits accepted commands over an mpsc channel

pub mod dispatch;
pub mod entry;
