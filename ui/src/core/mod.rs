//! Platform-agnostic building blocks: formatting, timing, scheduling,
//! session state, and platform glue.

pub mod format;
pub mod platform;
pub mod schedule;
pub mod session;
pub mod timing;
