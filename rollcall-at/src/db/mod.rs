//! Database access layer for rollcall-at

pub mod attendance;
pub mod enrollees;
