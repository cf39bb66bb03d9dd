//! Daily rollover: clearing completion checkmarks when the date changes.
//!
//! The actual trigger is [`RolloverScheduler`], which fires on any change
//! of calendar date seen by polling. [`next_reset_countdown`] measures the
//! time to a fixed hour of day and exists for display only; the two do not
//! agree and are not meant to.

mod countdown;
mod scheduler;

pub use countdown::{next_reset_countdown, ResetCountdown, DEFAULT_RESET_HOUR};
pub use scheduler::{transition, RolloverEffect, RolloverScheduler, POLL_INTERVAL};
