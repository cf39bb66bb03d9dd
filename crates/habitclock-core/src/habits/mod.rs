//! Ordered habit list and its `<0|1>|<name>` record file.

pub mod codec;
mod entry;
mod store;

pub use entry::{normalize_name, HabitEntry};
pub use store::HabitStore;
