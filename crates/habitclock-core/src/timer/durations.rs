//! Interval lengths accepted by the pomodoro engine.
//!
//! Values can only be built inside their range, so the engine itself never
//! sees an invalid duration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! bounded_minutes {
    ($(#[$meta:meta])* $name:ident, $field:literal, $min:expr, $max:expr, $default:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u32", into = "u32")]
        pub struct $name(u32);

        impl $name {
            pub const MIN: u32 = $min;
            pub const MAX: u32 = $max;
            pub const DEFAULT: Self = Self($default);

            pub fn new(minutes: u32) -> Result<Self, ValidationError> {
                if (Self::MIN..=Self::MAX).contains(&minutes) {
                    Ok(Self(minutes))
                } else {
                    Err(ValidationError::OutOfRange {
                        field: $field,
                        value: minutes,
                        min: Self::MIN,
                        max: Self::MAX,
                    })
                }
            }

            /// Nearest valid value.
            pub fn clamped(minutes: u32) -> Self {
                Self(minutes.clamp(Self::MIN, Self::MAX))
            }

            pub fn get(self) -> u32 {
                self.0
            }

            pub fn seconds(self) -> u32 {
                self.0 * 60
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::DEFAULT
            }
        }

        impl TryFrom<u32> for $name {
            type Error = ValidationError;

            fn try_from(minutes: u32) -> Result<Self, Self::Error> {
                Self::new(minutes)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value.0
            }
        }
    };
}

bounded_minutes!(
    /// Work interval, 1 to 120 minutes.
    WorkMinutes,
    "work_minutes",
    1,
    120,
    25
);

bounded_minutes!(
    /// Break interval, 1 to 60 minutes.
    BreakMinutes,
    "break_minutes",
    1,
    60,
    5
);
