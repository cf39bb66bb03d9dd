use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named, checkable daily task.
///
/// The name is the identity key shared with the streak records. Names are
/// not required to be unique; lookups always act on the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub name: String,
    pub completed_today: bool,
}

impl HabitEntry {
    /// Build an unchecked entry from a raw name.
    pub fn new(raw_name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_name(raw_name)?,
            completed_today: false,
        })
    }
}

/// Trim a user-supplied habit name and reject names that cannot be stored.
///
/// A line break would split the record across two lines of the habits file.
pub fn normalize_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.contains(['\n', '\r']) {
        return Err(ValidationError::LineBreakInName);
    }
    Ok(name.to_string())
}
