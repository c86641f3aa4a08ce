//! Participants of a calculation.

use serde::Serialize;

/// A person taking part in the split.
///
/// Identity is the `id`; names are display-only and may collide across
/// different ids (the storage layer enforces uniqueness, not the engine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
