//! Acknowledgement returned by operations that have no record to hand back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Key of the record the operation acted on.
    pub id: String,
    pub message: String,
}

impl Confirmation {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}
