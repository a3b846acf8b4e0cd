//! Response bodies shared by every endpoint

use serde::{Deserialize, Serialize};

/// Body for endpoints that only report an outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
