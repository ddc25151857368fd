//! Submitted record model

use super::forms::FormInput;
use serde::{Deserialize, Serialize};

/// A finalized copy of the form input, possibly merged with a server-assigned
/// identifier when the submission round-tripped through a remote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub input: FormInput,
}

impl Record {
    /// Basic variant: the record is the form input verbatim
    pub fn from_input(input: &FormInput) -> Self {
        Self {
            id: None,
            input: input.clone(),
        }
    }
}
