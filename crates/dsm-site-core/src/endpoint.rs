//! Contact-form submission endpoint (an Apps Script web app in production).

use crate::draft::ContactFields;
use crate::error::SubmitError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reply body: `{"status": "ok"}` on success, anything else is a rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitReply {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitReply {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Sends the four form values and returns the parsed reply. Transport and
/// decoding failures map to `SubmitError::Transport`.
#[async_trait(?Send)]
pub trait ContactEndpoint {
    async fn submit(&self, fields: &ContactFields) -> Result<SubmitReply, SubmitError>;
}
