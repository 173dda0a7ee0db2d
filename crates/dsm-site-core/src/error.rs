use thiserror::Error;

/// Failures reading or writing the local form draft. Never fatal: a bad
/// draft is logged and treated as absent.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("malformed draft JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("draft store rejected write: {0}")]
    Store(String),
}

/// Why a contact-form submission did not go through.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("correo is not an institutional address")]
    InvalidEmail,
    #[error("endpoint rejected submission: {0}")]
    Rejected(String),
    #[error("could not reach endpoint: {0}")]
    Transport(String),
}

impl SubmitError {
    /// Text for the browser alert, if this error is surfaced that way.
    /// Invalid emails are shown inline instead.
    pub fn alert_text(&self) -> Option<String> {
        match self {
            SubmitError::InvalidEmail => None,
            SubmitError::Rejected(message) => Some(format!("❌ Hubo un error: {message}")),
            SubmitError::Transport(_) => {
                Some("⚠️ No se pudo conectar con el servidor".to_owned())
            }
        }
    }
}
