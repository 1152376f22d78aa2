use thiserror::Error;

/// Failures the assistant reports to its host.
///
/// A query that matches nothing is *not* an error; it produces a normal
/// clarification response.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssistantError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported intent label: {0}")]
    UnsupportedIntent(String),

    #[error("invalid training corpus: {0}")]
    InvalidCorpus(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AssistantError {
    /// Whether the caller's request caused this error (4xx-style) rather than
    /// the assistant's own setup (5xx-style).
    ///
    /// Only query text comes from the caller; intent labels come from the
    /// corpus or the classifier, so `UnsupportedIntent` is internal.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AssistantError::InvalidInput(_))
    }
}
