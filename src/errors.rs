use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    /// A `-H` argument without a `name: value` shape.
    #[error("malformed header override '{0}', expected 'name: value'")]
    MalformedHeaderOverride(String),

    /// The resolved request can't be put on the wire (bad url, method token or header).
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Connection, dns, timeout or body read failure. Never retried.
    #[error("could not reach {url}")]
    UnreachableTarget {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid capture document: {reason}")]
    InvalidCapture { reason: String },
}

impl ReplayError {
    pub fn invalid_request(reason: impl Into<String>) -> ReplayError {
        ReplayError::InvalidRequest { reason: reason.into() }
    }
}
