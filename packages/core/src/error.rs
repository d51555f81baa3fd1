//! Error types for volume and tree handle resolution.

/// Errors produced while resolving handles against mounted volumes.
///
/// `VolumeUnavailable` and `Enumeration` are both "this location cannot be
/// reached right now"; [`Error::is_unavailable`] groups them so callers can
/// react the same way while still logging them apart.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The handle could not be decoded into a volume id and document path.
    #[error("malformed handle {handle:?}: {message}")]
    MalformedHandle { handle: String, message: String },

    /// The handle is neither a direct file reference nor a provider tree token.
    #[error("unsupported handle scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    /// No currently mounted volume matches the decoded id.
    #[error("volume unavailable: {volume_id}")]
    VolumeUnavailable { volume_id: String },

    /// The mount enumeration collaborator failed.
    #[error("volume enumeration failed: {0}")]
    Enumeration(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An I/O error occurred while loading configuration.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn malformed(handle: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedHandle {
            handle: handle.into(),
            message: message.into(),
        }
    }

    /// Wrap a collaborator failure as an enumeration error.
    pub fn enumeration<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Enumeration(error.into())
    }

    /// True for failures that mean "the volume cannot be reached".
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::VolumeUnavailable { .. } | Error::Enumeration(_))
    }
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;
