use crate::codec::Format;

/// Errors raised by a codec while encoding or decoding a value
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("{0}")]
    Custom(String),
}

impl CodecError {
    /// Shortcut method to create a custom codec error
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        CodecError::Custom(msg.into())
    }
}

/// Fatal errors: the assertion cannot meaningfully continue.
///
/// Mismatches between the golden artifact and the value under test are not
/// errors; they are reported as [`crate::Failure`]s inside a
/// [`crate::Verification`].
#[derive(Debug, thiserror::Error)]
pub enum GoldsertError {
    #[error("failed to {format} marshal {shape}: {source}; value: {value}")]
    Encode {
        format: Format,
        shape: String,
        value: String,
        source: CodecError,
    },

    #[error("failed to {format} unmarshal {shape} from {location}: {source}")]
    Decode {
        format: Format,
        shape: String,
        location: String,
        source: CodecError,
    },

    #[error("no reference artifact found at {location}; run in update mode to create it")]
    NotFound { artifact: String, location: String },

    #[error("Reference store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage error: {0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, GoldsertError>;

impl GoldsertError {
    /// Shortcut method to create a not found error
    pub fn not_found<A: Into<String>, L: Into<String>>(artifact: A, location: L) -> Self {
        GoldsertError::NotFound {
            artifact: artifact.into(),
            location: location.into(),
        }
    }

    /// Shortcut method to create a store error
    pub fn store<S: Into<String>>(msg: S) -> Self {
        GoldsertError::Store(msg.into())
    }

    /// Shortcut method to create a usage error
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        GoldsertError::Usage(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GoldsertError::NotFound { .. })
    }
}
