use super::{Error, ErrorKind};

/// A key string or an encoded identifier could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Malformed percent-encoding, or bytes that do not decode to UTF-8.
    InvalidEncoding {
        input: String,
        position: usize,
        reason: String,
    },

    /// A key string does not match the entity's key shape.
    InvalidKey { input: String, reason: String },
}

impl std::error::Error for CodecError {}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            CodecError::InvalidEncoding {
                input,
                position,
                reason,
            } => write!(
                f,
                "invalid encoded identifier `{input}` at byte {position}: {reason}"
            ),
            CodecError::InvalidKey { input, reason } => {
                write!(f, "invalid key string `{input}`: {reason}")
            }
        }
    }
}

impl Error {
    pub fn invalid_encoding(
        input: impl Into<String>,
        position: usize,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(ErrorKind::Codec(CodecError::InvalidEncoding {
            input: input.into(),
            position,
            reason: reason.into(),
        }))
    }

    pub fn invalid_key(input: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(ErrorKind::Codec(CodecError::InvalidKey {
            input: input.into(),
            reason: reason.into(),
        }))
    }

    pub fn is_codec_error(&self) -> bool {
        self.codec_error().is_some()
    }

    pub fn codec_error(&self) -> Option<&CodecError> {
        self.find_kind(|kind| match kind {
            ErrorKind::Codec(err) => Some(err),
            _ => None,
        })
    }
}
