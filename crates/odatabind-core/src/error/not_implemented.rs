use super::{Error, ErrorKind};

/// A feature the synthesizer deliberately does not generate code for.
#[derive(Debug)]
pub(super) struct NotImplementedError {
    feature: Box<str>,
}

impl std::error::Error for NotImplementedError {}

impl core::fmt::Display for NotImplementedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "not implemented: {}", self.feature)
    }
}

impl Error {
    pub fn not_implemented(feature: impl Into<String>) -> Error {
        Error::from(ErrorKind::NotImplemented(NotImplementedError {
            feature: feature.into().into(),
        }))
    }

    pub fn is_not_implemented(&self) -> bool {
        self.find_kind(|kind| match kind {
            ErrorKind::NotImplemented(_) => Some(()),
            _ => None,
        })
        .is_some()
    }
}
