use super::{Error, ErrorKind};

/// The metadata service could not be reached, refused the credentials, or
/// the retriever exited abnormally.
#[derive(Debug)]
pub(super) struct TransportError {
    message: Box<str>,
}

impl std::error::Error for TransportError {}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "metadata transport failed: {}", self.message)
    }
}

impl Error {
    pub fn transport(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Transport(TransportError {
            message: message.into().into(),
        }))
    }

    pub fn is_transport(&self) -> bool {
        self.find_kind(|kind| match kind {
            ErrorKind::Transport(_) => Some(()),
            _ => None,
        })
        .is_some()
    }
}
