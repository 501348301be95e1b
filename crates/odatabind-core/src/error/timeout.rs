use super::{Error, ErrorKind};

/// Metadata retrieval did not finish in time. No partial output is kept.
#[derive(Debug)]
pub(super) struct TimeoutError {
    secs: u64,
}

impl std::error::Error for TimeoutError {}

impl core::fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "metadata retrieval timed out after {}s", self.secs)
    }
}

impl Error {
    pub fn timeout(secs: u64) -> Error {
        Error::from(ErrorKind::Timeout(TimeoutError { secs }))
    }

    pub fn is_timeout(&self) -> bool {
        self.find_kind(|kind| match kind {
            ErrorKind::Timeout(_) => Some(()),
            _ => None,
        })
        .is_some()
    }
}
