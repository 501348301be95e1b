use super::{Error, ErrorKind};

/// A generated source file cannot be loaded or safely edited.
///
/// Source errors abort the session before the file is written, so a file
/// on disk is never left half-updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The file does not match the shapes the editor understands.
    Unparseable { line: usize, reason: String },

    /// The caller asked for a new field but the class already declares it.
    FieldExists { class: String, field: String },

    /// The caller asked for a new method but a matching one is present.
    MethodExists { class: String, method: String },

    /// A synthesized method lost the marker a later pass splices at.
    AnchorMissing {
        class: String,
        method: String,
        anchor: String,
    },

    /// A file the operation depends on does not exist.
    MissingFile { path: String },
}

impl std::error::Error for SourceError {}

impl core::fmt::Display for SourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            SourceError::Unparseable { line, reason } => {
                write!(f, "unparseable source at line {line}: {reason}")
            }
            SourceError::FieldExists { class, field } => {
                write!(f, "field `{field}` already exists in class `{class}`")
            }
            SourceError::MethodExists { class, method } => {
                write!(f, "method `{method}` already exists in class `{class}`")
            }
            SourceError::AnchorMissing {
                class,
                method,
                anchor,
            } => write!(
                f,
                "method `{class}.{method}` has no `{anchor}` anchor; regenerate the class"
            ),
            SourceError::MissingFile { path } => write!(f, "file `{path}` does not exist"),
        }
    }
}

impl Error {
    pub fn unparseable(line: usize, reason: impl Into<String>) -> Error {
        Error::from(ErrorKind::Source(SourceError::Unparseable {
            line,
            reason: reason.into(),
        }))
    }

    pub fn field_exists(class: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(ErrorKind::Source(SourceError::FieldExists {
            class: class.into(),
            field: field.into(),
        }))
    }

    pub fn method_exists(class: impl Into<String>, method: impl Into<String>) -> Error {
        Error::from(ErrorKind::Source(SourceError::MethodExists {
            class: class.into(),
            method: method.into(),
        }))
    }

    pub fn anchor_missing(
        class: impl Into<String>,
        method: impl Into<String>,
        anchor: impl Into<String>,
    ) -> Error {
        Error::from(ErrorKind::Source(SourceError::AnchorMissing {
            class: class.into(),
            method: method.into(),
            anchor: anchor.into(),
        }))
    }

    pub fn missing_file(path: impl Into<String>) -> Error {
        Error::from(ErrorKind::Source(SourceError::MissingFile { path: path.into() }))
    }

    pub fn is_source_error(&self) -> bool {
        self.source_error().is_some()
    }

    /// Returns the source-file error carried by this error chain, if any.
    pub fn source_error(&self) -> Option<&SourceError> {
        self.find_kind(|kind| match kind {
            ErrorKind::Source(err) => Some(err),
            _ => None,
        })
    }
}
