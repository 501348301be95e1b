use super::{Error, ErrorKind};

/// The metadata does not describe what the caller asked for.
///
/// Schema errors are always fatal to the requested operation and are raised
/// before any source text is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No `<entity>` node carries the requested name.
    EntityNotFound { entity: String },

    /// The entity has no field with the requested remote name.
    FieldNotFound { entity: String, field: String },

    /// The navigation property is unknown, or its target has no generated
    /// class yet.
    NavigationNotFound {
        entity: String,
        navigation: String,
        reason: String,
    },

    /// Two remote fields map to the same local name after renaming.
    DuplicateLocalName { entity: String, local_name: String },

    /// The metadata document itself is malformed.
    InvalidDocument { reason: String },
}

impl std::error::Error for SchemaError {}

impl core::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            SchemaError::EntityNotFound { entity } => {
                write!(f, "entity `{entity}` not found in metadata")
            }
            SchemaError::FieldNotFound { entity, field } => {
                write!(f, "field `{field}` not found on entity `{entity}`")
            }
            SchemaError::NavigationNotFound {
                entity,
                navigation,
                reason,
            } => write!(
                f,
                "navigation `{navigation}` on entity `{entity}` cannot be resolved: {reason}"
            ),
            SchemaError::DuplicateLocalName { entity, local_name } => write!(
                f,
                "entity `{entity}` has more than one field named `{local_name}` after renaming"
            ),
            SchemaError::InvalidDocument { reason } => {
                write!(f, "invalid metadata document: {reason}")
            }
        }
    }
}

impl Error {
    pub fn entity_not_found(entity: impl Into<String>) -> Error {
        Error::from(ErrorKind::Schema(SchemaError::EntityNotFound {
            entity: entity.into(),
        }))
    }

    pub fn field_not_found(entity: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(ErrorKind::Schema(SchemaError::FieldNotFound {
            entity: entity.into(),
            field: field.into(),
        }))
    }

    pub fn navigation_not_found(
        entity: impl Into<String>,
        navigation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(ErrorKind::Schema(SchemaError::NavigationNotFound {
            entity: entity.into(),
            navigation: navigation.into(),
            reason: reason.into(),
        }))
    }

    pub fn duplicate_local_name(entity: impl Into<String>, local_name: impl Into<String>) -> Error {
        Error::from(ErrorKind::Schema(SchemaError::DuplicateLocalName {
            entity: entity.into(),
            local_name: local_name.into(),
        }))
    }

    pub fn invalid_document(reason: impl Into<String>) -> Error {
        Error::from(ErrorKind::Schema(SchemaError::InvalidDocument {
            reason: reason.into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a schema error.
    pub fn is_schema_error(&self) -> bool {
        self.schema_error().is_some()
    }

    /// Returns the schema error carried by this error chain, if any.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        self.find_kind(|kind| match kind {
            ErrorKind::Schema(err) => Some(err),
            _ => None,
        })
    }
}
