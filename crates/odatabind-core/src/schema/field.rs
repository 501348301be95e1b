use super::reserved;
use crate::EdmType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Remote and local names
    pub name: FieldName,

    /// Remote type, kept verbatim
    pub ty: EdmType,

    /// True if the field is part of the entity key
    pub key: bool,
}

/// The name a field has on the remote service and the name its generated
/// Java member uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName {
    pub remote: String,
    pub local: String,
}

impl Field {
    pub fn new(remote: &str, ty: EdmType, key: bool) -> Field {
        Field {
            name: FieldName::from_remote(remote),
            ty,
            key,
        }
    }

    pub fn remote_name(&self) -> &str {
        &self.name.remote
    }

    pub fn local_name(&self) -> &str {
        &self.name.local
    }
}

impl FieldName {
    /// Applies the rename rule: a remote name that is a reserved word gets a
    /// `remote_` prefix locally. The remote name is left untouched for
    /// property lookups.
    pub fn from_remote(remote: &str) -> FieldName {
        let local = if reserved::is_reserved(remote) {
            format!("remote_{remote}")
        } else {
            remote.to_string()
        };

        FieldName {
            remote: remote.to_string(),
            local,
        }
    }

    pub fn is_renamed(&self) -> bool {
        self.remote != self.local
    }
}
