use super::{Field, NavigationProperty};
use crate::{EdmType, Error, Result};

use indexmap::IndexSet;

/// One remote entity set: its fields, in document order, and its
/// navigation properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySet {
    name: String,
    fields: Vec<Field>,
    navigations: Vec<NavigationProperty>,
}

impl EntitySet {
    /// Builds an entity set, rejecting duplicate remote names and local
    /// names that collide after renaming.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<Field>,
        navigations: Vec<NavigationProperty>,
    ) -> Result<EntitySet> {
        let name = name.into();

        let mut remote = IndexSet::new();
        let mut local = IndexSet::new();

        for field in &fields {
            if !remote.insert(field.name.remote.as_str()) {
                return Err(Error::invalid_document(format!(
                    "entity `{name}` declares field `{}` twice",
                    field.name.remote
                )));
            }

            if !local.insert(field.name.local.as_str()) {
                return Err(Error::duplicate_local_name(&name, &field.name.local));
            }
        }

        let mut navs = IndexSet::new();
        for nav in &navigations {
            if !navs.insert(nav.name.as_str()) {
                return Err(Error::invalid_document(format!(
                    "entity `{name}` declares navigation `{}` twice",
                    nav.name
                )));
            }
        }

        Ok(EntitySet {
            name,
            fields,
            navigations,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key fields, in document order.
    pub fn keys(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.key)
    }

    /// Non-key fields, in document order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| !field.key)
    }

    /// Keys first, then the remaining fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.keys().chain(self.fields())
    }

    /// Looks a field up by its remote name.
    pub fn field(&self, remote: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name.remote == remote)
    }

    /// Looks a field up by the name of its generated member.
    pub fn field_by_local(&self, local: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name.local == local)
    }

    pub fn navigations(&self) -> &[NavigationProperty] {
        &self.navigations
    }

    pub fn navigation(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigations.iter().find(|nav| nav.name == name)
    }

    /// Remote names and types of the key fields, in order. Used to parse
    /// key strings back into composite keys.
    pub fn key_shape(&self) -> Vec<(String, EdmType)> {
        self.keys()
            .map(|field| (field.name.remote.clone(), field.ty.clone()))
            .collect()
    }
}
