//! Synthesis of the members of a generated entity class.
//!
//! Everything here is pure: functions take the schema selection and return
//! declarations. Writing them into a [`SourceFile`](crate::SourceFile) is the
//! orchestrator's job.

mod controller;
pub use controller::{controller_show, CONTROLLER_IMPORTS};

mod find;
mod members;
pub use members::{
    accessors, connector_field, id_field, local_field, local_java_type, namespace_of,
    remote_field, CONNECTOR_FIELD, ID_FIELD,
};

mod persist;
mod remove;

pub mod snippets;

use crate::{ClassNames, MethodDecl, Package, ProjectLayout};
use odatabind_core::schema::Field;

/// Class annotations of a newly created entity class.
pub const NEW_CLASS_ANNOTATIONS: &[&str] = &["@RooJavaBean", "@RooToString", "@RooJpaActiveRecord"];

/// Imports backing [`NEW_CLASS_ANNOTATIONS`].
pub const NEW_CLASS_IMPORTS: &[&str] = &[
    "org.springframework.roo.addon.javabean.RooJavaBean",
    "org.springframework.roo.addon.tostring.RooToString",
    "org.springframework.roo.addon.jpa.activerecord.RooJpaActiveRecord",
];

/// Imports every synthesized entity class needs, after the two
/// connectivity imports.
pub const ENTITY_IMPORTS: &[&str] = &[
    "org.odata4j.core.OEntity",
    "org.odata4j.core.OProperties",
    "org.springframework.transaction.annotation.Transactional",
    "java.util.List",
    "java.util.ArrayList",
    "java.util.Date",
    "java.util.Calendar",
    "org.odata4j.core.OQueryRequest",
    "org.odata4j.core.OCreateRequest",
    "org.odata4j.core.OModifyRequest",
    "org.odata4j.core.OEntityKey",
    "javax.persistence.Temporal",
    "javax.persistence.TemporalType",
    "org.springframework.format.annotation.DateTimeFormat",
    "org.joda.time.DateTime",
    "org.joda.time.format.DateTimeFormatter",
    "org.joda.time.format.ISODateTimeFormat",
    "javax.persistence.Column",
    "javax.persistence.GenerationType",
    "javax.persistence.GeneratedValue",
    "java.net.URLDecoder",
    "java.net.URLEncoder",
    "java.io.UnsupportedEncodingException",
    "javax.persistence.Id",
];

/// The full import list of an entity class bound to endpoint `namespace`.
pub fn entity_imports(layout: &ProjectLayout, namespace: &str) -> Vec<String> {
    let connectivity = layout.package_name(Package::Connectivity);

    let mut imports = vec![
        format!("{connectivity}.{namespace}"),
        format!("{connectivity}.ODataConnectivity"),
    ];
    imports.extend(ENTITY_IMPORTS.iter().map(|import| import.to_string()));
    imports
}

/// The schema selection a class's persistence methods are synthesized for.
#[derive(Debug, Clone)]
pub struct EntityModel {
    pub names: ClassNames,

    /// Key fields, in document order
    pub keys: Vec<Field>,

    /// Non-key fields, in document order
    pub fields: Vec<Field>,
}

impl EntityModel {
    pub fn new(class: impl Into<String>, keys: Vec<Field>, fields: Vec<Field>) -> EntityModel {
        EntityModel {
            names: ClassNames::new(class),
            keys,
            fields,
        }
    }

    /// Keys first, then fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.keys.iter().chain(&self.fields)
    }

    fn has_date_key(&self) -> bool {
        self.keys.iter().any(|key| key.ty.is_date())
    }
}

/// The persistence methods of an entity class, in the order they appear in
/// the file.
pub fn persistence_methods(model: &EntityModel) -> Vec<MethodDecl> {
    vec![
        persist::persist(model),
        persist::local_persist(),
        find::find_all(model),
        find::find_entries(model),
        find::find(model),
        find::count(model),
        persist::merge(model),
        persist::local_merge(model),
        remove::remove(model),
        remove::local_remove(model),
        find::get_remote(model),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use odatabind_core::EdmType;
    use pretty_assertions::assert_eq;

    #[test]
    fn method_order() {
        let model = EntityModel::new(
            "Category",
            vec![Field::new("CategoryID", EdmType::Int32, true)],
            vec![],
        );
        let names: Vec<_> = persistence_methods(&model).into_iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec![
                "persist",
                "localPersist",
                "findAllCategories",
                "findCategoryEntries",
                "findCategory",
                "countCategories",
                "merge",
                "localMerge",
                "remove",
                "localRemove",
                "getRemoteCategory",
            ]
        );
    }

    #[test]
    fn connectivity_imports_lead() {
        let imports = entity_imports(&ProjectLayout::new("com.acme"), "Northwind");
        assert_eq!(imports[0], "com.acme.connectivity.Northwind");
        assert_eq!(imports[1], "com.acme.connectivity.ODataConnectivity");
        assert_eq!(imports.len(), ENTITY_IMPORTS.len() + 2);
    }
}
