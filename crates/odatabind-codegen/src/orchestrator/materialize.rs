use super::{Orchestrator, Session, Stage};
use crate::synth::{self, snippets, EntityModel, CONNECTOR_FIELD, ID_FIELD};
use crate::weave::{self, Relationship};
use crate::{Anchor, ClassNames, Package, SourceFile, SourceStore};
use odatabind_core::schema::Field;
use odatabind_core::{bail, EntitySet, Error, Result};

use log::{debug, warn};
use std_util::str::capitalize;

impl<S: SourceStore> Orchestrator<S> {
    /// Generates, or regenerates, the domain class of `entity` bound to
    /// endpoint `namespace`.
    ///
    /// Keys are always declared. With `import_all` every other remote field
    /// is declared too; without it, only remote fields the class already
    /// declares are kept. Persistence methods are rebuilt from scratch and
    /// the relationships and local fields the class declares are spliced
    /// back into them. Everything else in an existing file is left alone.
    pub fn materialize_entity(&mut self, namespace: &str, entity: &str, import_all: bool) -> Result<()> {
        let schema = self.load_entity(namespace, entity)?;
        let mut session = Session::start(entity, Stage::SchemaLoaded);

        let keys: Vec<Field> = schema.keys().cloned().collect();
        if keys.is_empty() {
            return Err(Error::invalid_document(format!(
                "entity `{entity}` declares no key fields"
            )));
        }

        session.advance(Stage::ClassMaterializing);
        let path = self.layout.class_path(Package::Domain, entity);

        let mut file = if self.store.exists(&path) {
            self.read_class(&path)?
        } else {
            debug!("creating {}", path.display());
            let mut file = SourceFile::new(
                Some(self.layout.package_line(Package::Domain)),
                entity,
                synth::NEW_CLASS_ANNOTATIONS,
            );
            file.add_imports(synth::NEW_CLASS_IMPORTS.iter().copied());
            file
        };

        if let Some(bound) = synth::namespace_of(&file) {
            if bound != namespace {
                bail!("class `{entity}` is bound to endpoint `{bound}`, not `{namespace}`");
            }
        }

        file.add_imports(synth::entity_imports(&self.layout, namespace));

        let fields: Vec<Field> = schema
            .fields()
            .filter(|field| import_all || file.field_exists(field.local_name()))
            .cloned()
            .collect();

        file.upsert_field(synth::connector_field(namespace));
        file.upsert_field(synth::id_field());

        for field in keys.iter().chain(&fields) {
            file.upsert_field(synth::remote_field(field));
            for accessor in synth::accessors(field.local_name(), field.ty.java_type().as_str()) {
                file.upsert_method(accessor, true);
            }
        }

        session.advance(Stage::FieldsSynthesized);

        let model = EntityModel::new(entity, keys, fields);
        let mut scratch = SourceFile::new(None, entity, &[]);
        for method in synth::persistence_methods(&model) {
            scratch.upsert_method(method, true);
        }

        for decl in file.fields() {
            let Some(relationship) = Relationship::from_field(decl) else {
                continue;
            };

            if !self.domain_class_exists(&relationship.target) {
                warn!(
                    "skipping relationship `{entity}.{}`: class `{}` does not exist",
                    relationship.name, relationship.target
                );
                continue;
            }

            weave::weave(&mut scratch, &relationship)?;
        }

        session.advance(Stage::RelationshipsWoven);

        let names = ClassNames::new(entity);
        for name in local_fields(&file, &schema) {
            let line = snippets::local_mapping(&names.instance_var(), &names.local_var(), &name);
            for method in [names.find_all(), names.find_entries()] {
                weave::splice(&mut scratch, &method, Anchor::Mapping, [&line])?;
            }
        }

        for method in scratch.methods() {
            file.upsert_method(method.clone(), true);
        }

        session.advance(Stage::PersistenceMethodsSynthesized);

        self.write_class(Package::Domain, &file, &mut session)
    }
}

/// Names of fields that exist only in the local class and have a setter.
fn local_fields(file: &SourceFile, schema: &EntitySet) -> Vec<String> {
    file.fields()
        .iter()
        .filter(|decl| decl.has_modifier("private") && !decl.has_modifier("static"))
        .filter(|decl| decl.name != CONNECTOR_FIELD && decl.name != ID_FIELD)
        .filter(|decl| schema.field_by_local(&decl.name).is_none())
        .filter(|decl| Relationship::from_field(decl).is_none())
        .filter(|decl| file.method(&format!("set{}", capitalize(&decl.name))).is_some())
        .map(|decl| decl.name.clone())
        .collect()
}
