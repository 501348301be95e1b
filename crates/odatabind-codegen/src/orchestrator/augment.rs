use super::{Gateway, Orchestrator, Session, Stage};
use crate::synth::{self, snippets};
use crate::weave::{self, Relationship};
use crate::{Anchor, ClassNames, Package, SourceStore};
use odatabind_core::{bail, Error, Result};

use log::debug;

impl<S: SourceStore> Orchestrator<S> {
    /// Declares one more remote field on a generated class and splices it
    /// into the persistence methods.
    pub fn add_remote_field(&mut self, class: &str, remote: &str) -> Result<()> {
        let Gateway {
            mut file,
            namespace,
            entity,
        } = self.load_gateway(class)?;
        let mut session = Session::start(class, Stage::ClassMaterializing);

        let field = entity.field(remote);

        if file.field_exists(remote) || field.is_some_and(|field| file.field_exists(field.local_name())) {
            return Err(Error::field_exists(class, remote));
        }

        let Some(field) = field.filter(|field| !field.key) else {
            return Err(Error::field_not_found(entity.name(), remote));
        };

        let names = ClassNames::new(class);
        let property = [snippets::property_code(field)];
        let find = snippets::show_code(field, &names.virtual_var(), names.lower());
        let list = snippets::show_code(field, &names.instance_var(), &names.item_var());

        let mut splices = vec![
            ("persist".to_string(), Anchor::Properties, property.to_vec()),
            ("merge".to_string(), Anchor::Properties, property.to_vec()),
            (names.find(), Anchor::Mapping, find),
        ];
        for method in [names.find_all(), names.find_entries()] {
            splices.push((method, Anchor::Mapping, list.clone()));
        }

        for (method, anchor, _) in &splices {
            weave::require_anchor(&file, method, *anchor)?;
        }

        file.insert_field(synth::remote_field(field))?;
        for accessor in synth::accessors(field.local_name(), field.ty.java_type().as_str()) {
            file.upsert_method(accessor, true);
        }

        session.advance(Stage::FieldsSynthesized);

        for (method, anchor, lines) in splices {
            weave::splice(&mut file, &method, anchor, lines)?;
        }

        session.advance(Stage::PersistenceMethodsSynthesized);
        debug!("added `{namespace}.{}.{remote}` to `{class}`", entity.name());

        self.write_class(Package::Domain, &file, &mut session)
    }

    /// Declares a field that is stored locally only. Its value is carried
    /// over from the stored row whenever remote entities are listed.
    pub fn add_local_field(&mut self, class: &str, name: &str, java_type: &str) -> Result<()> {
        let Gateway { mut file, entity, .. } = self.load_gateway(class)?;
        let mut session = Session::start(class, Stage::ClassMaterializing);

        if file.field_exists(name) {
            return Err(Error::field_exists(class, name));
        }

        if let Some(remote) = entity.field(name).or_else(|| entity.field_by_local(name)) {
            bail!(
                "`{name}` names remote field `{}` of entity `{}`; add it as a remote field instead",
                remote.remote_name(),
                entity.name()
            );
        }

        let names = ClassNames::new(class);
        let readers = [names.find_all(), names.find_entries()];

        for method in &readers {
            weave::require_anchor(&file, method, Anchor::Mapping)?;
        }

        let decl = synth::local_field(name, java_type);
        let ty = decl.ty.clone();

        if java_type.contains('.') && !java_type.starts_with("java.lang.") {
            file.add_import(java_type.trim());
        }

        file.insert_field(decl)?;
        for accessor in synth::accessors(name, &ty) {
            file.upsert_method(accessor, true);
        }

        session.advance(Stage::FieldsSynthesized);

        let line = snippets::local_mapping(&names.instance_var(), &names.local_var(), name);
        for method in &readers {
            weave::splice(&mut file, method, Anchor::Mapping, [&line])?;
        }

        session.advance(Stage::PersistenceMethodsSynthesized);

        self.write_class(Package::Domain, &file, &mut session)
    }

    /// Materializes navigation property `navigation` of the class's entity
    /// as a relationship field and weaves its traversal code.
    pub fn add_relationship(&mut self, class: &str, navigation: &str) -> Result<()> {
        let Gateway { mut file, entity, .. } = self.load_gateway(class)?;
        let mut session = Session::start(class, Stage::ClassMaterializing);

        let Some(nav) = entity.navigation(navigation) else {
            return Err(Error::navigation_not_found(
                entity.name(),
                navigation,
                "no such navigation property",
            ));
        };

        let relationship = Relationship::from_navigation(&entity, nav);

        if !self.domain_class_exists(&relationship.target) {
            return Err(Error::navigation_not_found(
                entity.name(),
                navigation,
                format!("class `{}` has not been generated", relationship.target),
            ));
        }

        if file.field_exists(&relationship.name) {
            return Err(Error::field_exists(class, &relationship.name));
        }

        weave::weave(&mut file, &relationship)?;
        session.advance(Stage::RelationshipsWoven);

        file.insert_field(relationship.field_decl())?;
        for accessor in relationship.accessors() {
            file.upsert_method(accessor, true);
        }
        file.add_imports(relationship.imports());

        session.advance(Stage::PersistenceMethodsSynthesized);

        self.write_class(Package::Domain, &file, &mut session)
    }
}
