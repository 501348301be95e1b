//! Drives synthesis sessions against a [`SourceStore`].
//!
//! Every public operation loads what it needs, validates the request in
//! full, mutates an in-memory [`SourceFile`] and writes it back as its very
//! last step. A failed operation never writes.

mod augment;
mod controller;
mod materialize;
mod query;

mod scaffold;
pub use scaffold::{CsrfMode, EndpointDefinition};

mod stage;
pub use stage::Stage;
use stage::Session;

use crate::{synth, Package, ProjectLayout, SourceFile, SourceStore};
use odatabind_core::{bail, EntitySet, Error, MetadataDocument, Result};

use log::info;
use std::path::{Path, PathBuf};

/// A generated class bound to an endpoint, with the schema of its entity.
struct Gateway {
    file: SourceFile,
    namespace: String,
    entity: EntitySet,
}

#[derive(Debug)]
pub struct Orchestrator<S> {
    store: S,
    layout: ProjectLayout,
}

impl<S: SourceStore> Orchestrator<S> {
    pub fn new(store: S, layout: ProjectLayout) -> Orchestrator<S> {
        Orchestrator { store, layout }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    fn metadata_path(&self, namespace: &str) -> PathBuf {
        self.layout
            .file_path(Package::Connectivity, &format!("{namespace}_metadata.xml"))
    }

    fn read_metadata(&self, namespace: &str) -> Result<String> {
        let path = self.metadata_path(namespace);

        if !self.store.exists(&path) {
            return Err(Error::missing_file(path.display().to_string()));
        }

        self.store.read(&path)
    }

    fn load_entity(&self, namespace: &str, entity: &str) -> Result<EntitySet> {
        let text = self.read_metadata(namespace)?;
        let doc = MetadataDocument::parse(&text)
            .map_err(|e| e.context(format!("loading metadata of endpoint `{namespace}`")))?;
        doc.entity(entity)
    }

    fn read_class(&self, path: &Path) -> Result<SourceFile> {
        if !self.store.exists(path) {
            return Err(Error::missing_file(path.display().to_string()));
        }

        let text = self.store.read(path)?;
        SourceFile::parse(&text).map_err(|e| e.context(format!("reading `{}`", path.display())))
    }

    /// Loads a domain class generated for a remote entity set.
    fn load_gateway(&self, class: &str) -> Result<Gateway> {
        let file = self.read_class(&self.layout.class_path(Package::Domain, class))?;

        let Some(namespace) = synth::namespace_of(&file) else {
            bail!("class `{class}` is not bound to an endpoint; it has no `odc` connector field");
        };

        let entity = self.load_entity(&namespace, class)?;

        Ok(Gateway {
            file,
            namespace,
            entity,
        })
    }

    fn write_class(&mut self, package: Package, file: &SourceFile, session: &mut Session) -> Result<()> {
        let path = self.layout.class_path(package, file.class_name());
        self.store.write(&path, &file.to_string())?;

        session.advance(Stage::Serialized);
        info!("wrote {} ({})", path.display(), session.stage());
        Ok(())
    }

    fn domain_class_exists(&self, class: &str) -> bool {
        self.store
            .exists(&self.layout.class_path(Package::Domain, class))
    }
}
