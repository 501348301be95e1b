use super::Orchestrator;
use crate::synth::{namespace_of, CONNECTOR_FIELD};
use crate::{Package, SourceFile, SourceStore};
use odatabind_core::{EntitySet, MetadataDocument, Result};

const METADATA_SUFFIX: &str = "_metadata.xml";

impl<S: SourceStore> Orchestrator<S> {
    /// Names of the endpoints with a stored metadata document, sorted.
    pub fn endpoints(&self) -> Result<Vec<String>> {
        let pattern = self.layout.glob(Package::Connectivity, &format!("*{METADATA_SUFFIX}"));

        let mut names: Vec<String> = self
            .store
            .list_matching(&pattern)?
            .iter()
            .filter_map(|path| path.file_name()?.to_str()?.strip_suffix(METADATA_SUFFIX))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        names.sort();
        Ok(names)
    }

    /// Entity sets described by the metadata of endpoint `namespace`.
    pub fn remote_entities(&self, namespace: &str) -> Result<Vec<String>> {
        let text = self.read_metadata(namespace)?;
        Ok(MetadataDocument::parse(&text)?.entity_names())
    }

    /// Domain classes bound to an endpoint, sorted.
    pub fn gateway_classes(&self) -> Result<Vec<String>> {
        let pattern = self.layout.glob(Package::Domain, "*.java");
        let mut classes = vec![];

        for path in self.store.list_matching(&pattern)? {
            let text = self.store.read(&path)?;
            if !text.contains(&format!("ODataConnectivity {CONNECTOR_FIELD}")) {
                continue;
            }

            if let Some(class) = path.file_stem().and_then(|stem| stem.to_str()) {
                classes.push(class.to_string());
            }
        }

        classes.sort();
        Ok(classes)
    }

    /// Remote fields of the class's entity that the class does not declare
    /// yet, by remote name.
    pub fn available_fields(&self, class: &str) -> Result<Vec<String>> {
        let gateway = self.load_gateway(class)?;
        Ok(undeclared(&gateway.file, &gateway.entity))
    }

    /// The endpoint `class` is bound to.
    pub fn namespace_of_class(&self, class: &str) -> Result<Option<String>> {
        let file = self.read_class(&self.layout.class_path(Package::Domain, class))?;
        Ok(namespace_of(&file))
    }
}

fn undeclared(file: &SourceFile, entity: &EntitySet) -> Vec<String> {
    entity
        .fields()
        .filter(|field| !file.field_exists(field.local_name()))
        .map(|field| field.remote_name().to_string())
        .collect()
}
