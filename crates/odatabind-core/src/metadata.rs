//! Parsing of the metadata document produced by the metadata retriever.
//!
//! ```xml
//! <entities>
//!   <entity name="Products">
//!     <entityfield>
//!       <fieldname>ProductID</fieldname>
//!       <fieldtype>Int32</fieldtype>
//!       <key>true</key>
//!     </entityfield>
//!     <navproperty>
//!       <relationship_id>Product_Category</relationship_id>
//!       <navpath>Category</navpath>
//!       <end1 multiplicity="*">Products</end1>
//!       <end2 multiplicity="1">Categories</end2>
//!     </navproperty>
//!   </entity>
//! </entities>
//! ```

use crate::schema::{AssociationEnd, Field, Multiplicity, NavigationProperty};
use crate::{EdmType, EntitySet, Error, Result};

use log::debug;
use roxmltree::{Document, Node};

/// A loaded metadata document.
#[derive(Debug)]
pub struct MetadataDocument<'a> {
    doc: Document<'a>,
}

impl<'a> MetadataDocument<'a> {
    /// Loads the XML. Fails with `SchemaError::InvalidDocument` when the
    /// text is not well-formed.
    pub fn parse(text: &'a str) -> Result<MetadataDocument<'a>> {
        let doc = Document::parse(text).map_err(|err| Error::invalid_document(err.to_string()))?;
        Ok(MetadataDocument { doc })
    }

    /// Names of every entity set, in document order.
    pub fn entity_names(&self) -> Vec<String> {
        self.entity_nodes()
            .filter_map(|node| node.attribute("name"))
            .map(str::to_string)
            .collect()
    }

    /// Builds the schema of one entity set.
    pub fn entity(&self, name: &str) -> Result<EntitySet> {
        parse(self, name)
    }

    fn entity_nodes(&self) -> impl Iterator<Item = Node<'_, 'a>> + '_ {
        self.doc
            .descendants()
            .filter(|node| node.has_tag_name("entity"))
    }
}

/// Builds the [`EntitySet`] named `entity` from `doc`.
pub fn parse(doc: &MetadataDocument<'_>, entity: &str) -> Result<EntitySet> {
    let node = doc
        .entity_nodes()
        .find(|node| node.attribute("name") == Some(entity))
        .ok_or_else(|| Error::entity_not_found(entity))?;

    let fields = node
        .descendants()
        .filter(|child| child.has_tag_name("entityfield"))
        .map(|child| parse_field(entity, child))
        .collect::<Result<Vec<_>>>()?;

    let navigations = node
        .descendants()
        .filter(|child| child.has_tag_name("navproperty"))
        .map(|child| parse_navigation(entity, child))
        .collect::<Result<Vec<_>>>()?;

    let entity_set = EntitySet::new(entity, fields, navigations)?;

    debug!(
        "parsed entity `{}`; keys={} fields={} navigations={}",
        entity,
        entity_set.keys().count(),
        entity_set.fields().count(),
        entity_set.navigations().len()
    );

    Ok(entity_set)
}

fn parse_field(entity: &str, node: Node<'_, '_>) -> Result<Field> {
    let name = required_text(entity, node, "fieldname")?;
    let ty = required_text(entity, node, "fieldtype")?;
    let key = text(node, "key").is_some_and(|key| key == "true");

    Ok(Field::new(name, EdmType::from_tag(ty), key))
}

fn parse_navigation(entity: &str, node: Node<'_, '_>) -> Result<NavigationProperty> {
    let name = required_text(entity, node, "navpath")?;
    let relationship = text(node, "relationship_id").unwrap_or_default();

    Ok(NavigationProperty {
        name: name.to_string(),
        relationship: relationship.to_string(),
        ends: [
            parse_end(entity, name, node, "end1")?,
            parse_end(entity, name, node, "end2")?,
        ],
    })
}

fn parse_end(entity: &str, nav: &str, node: Node<'_, '_>, tag: &str) -> Result<AssociationEnd> {
    let end = child(node, tag).ok_or_else(|| {
        Error::invalid_document(format!(
            "navigation `{nav}` on entity `{entity}` has no <{tag}>"
        ))
    })?;

    let multiplicity = end.attribute("multiplicity").ok_or_else(|| {
        Error::invalid_document(format!(
            "<{tag}> of navigation `{nav}` on entity `{entity}` has no multiplicity"
        ))
    })?;

    Ok(AssociationEnd {
        entity_type: end.text().unwrap_or_default().trim().to_string(),
        multiplicity: Multiplicity::from_symbol(multiplicity),
    })
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|child| child.has_tag_name(tag))
}

fn text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child(node, tag).and_then(|child| child.text()).map(str::trim)
}

fn required_text<'a>(entity: &str, node: Node<'a, '_>, tag: &str) -> Result<&'a str> {
    match text(node, tag) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(Error::invalid_document(format!(
            "a <{}> of entity `{entity}` has no <{tag}>",
            node.tag_name().name()
        ))),
    }
}
