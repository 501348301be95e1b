//! Splices navigation code into synthesized persistence methods.
//!
//! To-one relationships link the referenced entity on `persist`/`merge` and
//! resolve it on every reader. To-many relationships only resolve the
//! collection on the readers.

use crate::{synth, Anchor, ClassNames, Error, FieldDecl, MethodDecl, Result, SourceFile};
use odatabind_core::schema::{Cardinality, EntitySet, NavigationProperty};

use log::debug;
use std_util::str::capitalize;

/// A navigation property as it is materialized in a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Navigation name, also the name of the generated field
    pub name: String,

    /// Class of the referenced entity
    pub target: String,

    pub cardinality: Cardinality,
}

impl Relationship {
    /// Resolves `navigation` from the point of view of `entity`.
    pub fn from_navigation(entity: &EntitySet, navigation: &NavigationProperty) -> Relationship {
        Relationship {
            name: navigation.name.clone(),
            target: navigation.target(entity.name()).to_string(),
            cardinality: navigation.cardinality(entity.name()),
        }
    }

    /// Recovers a relationship from a previously generated field, or `None`
    /// if the field carries no cardinality annotation.
    pub fn from_field(decl: &FieldDecl) -> Option<Relationship> {
        let cardinality = decl.annotation_names().find_map(Cardinality::from_annotation)?;

        let target = match decl.ty.strip_prefix("Set<") {
            Some(rest) => rest.strip_suffix('>')?.trim(),
            None => decl.ty.trim(),
        };

        Some(Relationship {
            name: decl.name.clone(),
            target: target.to_string(),
            cardinality,
        })
    }

    pub fn field_type(&self) -> String {
        if self.cardinality.is_to_one() {
            self.target.clone()
        } else {
            format!("Set<{}>", self.target)
        }
    }

    pub fn field_decl(&self) -> FieldDecl {
        let decl = FieldDecl::new(self.field_type(), &self.name)
            .annotation(format!("@{}", self.cardinality.as_str()));

        if self.cardinality.is_to_one() {
            decl
        } else {
            decl.value(format!("new HashSet<{}>()", self.target))
        }
    }

    pub fn accessors(&self) -> [MethodDecl; 2] {
        synth::accessors(&self.name, &self.field_type())
    }

    pub fn imports(&self) -> Vec<String> {
        let mut imports = vec![
            "javax.persistence.CascadeType".to_string(),
            "org.odata4j.core.OLink".to_string(),
            "org.odata4j.core.OLinks".to_string(),
            format!("javax.persistence.{}", self.cardinality.as_str()),
        ];

        if self.cardinality.is_to_many() {
            imports.push("java.util.HashSet".to_string());
            imports.push("java.util.Set".to_string());
        }

        imports
    }

    /// Lines linking the referenced entity to the outgoing request `request`.
    fn link_code(&self, request: &str) -> Vec<String> {
        let Relationship { name, target, .. } = self;
        let cap = capitalize(name);
        let target_names = ClassNames::new(target);

        vec![
            format!("if (this.{name} != null) {{"),
            format!(
                "\tOEntity linked{cap} = {target}.{}(this.{name}.getId());",
                target_names.get_remote()
            ),
            format!("\t{request} = {request}.link(\"{name}\", linked{cap});"),
            "}".to_string(),
        ]
    }

    /// Lines resolving the relationship of remote entity `entity` into the
    /// local `instance`.
    fn resolve_code(&self, class: &str, instance: &str, entity: &str, remote_key: &str) -> Vec<String> {
        let Relationship { name, target, .. } = self;
        let cap = capitalize(name);
        let find = ClassNames::new(target).find();

        if self.cardinality.is_to_one() {
            return vec![
                format!(
                    "OEntity remote{cap} = odc.rooODataConsumer.getEntity(\"{class}\", {remote_key}).nav(\"{name}\").execute();"
                ),
                format!("if (remote{cap} != null) {{"),
                format!(
                    "\t{target} virtual{cap} = {target}.{find}(odc.getEncodedRemoteKey(remote{cap}.getEntityKey().toKeyString()));"
                ),
                format!("\t{instance}.set{cap}(virtual{cap});"),
                "}".to_string(),
            ];
        }

        let link = format!("{}Link", name.to_lowercase());

        vec![
            format!("for (OLink {link} : {entity}.getLinks()) {{"),
            format!("\tif ({link}.isCollection() && {link}.getTitle().equals(\"{name}\")) {{"),
            format!("\t\tSet<{target}> virtual{cap} = new HashSet<{target}>();"),
            format!(
                "\t\tList<OEntity> remote{cap} = odc.rooODataConsumer.getEntities(OLinks.relatedEntities({link}.getRelation(), {link}.getTitle(), {link}.getHref()))"
            ),
            "\t\t\t.execute().toList();".to_string(),
            format!("\t\tfor (OEntity remote{cap}Item : remote{cap}) {{"),
            format!(
                "\t\t\tvirtual{cap}.add({target}.{find}(odc.getEncodedRemoteKey(remote{cap}Item.getEntityKey().toKeyString())));"
            ),
            "\t\t}".to_string(),
            format!("\t\t{instance}.set{cap}(virtual{cap});"),
            "\t}".to_string(),
            "}".to_string(),
        ]
    }
}

/// Splices `relationship` into the persistence methods of `file`.
///
/// Every anchor is checked before the first splice, so on error the file is
/// left untouched.
pub fn weave(file: &mut SourceFile, relationship: &Relationship) -> Result<()> {
    if relationship.cardinality == Cardinality::ManyToMany {
        return Err(Error::not_implemented(format!(
            "weaving many-to-many relationship `{}`",
            relationship.name
        )));
    }

    let names = ClassNames::new(file.class_name());
    let class = names.class().to_string();

    let mut splices: Vec<(String, Anchor, Vec<String>)> = vec![];

    if relationship.cardinality.is_to_one() {
        for (method, request) in [("persist", "newEntityRequest"), ("merge", "modifyEntityRequest")] {
            splices.push((method.to_string(), Anchor::Links, relationship.link_code(request)));
        }
    }

    splices.push((
        names.find(),
        Anchor::Relationships,
        relationship.resolve_code(
            &class,
            &names.virtual_var(),
            names.lower(),
            "OEntityKey.parse(odc.getDecodedRemoteKey(Id))",
        ),
    ));

    for method in [names.find_all(), names.find_entries()] {
        splices.push((
            method,
            Anchor::Relationships,
            relationship.resolve_code(&class, &names.instance_var(), &names.item_var(), "ODataKey"),
        ));
    }

    for (method, anchor, _) in &splices {
        require_anchor(file, method, *anchor)?;
    }

    for (method, anchor, lines) in splices {
        splice(file, &method, anchor, lines)?;
    }

    debug!(
        "wove {} `{}` into `{class}`",
        relationship.cardinality.as_str(),
        relationship.name
    );
    Ok(())
}

/// Fails with `SourceError::AnchorMissing` unless `method` exists and
/// carries `anchor`.
pub(crate) fn require_anchor(file: &SourceFile, method: &str, anchor: Anchor) -> Result<()> {
    match file.method(method) {
        Some(decl) if decl.body.has_anchor(anchor) => Ok(()),
        _ => Err(Error::anchor_missing(file.class_name(), method, anchor.as_str())),
    }
}

/// Splices `lines` at `anchor` of the first method called `method`.
pub(crate) fn splice<I, S>(file: &mut SourceFile, method: &str, anchor: Anchor, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let class = file.class_name().to_string();

    let decl = file
        .method_mut(method)
        .ok_or_else(|| Error::anchor_missing(&class, method, anchor.as_str()))?;

    decl.splice(&class, anchor, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{persistence_methods, EntityModel};
    use odatabind_core::schema::Field;
    use odatabind_core::EdmType;
    use pretty_assertions::assert_eq;
    use std_util::assert_contains;

    fn class(name: &str) -> SourceFile {
        let model = EntityModel::new(name, vec![Field::new("ProductID", EdmType::Int32, true)], vec![]);
        let mut file = SourceFile::new(None, name, &[]);
        for method in persistence_methods(&model) {
            file.upsert_method(method, true);
        }
        file
    }

    fn rel(cardinality: Cardinality) -> Relationship {
        Relationship {
            name: "Category".into(),
            target: "Categories".into(),
            cardinality,
        }
    }

    #[test]
    fn to_one_links_on_persist() {
        let mut file = class("Products");
        weave(&mut file, &rel(Cardinality::ManyToOne)).unwrap();

        let persist = file.method("persist").unwrap().body.to_string();
        assert_contains!(
            persist,
            "\t\tif (this.Category != null) {\n\
             \t\t\tOEntity linkedCategory = Categories.getRemoteCategories(this.Category.getId());\n\
             \t\t\tnewEntityRequest = newEntityRequest.link(\"Category\", linkedCategory);\n\
             \t\t}\n\
             \t\t// @anchor links\n"
        );

        let merge = file.method("merge").unwrap().body.to_string();
        assert_contains!(merge, "modifyEntityRequest = modifyEntityRequest.link(\"Category\", linkedCategory);");

        let find = file.method("findProducts").unwrap().body.to_string();
        assert_contains!(
            find,
            "\t\t\tOEntity remoteCategory = odc.rooODataConsumer.getEntity(\"Products\", OEntityKey.parse(odc.getDecodedRemoteKey(Id))).nav(\"Category\").execute();\n"
        );
        assert_contains!(find, "\t\t\t\tvirtualProducts.setCategory(virtualCategory);\n");
    }

    #[test]
    fn to_many_only_touches_readers() {
        let mut file = class("Categories");
        let before = file.method("persist").unwrap().clone();

        let relationship = Relationship {
            name: "Products".into(),
            target: "Products".into(),
            cardinality: Cardinality::OneToMany,
        };
        weave(&mut file, &relationship).unwrap();

        assert_eq!(file.method("persist").unwrap(), &before);

        for method in ["findCategories", "findAllCategories", "findCategoriesEntries"] {
            let body = file.method(method).unwrap().body.to_string();
            assert_contains!(body, "if (productsLink.isCollection() && productsLink.getTitle().equals(\"Products\")) {");
            assert_contains!(body, "Set<Products> virtualProducts = new HashSet<Products>();");
        }

        let all = file.method("findAllCategories").unwrap().body.to_string();
        assert_contains!(all, "for (OLink productsLink : categoriesItem.getLinks()) {");
        assert_contains!(all, "categoriesInstance.setProducts(virtualProducts);");
    }

    #[test]
    fn many_to_many_is_rejected_untouched() {
        let mut file = class("Products");
        let before = file.clone();
        let err = weave(&mut file, &rel(Cardinality::ManyToMany)).unwrap_err();
        assert!(err.is_not_implemented());
        assert_eq!(file, before);
    }

    #[test]
    fn missing_anchor_leaves_file_untouched() {
        let mut file = class("Products");
        let mut find = file.method("findProducts").unwrap().clone();
        find.body = crate::Body::new();
        file.upsert_method(find, true);

        let before = file.clone();
        let err = weave(&mut file, &rel(Cardinality::ManyToOne)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "method `Products.findProducts` has no `relationships` anchor; regenerate the class"
        );
        assert_eq!(file, before);
    }

    #[test]
    fn relationship_fields_round_trip() {
        for cardinality in [Cardinality::ManyToOne, Cardinality::OneToMany] {
            let relationship = rel(cardinality);
            let decl = relationship.field_decl();
            assert_eq!(Relationship::from_field(&decl), Some(relationship));
        }

        let decl = rel(Cardinality::OneToMany).field_decl();
        assert_eq!(
            decl.declaration(),
            "private Set<Categories> Category = new HashSet<Categories>();"
        );
        assert_eq!(Relationship::from_field(&FieldDecl::new("String", "name")), None);
    }
}
