use odatabind_core::schema::{Cardinality, Multiplicity};
use odatabind_core::{EdmType, JavaType, MetadataDocument, SchemaError};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

const NORTHWIND: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<entities>
    <entity name="Order_Details">
        <entityfield><fieldname>OrderID</fieldname><fieldtype>Int32</fieldtype><key>true</key></entityfield>
        <entityfield><fieldname>ProductID</fieldname><fieldtype>Int32</fieldtype><key>true</key></entityfield>
        <entityfield><fieldname>Quantity</fieldname><fieldtype>Int16</fieldtype><key>false</key></entityfield>
        <entityfield><fieldname>Order</fieldname><fieldtype>String</fieldtype><key>false</key></entityfield>
        <navproperty>
            <relationship_id>Order_Details_Product</relationship_id>
            <navpath>Product</navpath>
            <end1 multiplicity="*">Order_Details</end1>
            <end2 multiplicity="1">Products</end2>
        </navproperty>
    </entity>
    <entity name="Products">
        <entityfield><fieldname>ProductID</fieldname><fieldtype>Edm.Int32</fieldtype><key>true</key></entityfield>
        <entityfield><fieldname>Released</fieldname><fieldtype>DateTime</fieldtype><key>false</key></entityfield>
        <navproperty>
            <relationship_id>Order_Details_Product</relationship_id>
            <navpath>Order_Details</navpath>
            <end1 multiplicity="*">Order_Details</end1>
            <end2 multiplicity="1">Products</end2>
        </navproperty>
        <navproperty>
            <relationship_id>Product_Tags</relationship_id>
            <navpath>Tags</navpath>
            <end1 multiplicity="*">Products</end1>
            <end2 multiplicity="*">Tags</end2>
        </navproperty>
    </entity>
</entities>
"#;

#[test]
fn composite_keys_keep_document_order() {
    let doc = MetadataDocument::parse(NORTHWIND).unwrap();
    assert_eq!(doc.entity_names(), vec!["Order_Details", "Products"]);

    let details = doc.entity("Order_Details").unwrap();
    assert_eq!(
        details.key_shape(),
        vec![
            ("OrderID".to_string(), EdmType::Int32),
            ("ProductID".to_string(), EdmType::Int32),
        ]
    );

    let fields: Vec<_> = details.fields().map(|f| (f.remote_name(), f.local_name())).collect();
    assert_eq!(fields, vec![("Quantity", "Quantity"), ("Order", "remote_Order")]);
    assert_eq!(details.all_fields().count(), 4);
    assert_eq!(details.field_by_local("remote_Order").unwrap().remote_name(), "Order");
}

#[test]
fn navigation_cardinality_depends_on_the_side() {
    let doc = MetadataDocument::parse(NORTHWIND).unwrap();

    let details = doc.entity("Order_Details").unwrap();
    let product = details.navigation("Product").unwrap();
    assert_eq!(product.target("Order_Details"), "Products");
    assert_eq!(product.cardinality("Order_Details"), Cardinality::ManyToOne);
    assert_eq!(product.ends[1].multiplicity, Multiplicity::One);

    let products = doc.entity("Products").unwrap();
    let lines = products.navigation("Order_Details").unwrap();
    assert_eq!(lines.target("Products"), "Order_Details");
    assert_eq!(lines.cardinality("Products"), Cardinality::OneToMany);

    let tags = products.navigation("Tags").unwrap();
    assert_eq!(tags.cardinality("Products"), Cardinality::ManyToMany);
    assert!(tags.cardinality("Products").is_to_many());

    let released = products.field("Released").unwrap();
    assert_eq!(released.ty, EdmType::DateTime);
    assert!(released.ty.is_date());

    let id = products.field("ProductID").unwrap();
    assert_eq!(id.ty.as_str(), "Edm.Int32");
    assert_eq!(id.ty.java_type(), JavaType::String);
}

#[test]
fn unknown_entity() {
    let doc = MetadataDocument::parse(NORTHWIND).unwrap();
    let err = assert_err!(doc.entity("Customers"));
    assert_eq!(
        err.schema_error(),
        Some(&SchemaError::EntityNotFound {
            entity: "Customers".into()
        })
    );
}

#[test]
fn malformed_documents() {
    let err = assert_err!(MetadataDocument::parse("<entities><entity name=\"A\">"));
    assert!(matches!(err.schema_error(), Some(SchemaError::InvalidDocument { .. })));

    let doc = MetadataDocument::parse(
        "<entities><entity name=\"A\"><entityfield><fieldtype>Int32</fieldtype></entityfield></entity></entities>",
    )
    .unwrap();
    let err = assert_err!(doc.entity("A"));
    assert!(matches!(err.schema_error(), Some(SchemaError::InvalidDocument { .. })));
}

#[test]
fn renamed_field_colliding_with_another_field() {
    let doc = MetadataDocument::parse(
        r#"<entities><entity name="A">
            <entityfield><fieldname>Id</fieldname><fieldtype>Int32</fieldtype><key>true</key></entityfield>
            <entityfield><fieldname>Order</fieldname><fieldtype>String</fieldtype></entityfield>
            <entityfield><fieldname>remote_Order</fieldname><fieldtype>String</fieldtype></entityfield>
        </entity></entities>"#,
    )
    .unwrap();

    let err = assert_err!(doc.entity("A"));
    assert_eq!(
        err.schema_error(),
        Some(&SchemaError::DuplicateLocalName {
            entity: "A".into(),
            local_name: "remote_Order".into(),
        })
    );
}
