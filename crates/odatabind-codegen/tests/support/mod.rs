#![allow(dead_code)]

use odatabind_codegen::{EndpointDefinition, MemoryStore, Orchestrator, Package, ProjectLayout};
use std::path::PathBuf;

pub const NAMESPACE: &str = "Northwind";

pub const METADATA: &str = r#"<entities>
    <entity name="Products">
        <entityfield><fieldname>ProductID</fieldname><fieldtype>Int32</fieldtype><key>true</key></entityfield>
        <entityfield><fieldname>ProductName</fieldname><fieldtype>String</fieldtype><key>false</key></entityfield>
        <entityfield><fieldname>UnitPrice</fieldname><fieldtype>Decimal</fieldtype><key>false</key></entityfield>
        <entityfield><fieldname>ShippedAt</fieldname><fieldtype>DateTimeOffset</fieldtype><key>false</key></entityfield>
        <entityfield><fieldname>Order</fieldname><fieldtype>Int16</fieldtype><key>false</key></entityfield>
        <navproperty>
            <relationship_id>Product_Category</relationship_id>
            <navpath>Category</navpath>
            <end1 multiplicity="*">Products</end1>
            <end2 multiplicity="1">Categories</end2>
        </navproperty>
        <navproperty>
            <relationship_id>Product_Suppliers</relationship_id>
            <navpath>Suppliers</navpath>
            <end1 multiplicity="*">Products</end1>
            <end2 multiplicity="*">Suppliers</end2>
        </navproperty>
    </entity>
    <entity name="Categories">
        <entityfield><fieldname>CategoryID</fieldname><fieldtype>Int32</fieldtype><key>true</key></entityfield>
        <entityfield><fieldname>CategoryName</fieldname><fieldtype>String</fieldtype><key>false</key></entityfield>
        <navproperty>
            <relationship_id>Product_Category</relationship_id>
            <navpath>Products</navpath>
            <end1 multiplicity="1">Categories</end1>
            <end2 multiplicity="*">Products</end2>
        </navproperty>
    </entity>
    <entity name="Suppliers">
        <entityfield><fieldname>SupplierID</fieldname><fieldtype>Int32</fieldtype><key>true</key></entityfield>
    </entity>
    <entity name="Notes">
        <entityfield><fieldname>Text</fieldname><fieldtype>String</fieldtype><key>false</key></entityfield>
    </entity>
</entities>
"#;

pub fn layout() -> ProjectLayout {
    ProjectLayout::new("com.acme")
}

/// An orchestrator over a store holding the Northwind endpoint.
pub fn orchestrator() -> Orchestrator<MemoryStore> {
    let mut orchestrator = Orchestrator::new(MemoryStore::new(), layout());
    orchestrator
        .define_endpoint(&EndpointDefinition::new(NAMESPACE, "http://services.example/Northwind.svc/"), METADATA)
        .unwrap();
    orchestrator
}

pub fn domain_path(class: &str) -> PathBuf {
    layout().class_path(Package::Domain, class)
}

pub fn class_text(orchestrator: &Orchestrator<MemoryStore>, class: &str) -> String {
    orchestrator
        .store()
        .get(domain_path(class))
        .unwrap_or_else(|| panic!("class `{class}` was not written"))
        .to_string()
}
