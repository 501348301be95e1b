mod support;

use odatabind_codegen::{
    CsrfMode, EndpointDefinition, MemoryStore, Orchestrator, Package, SourceFile, SourceStore,
};
use odatabind_core::{Error, Result, SchemaError, SourceError};
use std::path::{Path, PathBuf};
use pretty_assertions::assert_eq;
use std_util::prelude::*;
use support::*;

const CONTROLLER: &str = r#"package com.acme.web;

import com.acme.domain.Products;
import org.springframework.roo.addon.web.mvc.controller.scaffold.RooWebScaffold;

@RequestMapping("/productses")
@Controller
@RooWebScaffold(path = "productses", formBackingObject = Products.class)
public class ProductsController {
}
"#;

fn connectivity(orchestrator: &Orchestrator<MemoryStore>, file: &str) -> String {
    orchestrator
        .store()
        .get(layout().file_path(Package::Connectivity, file))
        .unwrap_or_else(|| panic!("`{file}` was not written"))
        .to_string()
}

fn controller_path() -> PathBuf {
    layout().class_path(Package::Web, "ProductsController")
}

#[test]
fn bootstrap_writes_connectivity_base() {
    let mut orchestrator = Orchestrator::new(MemoryStore::new(), layout());
    orchestrator.bootstrap_connectivity().unwrap();

    let text = connectivity(&orchestrator, "ODataConnectivity.java");
    assert!(text.starts_with("package com.acme.connectivity;\n"));
    assert_contains!(text, "public class ODataConnectivity {");
    assert_not_contains!(text, "<<");
}

#[test]
fn endpoint_class_and_metadata() {
    let orchestrator = orchestrator();

    let text = connectivity(&orchestrator, "Northwind.java");
    assert!(text.starts_with("package com.acme.connectivity;\n"));
    assert_contains!(text, "public class Northwind extends ODataConnectivity {");
    assert_contains!(
        text,
        "super(\"http://services.example/Northwind.svc/\", \"\", \"\", \"\", \"\");"
    );
    assert_contains!(text, ".header(\"X-CSRF-Token\", \"Fetch\")");
    assert_not_contains!(text, "<<");

    assert_eq!(connectivity(&orchestrator, "Northwind_metadata.xml"), METADATA);
    assert!(orchestrator
        .store()
        .get(layout().file_path(Package::Connectivity, "ODataConnectivity.java"))
        .is_some());
}

#[test]
fn endpoint_settings_are_escaped() {
    let mut orchestrator = Orchestrator::new(MemoryStore::new(), layout());
    let endpoint = EndpointDefinition::new("Contoso", "https://contoso.example/odata/")
        .credentials("svc\\reader", "p\"ss")
        .csrf_mode(CsrfMode::Compatibility)
        .proxy("proxy.local", "3128");

    orchestrator.define_endpoint(&endpoint, METADATA).unwrap();

    let text = connectivity(&orchestrator, "Contoso.java");
    assert_contains!(
        text,
        "super(\"https://contoso.example/odata/\", \"svc\\\\reader\", \"p\\\"ss\", \"proxy.local\", \"3128\");"
    );
    assert_contains!(text, ".header(\"X-Requested-With\", \"XMLHttpRequest\")");
    assert_not_contains!(text, "X-CSRF-Token");
}

#[test]
fn endpoint_rejects_bad_input() {
    let mut orchestrator = Orchestrator::new(MemoryStore::new(), layout());

    let err = assert_err!(orchestrator.define_endpoint(&EndpointDefinition::new("North wind", "http://x/"), METADATA));
    assert!(err.is_adhoc());

    let err = assert_err!(orchestrator.define_endpoint(&EndpointDefinition::new("Northwind", "http://x/"), "  \n"));
    assert!(matches!(err.schema_error(), Some(SchemaError::InvalidDocument { .. })));

    assert_err!(orchestrator.define_endpoint(&EndpointDefinition::new("Northwind", "http://x/"), "<entities>"));

    assert_eq!(orchestrator.store().paths().count(), 0);
}

/// Fails every write to a file named `refused`.
struct RefusingStore {
    inner: MemoryStore,
    refused: &'static str,
}

impl SourceStore for RefusingStore {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.inner.read(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        if path.file_name().is_some_and(|name| name == self.refused) {
            return Err(Error::from(std::io::Error::other("disk full")));
        }
        self.inner.write(path, contents)
    }

    fn list_matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.inner.list_matching(pattern)
    }
}

#[test]
fn failed_endpoint_write_is_not_listed() {
    let store = RefusingStore {
        inner: MemoryStore::new(),
        refused: "Northwind.java",
    };
    let mut orchestrator = Orchestrator::new(store, layout());

    assert_err!(orchestrator.define_endpoint(&EndpointDefinition::new("Northwind", "http://x/"), METADATA));

    let metadata = layout().file_path(Package::Connectivity, "Northwind_metadata.xml");
    assert!(!orchestrator.store().exists(&metadata));
    assert_eq!(orchestrator.endpoints().unwrap(), Vec::<String>::new());
}

#[test]
fn redefining_an_endpoint_keeps_the_base_class() {
    let mut orchestrator = orchestrator();
    let edited = connectivity(&orchestrator, "ODataConnectivity.java").replace(
        "public class ODataConnectivity {",
        "public class ODataConnectivity { // customized",
    );
    let store = orchestrator
        .into_store()
        .with_file(layout().file_path(Package::Connectivity, "ODataConnectivity.java"), edited.clone());
    let mut orchestrator = Orchestrator::new(store, layout());

    orchestrator
        .define_endpoint(&EndpointDefinition::new(NAMESPACE, "http://services.example/v2/"), METADATA)
        .unwrap();

    assert_eq!(connectivity(&orchestrator, "ODataConnectivity.java"), edited);
    assert_contains!(connectivity(&orchestrator, "Northwind.java"), "http://services.example/v2/");
}

#[test]
fn controller_show_is_replaced() {
    let store = orchestrator().into_store().with_file(controller_path(), CONTROLLER);
    let mut orchestrator = Orchestrator::new(store, layout());

    orchestrator.adapt_controller("Products").unwrap();

    let text = orchestrator.store().get(controller_path()).unwrap().to_string();
    assert_contains!(text, "import java.net.URLEncoder;\n");
    assert_contains!(text, "@RooWebScaffold(path = \"productses\", formBackingObject = Products.class)\n");

    let file = SourceFile::parse(&text).unwrap();
    let show = file.method("show").unwrap();
    assert_eq!(
        show.signature(),
        "public String show(@PathVariable(\"Id\") String Id, Model uiModel)"
    );

    let body = show.body.to_string();
    assert_contains!(body, "uiModel.addAttribute(\"products\", Products.findProducts(Id));");
    assert_not_contains!(body, "addDateTimeFormatPatterns");

    orchestrator.adapt_controller("Products").unwrap();
    assert_eq!(orchestrator.store().get(controller_path()).unwrap(), text);
}

#[test]
fn controller_with_date_patterns() {
    let aspect = layout().file_path(Package::Web, "ProductsController_Roo_Controller.aj");
    let store = orchestrator()
        .into_store()
        .with_file(controller_path(), CONTROLLER)
        .with_file(
            aspect,
            "privileged aspect ProductsController_Roo_Controller {\n\
             \tvoid ProductsController.addDateTimeFormatPatterns(Model uiModel) {\n\
             \t}\n\
             }\n",
        );
    let mut orchestrator = Orchestrator::new(store, layout());

    orchestrator.adapt_controller("Products").unwrap();

    let text = orchestrator.store().get(controller_path()).unwrap();
    assert_contains!(text, "\t\taddDateTimeFormatPatterns(uiModel);\n");
}

#[test]
fn missing_controller() {
    let mut orchestrator = orchestrator();
    let err = assert_err!(orchestrator.adapt_controller("Products"));
    assert!(matches!(err.source_error(), Some(SourceError::MissingFile { .. })));
}

#[test]
fn queries() {
    let mut orchestrator = orchestrator();
    orchestrator
        .define_endpoint(&EndpointDefinition::new("Contoso", "http://contoso.example/"), METADATA)
        .unwrap();
    orchestrator.materialize_entity(NAMESPACE, "Products", false).unwrap();
    orchestrator.add_remote_field("Products", "UnitPrice").unwrap();
    orchestrator.materialize_entity("Contoso", "Categories", false).unwrap();

    assert_eq!(orchestrator.endpoints().unwrap(), vec!["Contoso", "Northwind"]);
    assert_eq!(
        orchestrator.remote_entities(NAMESPACE).unwrap(),
        vec!["Products", "Categories", "Suppliers", "Notes"]
    );
    assert_eq!(orchestrator.gateway_classes().unwrap(), vec!["Categories", "Products"]);
    assert_eq!(
        orchestrator.available_fields("Products").unwrap(),
        vec!["ProductName", "ShippedAt", "Order"]
    );
    assert_eq!(
        orchestrator.namespace_of_class("Categories").unwrap().as_deref(),
        Some("Contoso")
    );
}

#[test]
fn queries_without_endpoints() {
    let orchestrator = Orchestrator::new(MemoryStore::new(), layout());
    assert_eq!(orchestrator.endpoints().unwrap(), Vec::<String>::new());
    assert_eq!(orchestrator.gateway_classes().unwrap(), Vec::<String>::new());

    let err = assert_err!(orchestrator.remote_entities(NAMESPACE));
    assert!(matches!(err.source_error(), Some(SourceError::MissingFile { .. })));
}
