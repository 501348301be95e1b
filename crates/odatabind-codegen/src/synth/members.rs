use crate::{Body, FieldDecl, MethodDecl, SourceFile};
use odatabind_core::schema::Field;
use std_util::str::capitalize;

pub const CONNECTOR_FIELD: &str = "odc";
pub const ID_FIELD: &str = "Id";

const TEMPORAL: &str = "@Temporal(TemporalType.TIMESTAMP)";
const DATE_FORMAT: &str = "@DateTimeFormat(style=\"M-\")";

/// `private final static ODataConnectivity odc = new <Namespace>();`
pub fn connector_field(namespace: &str) -> FieldDecl {
    FieldDecl::new("ODataConnectivity", CONNECTOR_FIELD)
        .prefix("private final static")
        .value(format!("new {namespace}()"))
}

/// The synthetic local key holding the encoded remote key string.
pub fn id_field() -> FieldDecl {
    FieldDecl::new("String", ID_FIELD)
        .annotation("@Id")
        .annotation("@Column(name = \"id\")")
}

pub fn remote_field(field: &Field) -> FieldDecl {
    let java = field.ty.java_type();
    let decl = FieldDecl::new(java.as_str(), field.local_name());

    if java.is_date() {
        decl.annotation(TEMPORAL).annotation(DATE_FORMAT)
    } else {
        decl
    }
}

/// A field that only exists locally. `java_type` may be qualified; the
/// declaration uses the simple name.
pub fn local_field(name: &str, java_type: &str) -> FieldDecl {
    let ty = local_java_type(java_type);
    let lower = ty.to_lowercase();
    let decl = FieldDecl::new(ty, name);

    if lower.contains("date") || lower.contains("calendar") {
        decl.annotation(TEMPORAL).annotation(DATE_FORMAT)
    } else {
        decl
    }
}

/// `java.util.Date` -> `Date`
pub fn local_java_type(java_type: &str) -> &str {
    java_type
        .rsplit_once('.')
        .map_or(java_type, |(_, simple)| simple)
        .trim()
}

/// Getter and setter of field `name`.
pub fn accessors(name: &str, ty: &str) -> [MethodDecl; 2] {
    let cap = capitalize(name);

    let mut get = Body::new();
    get.line(2, format!("return this.{name};"));

    let mut set = Body::new();
    set.line(2, format!("this.{name} = {name};"));

    [
        MethodDecl::new(format!("get{cap}")).returns(ty).body(get),
        MethodDecl::new(format!("set{cap}"))
            .param(format!("{ty} {name}"))
            .body(set),
    ]
}

/// The endpoint a generated class is bound to, read from its connector
/// field's initializer.
pub fn namespace_of(file: &SourceFile) -> Option<String> {
    let value = file.field(CONNECTOR_FIELD)?.value.as_deref()?;
    let last = value.split_whitespace().last()?;
    let namespace = last.strip_suffix("()").unwrap_or(last);

    if namespace.is_empty() {
        None
    } else {
        Some(namespace.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odatabind_core::EdmType;
    use pretty_assertions::assert_eq;

    #[test]
    fn date_fields_are_temporal() {
        let field = remote_field(&Field::new("OrderDate", EdmType::DateTimeOffset, false));
        assert_eq!(field.declaration(), "private Date OrderDate;");
        assert_eq!(field.annotations, vec![TEMPORAL, DATE_FORMAT]);

        let field = remote_field(&Field::new("Name", EdmType::String, false));
        assert!(field.annotations.is_empty());
    }

    #[test]
    fn renamed_field_uses_local_name() {
        let field = remote_field(&Field::new("Order", EdmType::Int32, false));
        assert_eq!(field.declaration(), "private int remote_Order;");
    }

    #[test]
    fn local_fields() {
        let field = local_field("due", "java.util.Calendar");
        assert_eq!(field.ty, "Calendar");
        assert_eq!(field.annotations.len(), 2);

        let field = local_field("notes", "String");
        assert_eq!(field.declaration(), "private String notes;");
        assert!(field.annotations.is_empty());
    }

    #[test]
    fn accessor_shapes() {
        let [get, set] = accessors("remote_Order", "int");
        assert_eq!(get.signature(), "public int getRemote_Order()");
        assert_eq!(get.body.to_string(), "\t\treturn this.remote_Order;\n");
        assert_eq!(set.signature(), "public void setRemote_Order(int remote_Order)");
        assert_eq!(set.body.to_string(), "\t\tthis.remote_Order = remote_Order;\n");
    }

    #[test]
    fn namespace_from_connector() {
        let mut file = SourceFile::new(None, "Product", &[]);
        assert_eq!(namespace_of(&file), None);

        file.upsert_field(connector_field("Northwind"));
        assert_eq!(namespace_of(&file).as_deref(), Some("Northwind"));
    }
}
