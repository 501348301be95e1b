//! Per-field lines spliced into persistence method bodies.
//!
//! Lines are returned relative to their splice point; a leading tab means
//! one level deeper than the anchor.

use odatabind_core::schema::Field;
use odatabind_core::ty::cast_prefix;
use odatabind_core::EdmType;
use std_util::str::capitalize;

/// Declarations of the two Joda parsers the show code refers to.
pub fn formatters() -> [&'static str; 2] {
    [
        "DateTimeFormatter DTformatter = ISODateTimeFormat.dateHourMinuteSecondFraction();",
        "DateTimeFormatter DTOformatter = ISODateTimeFormat.dateTime();",
    ]
}

/// Copies remote property `field` of entity `source` into `target`.
pub fn show_code(field: &Field, target: &str, source: &str) -> Vec<String> {
    let remote = field.remote_name();
    let cap = capitalize(field.local_name());
    let value = format!("{source}.getProperty(\"{remote}\").getValue().toString()");

    let formatter = match field.ty {
        EdmType::DateTime => "DTformatter",
        EdmType::DateTimeOffset => "DTOformatter",
        _ => {
            let java = field.ty.java_type();
            let cast = cast_prefix(java.as_str());
            let close = if cast.is_empty() { "" } else { ")" };
            return vec![format!("{target}.set{cap}({cast}{value}{close});")];
        }
    };

    let lower = field.local_name().to_lowercase();
    vec![
        format!("DateTime {lower}DT = {formatter}.parseDateTime({value});"),
        format!("Date {lower}ConvertedDate = {lower}DT.toDate();"),
        format!("{target}.set{cap}({lower}ConvertedDate);"),
    ]
}

/// One `.properties(..)` link of a create or update request chain.
pub fn property_code(field: &Field) -> String {
    let ctor = field.ty.property_ctor();
    let getter = format!("get{}()", capitalize(field.local_name()));
    let value = if ctor.wraps_date_time() {
        format!("new DateTime({getter})")
    } else {
        getter
    };

    format!(
        ".properties(OProperties.{}(\"{}\", {value}))",
        ctor.as_str(),
        field.remote_name()
    )
}

/// Carries a local-only field over from the stored row `local`.
pub fn local_mapping(target: &str, local: &str, name: &str) -> String {
    let cap = capitalize(name);
    format!("{target}.set{cap}({local} == null ? null : {local}.get{cap}());")
}
