//! Mapping between the remote (EDM) primitive types and the Java types the
//! generated classes use.
//!
//! The forward mapping is total: a tag the table does not know maps to
//! `String`. The reverse mapping, used when a local value is written back as
//! a remote property, is lossy. `long` and `double` both go back through the
//! `decimal` constructor.

use std::fmt;
use std::str::FromStr;

/// A remote primitive type as it appears in a `<fieldtype>` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdmType {
    SByte,
    Byte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    Boolean,
    String,
    Guid,
    DateTime,
    DateTimeOffset,
    Time,

    /// Any other tag, kept verbatim. Treated as a string everywhere.
    Other(std::string::String),
}

/// A Java type generated for a remote field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    String,
    Date,
}

/// The `OProperties` factory used to turn a local value into a remote
/// property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCtor {
    Byte,
    Int16,
    Int32,
    Decimal,
    Single,
    Boolean,
    String,
    DateTime,
    DateTimeOffset,
}

impl EdmType {
    /// Parses a type tag. Only the bare tags are recognized; anything else,
    /// namespaced tags included, is kept verbatim as [`EdmType::Other`].
    pub fn from_tag(tag: &str) -> EdmType {
        match tag {
            "SByte" => EdmType::SByte,
            "Byte" => EdmType::Byte,
            "Int16" => EdmType::Int16,
            "Int32" => EdmType::Int32,
            "Int64" => EdmType::Int64,
            "Single" => EdmType::Single,
            "Double" => EdmType::Double,
            "Decimal" => EdmType::Decimal,
            "Boolean" => EdmType::Boolean,
            "String" => EdmType::String,
            "Guid" => EdmType::Guid,
            "DateTime" => EdmType::DateTime,
            "DateTimeOffset" => EdmType::DateTimeOffset,
            "Time" => EdmType::Time,
            other => EdmType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EdmType::SByte => "SByte",
            EdmType::Byte => "Byte",
            EdmType::Int16 => "Int16",
            EdmType::Int32 => "Int32",
            EdmType::Int64 => "Int64",
            EdmType::Single => "Single",
            EdmType::Double => "Double",
            EdmType::Decimal => "Decimal",
            EdmType::Boolean => "Boolean",
            EdmType::String => "String",
            EdmType::Guid => "Guid",
            EdmType::DateTime => "DateTime",
            EdmType::DateTimeOffset => "DateTimeOffset",
            EdmType::Time => "Time",
            EdmType::Other(tag) => tag,
        }
    }

    /// The Java type a field of this remote type is declared with.
    pub fn java_type(&self) -> JavaType {
        match self {
            EdmType::SByte | EdmType::Byte => JavaType::Byte,
            EdmType::Int16 => JavaType::Short,
            EdmType::Int32 => JavaType::Int,
            EdmType::Int64 => JavaType::Long,
            EdmType::Single => JavaType::Float,
            EdmType::Double | EdmType::Decimal => JavaType::Double,
            EdmType::Boolean => JavaType::Boolean,
            EdmType::DateTime | EdmType::DateTimeOffset => JavaType::Date,
            EdmType::String | EdmType::Guid | EdmType::Time | EdmType::Other(_) => {
                JavaType::String
            }
        }
    }

    /// The constructor used when writing a field of this type back to the
    /// remote service. `DateTimeOffset` is the only type whose constructor
    /// is not derived from the Java type.
    pub fn property_ctor(&self) -> PropertyCtor {
        match self {
            EdmType::DateTimeOffset => PropertyCtor::DateTimeOffset,
            _ => PropertyCtor::for_local(self.java_type().as_str()),
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, EdmType::DateTime | EdmType::DateTimeOffset)
    }
}

impl FromStr for EdmType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EdmType::from_tag(s))
    }
}

impl fmt::Display for EdmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JavaType {
    pub fn as_str(self) -> &'static str {
        match self {
            JavaType::Byte => "byte",
            JavaType::Short => "short",
            JavaType::Int => "int",
            JavaType::Long => "long",
            JavaType::Float => "float",
            JavaType::Double => "double",
            JavaType::Boolean => "boolean",
            JavaType::String => "String",
            JavaType::Date => "Date",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, JavaType::Date)
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PropertyCtor {
    /// Reverse maps a local type name, compared case-insensitively.
    /// Unknown types fall back to `string`.
    pub fn for_local(local: &str) -> PropertyCtor {
        match local.to_ascii_lowercase().as_str() {
            "byte" => PropertyCtor::Byte,
            "short" => PropertyCtor::Int16,
            "long" | "double" => PropertyCtor::Decimal,
            "float" => PropertyCtor::Single,
            "int" => PropertyCtor::Int32,
            "boolean" => PropertyCtor::Boolean,
            "date" => PropertyCtor::DateTime,
            _ => PropertyCtor::String,
        }
    }

    /// Name of the `OProperties` factory method.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyCtor::Byte => "byte_",
            PropertyCtor::Int16 => "int16",
            PropertyCtor::Int32 => "int32",
            PropertyCtor::Decimal => "decimal",
            PropertyCtor::Single => "single",
            PropertyCtor::Boolean => "boolean_",
            PropertyCtor::String => "string",
            PropertyCtor::DateTime => "datetime",
            PropertyCtor::DateTimeOffset => "datetimeOffset",
        }
    }

    /// Whether the local value must be wrapped in a Joda `DateTime` before
    /// it is handed to the factory.
    pub fn wraps_date_time(self) -> bool {
        matches!(self, PropertyCtor::DateTimeOffset)
    }
}

/// The parse call that converts a property's string form into `local`.
///
/// Returns an empty string when no conversion is needed. The caller closes
/// the parenthesis.
pub fn cast_prefix(local: &str) -> &'static str {
    match local {
        "byte" | "Byte" => "Byte.parseByte(",
        "short" | "Short" => "Short.parseShort(",
        "long" | "Long" => "Long.parseLong(",
        "float" | "Float" => "Float.parseFloat(",
        "double" | "Double" => "Double.parseDouble(",
        "boolean" | "Boolean" => "Boolean.parseBoolean(",
        "int" | "Integer" => "Integer.parseInt(",
        _ => "",
    }
}
