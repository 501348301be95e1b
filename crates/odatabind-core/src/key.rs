//! Composite keys and local identifiers.
//!
//! A remote entity instance is identified by the values of its key fields.
//! The canonical key string follows the OData URI literal syntax:
//! `(42)` for a single key and `(OrderID=42,ProductID='x')` for composite
//! keys. The local identifier stored in generated classes is that key
//! string, percent-encoded with the same rules as Java's `URLEncoder`.

use crate::{EdmType, Error, Result};

use std::fmt;

/// One typed key value.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    SByte(i8),
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Single(f32),
    Double(f64),

    /// Decimal digits, kept as text so no precision is lost
    Decimal(String),
    Boolean(bool),
    String(String),
    Guid(String),
    DateTime(String),
    DateTimeOffset(String),
    Time(String),
}

/// The ordered `(remote field name, value)` pairs identifying an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeKey {
    parts: Vec<(String, KeyValue)>,
}

impl KeyValue {
    /// The remote type this value is written as.
    pub fn edm_type(&self) -> EdmType {
        match self {
            KeyValue::SByte(_) => EdmType::SByte,
            KeyValue::Byte(_) => EdmType::Byte,
            KeyValue::Int16(_) => EdmType::Int16,
            KeyValue::Int32(_) => EdmType::Int32,
            KeyValue::Int64(_) => EdmType::Int64,
            KeyValue::Single(_) => EdmType::Single,
            KeyValue::Double(_) => EdmType::Double,
            KeyValue::Decimal(_) => EdmType::Decimal,
            KeyValue::Boolean(_) => EdmType::Boolean,
            KeyValue::String(_) => EdmType::String,
            KeyValue::Guid(_) => EdmType::Guid,
            KeyValue::DateTime(_) => EdmType::DateTime,
            KeyValue::DateTimeOffset(_) => EdmType::DateTimeOffset,
            KeyValue::Time(_) => EdmType::Time,
        }
    }

    /// Parses a URI literal as a value of type `ty`.
    pub fn parse_literal(ty: &EdmType, literal: &str) -> Result<KeyValue> {
        let invalid = |reason: &str| Error::invalid_key(literal, reason);

        let value = match ty {
            EdmType::SByte => KeyValue::SByte(literal.parse().map_err(|_| invalid("expected SByte"))?),
            EdmType::Byte => KeyValue::Byte(literal.parse().map_err(|_| invalid("expected Byte"))?),
            EdmType::Int16 => KeyValue::Int16(literal.parse().map_err(|_| invalid("expected Int16"))?),
            EdmType::Int32 => KeyValue::Int32(literal.parse().map_err(|_| invalid("expected Int32"))?),
            EdmType::Int64 => {
                let digits = strip_suffix(literal, 'L').ok_or_else(|| invalid("expected Int64 literal"))?;
                KeyValue::Int64(digits.parse().map_err(|_| invalid("expected Int64"))?)
            }
            EdmType::Single => {
                let digits = strip_suffix(literal, 'f').ok_or_else(|| invalid("expected Single literal"))?;
                KeyValue::Single(finite(digits.parse().map_err(|_| invalid("expected Single"))?, literal)?)
            }
            EdmType::Double => {
                let digits = strip_suffix(literal, 'd').ok_or_else(|| invalid("expected Double literal"))?;
                KeyValue::Double(finite(digits.parse().map_err(|_| invalid("expected Double"))?, literal)?)
            }
            EdmType::Decimal => {
                let digits = strip_suffix(literal, 'M').ok_or_else(|| invalid("expected Decimal literal"))?;
                if !is_decimal(digits) {
                    return Err(invalid("expected Decimal"));
                }
                KeyValue::Decimal(digits.to_string())
            }
            EdmType::Boolean => match literal {
                "true" => KeyValue::Boolean(true),
                "false" => KeyValue::Boolean(false),
                _ => return Err(invalid("expected Boolean")),
            },
            EdmType::Guid => KeyValue::Guid(unquote(literal, "guid")?),
            EdmType::DateTime => KeyValue::DateTime(unquote(literal, "datetime")?),
            EdmType::DateTimeOffset => KeyValue::DateTimeOffset(unquote(literal, "datetimeoffset")?),
            EdmType::Time => KeyValue::Time(unquote(literal, "time")?),
            EdmType::String | EdmType::Other(_) => KeyValue::String(unquote(literal, "")?),
        };

        Ok(value)
    }

    fn validate(&self) -> Result<()> {
        match self {
            KeyValue::Single(v) if !v.is_finite() => {
                Err(Error::invalid_key(v.to_string(), "key values must be finite"))
            }
            KeyValue::Double(v) if !v.is_finite() => {
                Err(Error::invalid_key(v.to_string(), "key values must be finite"))
            }
            KeyValue::Decimal(v) if !is_decimal(v) => {
                Err(Error::invalid_key(v.as_str(), "not a decimal number"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for KeyValue {
    /// Formats the value as a URI literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::SByte(v) => write!(f, "{v}"),
            KeyValue::Byte(v) => write!(f, "{v}"),
            KeyValue::Int16(v) => write!(f, "{v}"),
            KeyValue::Int32(v) => write!(f, "{v}"),
            KeyValue::Int64(v) => write!(f, "{v}L"),
            KeyValue::Single(v) => write!(f, "{v}f"),
            KeyValue::Double(v) => write!(f, "{v}d"),
            KeyValue::Decimal(v) => write!(f, "{v}M"),
            KeyValue::Boolean(v) => write!(f, "{v}"),
            KeyValue::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            KeyValue::Guid(v) => write!(f, "guid'{}'", v.replace('\'', "''")),
            KeyValue::DateTime(v) => write!(f, "datetime'{}'", v.replace('\'', "''")),
            KeyValue::DateTimeOffset(v) => write!(f, "datetimeoffset'{}'", v.replace('\'', "''")),
            KeyValue::Time(v) => write!(f, "time'{}'", v.replace('\'', "''")),
        }
    }
}

impl CompositeKey {
    pub fn parts(&self) -> &[(String, KeyValue)] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&KeyValue> {
        self.parts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_key_string(self))
    }
}

/// Builds a key from ordered `(remote name, value)` bindings.
///
/// Rejects an empty binding list, repeated names, and values whose literal
/// form would not parse back to the same value.
pub fn build_key<N>(bindings: impl IntoIterator<Item = (N, KeyValue)>) -> Result<CompositeKey>
where
    N: Into<String>,
{
    let mut parts: Vec<(String, KeyValue)> = Vec::new();

    for (name, value) in bindings {
        let name = name.into();

        if name.is_empty() || name.contains(['=', ',', '(', ')', '\'']) {
            return Err(Error::invalid_key(name, "not a valid key field name"));
        }

        if parts.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::invalid_key(name, "key field bound twice"));
        }

        value.validate()?;
        parts.push((name, value));
    }

    if parts.is_empty() {
        return Err(Error::invalid_key("", "a key needs at least one field"));
    }

    Ok(CompositeKey { parts })
}

/// The canonical key string: `(lit)` for single keys, `(A=lit,B=lit)`
/// otherwise.
pub fn to_key_string(key: &CompositeKey) -> String {
    let mut dst = String::from("(");

    if let [(_, value)] = key.parts.as_slice() {
        dst.push_str(&value.to_string());
    } else {
        let mut s = "";
        for (name, value) in &key.parts {
            dst.push_str(s);
            dst.push_str(name);
            dst.push('=');
            dst.push_str(&value.to_string());
            s = ",";
        }
    }

    dst.push(')');
    dst
}

/// Parses a key string for an entity whose key fields are `shape`.
///
/// A single-field key may be written with or without its name. Composite
/// keys must name every field exactly once; parts are returned in the order
/// they appear in the string.
pub fn parse_key_string(shape: &[(String, EdmType)], input: &str) -> Result<CompositeKey> {
    let inner = input
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| Error::invalid_key(input, "expected a parenthesized key"))?;

    if shape.is_empty() {
        return Err(Error::invalid_key(input, "entity has no key fields"));
    }

    let segments = split_top_level(inner).map_err(|reason| Error::invalid_key(input, reason))?;

    let mut parts = Vec::with_capacity(segments.len());

    if let ([(name, ty)], [segment]) = (shape, segments.as_slice()) {
        let literal = match split_named(segment) {
            Some((given, literal)) if given == name => literal,
            Some(_) => return Err(Error::invalid_key(input, format!("expected key field `{name}`"))),
            None => *segment,
        };
        parts.push((name.clone(), KeyValue::parse_literal(ty, literal)?));
    } else {
        if segments.len() != shape.len() {
            return Err(Error::invalid_key(
                input,
                format!("expected {} key fields, found {}", shape.len(), segments.len()),
            ));
        }

        for segment in &segments {
            let (name, literal) = split_named(segment)
                .ok_or_else(|| Error::invalid_key(input, "composite key parts must be named"))?;

            let (_, ty) = shape
                .iter()
                .find(|(field, _)| field == name)
                .ok_or_else(|| Error::invalid_key(input, format!("unknown key field `{name}`")))?;

            parts.push((name.to_string(), KeyValue::parse_literal(ty, literal)?));
        }
    }

    build_key(parts).map_err(|err| err.context(Error::invalid_key(input, "malformed key")))
}

/// Percent-encodes an identifier with `application/x-www-form-urlencoded`
/// rules, matching `URLEncoder.encode(s, "UTF-8")` on the Java side.
pub fn encode_identifier(key_string: &str) -> String {
    url::form_urlencoded::byte_serialize(key_string.as_bytes()).collect()
}

/// Inverse of [`encode_identifier`].
///
/// Unlike a lenient form decoder, a `%` that is not followed by two hex
/// digits, or bytes that do not form UTF-8, fail with
/// `CodecError::InvalidEncoding`.
pub fn decode_identifier(identifier: &str) -> Result<String> {
    let bytes = identifier.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'+' => {
                decoded.push(b' ');
                pos += 1;
            }
            b'%' => {
                let hi = bytes.get(pos + 1).and_then(|b| hex(*b));
                let lo = bytes.get(pos + 2).and_then(|b| hex(*b));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => decoded.push(hi << 4 | lo),
                    _ => {
                        return Err(Error::invalid_encoding(
                            identifier,
                            pos,
                            "`%` must be followed by two hex digits",
                        ))
                    }
                }
                pos += 3;
            }
            b => {
                decoded.push(b);
                pos += 1;
            }
        }
    }

    String::from_utf8(decoded).map_err(|err| {
        Error::invalid_encoding(
            identifier,
            err.utf8_error().valid_up_to(),
            "decoded bytes are not UTF-8",
        )
    })
}

fn hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn strip_suffix(literal: &str, suffix: char) -> Option<&str> {
    literal
        .strip_suffix(suffix)
        .or_else(|| literal.strip_suffix(suffix.to_ascii_lowercase()))
        .or_else(|| literal.strip_suffix(suffix.to_ascii_uppercase()))
}

fn finite<T: Into<f64> + Copy>(value: T, literal: &str) -> Result<T> {
    if value.into().is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid_key(literal, "key values must be finite"))
    }
}

fn is_decimal(digits: &str) -> bool {
    let digits = digits.strip_prefix('-').unwrap_or(digits);
    let mut parts = digits.splitn(2, '.');
    let int = parts.next().unwrap_or_default();
    let frac = parts.next();

    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.map_or(true, |frac| !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()))
}

/// Strips `prefix'...'` quoting and un-doubles embedded quotes.
fn unquote(literal: &str, prefix: &str) -> Result<String> {
    let body = literal
        .get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &literal[prefix.len()..])
        .and_then(|rest| rest.strip_prefix('\''))
        .and_then(|rest| rest.strip_suffix('\''))
        .ok_or_else(|| Error::invalid_key(literal, format!("expected {prefix}'...' literal")))?;

    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\'' {
            if chars.next_if_eq(&'\'').is_none() {
                return Err(Error::invalid_key(literal, "unescaped quote in literal"));
            }
        }
        value.push(ch);
    }

    Ok(value)
}

/// Splits on commas that are not inside a quoted literal.
fn split_top_level(inner: &str) -> core::result::Result<Vec<&str>, &'static str> {
    let mut segments = Vec::new();
    let mut quoted = false;
    let mut start = 0;

    for (i, ch) in inner.char_indices() {
        match ch {
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                segments.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if quoted {
        return Err("unterminated quoted literal");
    }

    segments.push(&inner[start..]);

    if segments.iter().any(|segment| segment.is_empty()) {
        return Err("empty key part");
    }

    Ok(segments)
}

/// Splits `Name=literal`. Returns `None` when the `=` is inside a quoted
/// literal or absent.
fn split_named(segment: &str) -> Option<(&str, &str)> {
    let quote = segment.find('\'').unwrap_or(segment.len());
    let eq = segment.find('=')?;

    if eq < quote {
        Some((&segment[..eq], &segment[eq + 1..]))
    } else {
        None
    }
}
