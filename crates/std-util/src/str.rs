/// Uppercases the first character and leaves the rest untouched, so
/// `productID` becomes `ProductID`.
pub fn capitalize(src: &str) -> String {
    let mut chars = src.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character and leaves the rest untouched.
pub fn uncapitalize(src: &str) -> String {
    let mut chars = src.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English plural of a class name. Falls back to the word itself when the
/// inflector has nothing to offer.
pub fn plural(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let plural = pluralizer::pluralize(word, 2, false);

    if plural.is_empty() {
        word.to_string()
    } else {
        plural
    }
}

/// Escapes `src` so it can sit between double quotes in a Java source file.
pub fn java_string(src: &str) -> String {
    let mut ret = String::with_capacity(src.len());

    for ch in src.chars() {
        match ch {
            '\\' => ret.push_str("\\\\"),
            '"' => ret.push_str("\\\""),
            '\n' => ret.push_str("\\n"),
            '\r' => ret.push_str("\\r"),
            '\t' => ret.push_str("\\t"),
            _ => ret.push(ch),
        }
    }

    ret
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn squash_whitespace(src: &str) -> String {
    src.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `level` tab characters.
pub fn tabs(level: usize) -> String {
    "\t".repeat(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn capitalize_keeps_tail() {
        assert_eq!(capitalize("productID"), "ProductID");
        assert_eq!(capitalize("remote_Id"), "Remote_Id");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn uncapitalize_keeps_tail() {
        assert_eq!(uncapitalize("SalesOrder"), "salesOrder");
        assert_eq!(uncapitalize("ID"), "iD");
    }

    #[test]
    fn java_string_escapes_quotes() {
        assert_eq!(java_string(r#"pa"ss\word"#), r#"pa\"ss\\word"#);
    }

    #[test]
    fn squash() {
        assert_eq!(squash_whitespace("  int   firstResult "), "int firstResult");
    }

    #[test]
    fn plural_of_empty() {
        assert_eq!(plural(""), "");
    }
}
