/// Java keywords and literals. Matched case-sensitively.
const JAVA: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// SQL reserved words. Matched case-insensitively, stored lowercase.
const SQL: &[&str] = &[
    "absolute", "action", "add", "all", "allocate", "alter", "and", "any", "are", "as", "asc",
    "assertion", "at", "authorization", "avg", "begin", "between", "bit", "bit_length", "both",
    "by", "call", "cascade", "cascaded", "case", "cast", "catalog", "char", "char_length",
    "character", "character_length", "check", "close", "coalesce", "collate", "collation",
    "column", "commit", "connect", "connection", "constraint", "constraints", "continue",
    "convert", "corresponding", "count", "create", "cross", "current", "current_date",
    "current_time", "current_timestamp", "current_user", "cursor", "date", "day", "deallocate",
    "dec", "decimal", "declare", "default", "deferrable", "deferred", "delete", "desc",
    "describe", "descriptor", "diagnostics", "disconnect", "distinct", "domain", "double",
    "drop", "else", "end", "escape", "except", "exception", "exec", "execute", "exists",
    "external", "extract", "false", "fetch", "first", "float", "for", "foreign", "found",
    "from", "full", "get", "global", "go", "goto", "grant", "group", "having", "hour",
    "identity", "immediate", "in", "index", "indicator", "initially", "inner", "input",
    "insensitive", "insert", "int", "integer", "intersect", "interval", "into", "is",
    "isolation", "join", "key", "language", "last", "leading", "left", "level", "like", "limit",
    "local", "lower", "match", "max", "min", "minute", "module", "month", "names", "national",
    "natural", "nchar", "next", "no", "not", "null", "nullif", "numeric", "octet_length", "of",
    "offset", "on", "only", "open", "option", "or", "order", "outer", "output", "overlaps",
    "pad", "partial", "position", "precision", "prepare", "preserve", "primary", "prior",
    "privileges", "procedure", "public", "read", "real", "references", "relative", "restrict",
    "revoke", "right", "rollback", "rows", "schema", "scroll", "second", "section", "select",
    "session", "session_user", "set", "size", "smallint", "some", "space", "sql", "sqlcode",
    "sqlerror", "sqlstate", "substring", "sum", "system_user", "table", "temporary", "then",
    "time", "timestamp", "timezone_hour", "timezone_minute", "to", "trailing", "transaction",
    "translate", "translation", "trim", "true", "union", "unique", "unknown", "update", "upper",
    "usage", "user", "using", "value", "values", "varchar", "varying", "view", "when",
    "whenever", "where", "with", "work", "write", "year", "zone",
];

/// Names the generated class already uses for its own members. Matched
/// against the upper-cased remote name.
const DISALLOWED: &[&str] = &["ID", "VERSION", "ENTITYMANAGER", "ODC"];

/// Returns `true` if a remote field name cannot be used verbatim as a Java
/// member of a generated entity class.
pub fn is_reserved(name: &str) -> bool {
    if JAVA.contains(&name) {
        return true;
    }

    let lower = name.to_ascii_lowercase();
    if SQL.contains(&lower.as_str()) {
        return true;
    }

    let upper = name.to_ascii_uppercase();
    DISALLOWED.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_keywords_are_case_sensitive() {
        assert!(is_reserved("package"));
        assert!(!is_reserved("Package"));
    }

    #[test]
    fn sql_and_disallowed_words_ignore_case() {
        assert!(is_reserved("USER"));
        assert!(is_reserved("Date"));
        assert!(is_reserved("entityManager"));
        assert!(is_reserved("Id"));
        assert!(!is_reserved("ProductID"));
        assert!(!is_reserved("Name"));
    }
}
