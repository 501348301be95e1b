use super::{Body, FieldDecl, MethodDecl, SourceFile};
use crate::{Error, Result};

use indexmap::IndexSet;
use std_util::str::squash_whitespace;

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "synchronized",
    "native",
    "strictfp",
    "transient",
    "volatile",
    "default",
];

pub(super) fn parse(text: &str) -> Result<SourceFile> {
    let mut cursor = Cursor::new(text);

    let mut preamble = vec![];
    let mut package = None;
    let mut imports = IndexSet::new();
    let mut header: Vec<String> = vec![];

    let class = loop {
        let line_no = cursor.line_no();
        let Some(line) = cursor.next() else {
            return Err(Error::unparseable(line_no, "no class declaration found"));
        };
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if header.is_empty() {
            if let Some(rest) = trimmed.strip_prefix("package ") {
                if package.is_some() || !imports.is_empty() {
                    return Err(Error::unparseable(line_no, "unexpected package declaration"));
                }
                if !rest.trim_end().ends_with(';') {
                    return Err(Error::unparseable(line_no, "package declaration must end with `;`"));
                }
                package = Some(trimmed.to_string());
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix("import ") {
                let name = rest
                    .trim()
                    .strip_suffix(';')
                    .ok_or_else(|| Error::unparseable(line_no, "import must end with `;`"))?;
                imports.insert(squash_whitespace(name));
                continue;
            }

            if package.is_none() && imports.is_empty() && is_comment(trimmed) {
                preamble.push(line.trim_end().to_string());
                continue;
            }
        }

        header.push(line.trim_end().to_string());

        if let Some(class) = class_name(trimmed) {
            break class;
        }
    };

    let mut fields = vec![];
    let mut methods = vec![];
    let mut comments = vec![];

    loop {
        let line_no = cursor.line_no();
        let Some(line) = cursor.next() else {
            return Err(Error::unparseable(line_no, "class is not closed"));
        };
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        // Code may follow a block comment on the line that closes it.
        let code = if trimmed.starts_with("/*") {
            match read_block_comment(&mut cursor, trimmed, &mut comments, line_no)? {
                Some(code) => code,
                None => continue,
            }
        } else {
            trimmed
        };

        if code == "}" {
            break;
        }

        if code.starts_with("//") {
            comments.push(code.to_string());
            continue;
        }

        let mut chunk = code.to_string();

        loop {
            match terminator(&chunk) {
                Some(Terminator::Field(end)) => {
                    if !is_blank_or_comment(&chunk[end + 1..]) {
                        return Err(Error::unparseable(
                            line_no,
                            "one declaration per line is supported",
                        ));
                    }
                    let mut field = parse_field(&chunk[..end], line_no)?;
                    field.comments = std::mem::take(&mut comments);
                    fields.push(field);
                    break;
                }
                Some(Terminator::Method(open)) => {
                    let mut method = parse_signature(&chunk[..open], line_no)?;
                    method.comments = std::mem::take(&mut comments);
                    method.body = read_body(&mut cursor, &chunk[open + 1..], &method.name, line_no)?;
                    methods.push(method);
                    break;
                }
                None => {
                    let next_no = cursor.line_no();
                    let Some(next) = cursor.next() else {
                        return Err(Error::unparseable(next_no, "unterminated declaration"));
                    };
                    let next = next.trim();

                    if next.starts_with("//") {
                        comments.push(next.to_string());
                    } else if !next.is_empty() {
                        chunk.push('\n');
                        chunk.push_str(next);
                    }
                }
            }
        }
    }

    while let Some(line) = cursor.next() {
        if !line.trim().is_empty() {
            return Err(Error::unparseable(
                cursor.line_no() - 1,
                "content after the end of the class",
            ));
        }
    }

    Ok(SourceFile {
        preamble,
        package,
        imports,
        header,
        class,
        fields,
        methods,
        trailing: comments,
    })
}

struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Cursor<'a> {
        Cursor {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// 1-based number of the line `next` returns.
    fn line_no(&self) -> usize {
        self.pos + 1
    }

    fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }
}

enum Terminator {
    /// Byte offset of the `;` ending a field declaration
    Field(usize),

    /// Byte offset of the `{` opening a method body
    Method(usize),
}

fn terminator(chunk: &str) -> Option<Terminator> {
    let mut paren = 0i32;
    let mut brace = 0i32;
    let mut assigned = false;

    for (i, c) in Scanner::default().code(chunk) {
        match c {
            '(' => paren += 1,
            ')' => paren -= 1,
            '=' if paren == 0 && brace == 0 => assigned = true,
            '{' if paren == 0 && !assigned => return Some(Terminator::Method(i)),
            '{' => brace += 1,
            '}' => brace -= 1,
            ';' if paren == 0 && brace == 0 => return Some(Terminator::Field(i)),
            _ => {}
        }
    }

    None
}

fn parse_field(text: &str, line_no: usize) -> Result<FieldDecl> {
    let (annotations, rest) = split_annotations(text, line_no)?;

    let (lhs, value) = match find_code(rest, '=') {
        Some(eq) => (&rest[..eq], Some(one_line(&rest[eq + 1..]))),
        None => (rest, None),
    };

    let mut tokens = type_tokens(lhs);
    let (Some(name), Some(ty)) = (tokens.pop(), tokens.pop()) else {
        return Err(Error::unparseable(line_no, "expected `<type> <name>` in field declaration"));
    };

    Ok(FieldDecl {
        comments: vec![],
        annotations,
        prefix: tokens.join(" "),
        ty,
        name,
        value,
    })
}

fn parse_signature(text: &str, line_no: usize) -> Result<MethodDecl> {
    let (annotations, rest) = split_annotations(text, line_no)?;

    let open = find_code(rest, '(').ok_or_else(|| {
        Error::unparseable(line_no, "expected a method; nested types and initializer blocks are not supported")
    })?;
    let close = matching_paren(rest, open)
        .ok_or_else(|| Error::unparseable(line_no, "unbalanced parameter list"))?;

    let mut tokens = type_tokens(&rest[..open]);
    let Some(name) = tokens.pop() else {
        return Err(Error::unparseable(line_no, "method has no name"));
    };

    let return_type = match tokens.last() {
        Some(last) if !MODIFIERS.contains(&last.as_str()) => tokens.pop().unwrap_or_default(),
        _ => String::new(),
    };

    let params = split_params(&rest[open + 1..close]);

    let after = rest[close + 1..].trim();
    let throws = if after.is_empty() {
        None
    } else {
        let list = after
            .strip_prefix("throws")
            .filter(|list| list.starts_with(char::is_whitespace))
            .ok_or_else(|| Error::unparseable(line_no, "unexpected text after parameter list"))?;
        Some(squash_whitespace(list))
    };

    Ok(MethodDecl {
        comments: vec![],
        annotations,
        prefix: tokens.join(" "),
        return_type,
        name,
        params,
        throws,
        body: Body::new(),
    })
}

/// Reads method body lines up to the brace closing the method. `rest` is
/// whatever followed the opening brace on the signature line.
fn read_body(cursor: &mut Cursor<'_>, rest: &str, method: &str, line_no: usize) -> Result<Body> {
    let mut scanner = Scanner::default();
    let rest = rest.trim();

    if !rest.is_empty() {
        // Single-line body, e.g. `{ return id; }`
        let mut depth = 1;
        for (i, c) in scanner.code(rest) {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                if !is_blank_or_comment(&rest[i + 1..]) {
                    return Err(Error::unparseable(line_no, format!("unexpected text after body of `{method}`")));
                }
                let inner = rest[..i].trim();
                let mut body = Body::new();
                if !inner.is_empty() {
                    body.line(2, inner);
                }
                return Ok(body);
            }
        }

        return Err(Error::unparseable(
            line_no,
            format!("body of `{method}` must start on the line after `{{`"),
        ));
    }

    let mut depth = 1;
    let mut lines = vec![];

    loop {
        let current = cursor.line_no();
        let Some(line) = cursor.next() else {
            return Err(Error::unparseable(current, format!("body of `{method}` is not closed")));
        };

        for (_, c) in scanner.code(line) {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }

            if depth == 0 {
                if line.trim() != "}" {
                    return Err(Error::unparseable(
                        current,
                        format!("closing brace of `{method}` must stand on its own line"),
                    ));
                }
                return Ok(Body::from_lines(lines));
            }
        }

        lines.push(line.trim_end());
    }
}

/// Collects a block comment starting at `first`. Returns whatever follows
/// the closing `*/` on its line, if anything.
fn read_block_comment<'a>(
    cursor: &mut Cursor<'a>,
    first: &'a str,
    comments: &mut Vec<String>,
    line_no: usize,
) -> Result<Option<&'a str>> {
    let mut line = first;
    let mut current = line_no;
    let mut from = 2;

    loop {
        if let Some(end) = line[from..].find("*/") {
            let end = from + end + 2;
            comments.push(line[..end].trim().to_string());

            let rest = line[end..].trim();
            if rest.starts_with("/*") {
                return Err(Error::unparseable(current, "one block comment per line is supported"));
            }
            return Ok(Some(rest).filter(|rest| !rest.is_empty()));
        }

        comments.push(line.trim().to_string());

        current = cursor.line_no();
        line = cursor
            .next()
            .ok_or_else(|| Error::unparseable(line_no, "unterminated block comment"))?
            .trim();
        from = 0;
    }
}

/// Strips leading annotations, returning them one per entry.
fn split_annotations(text: &str, line_no: usize) -> Result<(Vec<String>, &str)> {
    let mut annotations = vec![];
    let mut rest = text.trim_start();

    while rest.starts_with('@') {
        let mut end = rest[1..]
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .map_or(rest.len(), |i| i + 1);

        let args = rest[end..].trim_start();
        if args.starts_with('(') {
            let open = rest.len() - args.len();
            let close = matching_paren(rest, open)
                .ok_or_else(|| Error::unparseable(line_no, "unbalanced annotation arguments"))?;
            end = close + 1;
        }

        annotations.push(one_line(&rest[..end]));
        rest = rest[end..].trim_start();
    }

    Ok((annotations, rest))
}

/// Splits a declaration into whitespace separated tokens, keeping generic
/// arguments such as `Map<String, Integer>` in one token.
fn type_tokens(text: &str) -> Vec<String> {
    let mut tokens = vec![];
    let mut current = String::new();
    let mut angle = 0i32;

    for c in text.chars() {
        match c {
            '<' => angle += 1,
            '>' => angle -= 1,
            _ => {}
        }

        if c.is_whitespace() {
            if angle > 0 {
                if !current.ends_with(' ') {
                    current.push(' ');
                }
            } else if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn split_params(text: &str) -> Vec<String> {
    let mut params = vec![];
    let mut start = 0;
    let mut depth = 0i32;

    for (i, c) in Scanner::default().code(text) {
        match c {
            '(' | '<' => depth += 1,
            ')' | '>' => depth -= 1,
            ',' if depth == 0 => {
                params.push(squash_whitespace(&text[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }

    params.push(squash_whitespace(&text[start..]));
    params.retain(|param| !param.is_empty());
    params
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0i32;

    for (i, c) in Scanner::default().code(&text[open..]) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }

    None
}

/// First occurrence of `needle` outside literals, comments and parentheses.
fn find_code(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0i32;

    for (i, c) in Scanner::default().code(text) {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            c if c == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }

    None
}

fn class_name(line: &str) -> Option<String> {
    if !line.ends_with('{') {
        return None;
    }

    let mut tokens = line.split_whitespace();
    tokens.find(|token| *token == "class")?;

    let name = tokens.next()?;
    let end = name.find(|c: char| c == '<' || c == '{').unwrap_or(name.len());
    Some(name[..end].to_string()).filter(|name| !name.is_empty())
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

fn is_blank_or_comment(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text.starts_with("//")
}

fn one_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Yields the characters of Java source that are code: string and char
/// literals and comments are skipped. Block comment state carries over
/// between calls so a body can be scanned line by line.
#[derive(Default)]
struct Scanner {
    in_block: bool,
}

impl Scanner {
    fn code(&mut self, text: &str) -> Vec<(usize, char)> {
        let mut out = vec![];
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if self.in_block {
                if c == '*' && chars.next_if(|&(_, c)| c == '/').is_some() {
                    self.in_block = false;
                }
                continue;
            }

            match c {
                '/' if chars.next_if(|&(_, c)| c == '/').is_some() => {
                    // Line comment, up to the end of this line.
                    for (_, c) in chars.by_ref() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                '/' if chars.next_if(|&(_, c)| c == '*').is_some() => self.in_block = true,
                '"' | '\'' => {
                    while let Some((_, inner)) = chars.next() {
                        match inner {
                            '\\' => {
                                chars.next();
                            }
                            inner if inner == c => break,
                            _ => {}
                        }
                    }
                }
                _ => out.push((i, c)),
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Anchor, Segment};
    use pretty_assertions::assert_eq;

    const CONTROLLER: &str = r#"package com.acme.web;

import com.acme.domain.Product;
import org.springframework.roo.addon.web.mvc.controller.scaffold.RooWebScaffold;

// Scaffolded by Roo
@RequestMapping("/products")
@Controller
@RooWebScaffold(path = "products", formBackingObject = Product.class)
public class ProductController {
}
"#;

    #[test]
    fn header_and_empty_class() {
        let file = parse(CONTROLLER).unwrap();
        assert_eq!(file.class_name(), "ProductController");
        assert_eq!(file.package(), Some("package com.acme.web;"));
        assert_eq!(file.imports().len(), 2);
        assert_eq!(file.header().len(), 5);
        assert!(file.fields().is_empty());
        assert!(file.methods().is_empty());
        assert_eq!(file.to_string(), CONTROLLER);
    }

    #[test]
    fn hand_edited_members() {
        let text = r#"package com.acme.domain;

public class Product {

    /** Cached label. */
    @Transient
    private transient String label = "a; b { c";

    private Map<String, Integer> counts = new HashMap<String, Integer>();

    @Column(name = "id",
            nullable = false)
    private String Id;

    public Product() {}

    public String getLabel() { return label; }

    // Recomputes the label.
    public static List<Product> findAll(
            int first,
            @RequestParam("max") int max) throws IOException {
        if (first > 0) {
            String s = "}";
        }
        // @anchor mapping
        return null;
    }
}
"#;
        let file = parse(text).unwrap();

        let label = file.field("label").unwrap();
        assert_eq!(label.comments, vec!["/** Cached label. */"]);
        assert_eq!(label.annotations, vec!["@Transient"]);
        assert_eq!(label.prefix, "private transient");
        assert_eq!(label.value.as_deref(), Some("\"a; b { c\""));

        let counts = file.field("counts").unwrap();
        assert_eq!(counts.ty, "Map<String, Integer>");
        assert_eq!(counts.value.as_deref(), Some("new HashMap<String, Integer>()"));

        let id = file.field("Id").unwrap();
        assert_eq!(id.annotations, vec!["@Column(name = \"id\", nullable = false)"]);

        let ctor = &file.methods()[0];
        assert_eq!(ctor.name, "Product");
        assert_eq!(ctor.return_type, "");
        assert!(ctor.body.is_empty());

        let get = file.method("getLabel").unwrap();
        assert_eq!(get.body.to_string(), "\t\treturn label;\n");

        let find = file.method("findAll").unwrap();
        assert_eq!(find.comments, vec!["// Recomputes the label."]);
        assert_eq!(find.prefix, "public static");
        assert_eq!(find.return_type, "List<Product>");
        assert_eq!(find.params, vec!["int first", "@RequestParam(\"max\") int max"]);
        assert_eq!(find.throws.as_deref(), Some("IOException"));
        assert_eq!(
            find.body.segments()[3],
            Segment::Anchor {
                anchor: Anchor::Mapping,
                indent: "        ".into()
            }
        );
    }

    #[test]
    fn declaration_after_block_comment() {
        let text = "public class Foo {\n /** doc */ private int hand;\n private int other;\n /*\n  * more\n  */ private String tail = \"*/\";\n /* x */ }\n";
        let mut file = parse(text).unwrap();

        let names: Vec<_> = file.fields().iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["hand", "other", "tail"]);

        assert_eq!(file.field("hand").unwrap().comments, vec!["/** doc */"]);
        assert!(file.field("other").unwrap().comments.is_empty());
        assert_eq!(file.field("tail").unwrap().comments, vec!["/*", "* more", "*/"]);
        assert_eq!(file.field("tail").unwrap().value.as_deref(), Some("\"*/\""));
        assert_eq!(file.trailing, vec!["/* x */"]);

        assert!(!file.upsert_field(FieldDecl::new("int", "hand")));
        assert_eq!(file.fields().len(), 3);

        let reparsed = parse(&file.to_string()).unwrap();
        assert_eq!(reparsed, file);
    }

    #[test]
    fn two_block_comments_on_one_line() {
        let err = parse("public class A {\n\t/* a */ /* b */ int x;\n}\n").unwrap_err();
        assert!(matches!(
            err.source_error(),
            Some(odatabind_core::SourceError::Unparseable { line: 2, .. })
        ));
    }

    #[test]
    fn generated_text_round_trips() {
        let mut file = SourceFile::new(Some("package a;".into()), "A", &["@RooJavaBean"]);
        file.add_import("java.util.List");
        file.upsert_field(FieldDecl::new("int", "x").annotation("@Id"));
        let mut body = Body::new();
        body.line(2, "if (x > 0) {").line(3, "x--;").line(2, "}").blank().anchor(2, Anchor::Links);
        file.upsert_method(MethodDecl::new("run").param("int y").body(body), true);

        let text = file.to_string();
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed, file);
        assert_eq!(reparsed.to_string(), text);
    }

    #[test]
    fn unparseable_shapes() {
        let cases = [
            ("public class A {\n\tstatic {\n\t}\n}\n", 2),
            ("public class A {\n\tpublic void f() {\n\t\tx();\n\t} int y;\n}\n", 4),
            ("public class A {\n\tpublic void f() { x();\n\t}\n}\n", 2),
            ("public class A {\n\tint y;\n", 3),
            ("package a;\n", 2),
            ("public class A {\n}\nclass B {\n}\n", 3),
        ];

        for (text, line) in cases {
            let err = parse(text).unwrap_err();
            match err.source_error() {
                Some(odatabind_core::SourceError::Unparseable { line: actual, .. }) => {
                    assert_eq!(*actual, line, "{text}")
                }
                other => panic!("expected Unparseable for {text:?}, got {other:?}"),
            }
        }
    }
}
