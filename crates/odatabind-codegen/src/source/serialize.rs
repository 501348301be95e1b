use super::{FieldDecl, MethodDecl, SourceFile};

use std::fmt;

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.preamble {
            writeln!(f, "{line}")?;
        }

        if let Some(package) = &self.package {
            writeln!(f, "{package}")?;
            writeln!(f)?;
        }

        if !self.imports.is_empty() {
            for import in &self.imports {
                writeln!(f, "import {import};")?;
            }
            writeln!(f)?;
        }

        for line in &self.header {
            writeln!(f, "{line}")?;
        }

        if !self.fields.is_empty() {
            writeln!(f)?;
            for field in &self.fields {
                write_field(f, field)?;
            }
        }

        for method in &self.methods {
            writeln!(f)?;
            write_method(f, method)?;
        }

        if !self.trailing.is_empty() {
            writeln!(f)?;
            for comment in &self.trailing {
                writeln!(f, "\t{comment}")?;
            }
        }

        writeln!(f, "}}")
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &FieldDecl) -> fmt::Result {
    for line in field.comments.iter().chain(&field.annotations) {
        writeln!(f, "\t{line}")?;
    }

    writeln!(f, "\t{}", field.declaration())
}

fn write_method(f: &mut fmt::Formatter<'_>, method: &MethodDecl) -> fmt::Result {
    for line in method.comments.iter().chain(&method.annotations) {
        writeln!(f, "\t{line}")?;
    }

    writeln!(f, "\t{} {{", method.signature())?;
    write!(f, "{}", method.body)?;
    writeln!(f, "\t}}")
}

#[cfg(test)]
mod tests {
    use crate::source::{Anchor, Body, FieldDecl, MethodDecl, SourceFile};
    use pretty_assertions::assert_eq;

    #[test]
    fn layout() {
        let mut file = SourceFile::new(
            Some("package com.acme.domain;".into()),
            "Product",
            &["@RooJavaBean"],
        );
        file.add_import("java.util.List");
        file.upsert_field(
            FieldDecl::new("String", "Id")
                .annotation("@Id")
                .annotation("@Column(name = \"id\")"),
        );
        file.upsert_field(FieldDecl::new("int", "ProductID"));

        let mut body = Body::new();
        body.line(2, "return this.ProductID;").anchor(2, Anchor::Mapping);
        file.upsert_method(MethodDecl::new("getProductID").returns("int").body(body), true);
        file.upsert_method(MethodDecl::new("localPersist").prefix("private").annotation("@Transactional"), true);

        assert_eq!(
            file.to_string(),
            "package com.acme.domain;\n\
             \n\
             import java.util.List;\n\
             \n\
             @RooJavaBean\n\
             public class Product {\n\
             \n\
             \t@Id\n\
             \t@Column(name = \"id\")\n\
             \tprivate String Id;\n\
             \tprivate int ProductID;\n\
             \n\
             \tpublic int getProductID() {\n\
             \t\treturn this.ProductID;\n\
             \t\t// @anchor mapping\n\
             \t}\n\
             \n\
             \t@Transactional\n\
             \tprivate void localPersist() {\n\
             \t}\n\
             }\n"
        );
    }
}
