//! In-memory model of one generated Java source file.
//!
//! The model is deliberately shallow. It knows the package line, the import
//! list, the class header, and the class's fields and methods; method bodies
//! are kept as lines. [`SourceFile::parse`] reads back exactly the shapes
//! [`SourceFile`]'s `Display` implementation writes, plus the usual
//! hand-edited variations of them (comments, multi-line signatures, blank
//! lines). Anything else is rejected as `SourceError::Unparseable`.

mod body;
pub use body::{Anchor, Body, Segment};

mod field;
pub use field::FieldDecl;

mod method;
pub use method::MethodDecl;

mod parse;
mod serialize;

use crate::{Error, Result};

use indexmap::IndexSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Comment lines above the package declaration
    preamble: Vec<String>,

    /// The full `package ...;` line
    package: Option<String>,

    /// Imported names, without `import` and `;`
    imports: IndexSet<String>,

    /// Class annotations and the class declaration line
    header: Vec<String>,

    class: String,

    fields: Vec<FieldDecl>,

    methods: Vec<MethodDecl>,

    /// Comments after the last member
    trailing: Vec<String>,
}

impl SourceFile {
    /// An empty `public class` carrying `annotations`.
    pub fn new(package: Option<String>, class: impl Into<String>, annotations: &[&str]) -> SourceFile {
        let class = class.into();

        let mut header: Vec<String> = annotations.iter().map(|a| a.to_string()).collect();
        header.push(format!("public class {class} {{"));

        SourceFile {
            preamble: vec![],
            package,
            imports: IndexSet::new(),
            header,
            class,
            fields: vec![],
            methods: vec![],
            trailing: vec![],
        }
    }

    /// Reads a file back into the model.
    pub fn parse(text: &str) -> Result<SourceFile> {
        parse::parse(text)
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn imports(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.imports.iter().map(String::as_str)
    }

    pub fn has_import(&self, name: &str) -> bool {
        self.imports.contains(name)
    }

    /// Accretes an import. Existing imports keep their position.
    pub fn add_import(&mut self, name: impl Into<String>) -> bool {
        self.imports.insert(name.into())
    }

    pub fn add_imports<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_import(name);
        }
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_exists(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Appends the field unless one with the same name exists. Existing
    /// fields are never overwritten. Returns `true` if the field was added.
    pub fn upsert_field(&mut self, decl: FieldDecl) -> bool {
        if self.field_exists(&decl.name) {
            return false;
        }

        self.fields.push(decl);
        true
    }

    /// Like [`upsert_field`](Self::upsert_field) but fails with
    /// `SourceError::FieldExists` instead of skipping.
    pub fn insert_field(&mut self, decl: FieldDecl) -> Result<()> {
        if self.field_exists(&decl.name) {
            return Err(Error::field_exists(&self.class, &decl.name));
        }

        self.fields.push(decl);
        Ok(())
    }

    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    /// First method called `name`.
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|method| method.name == name)
    }

    pub fn method_mut(&mut self, name: &str) -> Option<&mut MethodDecl> {
        self.methods.iter_mut().find(|method| method.name == name)
    }

    /// Adds `decl`, or replaces the matching method when `overwrite` is set.
    ///
    /// A replaced method stays where it was and keeps its comments. New
    /// methods are appended before the closing brace. Returns `true` if the
    /// file changed.
    pub fn upsert_method(&mut self, mut decl: MethodDecl, overwrite: bool) -> bool {
        match self.methods.iter_mut().find(|method| method.matches(&decl)) {
            Some(_) if !overwrite => false,
            Some(existing) => {
                if decl.comments.is_empty() {
                    decl.comments = std::mem::take(&mut existing.comments);
                }
                *existing = decl;
                true
            }
            None => {
                self.methods.push(decl);
                true
            }
        }
    }

    /// Adds `decl`, failing with `SourceError::MethodExists` if a matching
    /// method is present.
    pub fn insert_method(&mut self, decl: MethodDecl) -> Result<()> {
        if self.methods.iter().any(|method| method.matches(&decl)) {
            return Err(Error::method_exists(&self.class, decl.signature()));
        }

        self.methods.push(decl);
        Ok(())
    }
}
