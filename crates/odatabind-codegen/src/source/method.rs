use super::{Anchor, Body};
use crate::{Error, Result};

use indexmap::IndexSet;
use log::debug;
use std_util::str::squash_whitespace;

/// A method declaration with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub comments: Vec<String>,
    pub annotations: Vec<String>,

    /// Modifiers, e.g. `public static`
    pub prefix: String,

    /// Empty for constructors
    pub return_type: String,

    pub name: String,

    /// Parameters as written, e.g. `int firstResult`
    pub params: Vec<String>,

    /// Exception list, without the `throws` keyword
    pub throws: Option<String>,

    pub body: Body,
}

impl MethodDecl {
    /// A `public void` method with no parameters and an empty body.
    pub fn new(name: impl Into<String>) -> MethodDecl {
        MethodDecl {
            comments: vec![],
            annotations: vec![],
            prefix: "public".to_string(),
            return_type: "void".to_string(),
            name: name.into(),
            params: vec![],
            throws: None,
            body: Body::new(),
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> MethodDecl {
        self.prefix = prefix.into();
        self
    }

    pub fn returns(mut self, return_type: impl Into<String>) -> MethodDecl {
        self.return_type = return_type.into();
        self
    }

    pub fn param(mut self, param: impl Into<String>) -> MethodDecl {
        self.params.push(param.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> MethodDecl {
        self.annotations.push(annotation.into());
        self
    }

    pub fn body(mut self, body: Body) -> MethodDecl {
        self.body = body;
        self
    }

    /// Everything up to, not including, the opening brace.
    pub fn signature(&self) -> String {
        let mut sig = String::new();

        for part in [&self.prefix, &self.return_type] {
            if !part.is_empty() {
                sig.push_str(part);
                sig.push(' ');
            }
        }

        sig.push_str(&self.name);
        sig.push('(');
        sig.push_str(&self.params.join(", "));
        sig.push(')');

        if let Some(throws) = &self.throws {
            sig.push_str(" throws ");
            sig.push_str(throws);
        }

        sig
    }

    /// Two declarations denote the same method when name and return type
    /// agree and each parameter list contains the other. Parameter order is
    /// ignored.
    pub fn matches(&self, other: &MethodDecl) -> bool {
        let params = |decl: &MethodDecl| -> IndexSet<String> {
            decl.params.iter().map(|p| squash_whitespace(p)).collect()
        };

        self.name == other.name
            && squash_whitespace(&self.return_type) == squash_whitespace(&other.return_type)
            && params(self) == params(other)
    }

    /// Splices `lines` at `anchor`, failing with `SourceError::AnchorMissing`
    /// when the body no longer carries the marker.
    pub fn splice<I, S>(&mut self, class: &str, anchor: Anchor, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.body.splice(anchor, lines) {
            return Err(Error::anchor_missing(class, &self.name, anchor.as_str()));
        }

        debug!("spliced into `{class}.{}` at `{anchor}`", self.name);
        Ok(())
    }
}
