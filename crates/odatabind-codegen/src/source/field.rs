/// A class-level field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Comment lines directly above the declaration
    pub comments: Vec<String>,

    /// Annotations, one per line, including the leading `@`
    pub annotations: Vec<String>,

    /// Modifiers, e.g. `private final static`
    pub prefix: String,

    pub ty: String,

    pub name: String,

    /// Initializer expression, without the `=`
    pub value: Option<String>,
}

impl FieldDecl {
    /// A `private` field without initializer.
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> FieldDecl {
        FieldDecl {
            comments: vec![],
            annotations: vec![],
            prefix: "private".to_string(),
            ty: ty.into(),
            name: name.into(),
            value: None,
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> FieldDecl {
        self.prefix = prefix.into();
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> FieldDecl {
        self.annotations.push(annotation.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> FieldDecl {
        self.value = Some(value.into());
        self
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.prefix.split_whitespace().any(|m| m == modifier)
    }

    /// Annotation names without `@` and arguments, e.g. `ManyToOne` for
    /// `@ManyToOne(fetch = FetchType.LAZY)`.
    pub fn annotation_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.annotations.iter().map(|annotation| {
            let name = annotation.trim_start_matches('@');
            let end = name.find(|c: char| c == '(' || c.is_whitespace()).unwrap_or(name.len());
            &name[..end]
        })
    }

    /// The declaration statement, e.g. `private int count = 0;`.
    pub fn declaration(&self) -> String {
        let mut decl = String::new();

        if !self.prefix.is_empty() {
            decl.push_str(&self.prefix);
            decl.push(' ');
        }

        decl.push_str(&self.ty);
        decl.push(' ');
        decl.push_str(&self.name);

        if let Some(value) = &self.value {
            decl.push_str(" = ");
            decl.push_str(value);
        }

        decl.push(';');
        decl
    }
}
