use std_util::str::{plural, uncapitalize};

/// Identifiers derived from a generated class name. The class is named after
/// its remote entity set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    class: String,
    lower: String,
    plural: String,
}

impl ClassNames {
    pub fn new(class: impl Into<String>) -> ClassNames {
        let class = class.into();
        ClassNames {
            lower: uncapitalize(&class),
            plural: plural(&class),
            class,
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// The class name with a lowercase first letter.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn find_all(&self) -> String {
        format!("findAll{}", self.plural)
    }

    pub fn find_entries(&self) -> String {
        format!("find{}Entries", self.class)
    }

    pub fn find(&self) -> String {
        format!("find{}", self.class)
    }

    pub fn count(&self) -> String {
        format!("count{}", self.plural)
    }

    pub fn get_remote(&self) -> String {
        format!("getRemote{}", self.class)
    }

    pub fn list_var(&self) -> String {
        format!("{}List", self.lower)
    }

    pub fn item_var(&self) -> String {
        format!("{}Item", self.lower)
    }

    pub fn instance_var(&self) -> String {
        format!("{}Instance", self.lower)
    }

    pub fn virtual_var(&self) -> String {
        format!("virtual{}", self.class)
    }

    pub fn local_var(&self) -> String {
        format!("local{}", self.class)
    }
}
