use std::fmt;

/// A navigation property: a named path from one entity set to another
/// through an association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationProperty {
    /// Navigation path name, also the name of the generated member
    pub name: String,

    /// Name of the underlying association
    pub relationship: String,

    /// Both association ends, in document order
    pub ends: [AssociationEnd; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationEnd {
    /// Entity set at this end
    pub entity_type: String,

    pub multiplicity: Multiplicity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// `1`
    One,

    /// `0..1`
    ZeroOrOne,

    /// `*`
    Many,
}

/// The shape of an association as seen from the current entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl NavigationProperty {
    /// The end the current entity sits at. When neither end names the
    /// entity, the second end is assumed.
    pub fn local_end(&self, current: &str) -> &AssociationEnd {
        &self.ends[self.local_index(current)]
    }

    /// The end holding the referenced entity.
    pub fn target_end(&self, current: &str) -> &AssociationEnd {
        &self.ends[1 - self.local_index(current)]
    }

    /// Entity set on the other side of the association.
    pub fn target(&self, current: &str) -> &str {
        &self.target_end(current).entity_type
    }

    pub fn cardinality(&self, current: &str) -> Cardinality {
        Cardinality::from_ends(
            self.local_end(current).multiplicity.is_many(),
            self.target_end(current).multiplicity.is_many(),
        )
    }

    fn local_index(&self, current: &str) -> usize {
        if self.ends[0].entity_type == current {
            0
        } else {
            1
        }
    }
}

impl Multiplicity {
    /// Any symbol mentioning `1` is a single-valued end. Everything else is
    /// many.
    pub fn from_symbol(symbol: &str) -> Multiplicity {
        match symbol.trim() {
            "1" => Multiplicity::One,
            s if s.contains('1') => Multiplicity::ZeroOrOne,
            _ => Multiplicity::Many,
        }
    }

    pub fn is_many(self) -> bool {
        matches!(self, Multiplicity::Many)
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            Multiplicity::One => "1",
            Multiplicity::ZeroOrOne => "0..1",
            Multiplicity::Many => "*",
        }
    }
}

impl Cardinality {
    pub fn from_ends(local_many: bool, target_many: bool) -> Cardinality {
        match (local_many, target_many) {
            (false, false) => Cardinality::OneToOne,
            (false, true) => Cardinality::OneToMany,
            (true, false) => Cardinality::ManyToOne,
            (true, true) => Cardinality::ManyToMany,
        }
    }

    /// Parses a JPA association annotation name.
    pub fn from_annotation(name: &str) -> Option<Cardinality> {
        match name.trim_start_matches('@') {
            "OneToOne" => Some(Cardinality::OneToOne),
            "OneToMany" => Some(Cardinality::OneToMany),
            "ManyToOne" => Some(Cardinality::ManyToOne),
            "ManyToMany" => Some(Cardinality::ManyToMany),
            _ => None,
        }
    }

    /// The JPA annotation name, also the `javax.persistence` class imported
    /// for it.
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::OneToOne => "OneToOne",
            Cardinality::OneToMany => "OneToMany",
            Cardinality::ManyToOne => "ManyToOne",
            Cardinality::ManyToMany => "ManyToMany",
        }
    }

    /// True when the referenced side holds a single object.
    pub fn is_to_one(self) -> bool {
        matches!(self, Cardinality::OneToOne | Cardinality::ManyToOne)
    }

    /// True when the referenced side is a collection.
    pub fn is_to_many(self) -> bool {
        !self.is_to_one()
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
