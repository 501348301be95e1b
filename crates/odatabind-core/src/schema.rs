//! The typed schema model built from a metadata document.
//!
//! These are plain values. An [`EntitySet`] is produced by the metadata
//! parser, owned by one synthesis session and never mutated afterwards.

mod entity;
pub use entity::EntitySet;

mod field;
pub use field::{Field, FieldName};

mod navigation;
pub use navigation::{AssociationEnd, Cardinality, Multiplicity, NavigationProperty};

mod reserved;
pub use reserved::is_reserved;
