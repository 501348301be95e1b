mod layout;
pub use layout::{Package, ProjectLayout};

mod names;
pub use names::ClassNames;

pub mod orchestrator;
pub use orchestrator::{CsrfMode, EndpointDefinition, Orchestrator, Stage};

pub mod source;
pub use source::{Anchor, Body, FieldDecl, MethodDecl, SourceFile};

mod store;
pub use store::{glob_matcher, MemoryStore, SourceStore};

pub mod synth;

pub mod weave;
pub use weave::Relationship;

pub use odatabind_core::{Error, Result};
