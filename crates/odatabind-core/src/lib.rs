mod error;
pub use error::{CodecError, Error, IntoError, SchemaError, SourceError};

pub mod key;
pub use key::{CompositeKey, KeyValue};

pub mod metadata;
pub use metadata::MetadataDocument;

pub mod schema;
pub use schema::EntitySet;

pub mod ty;
pub use ty::{EdmType, JavaType};

/// A Result type alias that uses odatabind's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
