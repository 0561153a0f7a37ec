mod error;
pub use error::{Error, IntoError};

pub mod mapping;
pub use mapping::{MappingBlock, MappingIndex, MappingNode};

mod resource;
pub use resource::Resource;

pub mod table;
pub use table::{Table, TableIndex};

pub mod value;
pub use value::Value;

/// A Result type alias that uses the engine's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
