mod config;
pub use config::Config;

pub mod cursor;
pub use cursor::RowCursor;

pub mod instance;
pub use instance::InstanceGraph;

pub mod resolve;
pub use resolve::Resolver;

pub mod viewer;
pub use viewer::{ResolvedTemplate, Session, SessionState, Viewer};

pub use mivot_core::{
    mapping, table, value, Error, MappingBlock, MappingIndex, MappingNode, Resource, Result,
    Table, TableIndex, Value,
};
