mod attribute;
pub use attribute::{Attribute, ValueSource};

mod block;
pub use block::{MappingBlock, ModelDecl, Section};

mod collection;
pub use collection::Collection;

mod index;
pub use index::{LookupScope, MappingIndex};

mod instance;
pub use instance::{Instance, PrimaryKey};

mod join;
pub use join::{Join, JoinCondition};

mod node;
pub use node::{Descendants, MappingNode};

mod reference;
pub use reference::{ForeignKey, Reference};

mod tag;
pub use tag::{NodeTag, TagKind};

pub mod visit;
pub use visit::Visit;

pub mod visit_mut;
pub use visit_mut::VisitMut;
