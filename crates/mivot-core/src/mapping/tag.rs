use std::fmt;

/// Synthetic tag that tells apart REFERENCE and JOIN nodes after they have
/// been copied around by resolution.
///
/// Tags are assigned by [`MappingIndex`](super::MappingIndex) in document
/// order, one counter per kind, and render as `REFERENCE_<n>` / `JOIN_<n>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeTag {
    pub kind: TagKind,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Reference,
    Join,
}

impl NodeTag {
    pub const fn new(kind: TagKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub(crate) const fn placeholder(kind: TagKind) -> Self {
        Self {
            kind,
            index: usize::MAX,
        }
    }

    pub const fn is_placeholder(&self) -> bool {
        self.index == usize::MAX
    }
}

impl TagKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Reference => "REFERENCE",
            Self::Join => "JOIN",
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            write!(f, "{}_?", self.kind.prefix())
        } else {
            write!(f, "{}_{}", self.kind.prefix(), self.index)
        }
    }
}

impl fmt::Debug for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeTag({self})")
    }
}
