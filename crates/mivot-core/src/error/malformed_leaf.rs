use super::Error;

/// Error when a dictionary-form node cannot be turned into an instance graph
/// node, e.g. a leaf without `dmtype`.
#[derive(Debug)]
pub(super) struct MalformedLeaf {
    key: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for MalformedLeaf {}

impl core::fmt::Display for MalformedLeaf {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed leaf `{}`: {}", self.key, self.reason)
    }
}

impl Error {
    /// Creates a malformed leaf error for the node stored under `key`.
    pub fn malformed_leaf(key: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MalformedLeaf(MalformedLeaf {
            key: key.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a malformed leaf error.
    pub fn is_malformed_leaf(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MalformedLeaf(_))
    }
}
