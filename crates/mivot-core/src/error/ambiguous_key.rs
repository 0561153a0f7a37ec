use super::Error;

/// Error when a foreign-key lookup matches more than one item of a GLOBALS
/// collection.
#[derive(Debug)]
pub(super) struct AmbiguousKey {
    collection: Box<str>,
    key: Box<str>,
    matches: usize,
}

impl std::error::Error for AmbiguousKey {}

impl core::fmt::Display for AmbiguousKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous key: {} items of collection `{}` have primary key `{}`",
            self.matches, self.collection, self.key
        )
    }
}

impl Error {
    /// Creates an ambiguous key error.
    ///
    /// `matches` is the number of collection items sharing the key.
    pub fn ambiguous_key(
        collection: impl Into<String>,
        key: impl Into<String>,
        matches: usize,
    ) -> Error {
        Error::from(super::ErrorKind::AmbiguousKey(AmbiguousKey {
            collection: collection.into().into(),
            key: key.into().into(),
            matches,
        }))
    }

    /// Returns `true` if this error is an ambiguous key error.
    pub fn is_ambiguous_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AmbiguousKey(_))
    }
}
