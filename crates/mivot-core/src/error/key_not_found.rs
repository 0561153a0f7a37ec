use super::Error;

/// Error when a foreign-key lookup matches no item of a GLOBALS collection.
#[derive(Debug)]
pub(super) struct KeyNotFound {
    collection: Box<str>,
    key: Box<str>,
}

impl std::error::Error for KeyNotFound {}

impl core::fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "key not found: no item of collection `{}` has primary key `{}`",
            self.collection, self.key
        )
    }
}

impl Error {
    /// Creates a key not found error.
    pub fn key_not_found(collection: impl Into<String>, key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::KeyNotFound(KeyNotFound {
            collection: collection.into().into(),
            key: key.into().into(),
        }))
    }

    /// Returns `true` if this error is a key not found error.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::KeyNotFound(_))
    }
}
