use super::Error;

/// Error when a mapping block is malformed as a whole.
///
/// This occurs when:
/// - The resource carries no mapping block at all
/// - More than one GLOBALS section is declared
/// - More than one TEMPLATES section lacks a `tableref`
/// - A `dmid` is declared twice under GLOBALS
/// - A TEMPLATES section has no INSTANCE or COLLECTION to use as its root
/// - References form a cycle, or a reference chain exceeds the pass limit
///
/// These errors surface while indexing or connecting, before any row is read.
#[derive(Debug)]
pub(super) struct Configuration {
    message: Box<str>,
}

impl std::error::Error for Configuration {}

impl core::fmt::Display for Configuration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(Configuration {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
