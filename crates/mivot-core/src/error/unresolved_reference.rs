use super::Error;

/// Error when a REFERENCE points at a `dmid` declared neither in GLOBALS nor
/// in the TEMPLATES block being resolved.
#[derive(Debug)]
pub(super) struct UnresolvedReference {
    dmref: Box<str>,
}

impl std::error::Error for UnresolvedReference {}

impl core::fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unresolved reference: no object with dmid `{}`",
            self.dmref
        )
    }
}

impl Error {
    /// Creates an unresolved reference error for the given `dmref`.
    pub fn unresolved_reference(dmref: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnresolvedReference(UnresolvedReference {
            dmref: dmref.into().into(),
        }))
    }

    /// Returns `true` if this error is an unresolved reference error.
    pub fn is_unresolved_reference(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnresolvedReference(_))
    }
}
