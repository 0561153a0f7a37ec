use super::Error;

/// Error when an ATTRIBUTE cannot be given a value.
///
/// This occurs when:
/// - The attribute references a column the connected table does not have,
///   and carries no literal default
/// - The attribute has neither a column reference nor a literal
///
/// Raised by the bind pass at connection time, never while reading rows.
#[derive(Debug)]
pub(super) struct UnmappableAttribute {
    dmrole: Option<Box<str>>,
    dmtype: Box<str>,
    column: Option<Box<str>>,
}

impl std::error::Error for UnmappableAttribute {}

impl core::fmt::Display for UnmappableAttribute {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("unmappable attribute:")?;
        if let Some(ref dmrole) = self.dmrole {
            write!(f, " role={dmrole}")?;
        }
        write!(f, " dmtype={}", self.dmtype)?;
        match self.column {
            Some(ref column) => write!(f, " column={column}"),
            None => f.write_str(" (no column reference and no literal value)"),
        }
    }
}

impl Error {
    /// Creates an unmappable attribute error.
    pub fn unmappable_attribute(
        dmrole: Option<&str>,
        dmtype: impl Into<String>,
        column: Option<&str>,
    ) -> Error {
        Error::from(super::ErrorKind::UnmappableAttribute(UnmappableAttribute {
            dmrole: dmrole.map(Into::into),
            dmtype: dmtype.into().into(),
            column: column.map(Into::into),
        }))
    }

    /// Returns `true` if this error is an unmappable attribute error.
    pub fn is_unmappable_attribute(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnmappableAttribute(_))
    }
}
