use serde::Deserialize;

/// Engine configuration, passed to [`Viewer::new`](crate::Viewer::new).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on reference-resolution passes over one template: the
    /// longest chain of references nested in each other's targets.
    pub max_resolve_passes: usize,

    /// When set, an attribute referencing a missing column is an error even
    /// if it carries a literal default.
    pub strict_bindings: bool,

    /// Table reference used by `connect(None)` before the default table
    /// policy applies.
    pub default_table: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_resolve_passes: 16,
            strict_bindings: false,
            default_table: None,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution pass bound
    pub fn max_resolve_passes(mut self, passes: usize) -> Self {
        self.max_resolve_passes = passes;
        self
    }

    /// Reject dangling column references even when a literal default exists
    pub fn strict_bindings(mut self, strict: bool) -> Self {
        self.strict_bindings = strict;
        self
    }

    /// Set the table `connect(None)` selects
    pub fn default_table(mut self, table_ref: impl Into<String>) -> Self {
        self.default_table = Some(table_ref.into());
        self
    }
}
