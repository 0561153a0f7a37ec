use anyhow::{Context, Result};
use serde::Deserialize;

use std::path::Path;

/// Configuration for mivot CLI operations
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine configuration, the `[engine]` table
    pub engine: mivot::Config,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration
    pub fn engine(mut self, engine: mivot::Config) -> Self {
        self.engine = engine;
        self
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        contents.parse()
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_engine_table() {
        let config: Config = "[engine]\nmax_resolve_passes = 4\ndefault_table = \"Results\"\n"
            .parse()
            .unwrap();

        assert_eq!(
            config.engine,
            mivot::Config::new()
                .max_resolve_passes(4)
                .default_table("Results")
        );
    }

    #[test]
    fn empty_file_is_default() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!("[engine]\nstrict_bindings = \"yes\"\n".parse::<Config>().is_err());
    }
}
