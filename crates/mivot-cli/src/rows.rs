use crate::Config;

use anyhow::Result;
use clap::Parser;
use mivot::{Resource, Viewer};

use std::{io::Write, path::PathBuf};

#[derive(Parser, Debug)]
pub struct RowsCommand {
    /// Resource document (JSON)
    resource: PathBuf,

    /// Table id or name; defaults to the table the mapping block selects
    #[arg(long)]
    table: Option<String>,

    /// Include roles, dmids and column references
    #[arg(long)]
    full: bool,

    /// Stop after this many rows
    #[arg(long)]
    limit: Option<usize>,
}

impl RowsCommand {
    pub(crate) fn run(self, config: &Config, out: &mut impl Write) -> Result<()> {
        let resource = Resource::load(&self.resource)?;
        let written = self.write_rows(resource, config, out)?;
        tracing::debug!(rows = written, "done");
        Ok(())
    }

    fn write_rows(&self, resource: Resource, config: &Config, out: &mut impl Write) -> Result<usize> {
        let mut viewer = Viewer::new(resource, config.engine.clone())?;
        let mut session = viewer.connect(self.table.as_deref())?;

        let limit = self.limit.unwrap_or(usize::MAX);
        let mut written = 0;

        while written < limit && session.next_row().is_some() {
            if let Some(dict) = session.current_instance_as_dict(!self.full) {
                serde_json::to_writer(&mut *out, &dict)?;
                writeln!(out)?;
                written += 1;
            }
        }

        Ok(written)
    }
}
