mod bind;

mod park;
pub use park::ParkedNode;

mod session;
pub use session::{Session, SessionState};

mod template;
pub use template::ResolvedTemplate;

use crate::Config;
use mivot_core::{Error, MappingIndex, Resource, Result, Table};

use std::{collections::HashMap, sync::Arc};

/// Entry point of the engine: owns the indexed mapping block and the tables
/// it annotates, and hands out one [`Session`] per connected table.
///
/// Resolved templates are cached per table, so connecting to the same table
/// twice resolves and binds its TEMPLATES block once.
#[derive(Debug)]
pub struct Viewer {
    config: Config,

    index: Arc<MappingIndex>,

    tables: Vec<Arc<Table>>,

    /// Resolved templates by table position and `tableref`.
    templates: HashMap<(usize, Option<String>), Arc<ResolvedTemplate>>,
}

impl Viewer {
    /// Indexes the mapping block of `resource`.
    ///
    /// A resource without a mapping block is a configuration error.
    pub fn new(resource: Resource, config: Config) -> Result<Viewer> {
        let Resource { mapping, tables } = resource;

        let mapping = mapping
            .ok_or_else(|| Error::configuration("resource has no mapping block"))?;

        let index = MappingIndex::new(mapping)?;

        Ok(Viewer {
            config,
            index: Arc::new(index),
            tables: tables.into_iter().map(Arc::new).collect(),
            templates: HashMap::new(),
        })
    }

    pub fn index(&self) -> &Arc<MappingIndex> {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tables(&self) -> &[Arc<Table>] {
        &self.tables
    }

    /// Opens a session over a table.
    ///
    /// With a `table_ref` the table is matched by id, then by name, and uses
    /// the TEMPLATES block declared for it, else the unnamed block. Without
    /// one, [`Config::default_table`] is tried first; then the unnamed
    /// TEMPLATES block maps the first table; then the first TEMPLATES block
    /// maps the table it names.
    pub fn connect(&mut self, table_ref: Option<&str>) -> Result<Session> {
        let (position, templates_ref) = self.select(table_ref)?;
        let table = self.tables[position].clone();

        let key = (position, templates_ref);
        let template = match self.templates.get(&key) {
            Some(template) => template.clone(),
            None => {
                let template = Arc::new(ResolvedTemplate::new(
                    &self.index,
                    key.1.as_deref(),
                    &table,
                    &self.config,
                )?);
                self.templates.insert(key, template.clone());
                template
            }
        };

        tracing::debug!(table = table.label(), rows = table.num_rows(), "connected");

        Ok(Session::new(
            self.index.clone(),
            template,
            table,
            self.config.max_resolve_passes,
        ))
    }

    /// Picks the table position and the `tableref` of its TEMPLATES block.
    fn select(&self, table_ref: Option<&str>) -> Result<(usize, Option<String>)> {
        let requested = table_ref.or(self.config.default_table.as_deref());

        if let Some(table_ref) = requested {
            let position = self
                .find_table(table_ref)
                .ok_or_else(|| Error::configuration(format!("no table `{table_ref}`")))?;
            let table = &self.tables[position];

            let declared = [Some(table_ref), table.id.as_deref(), table.name.as_deref()]
                .into_iter()
                .flatten()
                .find(|candidate| self.index.templates_for(Some(*candidate)).is_some());

            return match declared {
                Some(declared) => Ok((position, Some(declared.to_string()))),
                None if self.index.templates_for(None).is_some() => Ok((position, None)),
                None => Err(Error::configuration(format!(
                    "no TEMPLATES block for table `{table_ref}`"
                ))),
            };
        }

        if self.tables.is_empty() {
            return Err(Error::configuration("resource has no table"));
        }

        match self.index.default_templates() {
            Some((None, _)) => Ok((0, None)),
            Some((Some(declared), _)) => {
                let position = self.find_table(declared).ok_or_else(|| {
                    Error::configuration(format!(
                        "TEMPLATES block refers to unknown table `{declared}`"
                    ))
                })?;
                Ok((position, Some(declared.to_string())))
            }
            None => Err(Error::configuration(
                "no mappable root: the mapping block has no TEMPLATES",
            )),
        }
    }

    /// Position of the table with declared id `table_ref`, else with that
    /// name.
    fn find_table(&self, table_ref: &str) -> Option<usize> {
        self.tables
            .iter()
            .position(|table| table.id.as_deref() == Some(table_ref))
            .or_else(|| {
                self.tables
                    .iter()
                    .position(|table| table.name.as_deref() == Some(table_ref))
            })
    }
}
