use anyhow::Result;
use clap::Parser;
use console::style;
use mivot::{MappingIndex, Resource};

use std::{io::Write, path::PathBuf};

#[derive(Parser, Debug)]
pub struct InspectCommand {
    /// Resource document (JSON)
    resource: PathBuf,
}

impl InspectCommand {
    pub(crate) fn run(self, out: &mut impl Write) -> Result<()> {
        let resource = Resource::load(&self.resource)?;
        write_summary(resource, out)
    }
}

fn write_summary(resource: Resource, out: &mut impl Write) -> Result<()> {
    let Resource { mapping, tables } = resource;

    match mapping {
        Some(mapping) => {
            let index = MappingIndex::new(mapping)?;
            write_mapping(&index, out)?;
        }
        None => writeln!(out, "{}", style("no mapping block").yellow())?,
    }

    writeln!(out, "{}", style("Tables").bold())?;
    for table in &tables {
        writeln!(
            out,
            "  {} ({} columns, {} rows)",
            table.label(),
            table.fields.len(),
            table.num_rows()
        )?;
    }

    Ok(())
}

fn write_mapping(index: &MappingIndex, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", style("Models").bold())?;
    for model in index.models() {
        match &model.url {
            Some(url) => writeln!(out, "  {} <{url}>", model.name)?,
            None => writeln!(out, "  {}", model.name)?,
        }
    }

    writeln!(out, "{}", style("GLOBALS").bold())?;
    for dmtype in index.globals_dmtypes() {
        writeln!(out, "  {dmtype}")?;
    }

    writeln!(out, "{}", style("TEMPLATES").bold())?;
    for (table_ref, children) in index.templates() {
        let roots: Vec<&str> = children.iter().filter_map(|node| node.dmtype()).collect();
        writeln!(
            out,
            "  {}: {}",
            table_ref.unwrap_or("<default>"),
            roots.join(", ")
        )?;
    }

    writeln!(
        out,
        "  {} references, {} joins",
        index.num_references(),
        index.num_joins()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mivot::{
        mapping::{Collection, Instance, Reference},
        MappingBlock, Table,
    };

    #[test]
    fn summary_lists_models_globals_templates_and_tables() {
        console::set_colors_enabled(false);

        let mapping = MappingBlock::new()
            .model("meas", Some("https://ivoa.net/xml/Meas"))
            .model("ivoa", None)
            .globals(vec![Collection::new()
                .dmid("_filters")
                .item(Instance::new("Phot:PhotCal").primary_key("G"))
                .into()])
            .templates(
                Some("results"),
                vec![Instance::new("meas:Position")
                    .child(Reference::by_key("_filters", "G").dmrole("meas:Position.filter"))
                    .into()],
            );

        let resource = Resource::new(mapping).table(Table::new().id("results"));

        let mut out = vec![];
        write_summary(resource, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(
            out,
            "Models\n  meas <https://ivoa.net/xml/Meas>\n  ivoa\n\
             GLOBALS\n  Phot:PhotCal\n\
             TEMPLATES\n  results: meas:Position\n  1 references, 0 joins\n\
             Tables\n  results (0 columns, 0 rows)\n"
        );
    }
}
