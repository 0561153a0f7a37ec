mod config;
mod inspect;
mod logging;
mod rows;

pub use config::*;
pub use inspect::InspectCommand;
pub use rows::RowsCommand;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line front end over the materialization engine
pub struct MivotCli {
    config: Config,
}

impl MivotCli {
    /// Create a new MivotCli with the default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create a new MivotCli with a custom configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        self.run(cli)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        logging::init(cli.verbose);

        let config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => self.config.clone(),
        };

        let mut stdout = std::io::stdout().lock();

        match cli.command {
            Command::Rows(cmd) => cmd.run(&config, &mut stdout),
            Command::Inspect(cmd) => cmd.run(&mut stdout),
        }
    }
}

impl Default for MivotCli {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Parser, Debug)]
#[command(name = "mivot")]
#[command(about = "Materialize model instances from annotated tables")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Print one JSON dictionary per row
    Rows(RowsCommand),

    /// Summarize a resource's mapping block and tables
    Inspect(InspectCommand),
}
