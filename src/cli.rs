use std::path::PathBuf;

mod list;
mod matrix;
mod metadata;
mod trace;

use anyhow::Context;
use clap::ArgAction;
use list::List;
use matrix::Matrix;
use metadata::Metadata;
use sententia::{storage::Dataset, Config, RequirementStore};
use trace::Trace;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };

        self.command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List the allowed values of a vocabulary
    Metadata(Metadata),

    /// Load a demo dataset and print its requirements
    List(List),

    /// Load a demo dataset and print its traceability matrix
    Matrix(Matrix),

    /// Show the links into and out of one requirement
    Trace(Trace),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Metadata(command) => command.run()?,
            Self::List(command) => command.run(config)?,
            Self::Matrix(command) => command.run(config)?,
            Self::Trace(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// Parse a dataset name at the CLI boundary.
fn parse_dataset(s: &str) -> Result<Dataset, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Create a store and fill it with a demo dataset.
#[instrument(level = "debug", skip(config))]
fn load_dataset(dataset: Dataset, config: &Config) -> anyhow::Result<RequirementStore> {
    let fixture = dataset
        .fixture()
        .with_context(|| format!("failed to parse the {dataset} dataset"))?;
    let store = RequirementStore::with_config(config);
    store
        .load_fixture(fixture)
        .with_context(|| format!("failed to load the {dataset} dataset"))?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sententia", "list", "ice-cream", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn rejects_unknown_dataset() {
        let error = Cli::try_parse_from(["sententia", "matrix", "hoth"]).unwrap_err();
        assert!(error.to_string().contains("unknown dataset 'hoth'"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["sententia"]).is_err());
    }

    #[test]
    fn load_dataset_honours_config_prefix() {
        let store = load_dataset(Dataset::DeathStar, &Config::new("SR", 3)).unwrap();

        let ids: Vec<_> = store
            .get_all()
            .into_iter()
            .map(|r| r.display_id().to_string())
            .collect();

        assert_eq!(ids.len(), 9);
        assert_eq!(ids[0], "REQ-DS-001");
        assert_eq!(ids[8], "REQ-DS-009");
    }
}
