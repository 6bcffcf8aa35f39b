use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use sententia::{storage::Dataset, storage::export, Config, RequirementStore};
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Load a demo dataset and print its traceability matrix")]
pub struct Matrix {
    /// The dataset to load (ice-cream or death-star)
    #[clap(value_parser = super::parse_dataset)]
    dataset: Dataset,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl Matrix {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let store = super::load_dataset(self.dataset, config)?;
        self.render(&store, &mut io::stdout().lock())
    }

    fn render(&self, store: &RequirementStore, out: &mut impl Write) -> anyhow::Result<()> {
        let edges = store.export_edges();
        tracing::debug!("Exporting {} traceability links", edges.len());
        match self.format {
            OutputFormat::Csv => export::write_traceability_matrix(out, &edges)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &edges)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
