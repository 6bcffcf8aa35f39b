use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use sententia::{storage::Dataset, storage::export, Config, RequirementStore};
use tracing::instrument;

/// Command arguments for `sententia list`.
#[derive(Debug, Parser)]
#[command(about = "Load a demo dataset and print its requirements")]
pub struct List {
    /// The dataset to load (ice-cream or death-star)
    #[clap(value_parser = super::parse_dataset)]
    dataset: Dataset,

    /// Output format (default: json).
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl List {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let store = super::load_dataset(self.dataset, config)?;
        self.render(&store, &mut io::stdout().lock())
    }

    fn render(&self, store: &RequirementStore, out: &mut impl Write) -> anyhow::Result<()> {
        let requirements = store.get_all();
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &requirements)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => export::write_requirements(out, &requirements)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(args: &[&str]) -> String {
        let command = List::try_parse_from(args).unwrap();
        let store = super::super::load_dataset(command.dataset, &Config::new("REQ", 3)).unwrap();
        let mut out = Vec::new();
        command.render(&store, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn json_lists_every_record() {
        let output = render(&["list", "ice-cream"]);

        let records: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(records.len(), 13);
        assert_eq!(records[0]["display_id"], "BUS-001");
        assert_eq!(records[0]["layer"], "Business");
        assert_eq!(records[3]["type"], "Non-Functional");
        assert_eq!(records[3]["links"][0]["target_id"], "BUS-001");
        assert_eq!(records[3]["versions"], serde_json::json!([]));
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let output = render(&["list", "death-star", "--format", "csv"]);

        let mut lines = output.lines();
        assert!(lines.next().unwrap().starts_with("display_id,layer,type"));
        assert_eq!(lines.count(), 9);
    }
}
