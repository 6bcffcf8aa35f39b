use std::io::{self, Write};

use clap::Parser;
use sententia::{storage::Dataset, Config, RequirementStore};
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Show the links into and out of one requirement")]
pub struct Trace {
    /// The dataset to load (ice-cream or death-star)
    #[clap(value_parser = super::parse_dataset)]
    dataset: Dataset,

    /// Display ID of the requirement
    id: String,
}

impl Trace {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let store = super::load_dataset(self.dataset, config)?;
        self.render(&store, &mut io::stdout().lock())
    }

    fn render(&self, store: &RequirementStore, out: &mut impl Write) -> anyhow::Result<()> {
        // Display IDs are matched case-insensitively at the CLI boundary.
        let id = self.id.to_uppercase();
        let requirement = store.get(&id)?;
        let graph = store.traceability_graph();

        writeln!(out, "{}: {}", requirement.display_id(), requirement.description())?;

        writeln!(out, "\nOutgoing:")?;
        let outgoing = graph.outgoing(&id);
        if outgoing.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for edge in outgoing {
            writeln!(out, "  {} -> {}", edge.link_type, edge.target_id)?;
        }

        writeln!(out, "\nIncoming:")?;
        let incoming = graph.incoming(&id);
        if incoming.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for edge in incoming {
            writeln!(out, "  {} <- {}", edge.link_type, edge.source_id)?;
        }
        Ok(())
    }
}
