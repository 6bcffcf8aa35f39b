use std::io::{self, Write};

use clap::Parser;
use sententia::Vocabulary;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "List the allowed values of a vocabulary")]
pub struct Metadata {
    /// The vocabulary: layers, types, priority, source, status or link-types
    #[clap(value_parser = parse_vocabulary)]
    vocabulary: Vocabulary,
}

impl Metadata {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        self.render(&mut io::stdout().lock())
    }

    fn render(&self, out: &mut impl Write) -> anyhow::Result<()> {
        for value in self.vocabulary.values() {
            writeln!(out, "{value}")?;
        }
        Ok(())
    }
}

fn parse_vocabulary(s: &str) -> Result<Vocabulary, String> {
    s.parse().map_err(|e| format!("{e}"))
}
