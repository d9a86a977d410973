use std::path::Path;

use clap::Parser;
use tracing::instrument;

use super::{OutputFormat, Source, terminal::Paint};

#[derive(Debug, Parser)]
#[command(about = "Show every tag and how many entries carry it")]
pub struct Tags {
    #[command(flatten)]
    source: Source,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    format: OutputFormat,
}

impl Tags {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let collection = self.source.directory(root)?.build()?;
        let counts = collection.tag_counts();

        match self.format {
            OutputFormat::Json => {
                let output: Vec<_> = counts
                    .iter()
                    .map(|(tag, count)| serde_json::json!({ "tag": tag, "count": count }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if counts.is_empty() {
                    println!("No tags found.");
                    return Ok(());
                }

                let width = counts
                    .iter()
                    .map(|(tag, _)| tag.chars().count())
                    .max()
                    .unwrap_or(0);
                for (tag, count) in counts {
                    let padding = " ".repeat(width - tag.chars().count());
                    println!("{}{padding}  {count}", tag.tag());
                }
            }
        }

        Ok(())
    }
}
