use std::path::Path;

use clap::Parser;
use food_diary::Collection;
use tracing::instrument;

use super::{
    OutputFormat, Source,
    terminal::{Paint, format_tags},
};

#[derive(Debug, Parser)]
#[command(about = "Show entries grouped by date, newest first")]
pub struct List {
    #[command(flatten)]
    source: Source,

    /// Only show entries carrying this tag
    #[arg(long, short)]
    tag: Option<String>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    format: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let collection = self.source.directory(root)?.build()?;

        match self.format {
            OutputFormat::Json => {
                let timeline = collection.timeline(self.tag.as_deref());
                println!("{}", serde_json::to_string_pretty(&timeline)?);
            }
            OutputFormat::Table => self.print_table(&collection),
        }

        Ok(())
    }

    fn print_table(&self, collection: &Collection) {
        if collection.is_empty() {
            println!("No food entries yet. Add a markdown file to the content directory.");
            return;
        }

        let timeline = collection.timeline(self.tag.as_deref());
        if timeline.is_empty() {
            if let Some(tag) = &self.tag {
                println!("No entries tagged {}.", tag.tag());
            }
            return;
        }

        for (i, group) in timeline.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", group.date.heading());
            for record in &group.items {
                let mut line = format!("  {}", record.display_name());
                if !record.tags.is_empty() {
                    line.push_str("  ");
                    line.push_str(&format_tags(&record.tags));
                }
                println!("{line}  {}", format!("({})", record.id).muted());
            }
        }
    }
}
