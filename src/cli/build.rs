use std::path::{Path, PathBuf};

use anyhow::Context;
use food_diary::{Collection, ContentDirectory, storage::write_artifact};
use tracing::instrument;

use super::{Source, terminal::Paint};

#[derive(Debug, Default, clap::Parser)]
pub struct Build {
    #[command(flatten)]
    source: Source,

    /// Path of the generated JSON data file [default: `output` from
    /// food-diary.toml, or src/data/foods.json]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Build {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (collection, output) = self.compile(root)?;

        println!("{}", summary(&collection).ok());
        println!("  {}", output.display().to_string().muted());

        Ok(())
    }

    /// Compiles the entries and writes the artifact, returning the collection
    /// and where it was written.
    fn compile(self, root: &Path) -> anyhow::Result<(Collection, PathBuf)> {
        let mut config = self.source.config(root)?;
        if let Some(output) = self.output {
            config.output = output;
        }

        let directory = ContentDirectory::from_config(root, &config);
        let collection = directory.build().with_context(|| {
            format!(
                "failed to compile entries in {}",
                directory.root().display()
            )
        })?;

        let output = config.output_in(root);
        write_artifact(&collection, &output)
            .with_context(|| format!("failed to write {}", output.display()))?;

        Ok((collection, output))
    }
}

fn summary(collection: &Collection) -> String {
    format!(
        "Generated {} food items with {} tags",
        collection.items.len(),
        collection.all_tags.len()
    )
}
