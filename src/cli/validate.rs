use std::path::Path;

use clap::Parser;
use food_diary::Strictness;
use tracing::instrument;

use super::{Source, terminal::Paint};

#[derive(Debug, Parser)]
pub struct Validate {
    #[command(flatten)]
    source: Source,
}

impl Validate {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let directory = self
            .source
            .directory(root)?
            .with_strictness(Strictness::Strict);
        let (checked, failures) = directory.validate()?;

        for failure in &failures {
            let path = failure
                .path()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            let cause = std::iter::successors(std::error::Error::source(failure), |e| e.source())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(": ");
            println!("{} {path}: {cause}", "✗".failed());
        }

        if !failures.is_empty() {
            anyhow::bail!("{} of {checked} entries are invalid", failures.len());
        }

        println!("{} All {checked} entries are valid", "✓".ok());
        Ok(())
    }
}
