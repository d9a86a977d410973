use std::path::{Path, PathBuf};

mod build;
mod list;
mod tags;
mod terminal;
mod validate;

use build::Build;
use clap::ArgAction;
use food_diary::{Config, ContentDirectory, Strictness};
use list::List;
use tags::Tags;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The project root; the config file and default paths are resolved
    /// against it
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Build(Build::default()))
            .run(&self.root)
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
    /// Compile the content directory into the JSON data file (default)
    Build(Build),

    /// Show entries as a timeline, newest first
    List(List),

    /// Show every tag and how many entries carry it
    Tags(Tags),

    /// Check every entry for header problems without writing anything
    ///
    /// Entries are checked in strict mode: `name`, `date` and `image` are
    /// required.
    Validate(Validate),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Build(command) => command.run(root)?,
            Self::List(command) => command.run(root)?,
            Self::Tags(command) => command.run(root)?,
            Self::Validate(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Where entries are read from, shared by every command.
#[derive(Debug, Default, clap::Args)]
pub struct Source {
    /// Directory holding the markdown entries [default: `content_dir` from
    /// food-diary.toml, or content/foods]
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Fail on entries missing `name`, `date` or `image`
    #[arg(long)]
    strict: bool,
}

impl Source {
    /// Loads the project config and applies the command-line overrides.
    fn config(&self, root: &Path) -> anyhow::Result<Config> {
        let mut config = Config::load_or_default(root)?;

        if let Some(content) = &self.content {
            config.content_dir.clone_from(content);
        }
        if self.strict {
            config.strictness = Strictness::Strict;
        }

        Ok(config)
    }

    fn directory(&self, root: &Path) -> anyhow::Result<ContentDirectory> {
        let config = self.config(root)?;
        Ok(ContentDirectory::from_config(root, &config))
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn no_subcommand_means_build() {
        let cli = Cli::try_parse_from(["food-diary", "--root", "site"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("site"));
    }

    #[test]
    fn build_flags_parse() {
        let cli = Cli::try_parse_from([
            "food-diary",
            "build",
            "--content",
            "diary",
            "--output",
            "out.json",
            "--strict",
        ])
        .unwrap();

        let Some(Command::Build(build)) = cli.command else {
            panic!("expected the build command");
        };
        let debug = format!("{build:?}");
        assert!(debug.contains("out.json"));
        assert!(debug.contains("diary"));
        assert!(debug.contains("strict: true"));
    }

    #[test]
    fn list_and_tags_take_format() {
        let cli = Cli::try_parse_from(["food-diary", "list", "--tag", "甜品", "--format", "json"])
            .unwrap();
        let Some(Command::List(list)) = cli.command else {
            panic!("expected the list command");
        };
        assert!(format!("{list:?}").contains("format: Json"));

        let cli = Cli::try_parse_from(["food-diary", "tags", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Tags(_))));

        assert!(Cli::try_parse_from(["food-diary", "list", "--output", "json"]).is_err());
    }
}
