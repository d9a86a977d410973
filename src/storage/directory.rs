//! A filesystem directory of diary entries
//!
//! The [`ContentDirectory`] discovers entry files directly inside a single
//! directory, parses each of them and assembles the [`Collection`].

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    domain::{Collection, Config, Record, Strictness},
    storage::markdown::{ParseError, parse_record},
};

/// A directory of markdown diary entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDirectory {
    /// The directory entries are read from.
    root: PathBuf,
    /// Extension of entry files, without the leading dot.
    extension: String,
    strictness: Strictness,
}

impl ContentDirectory {
    /// Opens a directory of `.md` entries, parsed leniently.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extension: "md".to_string(),
            strictness: Strictness::Lenient,
        }
    }

    /// Opens the content directory named by `config`, resolved against the
    /// project `root`.
    #[must_use]
    pub fn from_config(root: &Path, config: &Config) -> Self {
        Self::new(config.content_dir_in(root))
            .with_extension(config.extension())
            .with_strictness(config.strictness)
    }

    /// Sets the extension of entry files. A leading dot is stripped.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Sets how missing header fields are treated.
    #[must_use]
    pub const fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// The directory entries are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the entry files directly inside the directory.
    ///
    /// Subdirectories are not searched. Paths are returned in the order the
    /// filesystem lists them. A directory that does not exist has no
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub fn entry_paths(&self) -> Result<Vec<PathBuf>, BuildError> {
        if !self.root.exists() {
            tracing::warn!(
                "Content directory {} does not exist, no entries to compile",
                self.root.display()
            );
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry?;
            let path = entry.path();
            if path.extension() == Some(OsStr::new(&self.extension)) && path.is_file() {
                paths.push(entry.into_path());
            } else {
                tracing::trace!("Skipping {}", path.display());
            }
        }

        Ok(paths)
    }

    /// Reads and parses every entry, in discovery order.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be read or parsed.
    pub fn load_records(&self) -> Result<Vec<Record>, BuildError> {
        self.entry_paths()?
            .into_iter()
            .map(|path| self.load_record(path))
            .collect()
    }

    /// Compiles the directory into a [`Collection`].
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be read or parsed. No partial
    /// collection is returned.
    pub fn build(&self) -> Result<Collection, BuildError> {
        let collection = Collection::assemble(self.load_records()?);

        tracing::info!(
            "Compiled {} entries with {} tags from {}",
            collection.items.len(),
            collection.all_tags.len(),
            self.root.display()
        );

        Ok(collection)
    }

    /// Checks every entry, without stopping at the first failure.
    ///
    /// Returns the number of entries checked, and the failures.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory cannot be listed.
    pub fn validate(&self) -> Result<(usize, Vec<BuildError>), BuildError> {
        let paths = self.entry_paths()?;
        let checked = paths.len();
        let failures = paths
            .into_iter()
            .filter_map(|path| self.load_record(path).err())
            .collect();

        Ok((checked, failures))
    }

    fn load_record(&self, path: PathBuf) -> Result<Record, BuildError> {
        tracing::debug!("Parsing {}", path.display());

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(BuildError::Read { path, source }),
        };

        parse_record(&path, &text, self.strictness)
            .map_err(|source| BuildError::Parse { path, source })
    }
}

/// Errors that can occur when compiling a content directory.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The content directory could not be listed.
    #[error("failed to list content directory")]
    Discover(#[from] walkdir::Error),

    /// An entry file could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        /// The entry file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// An entry file could not be parsed.
    #[error("failed to parse {}", .path.display())]
    Parse {
        /// The entry file.
        path: PathBuf,
        /// What was wrong with the entry.
        source: ParseError,
    },
}

impl BuildError {
    /// The entry file the error relates to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Discover(e) => e.path(),
            Self::Read { path, .. } | Self::Parse { path, .. } => Some(path),
        }
    }
}
