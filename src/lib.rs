//! Food diary content compiler
//!
//! Diary entries are markdown documents with a YAML header, stored in a
//! single directory. They are compiled into one JSON data file for the web
//! front-end.

pub mod domain;
pub use domain::{Collection, Config, ConfigError, DateGroup, Record, Strictness};

/// Filesystem discovery, entry parsing and artifact output.
pub mod storage;
pub use storage::{ArtifactError, BuildError, ContentDirectory, ParseError};
