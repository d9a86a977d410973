pub mod directory;
/// Artifact output.
pub mod artifact;
/// Loosely typed header values.
pub mod header;
/// Markdown parsing for diary entries.
pub mod markdown;

pub use artifact::{ArtifactError, read_artifact, write_artifact};
pub use directory::{BuildError, ContentDirectory};
pub use header::HeaderValue;
pub use markdown::{MarkdownEntry, ParseError, identifier, parse_record};
