use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the content build.
///
/// This struct holds the default locations of the content directory and the
/// generated data file, and how strictly entries are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Directory holding the markdown entries.
    ///
    /// Relative paths are resolved against the project root.
    pub content_dir: PathBuf,

    /// Path of the generated JSON data file.
    ///
    /// Relative paths are resolved against the project root.
    pub output: PathBuf,

    /// File extension of entry files, without the leading dot.
    extension: String,

    /// How missing header fields are treated.
    pub strictness: Strictness,
}

/// How an entry with missing header fields is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Missing fields are left absent in the compiled record.
    #[default]
    Lenient,
    /// Entries missing `name`, `date` or `image` fail the build.
    Strict,
}

impl Strictness {
    /// Returns `true` for [`Strictness::Strict`].
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl From<bool> for Strictness {
    fn from(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output: default_output(),
            extension: default_extension(),
            strictness: Strictness::Lenient,
        }
    }
}

impl Config {
    /// Name of the configuration file in the project root.
    pub const FILE_NAME: &'static str = "food-diary.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads `food-diary.toml` from the project root, falling back to the
    /// defaults if there is no such file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(Self::FILE_NAME);
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        tracing::debug!("Loading config from {}", path.display());
        Self::load(&path)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(path.to_path_buf(), e))
    }

    /// The entry file extension, without the leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Sets the entry file extension. A leading dot is stripped.
    pub fn set_extension(&mut self, extension: &str) {
        self.extension = extension.trim_start_matches('.').to_string();
    }

    /// The content directory, resolved against `root`.
    #[must_use]
    pub fn content_dir_in(&self, root: &Path) -> PathBuf {
        root.join(&self.content_dir)
    }

    /// The output path, resolved against `root`.
    #[must_use]
    pub fn output_in(&self, root: &Path) -> PathBuf {
        root.join(&self.output)
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content").join("foods")
}

fn default_output() -> PathBuf {
    PathBuf::from("src").join("data").join("foods.json")
}

fn default_extension() -> String {
    "md".to_string()
}

/// Errors that can occur when loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("IO error when accessing `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    /// The configuration file is not valid TOML, or has invalid values.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_content_dir")]
        content_dir: PathBuf,

        #[serde(default = "default_output")]
        output: PathBuf,

        #[serde(default = "default_extension")]
        extension: String,

        /// Reject entries with missing header fields.
        #[serde(default)]
        strict: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                content_dir,
                output,
                extension,
                strict,
            } => Self {
                content_dir,
                output,
                extension: extension.trim_start_matches('.').to_string(),
                strictness: strict.into(),
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            content_dir: config.content_dir,
            output: config.output,
            extension: config.extension,
            strict: config.strictness.is_strict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ncontent_dir = \"entries\"\noutput = \"public/data.json\"\nextension = \".markdown\"\nstrict = true\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.content_dir, PathBuf::from("entries"));
        assert_eq!(config.output, PathBuf::from("public/data.json"));
        assert_eq!(config.extension(), "markdown");
        assert_eq!(config.strictness, Strictness::Strict);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Io(path, _) if path == missing));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nstrict = \"very\"\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn absent_file_falls_back_to_default() {
        let tmp = tempfile::tempdir().unwrap();

        let config = Config::load_or_default(tmp.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(
            config.content_dir_in(tmp.path()),
            tmp.path().join("content").join("foods")
        );
        assert_eq!(
            config.output_in(tmp.path()),
            tmp.path().join("src").join("data").join("foods.json")
        );
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);

        let mut config = Config::default();
        config.strictness = Strictness::Strict;
        config.set_extension(".mdx");
        config.save(&path).unwrap();

        let loaded = Config::load_or_default(tmp.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.extension(), "mdx");
    }
}
