use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::Collection;

/// Writes the collection to `path` as pretty-printed JSON.
///
/// Parent directories are created automatically if they don't exist. Any
/// existing file is overwritten.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be created, or
/// the file cannot be written to.
pub fn write_artifact(collection: &Collection, path: &Path) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ArtifactError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_error = |source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, collection)?;
    writer.flush().map_err(write_error)?;

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Reads a previously written artifact.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid artifact.
pub fn read_artifact(path: &Path) -> Result<Collection, ArtifactError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Errors that can occur when writing or reading the artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// The output directory could not be created.
    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        /// The directory.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The artifact file could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        /// The artifact file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The artifact file could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        /// The artifact file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The collection could not be converted to or from JSON.
    #[error("invalid artifact JSON")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::Record;

    fn collection() -> Collection {
        Collection::assemble(vec![
            Record {
                id: "2024-01-15-hongshao-rou".to_string(),
                name: Some("红烧肉".to_string()),
                description: "这是一道美味的红烧肉。".to_string(),
                tags: vec!["家常菜".to_string(), "肉类".to_string()],
                date: "2024-01-15".to_string(),
                image: Some("hongshao-rou.jpg".to_string()),
            },
            Record {
                id: "draft".to_string(),
                name: None,
                description: String::new(),
                tags: Vec::new(),
                date: "2024-01-20".to_string(),
                image: None,
            },
        ])
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("src").join("data").join("foods.json");

        write_artifact(&collection(), &path).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn pretty_printed_in_artifact_layout() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("foods.json");
        let draft = collection()
            .items
            .into_iter()
            .find(|record| record.id == "draft")
            .unwrap();
        let collection = Collection::assemble(vec![draft]);

        write_artifact(&collection, &path).unwrap();

        let expected = r#"{
  "items": [
    {
      "id": "draft",
      "description": "",
      "tags": [],
      "date": "2024-01-20"
    }
  ],
  "allTags": []
}"#;
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn overwrites_previous_artifact() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("foods.json");
        std::fs::write(&path, "stale content that is much longer than the new artifact ".repeat(20))
            .unwrap();

        write_artifact(&Collection::default(), &path).unwrap();

        assert_eq!(read_artifact(&path).unwrap(), Collection::default());
    }

    #[test]
    fn round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("foods.json");
        let collection = collection();

        write_artifact(&collection, &path).unwrap();

        assert_eq!(read_artifact(&path).unwrap(), collection);
    }

    #[test]
    fn unicode_is_written_unescaped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("foods.json");

        write_artifact(&collection(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"name\": \"红烧肉\""));
    }
}
