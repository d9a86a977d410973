use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::{
    domain::{Record, Strictness},
    storage::header::{HeaderValue, format_date},
};

/// A diary entry in markdown format with a YAML header.
///
/// ```text
/// ---
/// name: 红烧肉
/// date: 2024-01-15
/// tags: [家常菜, 肉类]
/// image: hongshao-rou.jpg
/// ---
///
/// 这是一道美味的红烧肉。
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownEntry {
    frontmatter: FrontMatter,
    body: String,
}

impl MarkdownEntry {
    /// Splits an entry into its header and body and reads the header.
    ///
    /// Text that does not open with a `---` line has no header; all of it is
    /// the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is never closed, is not valid YAML, or
    /// is not a mapping.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let (header, body) = split_header(text)?;
        let frontmatter = header.map_or_else(|| Ok(FrontMatter::default()), FrontMatter::parse)?;

        Ok(Self {
            frontmatter,
            body: body.to_string(),
        })
    }

    /// Converts the entry into a [`Record`] with the given identifier.
    ///
    /// # Errors
    ///
    /// In [`Strictness::Strict`] mode, returns an error if `name`, `date` or
    /// `image` is missing. Lenient mode never fails.
    pub fn into_record(self, id: String, strictness: Strictness) -> Result<Record, ParseError> {
        let Self {
            frontmatter:
                FrontMatter {
                    name,
                    date,
                    tags,
                    image,
                },
            body,
        } = self;

        let name = name.as_ref().and_then(HeaderValue::to_text);
        let image = image.as_ref().and_then(HeaderValue::to_text);
        let date = date.as_ref().and_then(|date| match date {
            HeaderValue::Date(date) => Some(format_date(*date)),
            other => other.to_text(),
        });

        if strictness.is_strict() {
            let missing: Vec<_> = [("name", &name), ("date", &date), ("image", &image)]
                .into_iter()
                .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
                .map(|(field, _)| field)
                .collect();
            if !missing.is_empty() {
                return Err(ParseError::MissingFields(missing));
            }
        }

        Ok(Record {
            id,
            name,
            description: body.trim().to_string(),
            tags: tags.as_ref().map(HeaderValue::to_list).unwrap_or_default(),
            date: date.unwrap_or_default(),
            image,
        })
    }
}

/// Parses the text of one entry file into a [`Record`].
///
/// The record identifier is the file name with its extension removed.
///
/// # Errors
///
/// Returns an error if the header cannot be read, or if a required field is
/// missing in strict mode.
pub fn parse_record(path: &Path, text: &str, strictness: Strictness) -> Result<Record, ParseError> {
    MarkdownEntry::parse(text)?.into_record(identifier(path), strictness)
}

/// The record identifier for an entry file: its file name without the
/// extension.
#[must_use]
pub fn identifier(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Splits text into an optional header and the body.
///
/// The header runs from an opening `---` line to the next `---` line. A byte
/// order mark before the opening line is skipped.
fn split_header(text: &str) -> Result<(Option<&str>, &str), ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let Some(first_line) = lines.next() else {
        return Ok((None, text));
    };
    if first_line.trim_end() != "---" {
        return Ok((None, text));
    }

    let header_start = first_line.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == "---" {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return Ok((Some(header), body));
        }
        offset += line.len();
    }

    Err(ParseError::UnterminatedHeader)
}

/// Errors that can occur when parsing an entry.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The header was opened with `---` but never closed.
    #[error("header block opened with '---' is never closed")]
    UnterminatedHeader,
    /// The header could not be parsed as YAML.
    #[error("header is not valid YAML")]
    Yaml(#[from] serde_yaml::Error),
    /// The header is valid YAML, but not a mapping of keys to values.
    #[error("header must be a mapping of keys to values")]
    NotAMapping,
    /// Required fields are missing (strict mode only).
    #[error("missing required header fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// The recognised keys of an entry header. Other keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
struct FrontMatter {
    name: Option<HeaderValue>,
    date: Option<HeaderValue>,
    tags: Option<HeaderValue>,
    image: Option<HeaderValue>,
}

impl FrontMatter {
    fn parse(header: &str) -> Result<Self, ParseError> {
        if header.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_yaml::from_str::<Value>(header)? {
            Value::Null => Ok(Self::default()),
            value @ Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
            _ => Err(ParseError::NotAMapping),
        }
    }
}
