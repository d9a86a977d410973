use serde::{Deserialize, Serialize};

/// A single food diary entry, compiled from one markdown file.
///
/// Field order is the key order of the serialized artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The source file name with its extension removed.
    pub id: String,

    /// The display title of the dish.
    ///
    /// Absent when the header has no `name`; the key is then omitted from the
    /// artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The trimmed body of the entry, passed through uninterpreted.
    pub description: String,

    /// Tags in header order. Duplicates are kept.
    pub tags: Vec<String>,

    /// The entry date, `YYYY-MM-DD` when the header holds a date value.
    pub date: String,

    /// Bare file name of the entry's photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record {
    /// Returns `true` if the entry carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The display title, or an empty string if the entry has none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            id: "2024-01-15-hongshao-rou".to_string(),
            name: Some("红烧肉".to_string()),
            description: "这是一道美味的红烧肉。".to_string(),
            tags: vec!["家常菜".to_string(), "肉类".to_string()],
            date: "2024-01-15".to_string(),
            image: Some("hongshao-rou.jpg".to_string()),
        }
    }

    #[test]
    fn serializes_keys_in_artifact_order() {
        let json = serde_json::to_string(&record()).unwrap();
        let keys = ["id", "name", "description", "tags", "date", "image"];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| json.find(&format!("\"{key}\"")).unwrap())
            .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn absent_fields_are_omitted() {
        let record = Record {
            name: None,
            image: None,
            ..record()
        };

        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("name"));
        assert!(!object.contains_key("image"));
        assert_eq!(record.display_name(), "");

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn tag_membership() {
        let record = record();
        assert!(record.has_tag("肉类"));
        assert!(!record.has_tag("甜品"));
    }
}
