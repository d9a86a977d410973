use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::domain::Record;

/// The compiled food diary: every entry, newest first, plus the tag index.
///
/// This is the build artifact consumed by the web front-end, which treats
/// `items` as already sorted and `allTags` as already deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Entries sorted by date, most recent first.
    pub items: Vec<Record>,
    /// Every distinct tag, in the order it was first seen.
    pub all_tags: Vec<String>,
}

impl Collection {
    /// Assembles a collection from records in discovery order.
    ///
    /// The tag index is built from the records as given, before sorting.
    /// Records are then sorted by date descending; the sort is stable, so
    /// entries sharing a date keep their discovery order.
    #[must_use]
    pub fn assemble(mut records: Vec<Record>) -> Self {
        let all_tags: IndexSet<String> = records
            .iter()
            .flat_map(|record| record.tags.iter().cloned())
            .collect();

        records.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            items: records,
            all_tags: all_tags.into_iter().collect(),
        }
    }

    /// Returns `true` if the collection holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the entries carrying `tag`, in collection order.
    ///
    /// `None` selects every entry.
    pub fn filter_by_tag<'a>(&'a self, tag: Option<&'a str>) -> impl Iterator<Item = &'a Record> {
        self.items
            .iter()
            .filter(move |record| tag.is_none_or(|tag| record.has_tag(tag)))
    }

    /// The entries carrying `tag` (or all entries), grouped by date.
    #[must_use]
    pub fn timeline<'a>(&'a self, tag: Option<&'a str>) -> Vec<DateGroup<'a>> {
        group_by_date(self.filter_by_tag(tag))
    }

    /// Counts the entries carrying each tag, in tag index order.
    ///
    /// An entry listing the same tag twice is counted once.
    #[must_use]
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        self.all_tags
            .iter()
            .map(|tag| (tag.as_str(), self.filter_by_tag(Some(tag.as_str())).count()))
            .collect()
    }
}

/// Entries sharing a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup<'a> {
    /// The shared date.
    pub date: &'a str,
    /// The entries, in input order.
    pub items: Vec<&'a Record>,
}

/// Groups records by date.
///
/// Groups are ordered by date descending. Within a group, records keep the
/// order they were given in.
pub fn group_by_date<'a, I>(records: I) -> Vec<DateGroup<'a>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for record in records {
        groups.entry(record.date.as_str()).or_default().push(record);
    }

    groups
        .into_iter()
        .rev()
        .map(|(date, items)| DateGroup { date, items })
        .collect()
}
