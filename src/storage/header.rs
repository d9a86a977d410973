//! Loosely typed header values.
//!
//! The YAML header of an entry can hold strings, dates, numbers or lists for
//! any key. [`HeaderValue`] captures what was found, and is converted into the
//! typed fields of a [`Record`](crate::Record) as soon as the header is read.

use std::sync::LazyLock;

use chrono::{FixedOffset, NaiveDate, TimeZone};
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_yaml::{Mapping, Number, Value};

/// A plain `YYYY-MM-DD` calendar date.
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<year>[0-9]{4})-(?<month>[0-9]{2})-(?<day>[0-9]{2})$")
        .expect("date pattern is valid")
});

/// A YAML timestamp: a date followed by a time of day and an optional zone.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?<year>[0-9]{4})-(?<month>[0-9]{1,2})-(?<day>[0-9]{1,2})",
        r"(?:[Tt]|[ \t]+)(?<hour>[0-9]{1,2}):(?<minute>[0-9]{2}):(?<second>[0-9]{2})",
        r"(?:\.[0-9]*)?",
        r"(?:[ \t]*(?<zone>Z|(?<sign>[-+])(?<zone_hour>[0-9]{1,2})(?::(?<zone_minute>[0-9]{2}))?))?$",
    ))
    .expect("timestamp pattern is valid")
});

/// A single value from an entry header.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum HeaderValue {
    /// An explicit `null` or an empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer or float.
    Number(Number),
    /// A string that is not a date.
    Text(String),
    /// A date or timestamp, reduced to its UTC calendar date.
    Date(NaiveDate),
    /// A sequence of values.
    List(Vec<HeaderValue>),
    /// A nested mapping.
    Mapping(Mapping),
}

impl HeaderValue {
    /// The string form of a scalar-like value, or `None` for `null`.
    ///
    /// Dates are written as `YYYY-MM-DD`. Lists join their elements with
    /// commas.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Date(date) => Some(format_date(*date)),
            Self::List(items) => Some(
                items
                    .iter()
                    .filter_map(Self::to_text)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Self::Mapping(mapping) => Some(
                serde_yaml::to_string(mapping)
                    .unwrap_or_default()
                    .trim_end()
                    .to_string(),
            ),
        }
    }

    /// Returns `true` for `null`, `false`, zero, NaN and the empty string.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null | Self::Bool(false) => true,
            Self::Number(n) => n.as_f64().is_some_and(|f| f == 0.0 || f.is_nan()),
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The value as a list of strings.
    ///
    /// A falsy value is an empty list and any other lone scalar is a list of
    /// one. `null` elements of a list are dropped.
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.iter().filter_map(Self::to_text).collect(),
            other if other.is_falsy() => Vec::new(),
            other => other.to_text().into_iter().collect(),
        }
    }
}

impl From<Value> for HeaderValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => parse_date(&s).map_or(Self::Text(s), Self::Date),
            Value::Sequence(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Mapping(mapping) => Self::Mapping(mapping),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Recognises a YAML date or timestamp and returns its UTC calendar date.
///
/// Returns `None` if the string is not in timestamp form or names a date that
/// does not exist.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE.captures(s) {
        return calendar_date(&caps);
    }

    let caps = TIMESTAMP.captures(s)?;
    let local = calendar_date(&caps)?.and_hms_opt(
        field(&caps, "hour")?,
        field(&caps, "minute")?,
        field(&caps, "second")?,
    )?;

    let offset_seconds = match caps.name("sign") {
        None => 0,
        Some(sign) => {
            let hours: i32 = field(&caps, "zone_hour")?;
            let minutes: i32 = caps
                .name("zone_minute")
                .map_or(Some(0), |m| m.as_str().parse().ok())?;
            let seconds = (hours * 60 + minutes) * 60;
            if sign.as_str() == "-" { -seconds } else { seconds }
        }
    };

    let offset = FixedOffset::east_opt(offset_seconds)?;
    let timestamp = offset.from_local_datetime(&local).single()?;
    Some(timestamp.naive_utc().date())
}

fn calendar_date(caps: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        field(caps, "year")?,
        field(caps, "month")?,
        field(caps, "day")?,
    )
}

fn field<T: std::str::FromStr>(caps: &Captures<'_>, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}
