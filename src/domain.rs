//! Domain models for the food diary.
//!
//! This module contains the diary entry record, the assembled collection and
//! the views derived from it, and the build configuration.

/// Diary entry records.
pub mod record;
pub use record::Record;

/// The assembled collection and its derived views.
pub mod collection;
pub use collection::{Collection, DateGroup, group_by_date};

mod config;
pub use config::{Config, ConfigError, Strictness};
