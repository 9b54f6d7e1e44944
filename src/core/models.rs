use chrono::{
    DateTime,
    Utc,
};
use serde::Deserialize;

/// Paginated list envelope returned by every WaniKani collection endpoint.
///
/// Both fields default so that a payload missing `data` or `total_count`
/// deserializes into something indistinguishable from an empty listing
/// rather than failing.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub data: Option<Vec<Resource<T>>>,
}

impl<T> Collection<T> {
    pub fn records(&self) -> &[Resource<T>] {
        self.data.as_deref().unwrap_or_default()
    }

    /// True only when the listing both claims and contains records.
    pub fn has_records(&self) -> bool {
        self.total_count > 0 && !self.records().is_empty()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { total_count: 0, data: None }
    }
}

/// Generic resource envelope wrapping every record in a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<T> {
    pub id: u64,
    pub object: String,
    pub url: String,
    pub data_updated_at: Option<DateTime<Utc>>,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Radical,
    Kanji,
    Vocabulary,
    #[serde(other)]
    Unknown,
}

/// Assignment fields we care about; the endpoint returns more, but
/// everything else is noise for the triggers.
#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub subject_type: SubjectType,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub available_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub srs_stage: Option<u32>,
    #[serde(default)]
    pub srs_stage_name: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelProgression {
    pub level: u32,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub username: String,
    pub level: u32,
}
