use chrono::{
    DateTime,
    Utc,
};

use crate::core::{
    models::{
        Assignment,
        Collection,
        LevelProgression,
    },
    time::format_utc,
    WaniKaniError,
};

pub mod client;

pub use client::WaniKaniClient;

/// The two collection reads the triggers need. `WaniKaniClient` implements
/// this over HTTP; tests implement it with canned responses.
///
/// `error_prefix` is the stage-specific context string prepended to any
/// upstream failure, e.g. "Unable to retrieve lessons".
#[allow(async_fn_in_trait)]
pub trait WaniKaniApi {
    async fn assignments(
        &self,
        filter: &AssignmentFilter,
        error_prefix: &str,
    ) -> Result<Collection<Assignment>, WaniKaniError>;

    async fn level_progressions(
        &self,
        updated_after: DateTime<Utc>,
        error_prefix: &str,
    ) -> Result<Collection<LevelProgression>, WaniKaniError>;
}

/// Query parameters accepted by `GET /assignments`, limited to the filters
/// the triggers actually use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentFilter {
    pub immediately_available_for_lessons: bool,
    pub immediately_available_for_review: bool,
    pub updated_after: Option<DateTime<Utc>>,
    pub available_after: Option<DateTime<Utc>>,
}

impl AssignmentFilter {
    pub fn lessons() -> Self {
        Self { immediately_available_for_lessons: true, ..Self::default() }
    }

    pub fn reviews() -> Self {
        Self { immediately_available_for_review: true, ..Self::default() }
    }

    pub fn updated_after(mut self, bound: DateTime<Utc>) -> Self {
        self.updated_after = Some(bound);
        self
    }

    pub fn available_after(mut self, bound: DateTime<Utc>) -> Self {
        self.available_after = Some(bound);
        self
    }

    /// True when the filter carries no lower time bound, i.e. it asks for
    /// the full current snapshot rather than the novelty window.
    pub fn is_unbounded(&self) -> bool {
        self.updated_after.is_none() && self.available_after.is_none()
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if self.immediately_available_for_lessons {
            query.push(("immediately_available_for_lessons", "true".to_string()));
        }
        if self.immediately_available_for_review {
            query.push(("immediately_available_for_review", "true".to_string()));
        }
        if let Some(bound) = self.updated_after {
            query.push(("updated_after", format_utc(bound)));
        }
        if let Some(bound) = self.available_after {
            query.push(("available_after", format_utc(bound)));
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn lesson_filter_builds_expected_query() {
        let bound = Utc.with_ymd_and_hms(2020, 1, 1, 11, 30, 0).unwrap();
        let query = AssignmentFilter::lessons().updated_after(bound).to_query();

        assert_eq!(
            query,
            vec![
                ("immediately_available_for_lessons", "true".to_string()),
                ("updated_after", "2020-01-01T11:30:00Z".to_string()),
            ]
        );
    }

    #[test]
    fn review_snapshot_filter_is_unbounded() {
        let filter = AssignmentFilter::reviews();
        assert!(filter.is_unbounded());
        assert_eq!(
            filter.to_query(),
            vec![("immediately_available_for_review", "true".to_string())]
        );
    }
}
