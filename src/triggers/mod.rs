use serde::{
    Deserialize,
    Serialize,
};

use crate::core::models::{
    Assignment,
    Resource,
    SubjectType,
};

pub mod new_lesson;
pub mod new_level;
pub mod new_review;
pub mod samples;

/// Whether a trigger run is live or only backing a UI preview. Sample
/// loading bypasses all fetching so the host can render an example record
/// without credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    Live,
    SampleLoading,
}

#[derive(Debug, Clone, Copy)]
pub struct TriggerContext {
    pub mode: InvocationMode,
}

impl TriggerContext {
    pub fn live() -> Self {
        Self { mode: InvocationMode::Live }
    }

    pub fn sample_loading() -> Self {
        Self { mode: InvocationMode::SampleLoading }
    }

    pub fn is_loading_sample(&self) -> bool {
        self.mode == InvocationMode::SampleLoading
    }
}

/// Optional per-category minimum counts supplied by the user. An unset
/// minimum places no constraint. Lets users gate notifications without
/// setting up a separate filter step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerInput {
    pub min_lessons: Option<u32>,
    pub min_reviews: Option<u32>,
    pub min_radicals: Option<u32>,
    pub min_kanji: Option<u32>,
    pub min_vocab: Option<u32>,
}

impl TriggerInput {
    /// All configured minimums must be met; any single shortfall suppresses
    /// the whole notification.
    pub fn allows_lessons(&self, total: u32, tally: &SubjectTally) -> bool {
        meets(self.min_lessons, total) && self.allows_subjects(tally)
    }

    pub fn allows_reviews(&self, total: u32, tally: &SubjectTally) -> bool {
        meets(self.min_reviews, total) && self.allows_subjects(tally)
    }

    fn allows_subjects(&self, tally: &SubjectTally) -> bool {
        meets(self.min_radicals, tally.radicals)
            && meets(self.min_kanji, tally.kanji)
            && meets(self.min_vocab, tally.vocab_words)
    }
}

fn meets(minimum: Option<u32>, count: u32) -> bool {
    minimum.map_or(true, |m| count >= m)
}

/// Per-subject-type counts over a snapshot of assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectTally {
    pub radicals: u32,
    pub kanji: u32,
    pub vocab_words: u32,
}

/// Classify each assignment into exactly one bucket. Subject types we don't
/// recognize stay out of every bucket but still count toward the snapshot's
/// `total_count`.
pub fn tally_subjects(records: &[Resource<Assignment>]) -> SubjectTally {
    let mut tally = SubjectTally::default();

    for record in records {
        match record.data.subject_type {
            SubjectType::Radical => tally.radicals += 1,
            SubjectType::Kanji => tally.kanji += 1,
            SubjectType::Vocabulary => tally.vocab_words += 1,
            SubjectType::Unknown => {}
        }
    }

    tally
}

/// Emitted when new lessons become available. `id` is the unlock timestamp
/// of the batch, so repeated polls over the same batch reproduce the same
/// id and the host can drop the duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub id: String,
    pub number_of_lessons: u32,
    pub number_of_radicals: u32,
    pub number_of_kanji: u32,
    pub number_of_vocab_words: u32,
}

/// Emitted when new reviews become available; same dedup scheme as
/// `LessonSummary` but anchored on `available_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub id: String,
    pub number_of_reviews: u32,
    pub number_of_radicals: u32,
    pub number_of_kanji: u32,
    pub number_of_vocab_words: u32,
}

/// One reached level, stripped of the envelope fields that would only
/// confuse users (`object`, `data_updated_at`, `url`, `data`). The upstream
/// record id is already stable per level, so it doubles as the dedup id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    pub id: u64,
    pub level: u32,
    pub unlocked_at: Option<String>,
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use chrono::{
        DateTime,
        Utc,
    };

    use crate::{
        api::{
            AssignmentFilter,
            WaniKaniApi,
        },
        core::{
            models::{
                Assignment,
                Collection,
                LevelProgression,
                Resource,
                SubjectType,
            },
            WaniKaniError,
        },
    };

    /// Either a canned collection or an upstream error message that the
    /// real client would have prefixed with the stage string.
    pub type Canned<T> = Result<Collection<T>, String>;

    #[derive(Default)]
    pub struct FakeApi {
        pub assignments: Mutex<Vec<Canned<Assignment>>>,
        pub level_progressions: Mutex<Vec<Canned<LevelProgression>>>,
        pub seen_filters: Mutex<Vec<AssignmentFilter>>,
    }

    impl FakeApi {
        pub fn with_assignments(responses: Vec<Canned<Assignment>>) -> Self {
            Self { assignments: Mutex::new(responses), ..Self::default() }
        }

        pub fn with_level_progressions(responses: Vec<Canned<LevelProgression>>) -> Self {
            Self { level_progressions: Mutex::new(responses), ..Self::default() }
        }
    }

    impl WaniKaniApi for FakeApi {
        async fn assignments(
            &self,
            filter: &AssignmentFilter,
            error_prefix: &str,
        ) -> Result<Collection<Assignment>, WaniKaniError> {
            self.seen_filters.lock().unwrap().push(filter.clone());
            match self.assignments.lock().unwrap().remove(0) {
                Ok(collection) => Ok(collection),
                Err(message) => Err(WaniKaniError::Api(format!("{error_prefix}: {message}"))),
            }
        }

        async fn level_progressions(
            &self,
            _updated_after: DateTime<Utc>,
            error_prefix: &str,
        ) -> Result<Collection<LevelProgression>, WaniKaniError> {
            match self.level_progressions.lock().unwrap().remove(0) {
                Ok(collection) => Ok(collection),
                Err(message) => Err(WaniKaniError::Api(format!("{error_prefix}: {message}"))),
            }
        }
    }

    pub fn assignment(
        id: u64,
        subject_type: SubjectType,
        unlocked_at: Option<DateTime<Utc>>,
        available_at: Option<DateTime<Utc>>,
    ) -> Resource<Assignment> {
        Resource {
            id,
            object: "assignment".to_string(),
            url: format!("https://api.wanikani.com/v2/assignments/{id}"),
            data_updated_at: unlocked_at,
            data: Assignment {
                subject_type,
                unlocked_at,
                available_at,
                srs_stage: Some(0),
                srs_stage_name: Some("Initiate".to_string()),
                level: Some(4),
            },
        }
    }

    pub fn assignments_of(records: Vec<Resource<Assignment>>) -> Collection<Assignment> {
        Collection { total_count: records.len() as u32, data: Some(records) }
    }
}
