//! Canned records returned in sample-loading mode so the host can show a
//! realistic preview without live credentials.

use super::{
    LessonSummary,
    LevelRecord,
    ReviewSummary,
};

pub fn lesson_summary() -> LessonSummary {
    LessonSummary {
        id: "2019-01-10T18:00:00Z".to_string(),
        number_of_lessons: 42,
        number_of_radicals: 2,
        number_of_kanji: 12,
        number_of_vocab_words: 28,
    }
}

pub fn review_summary() -> ReviewSummary {
    ReviewSummary {
        id: "2019-01-10T19:00:00Z".to_string(),
        number_of_reviews: 15,
        number_of_radicals: 1,
        number_of_kanji: 4,
        number_of_vocab_words: 10,
    }
}

pub fn level_record() -> LevelRecord {
    LevelRecord {
        id: 2600171,
        level: 4,
        unlocked_at: Some("2019-02-14T00:00:00Z".to_string()),
    }
}
