use chrono::{
    DateTime,
    Utc,
};

use super::{
    samples,
    tally_subjects,
    LessonSummary,
    TriggerContext,
    TriggerInput,
};
use crate::{
    api::{
        AssignmentFilter,
        WaniKaniApi,
    },
    core::{
        time::{
            format_utc,
            novelty_window_start,
        },
        WaniKaniError,
    },
};

const ERROR_PREFIX: &str = "Unable to retrieve lessons";

/// Fires when new lessons became available within the novelty window.
/// Emits at most one summary per poll; the summary's `id` is the batch
/// unlock time, so the host sees each unlock batch exactly once.
pub async fn perform(
    api: &impl WaniKaniApi,
    context: &TriggerContext,
    input: &TriggerInput,
) -> Result<Vec<LessonSummary>, WaniKaniError> {
    // Users might not always have lessons, so a preview just gets the sample.
    if context.is_loading_sample() {
        return Ok(vec![samples::lesson_summary()]);
    }

    let Some(unlocked_at) = check_for_new_lessons(api).await? else {
        return Ok(Vec::new());
    };

    // The windowed fetch only proves novelty. Current totals need the full
    // snapshot of everything available for lessons right now.
    let snapshot = api.assignments(&AssignmentFilter::lessons(), ERROR_PREFIX).await?;
    let tally = tally_subjects(snapshot.records());

    if !input.allows_lessons(snapshot.total_count, &tally) {
        return Ok(Vec::new());
    }

    Ok(vec![LessonSummary {
        id: format_utc(unlocked_at),
        number_of_lessons: snapshot.total_count,
        number_of_radicals: tally.radicals,
        number_of_kanji: tally.kanji,
        number_of_vocab_words: tally.vocab_words,
    }])
}

/// Only look at assignments updated in the past 30 minutes so we don't keep
/// notifying about old lessons. Every lesson in one unlock batch shares the
/// same `unlocked_at`, so the first record anchors the whole batch.
async fn check_for_new_lessons(
    api: &impl WaniKaniApi,
) -> Result<Option<DateTime<Utc>>, WaniKaniError> {
    let window_start = novelty_window_start(Utc::now());
    let filter = AssignmentFilter::lessons().updated_after(window_start);
    let recent = api.assignments(&filter, ERROR_PREFIX).await?;

    if !recent.has_records() {
        return Ok(None);
    }

    Ok(recent.records()[0].data.unlocked_at)
}
