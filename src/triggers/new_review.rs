use chrono::{
    DateTime,
    Utc,
};

use super::{
    samples,
    tally_subjects,
    ReviewSummary,
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

const ERROR_PREFIX: &str = "Unable to retrieve reviews";

/// Fires when new reviews became available within the novelty window.
/// Structurally identical to the lesson trigger, but anchored on
/// `available_at` since that's what moves when a review batch comes due.
pub async fn perform(
    api: &impl WaniKaniApi,
    context: &TriggerContext,
    input: &TriggerInput,
) -> Result<Vec<ReviewSummary>, WaniKaniError> {
    if context.is_loading_sample() {
        return Ok(vec![samples::review_summary()]);
    }

    let Some(available_at) = check_for_new_reviews(api).await? else {
        return Ok(Vec::new());
    };

    let snapshot = api.assignments(&AssignmentFilter::reviews(), ERROR_PREFIX).await?;
    let tally = tally_subjects(snapshot.records());

    if !input.allows_reviews(snapshot.total_count, &tally) {
        return Ok(Vec::new());
    }

    Ok(vec![ReviewSummary {
        id: format_utc(available_at),
        number_of_reviews: snapshot.total_count,
        number_of_radicals: tally.radicals,
        number_of_kanji: tally.kanji,
        number_of_vocab_words: tally.vocab_words,
    }])
}

/// Reviews that came due in one batch share the same `available_at`, so the
/// first record of the windowed fetch anchors the batch.
async fn check_for_new_reviews(
    api: &impl WaniKaniApi,
) -> Result<Option<DateTime<Utc>>, WaniKaniError> {
    let window_start = novelty_window_start(Utc::now());
    let filter = AssignmentFilter::reviews().available_after(window_start);
    let recent = api.assignments(&filter, ERROR_PREFIX).await?;

    if !recent.has_records() {
        return Ok(None);
    }

    Ok(recent.records()[0].data.available_at)
}
