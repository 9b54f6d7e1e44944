use chrono::Utc;

use super::{
    samples,
    LevelRecord,
    TriggerContext,
    TriggerInput,
};
use crate::{
    api::WaniKaniApi,
    core::{
        models::{
            LevelProgression,
            Resource,
        },
        time::{
            format_utc,
            level_lookback_start,
        },
        WaniKaniError,
    },
};

const ERROR_PREFIX: &str = "Unable to retrieve current user level";

/// Fires when the user reaches a new level. Levels change rarely and every
/// progression record is unique, so there is no novelty window or threshold
/// stage; each fetched progression maps straight to an output record.
pub async fn perform(
    api: &impl WaniKaniApi,
    context: &TriggerContext,
    _input: &TriggerInput,
) -> Result<Vec<LevelRecord>, WaniKaniError> {
    if context.is_loading_sample() {
        return Ok(vec![samples::level_record()]);
    }

    let lookback = level_lookback_start(Utc::now());
    let progressions = api.level_progressions(lookback, ERROR_PREFIX).await?;

    Ok(progressions.records().iter().map(clean_level_entry).collect())
}

/// Keep only what users care about: the upstream id (already stable per
/// level), the level itself, and when it was unlocked.
fn clean_level_entry(record: &Resource<LevelProgression>) -> LevelRecord {
    LevelRecord {
        id: record.id,
        level: record.data.level,
        unlocked_at: record.data.unlocked_at.map(format_utc),
    }
}
