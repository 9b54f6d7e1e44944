use chrono::{
    DateTime,
    Duration,
    SecondsFormat,
    Utc,
};

/// Start of the trailing window used to decide whether an assignment is
/// genuinely new rather than something the user was already notified about.
pub fn novelty_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::minutes(30)
}

/// Level progressions can't be sorted by recency and the list endpoint caps
/// out at a fixed page size, so we only ask for the trailing year. That
/// reliably captures the current level without blowing past the cap.
pub fn level_lookback_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(365)
}

/// Canonical UTC ISO-8601 string, e.g. "2020-01-01T00:00:00Z".
///
/// Fractional seconds are dropped so that re-fetching the same batch always
/// reproduces the same string, which is what makes it usable as a dedup id.
pub fn format_utc(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn novelty_window_is_thirty_minutes() {
        let now = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
        let start = novelty_window_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2020, 1, 1, 11, 30, 0).unwrap());
    }

    #[test]
    fn level_lookback_is_one_year() {
        let now = Utc.with_ymd_and_hms(2020, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(level_lookback_start(now), Utc.with_ymd_and_hms(2019, 6, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn format_utc_is_canonical_and_stable() {
        let timestamp: DateTime<Utc> = "2020-01-01T00:00:00.000000Z".parse().unwrap();
        assert_eq!(format_utc(timestamp), "2020-01-01T00:00:00Z");

        // Same instant with or without fractional digits formats identically.
        let bare: DateTime<Utc> = "2020-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(format_utc(timestamp), format_utc(bare));
    }
}
