//! The log filter engine: computes a date/count-restricted view of one
//! user's exercise log.
//!
//! Query parameters arrive as raw strings and the contract is deliberately
//! permissive: an unparsable `from`, `to` or `limit` behaves exactly as if it
//! had been omitted. Only exercise submission treats a bad date as an error.

use chrono::{DateTime, NaiveTime, Utc};

use crate::{api::payloads::LogQuery, model::Exercise, validate::parse_date};

/// Filters `log` down to the entries matching `query`, preserving insertion
/// order. Applied in a fixed order: `from`, then `to`, then `limit`.
pub fn filter_log(log: &[Exercise], query: &LogQuery) -> Vec<Exercise> {
    let from = query.from.as_deref().and_then(parse_date);
    let to = query.to.as_deref().and_then(parse_date).and_then(end_of_day);
    let limit = query.limit.as_deref().and_then(parse_limit);

    let mut filtered: Vec<Exercise> = log
        .iter()
        .filter(|e| from.map_or(true, |from| e.date >= from))
        .filter(|e| to.map_or(true, |to| e.date <= to))
        .cloned()
        .collect();

    if let Some(limit) = limit {
        filtered.truncate(limit);
    }

    filtered
}

/// `from` is compared at its literal instant, but `to` covers the whole of
/// its calendar day. The asymmetry means `from == to == D` selects every
/// exercise dated on `D` regardless of time of day.
fn end_of_day(date: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
    Some(date.date_naive().and_time(end).and_utc())
}

fn parse_limit(limit: &str) -> Option<usize> {
    limit.trim().parse::<usize>().ok().filter(|limit| *limit > 0)
}

/// Renders a date the way clients display it, e.g. "Mon Jan 01 2024".
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn exercise(id: i64, date: DateTime<Utc>) -> Exercise {
        Exercise {
            id,
            user_id: 1,
            description: format!("exercise {id}"),
            duration: 10,
            date,
        }
    }

    fn day(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn sample_log() -> Vec<Exercise> {
        vec![
            exercise(1, day(2024, 1, 1, 9)),
            exercise(2, day(2024, 1, 1, 21)),
            exercise(3, day(2024, 1, 2, 12)),
            exercise(4, day(2024, 2, 10, 7)),
            exercise(5, day(2024, 3, 5, 18)),
        ]
    }

    fn query(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> LogQuery {
        LogQuery {
            from: from.map(str::to_owned),
            to: to.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    fn ids(log: &[Exercise]) -> Vec<i64> {
        log.iter().map(|e| e.id).collect()
    }

    #[test]
    fn empty_query_returns_full_log_in_order() {
        let log = sample_log();
        assert_eq!(ids(&filter_log(&log, &LogQuery::default())), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn single_day_range_covers_the_whole_day() {
        let log = sample_log();
        let filtered = filter_log(&log, &query(Some("2024-01-01"), Some("2024-01-01"), None));
        // Both entries dated Jan 1st, regardless of time component
        assert_eq!(ids(&filtered), vec![1, 2]);
    }

    #[test]
    fn from_is_inclusive_at_its_literal_instant() {
        let log = vec![
            exercise(1, day(2024, 1, 1, 0)),
            exercise(2, Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()),
        ];
        let filtered = filter_log(&log, &query(Some("2024-01-01"), None, None));
        assert_eq!(ids(&filtered), vec![1]);
    }

    #[test]
    fn to_is_normalized_to_end_of_day() {
        let log = vec![
            exercise(1, Utc.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap()),
            exercise(2, day(2024, 1, 3, 0)),
        ];
        let filtered = filter_log(&log, &query(None, Some("2024-01-02"), None));
        assert_eq!(ids(&filtered), vec![1]);
    }

    #[test]
    fn limit_truncates_after_filtering() {
        let log = sample_log();
        let filtered = filter_log(&log, &query(None, None, Some("2")));
        assert_eq!(ids(&filtered), vec![1, 2]);

        // Limit applies to the filtered sequence, not the full log
        let filtered = filter_log(&log, &query(Some("2024-01-02"), None, Some("2")));
        assert_eq!(ids(&filtered), vec![3, 4]);
    }

    #[test]
    fn unparsable_from_behaves_as_omitted() {
        let log = sample_log();
        let all = filter_log(&log, &LogQuery::default());
        assert_eq!(filter_log(&log, &query(Some("not-a-date"), None, None)), all);
        assert_eq!(filter_log(&log, &query(None, Some("garbage"), None)), all);
    }

    #[test]
    fn unparsable_or_non_positive_limit_is_ignored() {
        let log = sample_log();
        for limit in ["zero", "-1", "0", "2.5", ""] {
            let filtered = filter_log(&log, &query(None, None, Some(limit)));
            assert_eq!(filtered.len(), 5, "limit {limit:?} should be ignored");
        }
    }

    #[test]
    fn source_log_is_not_mutated() {
        let log = sample_log();
        let _ = filter_log(&log, &query(Some("2024-02-01"), None, Some("1")));
        assert_eq!(ids(&log), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn dates_render_as_display_strings() {
        assert_eq!(format_date(&day(2024, 1, 1, 9)), "Mon Jan 01 2024");
        assert_eq!(format_date(&day(2024, 2, 10, 7)), "Sat Feb 10 2024");
    }
}
