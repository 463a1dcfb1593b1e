//! Property-based tests for focus-stats using proptest

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use focus_stats::aggregation::{Data, Granularity, hours_between};
use focus_stats::period::Period;
use focus_stats::types::{MINUTES_IN_AN_HOUR, mins_to_hours_and_mins};
use focus_stats::{Session, TimelineEntry};
use proptest::prelude::*;

// Strategies for generating test data

prop_compose! {
    fn arb_timezone()(
        name in prop::sample::select(vec![
            "UTC",
            "Africa/Lagos",
            "America/New_York",
            "Europe/London",
            "Asia/Tokyo",
            "Australia/Sydney",
            "Asia/Kolkata",
        ])
    ) -> Tz {
        name.parse().unwrap()
    }
}

prop_compose! {
    /// Zones without daylight saving changes, so 24-hour steps stay on
    /// local midnight
    fn arb_fixed_timezone()(
        name in prop::sample::select(vec![
            "UTC",
            "Africa/Lagos",
            "Asia/Tokyo",
            "Asia/Kolkata",
        ])
    ) -> Tz {
        name.parse().unwrap()
    }
}

prop_compose! {
    fn arb_now()(
        tz in arb_timezone(),
        secs in 1577836800i64..1735689600i64, // 2020-01-01 to 2025-01-01
    ) -> DateTime<Tz> {
        Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&tz)
    }
}

prop_compose! {
    /// Whole-minute sessions with up to three running spans, starting
    /// `offset` minutes into a window
    fn arb_session(window_minutes: i64)(
        offset in 0..window_minutes - 200,
        spans in prop::collection::vec((0i64..30, 1i64..40), 1..4),
        completed in any::<bool>(),
    ) -> (i64, Vec<(i64, i64)>, bool) {
        (offset, spans, completed)
    }
}

fn build_session(
    window_start: DateTime<Utc>,
    offset: i64,
    spans: &[(i64, i64)],
    completed: bool,
) -> Session {
    let start = window_start + Duration::minutes(offset);
    let mut cursor = start;
    let mut timeline = Vec::new();
    for &(gap, length) in spans {
        let from = cursor + Duration::minutes(gap);
        let to = from + Duration::minutes(length);
        timeline.push(TimelineEntry {
            start_time: from,
            end_time: to,
        });
        cursor = to;
    }

    Session {
        start_time: start,
        end_time: Some(cursor),
        completed,
        timeline,
        name: None,
        tags: Vec::new(),
    }
}

proptest! {
    #[test]
    fn prop_periods_start_before_end(now in arb_now()) {
        for period in Period::ALL {
            let range = period.resolve(now);
            if let (Some(start), Some(end)) = (range.start, range.end) {
                prop_assert!(start <= end, "{} resolved to {} > {}", period, start, end);
                prop_assert!(range.validate().is_ok());
            }
        }
    }

    #[test]
    fn prop_mins_round_trip(hours in 0u64..100_000, mins in 0u64..MINUTES_IN_AN_HOUR) {
        let total = hours * MINUTES_IN_AN_HOUR + mins;
        prop_assert_eq!(mins_to_hours_and_mins(total), (hours, mins));
    }

    #[test]
    fn prop_history_sums_to_totals(
        tz in arb_fixed_timezone(),
        day in 1u32..=28,
        sessions in prop::collection::vec(arb_session(30 * 24 * 60), 0..20),
    ) {
        let start = tz.with_ymd_and_hms(2023, 3, day, 0, 0, 0).earliest().unwrap();
        let end = start + Duration::days(30) - Duration::seconds(1);
        let window_start = start.with_timezone(&Utc);

        let sessions: Vec<Session> = sessions
            .iter()
            .map(|(offset, spans, completed)| build_session(window_start, *offset, spans, *completed))
            .collect();

        let data = Data::compute(&sessions, start, end);
        let history_minutes: u64 = data.history.values().map(|q| q.minutes).sum();
        let hourly_minutes: u64 = data.hour_of_day.iter().map(|q| q.minutes).sum();
        let weekday_minutes: u64 = data.weekday.iter().map(|q| q.minutes).sum();

        prop_assert_eq!(history_minutes, data.totals.minutes);
        prop_assert_eq!(hourly_minutes, data.totals.minutes);
        prop_assert_eq!(weekday_minutes, data.totals.minutes);
        prop_assert_eq!(
            data.totals.completed + data.totals.abandoned,
            sessions.len() as u64
        );
    }

    #[test]
    fn prop_granularity_matches_window(hours in 0i64..20_000) {
        let expected = if hours > 24 && hours <= 744 {
            Granularity::Day
        } else if hours > 8784 {
            Granularity::Year
        } else {
            Granularity::Month
        };
        prop_assert_eq!(Granularity::for_hours(hours), expected);
    }

    #[test]
    fn prop_hours_between_is_rounded(now in arb_now(), secs in 0i64..10_000_000) {
        let later = now + Duration::seconds(secs);
        let hours = hours_between(now, later);
        prop_assert!((hours * 3600 - secs).abs() <= 1800);
    }
}
