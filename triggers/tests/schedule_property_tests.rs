// Property-based tests for the schedule definition model

use std::collections::BTreeSet;

use proptest::prelude::*;
use triggers::schedule::support::{DayOfMonth, DayTime, MonthTimes};
use triggers::schedule::{validate_cron_expression, DailySchedule, MonthlySchedule, Schedule};

fn any_day() -> impl Strategy<Value = DayOfMonth> {
    prop_oneof![
        (1u8..=31).prop_map(DayOfMonth::Day),
        Just(DayOfMonth::LastDay),
    ]
}

fn numeric_day() -> impl Strategy<Value = DayOfMonth> {
    (1u8..=31).prop_map(DayOfMonth::Day)
}

fn any_time() -> impl Strategy<Value = DayTime> {
    (0u8..=23, 0u8..=59).prop_map(|(hour, minute)| DayTime::new(hour, minute).unwrap())
}

fn any_month_times() -> impl Strategy<Value = MonthTimes> {
    (
        prop::collection::btree_set(any_day(), 1..4),
        prop::collection::btree_set(any_time(), 1..4),
    )
        .prop_map(|(on, at)| MonthTimes::new(on, at))
}

/// **Property 1: Cron derivation covers the day × time cross product**
///
/// *For any* non-empty day and time selector sets, the derived cron set holds
/// exactly one well-formed 5-field expression per (day, time) pair, with the
/// month and weekday fields wildcarded.
#[test]
fn property_month_times_crons_cover_cross_product() {
    proptest!(|(
        on in prop::collection::btree_set(any_day(), 1..4),
        at in prop::collection::btree_set(any_time(), 1..4)
    )| {
        let times = MonthTimes::new(on.clone(), at.clone());
        let crons = times.crons();
        prop_assert_eq!(crons.len(), on.len() * at.len());

        for cron in &crons {
            let fields: Vec<&str> = cron.split_whitespace().collect();
            prop_assert_eq!(fields.len(), 5);
            prop_assert!(fields[0].parse::<u8>().unwrap() <= 59);
            prop_assert!(fields[1].parse::<u8>().unwrap() <= 23);
            prop_assert!(fields[2] == "L" || (1..=31).contains(&fields[2].parse::<u8>().unwrap()));
            prop_assert_eq!(fields[3], "*");
            prop_assert_eq!(fields[4], "*");
        }
    });
}

/// **Property 2: A monthly schedule's cron set is the member union**
///
/// *For any* non-empty sequence of month times, the schedule's cron set
/// equals the deduplicated union of each member's cron set.
#[test]
fn property_monthly_crons_equal_member_union() {
    proptest!(|(members in prop::collection::vec(any_month_times(), 1..4))| {
        let schedule = MonthlySchedule::new(members.clone());
        let mut union = BTreeSet::new();
        for member in &members {
            union.extend(member.crons());
        }
        prop_assert_eq!(schedule.crons(), union);
    });
}

/// **Property 3: Serialization round-trips preserve the trigger set**
///
/// *For any* monthly schedule and either normalization mode, parsing the
/// serialized definition reproduces an equal cron set.
#[test]
fn property_round_trip_preserves_crons() {
    proptest!(|(
        members in prop::collection::vec(any_month_times(), 1..4),
        normalize in any::<bool>()
    )| {
        let schedule = Schedule::Monthly(MonthlySchedule::new(members));
        let reparsed = Schedule::from_value(&schedule.to_value(normalize)).unwrap();
        prop_assert_eq!(reparsed.crons(), schedule.crons());
    });
}

/// **Property 4: The builder deduplicates equal month times**
///
/// *For any* month times value added repeatedly, the built schedule holds a
/// single member.
#[test]
fn property_builder_dedupes_repeated_times() {
    proptest!(|(times in any_month_times(), copies in 1usize..5)| {
        let mut builder = MonthlySchedule::builder();
        for _ in 0..copies {
            builder = builder.time(times.clone());
        }
        let schedule = builder.build();
        prop_assert_eq!(schedule.times().len(), 1);
        prop_assert_eq!(&schedule.times()[0], &times);
    });
}

/// **Property 5: Numeric-day triggers validate under the engine grammar**
///
/// *For any* month times built from numeric day selectors, every derived
/// expression passes cron validation.
#[test]
fn property_numeric_day_crons_validate() {
    proptest!(|(
        on in prop::collection::btree_set(numeric_day(), 1..4),
        at in prop::collection::btree_set(any_time(), 1..4)
    )| {
        let times = MonthTimes::new(on, at);
        for cron in times.crons() {
            prop_assert!(validate_cron_expression(&cron).is_ok(), "rejected: {}", cron);
        }
    });
}

/// **Property 6: Daily schedules wildcard the calendar fields**
///
/// *For any* non-empty time selector set, the daily schedule derives one
/// expression per time with day-of-month, month, and weekday wildcarded.
#[test]
fn property_daily_crons_wildcard_calendar_fields() {
    proptest!(|(times in prop::collection::btree_set(any_time(), 1..4))| {
        let schedule = DailySchedule::new(times.iter().copied().collect());
        let crons = schedule.crons();
        prop_assert_eq!(crons.len(), times.len());
        for cron in &crons {
            prop_assert!(cron.ends_with("* * *"));
            prop_assert!(validate_cron_expression(cron).is_ok());
        }
    });
}
