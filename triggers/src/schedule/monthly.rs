use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::errors::ScheduleError;
use crate::schedule::support::{value_type_name, MonthTimes};

/// Fires on selected days of the month at selected times of day
///
/// Member order is kept as parsed so a single-entry schedule round-trips to
/// the compact form it was written in; semantically the order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySchedule {
    times: Vec<MonthTimes>,
}

impl MonthlySchedule {
    pub const TYPE: &'static str = "monthly";

    /// Direct construction; callers must supply at least one month time.
    /// The parser and builder handle the empty case by falling back to the
    /// default schedule.
    pub fn new(times: Vec<MonthTimes>) -> Self {
        assert!(!times.is_empty(), "a monthly schedule requires at least one month time");
        Self { times }
    }

    pub fn times(&self) -> &[MonthTimes] {
        &self.times
    }

    /// Deduplicated union of the member cron expressions
    pub fn crons(&self) -> BTreeSet<String> {
        self.times.iter().flat_map(MonthTimes::crons).collect()
    }

    pub fn builder() -> MonthlyScheduleBuilder {
        MonthlyScheduleBuilder::default()
    }

    /// Parse a schedule body: one month-times object, or an array of them
    pub fn parse(value: &Value) -> Result<Self, ScheduleError> {
        match value {
            Value::Object(_) => {
                let time = Self::parse_times(value)?;
                Ok(Self::new(vec![time]))
            }
            Value::Array(items) => {
                let mut times = Vec::with_capacity(items.len());
                for item in items {
                    times.push(Self::parse_times(item)?);
                }
                if times.is_empty() {
                    debug!("empty month times array, using the default monthly schedule");
                    Ok(Self::default())
                } else {
                    Ok(Self::new(times))
                }
            }
            other => Err(ScheduleError::UnexpectedValue {
                schedule_type: Self::TYPE,
                expected: "an object or an array of objects representing month times",
                found: value_type_name(other),
            }),
        }
    }

    fn parse_times(value: &Value) -> Result<MonthTimes, ScheduleError> {
        MonthTimes::parse(value).map_err(|cause| ScheduleError::InvalidTimes {
            schedule_type: Self::TYPE,
            cause,
        })
    }

    /// Serialized body; with `normalize`, a single member collapses to its
    /// bare object instead of a one-element array
    pub fn to_value(&self, normalize: bool) -> Value {
        if normalize && self.times.len() == 1 {
            return self.times[0].to_value();
        }
        Value::Array(self.times.iter().map(MonthTimes::to_value).collect())
    }
}

impl Default for MonthlySchedule {
    fn default() -> Self {
        Self {
            times: vec![MonthTimes::default()],
        }
    }
}

/// Accumulates a deduplicated set of month times; equal entries are added once
#[derive(Debug, Default)]
pub struct MonthlyScheduleBuilder {
    times: BTreeSet<MonthTimes>,
}

impl MonthlyScheduleBuilder {
    /// Add a month time; accepts built values and `MonthTimesBuilder`s
    pub fn time(mut self, time: impl Into<MonthTimes>) -> Self {
        self.times.insert(time.into());
        self
    }

    pub fn build(self) -> MonthlySchedule {
        if self.times.is_empty() {
            debug!("no month times added, using the default monthly schedule");
            MonthlySchedule::default()
        } else {
            MonthlySchedule::new(self.times.into_iter().collect())
        }
    }
}
