use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::errors::ScheduleError;
use crate::schedule::support::{value_type_name, DayTime};

/// Fires every day at selected times of day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    times: Vec<DayTime>,
}

impl DailySchedule {
    pub const TYPE: &'static str = "daily";

    /// Direct construction; callers must supply at least one time
    pub fn new(times: Vec<DayTime>) -> Self {
        assert!(!times.is_empty(), "a daily schedule requires at least one time");
        Self { times }
    }

    pub fn times(&self) -> &[DayTime] {
        &self.times
    }

    pub fn crons(&self) -> BTreeSet<String> {
        self.times
            .iter()
            .map(|time| format!("{} {} * * *", time.minute(), time.hour()))
            .collect()
    }

    pub fn builder() -> DailyScheduleBuilder {
        DailyScheduleBuilder::default()
    }

    /// Parse a schedule body: one time value, or an array of time values
    pub fn parse(value: &Value) -> Result<Self, ScheduleError> {
        match value {
            Value::Array(items) => {
                let mut times = Vec::with_capacity(items.len());
                for item in items {
                    times.push(Self::parse_time(item)?);
                }
                if times.is_empty() {
                    debug!("empty times array, using the default daily schedule");
                    Ok(Self::default())
                } else {
                    Ok(Self::new(times))
                }
            }
            Value::String(_) | Value::Number(_) | Value::Object(_) => {
                Ok(Self::new(vec![Self::parse_time(value)?]))
            }
            other => Err(ScheduleError::UnexpectedValue {
                schedule_type: Self::TYPE,
                expected: "a time value or an array of time values",
                found: value_type_name(other),
            }),
        }
    }

    fn parse_time(value: &Value) -> Result<DayTime, ScheduleError> {
        DayTime::parse(value).map_err(|cause| ScheduleError::InvalidTimes {
            schedule_type: Self::TYPE,
            cause,
        })
    }

    /// Serialized body; with `normalize`, a single member collapses to its
    /// bare form instead of a one-element array
    pub fn to_value(&self, normalize: bool) -> Value {
        if normalize && self.times.len() == 1 {
            return self.times[0].to_value();
        }
        Value::Array(self.times.iter().map(DayTime::to_value).collect())
    }
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self {
            times: vec![DayTime::MIDNIGHT],
        }
    }
}

/// Accumulates a deduplicated set of times; equal entries are added once
#[derive(Debug, Default)]
pub struct DailyScheduleBuilder {
    times: BTreeSet<DayTime>,
}

impl DailyScheduleBuilder {
    pub fn time(mut self, time: DayTime) -> Self {
        self.times.insert(time);
        self
    }

    pub fn build(self) -> DailySchedule {
        if self.times.is_empty() {
            debug!("no times added, using the default daily schedule");
            DailySchedule::default()
        } else {
            DailySchedule::new(self.times.into_iter().collect())
        }
    }
}
