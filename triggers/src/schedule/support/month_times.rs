use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::errors::TimesParseError;
use crate::schedule::support::{value_type_name, DayTime};

/// A day-of-month selector: a calendar day 1-31, or the last day of the month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfMonth {
    Day(u8),
    LastDay,
}

impl DayOfMonth {
    pub fn day(day: u8) -> Result<Self, TimesParseError> {
        if !(1..=31).contains(&day) {
            return Err(TimesParseError::InvalidDayOfMonth(day.to_string()));
        }
        Ok(Self::Day(day))
    }

    pub fn parse(value: &Value) -> Result<Self, TimesParseError> {
        match value {
            Value::Number(_) => {
                let raw = value
                    .as_i64()
                    .ok_or_else(|| TimesParseError::InvalidDayOfMonth(value.to_string()))?;
                u8::try_from(raw)
                    .map_err(|_| TimesParseError::InvalidDayOfMonth(raw.to_string()))
                    .and_then(Self::day)
            }
            Value::String(raw) => match raw.as_str() {
                "first_day" => Ok(Self::Day(1)),
                "last_day" => Ok(Self::LastDay),
                other => Err(TimesParseError::InvalidDayOfMonth(other.to_string())),
            },
            other => Err(TimesParseError::UnexpectedValue {
                expected: "a day number or day name",
                found: value_type_name(other),
            }),
        }
    }

    /// Day-of-month field of a cron expression; `L` selects the last day
    pub fn cron_field(&self) -> String {
        match self {
            Self::Day(day) => day.to_string(),
            Self::LastDay => "L".to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Day(day) => json!(day),
            Self::LastDay => json!("last_day"),
        }
    }
}

/// A set of day-of-month selectors crossed with a set of time-of-day selectors
///
/// Value equality ignores input order; the sets iterate in a stable order so
/// derived cron expressions and serialized output are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthTimes {
    on: BTreeSet<DayOfMonth>,
    at: BTreeSet<DayTime>,
}

impl MonthTimes {
    /// Empty selector sets fall back to the defaults (day 1, midnight)
    pub fn new(on: BTreeSet<DayOfMonth>, at: BTreeSet<DayTime>) -> Self {
        let mut times = Self { on, at };
        if times.on.is_empty() {
            times.on.insert(DayOfMonth::Day(1));
        }
        if times.at.is_empty() {
            times.at.insert(DayTime::MIDNIGHT);
        }
        times
    }

    pub fn on(&self) -> &BTreeSet<DayOfMonth> {
        &self.on
    }

    pub fn at(&self) -> &BTreeSet<DayTime> {
        &self.at
    }

    /// One cron expression per (day, time) pair in the cross product
    pub fn crons(&self) -> BTreeSet<String> {
        self.on
            .iter()
            .flat_map(|day| {
                self.at
                    .iter()
                    .map(move |time| format!("{} {} {} * *", time.minute(), time.hour(), day.cron_field()))
            })
            .collect()
    }

    /// Parse one month-times object with optional `on` and `at` fields, each
    /// holding a single selector or an array of selectors
    pub fn parse(value: &Value) -> Result<Self, TimesParseError> {
        let Value::Object(fields) = value else {
            return Err(TimesParseError::UnexpectedValue {
                expected: "a month times object",
                found: value_type_name(value),
            });
        };

        let mut on = BTreeSet::new();
        let mut at = BTreeSet::new();
        for (name, field) in fields {
            match name.as_str() {
                "on" => match field {
                    Value::Array(items) => {
                        for item in items {
                            on.insert(DayOfMonth::parse(item)?);
                        }
                    }
                    single => {
                        on.insert(DayOfMonth::parse(single)?);
                    }
                },
                "at" => match field {
                    Value::Array(items) => {
                        for item in items {
                            at.insert(DayTime::parse(item)?);
                        }
                    }
                    single => {
                        at.insert(DayTime::parse(single)?);
                    }
                },
                other => return Err(TimesParseError::UnknownField(other.to_string())),
            }
        }

        Ok(Self::new(on, at))
    }

    /// Serialized form; single-selector sets collapse to the bare element
    pub fn to_value(&self) -> Value {
        json!({
            "on": collapse(self.on.iter().map(DayOfMonth::to_value).collect()),
            "at": collapse(self.at.iter().map(DayTime::to_value).collect()),
        })
    }

    pub fn builder() -> MonthTimesBuilder {
        MonthTimesBuilder::default()
    }
}

impl Default for MonthTimes {
    fn default() -> Self {
        Self::new(BTreeSet::new(), BTreeSet::new())
    }
}

impl From<MonthTimesBuilder> for MonthTimes {
    fn from(builder: MonthTimesBuilder) -> Self {
        builder.build()
    }
}

fn collapse(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}

/// Accumulates day and time selectors; `build` substitutes the defaults for
/// whichever set stays empty
#[derive(Debug, Default)]
pub struct MonthTimesBuilder {
    on: BTreeSet<DayOfMonth>,
    at: BTreeSet<DayTime>,
}

impl MonthTimesBuilder {
    pub fn on(mut self, day: DayOfMonth) -> Self {
        self.on.insert(day);
        self
    }

    pub fn at(mut self, time: DayTime) -> Self {
        self.at.insert(time);
        self
    }

    pub fn build(self) -> MonthTimes {
        MonthTimes::new(self.on, self.at)
    }
}
