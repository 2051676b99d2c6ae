use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde_json::Value;

use crate::errors::TimesParseError;
use crate::schedule::support::value_type_name;

/// A single time-of-day selector (hour and minute)
///
/// Accepted document shapes: `"HH:MM"`, `"midnight"`, `"noon"`, a bare hour
/// number, or an object with `hour` and an optional `minute` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayTime {
    hour: u8,
    minute: u8,
}

impl DayTime {
    pub const MIDNIGHT: DayTime = DayTime { hour: 0, minute: 0 };
    pub const NOON: DayTime = DayTime { hour: 12, minute: 0 };

    pub fn new(hour: u8, minute: u8) -> Result<Self, TimesParseError> {
        if hour > 23 {
            return Err(TimesParseError::InvalidHour(i64::from(hour)));
        }
        if minute > 59 {
            return Err(TimesParseError::InvalidMinute(i64::from(minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn parse(value: &Value) -> Result<Self, TimesParseError> {
        match value {
            Value::String(raw) => Self::parse_str(raw),
            Value::Number(_) => Self::new(int_field(value, "hour")?, 0),
            Value::Object(fields) => {
                let mut hour = None;
                let mut minute = 0;
                for (name, field) in fields {
                    match name.as_str() {
                        "hour" => hour = Some(int_field(field, "hour")?),
                        "minute" => minute = int_field(field, "minute")?,
                        other => return Err(TimesParseError::UnknownField(other.to_string())),
                    }
                }
                let hour = hour.ok_or(TimesParseError::MissingField("hour"))?;
                Self::new(hour, minute)
            }
            other => Err(TimesParseError::UnexpectedValue {
                expected: "a time string, an hour number or a time object",
                found: value_type_name(other),
            }),
        }
    }

    fn parse_str(raw: &str) -> Result<Self, TimesParseError> {
        match raw {
            "midnight" => Ok(Self::MIDNIGHT),
            "noon" => Ok(Self::NOON),
            _ => {
                let time = NaiveTime::parse_from_str(raw, "%H:%M")
                    .map_err(|_| TimesParseError::InvalidTimeFormat(raw.to_string()))?;
                Self::new(time.hour() as u8, time.minute() as u8)
            }
        }
    }

    /// Compact serialized form; round-trips through the string shape
    pub fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Default for DayTime {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Read a bounded integer field, reporting hour/minute range violations
fn int_field(value: &Value, name: &'static str) -> Result<u8, TimesParseError> {
    let raw = value.as_i64().ok_or(TimesParseError::UnexpectedValue {
        expected: "a number",
        found: value_type_name(value),
    })?;
    let in_range = match name {
        "hour" => (0..=23).contains(&raw),
        _ => (0..=59).contains(&raw),
    };
    if !in_range {
        return Err(match name {
            "hour" => TimesParseError::InvalidHour(raw),
            _ => TimesParseError::InvalidMinute(raw),
        });
    }
    Ok(raw as u8)
}
