// Schedule definition model
//
// Parses structured schedule documents into the set of cron trigger
// expressions consumed by the scheduling engine. Each schedule kind is
// registered under a type discriminator; a definition document holds exactly
// one discriminator key mapping to the kind's body.

mod cron;
mod daily;
mod monthly;
pub mod support;

pub use cron::{validate_cron_expression, CronSchedule};
pub use daily::{DailySchedule, DailyScheduleBuilder};
pub use monthly::{MonthlySchedule, MonthlyScheduleBuilder};

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::ScheduleError;
use crate::schedule::support::value_type_name;

/// Schedule defines when a job should execute
#[derive(Debug, Clone, PartialEq)]
pub enum Schedule {
    Monthly(MonthlySchedule),
    Daily(DailySchedule),
    Cron(CronSchedule),
}

impl Schedule {
    /// The discriminator this schedule kind is registered under
    pub fn schedule_type(&self) -> &'static str {
        match self {
            Schedule::Monthly(_) => MonthlySchedule::TYPE,
            Schedule::Daily(_) => DailySchedule::TYPE,
            Schedule::Cron(_) => CronSchedule::TYPE,
        }
    }

    /// The schedule's trigger set, handed verbatim to the scheduling engine
    pub fn crons(&self) -> BTreeSet<String> {
        match self {
            Schedule::Monthly(schedule) => schedule.crons(),
            Schedule::Daily(schedule) => schedule.crons(),
            Schedule::Cron(schedule) => schedule.crons(),
        }
    }

    /// Dispatch a schedule body to the parser registered for `schedule_type`
    pub fn parse(schedule_type: &str, value: &Value) -> Result<Self, ScheduleError> {
        match schedule_type {
            MonthlySchedule::TYPE => MonthlySchedule::parse(value).map(Schedule::Monthly),
            DailySchedule::TYPE => DailySchedule::parse(value).map(Schedule::Daily),
            CronSchedule::TYPE => CronSchedule::parse(value).map(Schedule::Cron),
            other => Err(ScheduleError::UnknownScheduleType(other.to_string())),
        }
    }

    /// Parse a full definition document: an object with exactly one key
    /// naming the schedule type
    pub fn from_value(value: &Value) -> Result<Self, ScheduleError> {
        let Value::Object(fields) = value else {
            return Err(ScheduleError::InvalidConfiguration(format!(
                "expected a schedule object, found {}",
                value_type_name(value)
            )));
        };
        let mut entries = fields.iter();
        match (entries.next(), entries.next()) {
            (Some((schedule_type, body)), None) => Self::parse(schedule_type, body),
            _ => Err(ScheduleError::InvalidConfiguration(
                "a schedule definition must name exactly one schedule type".to_string(),
            )),
        }
    }

    /// Serialized definition document: `{ "<type>": <body> }`
    pub fn to_value(&self, normalize: bool) -> Value {
        let body = match self {
            Schedule::Monthly(schedule) => schedule.to_value(normalize),
            Schedule::Daily(schedule) => schedule.to_value(normalize),
            Schedule::Cron(schedule) => schedule.to_value(normalize),
        };
        let mut definition = serde_json::Map::with_capacity(1);
        definition.insert(self.schedule_type().to_string(), body);
        Value::Object(definition)
    }
}

impl Serialize for Schedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value(false).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Schedule::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_dispatches_by_discriminator() {
        let schedule = Schedule::parse("monthly", &json!({"on": 1, "at": "00:00"})).unwrap();
        assert_eq!(schedule.schedule_type(), "monthly");

        let schedule = Schedule::parse("daily", &json!("08:00")).unwrap();
        assert_eq!(schedule.schedule_type(), "daily");

        let schedule = Schedule::parse("cron", &json!("0 8 * * *")).unwrap();
        assert_eq!(schedule.schedule_type(), "cron");
    }

    #[test]
    fn test_parse_unknown_type_rejected() {
        let err = Schedule::parse("hourly", &json!({})).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownScheduleType(kind) if kind == "hourly"));
    }

    #[test]
    fn test_from_value_single_key_document() {
        let schedule = Schedule::from_value(&json!({"monthly": {"on": 15, "at": "noon"}})).unwrap();
        assert!(schedule.crons().contains("0 12 15 * *"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Schedule::from_value(&json!("monthly")).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_value_rejects_multiple_keys() {
        let err =
            Schedule::from_value(&json!({"monthly": {}, "daily": "08:00"})).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_value_rejects_empty_object() {
        let err = Schedule::from_value(&json!({})).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_to_value_wraps_body_under_discriminator() {
        let schedule = Schedule::Daily(DailySchedule::default());
        assert_eq!(schedule.to_value(true), json!({"daily": "00:00"}));
        assert_eq!(schedule.to_value(false), json!({"daily": ["00:00"]}));
    }

    #[test]
    fn test_serde_round_trip() {
        let document = json!({"monthly": [{"on": [1, "last_day"], "at": "06:30"}]});
        let schedule: Schedule = serde_json::from_value(document).unwrap();
        assert_eq!(schedule.crons().len(), 2);

        let serialized = serde_json::to_value(&schedule).unwrap();
        let reparsed: Schedule = serde_json::from_value(serialized).unwrap();
        assert_eq!(reparsed.crons(), schedule.crons());
    }

    #[test]
    fn test_deserialize_surfaces_schedule_errors() {
        let result: Result<Schedule, _> = serde_json::from_value(json!({"monthly": 5}));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("[monthly]"));
    }
}
