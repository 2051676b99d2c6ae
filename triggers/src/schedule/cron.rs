use std::collections::BTreeSet;
use std::str::FromStr;

use serde_json::Value;

use crate::errors::ScheduleError;
use crate::schedule::support::value_type_name;

/// Fires according to one or more raw cron expressions
///
/// Expressions are validated at construction; a constructed schedule never
/// holds an expression the trigger engine would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    crons: Vec<String>,
}

impl CronSchedule {
    pub const TYPE: &'static str = "cron";

    pub fn new(expressions: Vec<String>) -> Result<Self, ScheduleError> {
        if expressions.is_empty() {
            return Err(ScheduleError::EmptyCronSchedule);
        }
        for expression in &expressions {
            validate_cron_expression(expression)?;
        }
        Ok(Self { crons: expressions })
    }

    pub fn expressions(&self) -> &[String] {
        &self.crons
    }

    pub fn crons(&self) -> BTreeSet<String> {
        self.crons.iter().cloned().collect()
    }

    /// Parse a schedule body: one expression string, or a non-empty array of
    /// expression strings
    pub fn parse(value: &Value) -> Result<Self, ScheduleError> {
        match value {
            Value::String(expression) => Self::new(vec![expression.clone()]),
            Value::Array(items) => {
                let mut expressions = Vec::with_capacity(items.len());
                for item in items {
                    let Value::String(expression) = item else {
                        return Err(ScheduleError::UnexpectedValue {
                            schedule_type: Self::TYPE,
                            expected: "an array of cron expression strings",
                            found: value_type_name(item),
                        });
                    };
                    expressions.push(expression.clone());
                }
                Self::new(expressions)
            }
            other => Err(ScheduleError::UnexpectedValue {
                schedule_type: Self::TYPE,
                expected: "a cron expression string or an array of cron expression strings",
                found: value_type_name(other),
            }),
        }
    }

    /// Serialized body; with `normalize`, a single expression collapses to a
    /// bare string instead of a one-element array
    pub fn to_value(&self, normalize: bool) -> Value {
        if normalize && self.crons.len() == 1 {
            return Value::String(self.crons[0].clone());
        }
        Value::Array(self.crons.iter().cloned().map(Value::String).collect())
    }
}

/// Validate a cron expression against the trigger engine grammar
///
/// The engine grammar carries a leading seconds field; standard 5-field input
/// is validated with seconds pinned to 0.
pub fn validate_cron_expression(expression: &str) -> Result<(), ScheduleError> {
    let engine_form = if expression.split_whitespace().count() == 5 {
        format!("0 {expression}")
    } else {
        expression.to_string()
    };
    cron::Schedule::from_str(&engine_form)
        .map(|_| ())
        .map_err(|err| ScheduleError::InvalidCronExpression {
            expression: expression.to_string(),
            reason: err.to_string(),
        })
}
