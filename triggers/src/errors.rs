// Error handling framework for schedule definitions

use thiserror::Error;

/// Errors raised while parsing day-of-month and time-of-day values
#[derive(Error, Debug)]
pub enum TimesParseError {
    #[error("Invalid day of month '{0}': expected 1-31, 'first_day' or 'last_day'")]
    InvalidDayOfMonth(String),

    #[error("Invalid hour {0}: expected 0-23")]
    InvalidHour(i64),

    #[error("Invalid minute {0}: expected 0-59")]
    InvalidMinute(i64),

    #[error("Invalid time '{0}': expected HH:MM, 'midnight' or 'noon'")]
    InvalidTimeFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Expected {expected}, but found [{found}] instead")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
}

/// Schedule-level configuration errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Could not parse [{schedule_type}] schedule: invalid times")]
    InvalidTimes {
        schedule_type: &'static str,
        #[source]
        cause: TimesParseError,
    },

    #[error("Could not parse [{schedule_type}] schedule: expected {expected}, but found [{found}] instead")]
    UnexpectedValue {
        schedule_type: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCronExpression { expression: String, reason: String },

    #[error("Could not parse [cron] schedule: at least one cron expression is required")]
    EmptyCronSchedule,

    #[error("Unknown schedule type: {0}")]
    UnknownScheduleType(String),

    #[error("Invalid schedule configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_times_parse_error_display() {
        let err = TimesParseError::InvalidDayOfMonth("32".to_string());
        assert!(err.to_string().contains("Invalid day of month"));
    }

    #[test]
    fn test_schedule_error_carries_source() {
        let err = ScheduleError::InvalidTimes {
            schedule_type: "monthly",
            cause: TimesParseError::InvalidHour(24),
        };
        assert!(err.to_string().contains("[monthly]"));
        let source = std::error::Error::source(&err).expect("source must be attached");
        assert!(source.to_string().contains("Invalid hour 24"));
    }

    #[test]
    fn test_invalid_cron_expression_display() {
        let err = ScheduleError::InvalidCronExpression {
            expression: "* * * *".to_string(),
            reason: "invalid format".to_string(),
        };
        assert!(err.to_string().contains("Invalid cron expression"));
    }
}
