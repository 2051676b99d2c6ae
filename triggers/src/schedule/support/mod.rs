// Support value types shared by the calendar-based schedule kinds

mod day_time;
mod month_times;

pub use day_time::DayTime;
pub use month_times::{DayOfMonth, MonthTimes, MonthTimesBuilder};

use serde_json::Value;

/// Human-readable name of a JSON value's shape, used in parse error messages
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
