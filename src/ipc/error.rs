use serde_json::json;

use crate::schedule::ScheduleError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Map a core error onto the wire `{code, message}` shape.
pub fn schedule_err(id: &str, e: &ScheduleError) -> serde_json::Value {
    let code = match e {
        ScheduleError::MalformedPeriod { .. } | ScheduleError::InvalidPeriodDay { .. } => {
            "malformed_period"
        }
        ScheduleError::PeriodOverflowsDay { .. } => "period_overflows_day",
        ScheduleError::InvalidBreakDuration { .. } | ScheduleError::InvalidBreakDay { .. } => {
            "invalid_break"
        }
        ScheduleError::MissingBreakDay => "missing_break_day",
        ScheduleError::InvalidDay(_) | ScheduleError::InvalidDaysPerWeek(_) => "bad_params",
    };
    err(id, code, e.to_string(), None)
}
