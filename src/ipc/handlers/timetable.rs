use crate::ipc::error::{err, ok, schedule_err};
use crate::ipc::types::{AppState, Request};
use crate::schedule::{self, Break, Period, MAX_DAYS_PER_WEEK};
use serde_json::json;

fn parse_list<T: serde::de::DeserializeOwned>(
    params: &serde_json::Value,
    key: &str,
) -> Result<Vec<T>, String> {
    let Some(raw) = params.get(key) else {
        return Err(format!("missing params.{}", key));
    };
    serde_json::from_value(raw.clone()).map_err(|e| format!("params.{}: {}", key, e))
}

fn parse_day_count(params: &serde_json::Value, state: &AppState) -> Result<u8, String> {
    match params.get("daysPerWeek") {
        None => Ok(state.days_per_week),
        Some(v) if v.is_null() => Ok(state.days_per_week),
        Some(v) => match v.as_u64() {
            Some(n) if (1..=MAX_DAYS_PER_WEEK as u64).contains(&n) => Ok(n as u8),
            _ => Err(format!("daysPerWeek must be 1-{}", MAX_DAYS_PER_WEEK)),
        },
    }
}

fn handle_adjust_week(state: &mut AppState, req: &Request) -> serde_json::Value {
    let periods: Vec<Period> = match parse_list(&req.params, "periods") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    let breaks: Vec<Break> = match parse_list(&req.params, "breaks") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    let days_per_week = match parse_day_count(&req.params, state) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };

    match schedule::adjust_week(&periods, &breaks, days_per_week) {
        Ok(week) => ok(&req.id, json!({ "days": week })),
        Err(e) => schedule_err(&req.id, &e),
    }
}

fn handle_adjust_day(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let periods: Vec<Period> = match parse_list(&req.params, "periods") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    let breaks: Vec<Break> = match parse_list(&req.params, "breaks") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    let Some(day) = req.params.get("day").and_then(|v| v.as_u64()) else {
        return err(&req.id, "bad_params", "missing params.day", None);
    };
    if day == 0 || day > u8::MAX as u64 {
        return err(&req.id, "bad_params", "day must be 1-7", None);
    }

    match schedule::adjust_day(&periods, &breaks, day as u8) {
        Ok(adjusted) => ok(&req.id, json!({ "periods": adjusted })),
        Err(e) => schedule_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "timetable.adjustWeek" => Some(handle_adjust_week(state, req)),
        "timetable.adjustDay" => Some(handle_adjust_day(state, req)),
        _ => None,
    }
}
