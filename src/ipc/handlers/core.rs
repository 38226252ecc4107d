use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::schedule::MAX_DAYS_PER_WEEK;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "daysPerWeek": state.days_per_week,
        }),
    )
}

fn handle_config_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "daysPerWeek": state.days_per_week }))
}

fn handle_config_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(n) = req.params.get("daysPerWeek").and_then(|v| v.as_u64()) else {
        return err(&req.id, "bad_params", "missing params.daysPerWeek", None);
    };
    if n == 0 || n > MAX_DAYS_PER_WEEK as u64 {
        return err(
            &req.id,
            "bad_params",
            format!("daysPerWeek must be 1-{}", MAX_DAYS_PER_WEEK),
            None,
        );
    }
    state.days_per_week = n as u8;
    ok(&req.id, json!({ "daysPerWeek": state.days_per_week }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "config.get" => Some(handle_config_get(state, req)),
        "config.set" => Some(handle_config_set(state, req)),
        _ => None,
    }
}
