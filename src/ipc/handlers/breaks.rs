use crate::ipc::error::{err, ok, schedule_err};
use crate::ipc::types::{AppState, Request};
use crate::schedule::{self, BreakDraft, BreakKind, MAX_DAYS_PER_WEEK};
use serde_json::json;
use uuid::Uuid;

fn handle_expand(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: BreakDraft = match serde_json::from_value(req.params.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    let days_per_week = match req.params.get("daysPerWeek") {
        None => state.days_per_week,
        Some(v) if v.is_null() => state.days_per_week,
        Some(v) => match v.as_u64() {
            Some(n) if (1..=MAX_DAYS_PER_WEEK as u64).contains(&n) => n as u8,
            _ => {
                return err(
                    &req.id,
                    "bad_params",
                    format!("daysPerWeek must be 1-{}", MAX_DAYS_PER_WEEK),
                    None,
                )
            }
        },
    };

    match schedule::expand_draft(&draft, days_per_week, || Uuid::new_v4().to_string()) {
        Ok(breaks) => ok(&req.id, json!({ "breaks": breaks })),
        Err(e) => schedule_err(&req.id, &e),
    }
}

fn handle_kinds(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let kinds: Vec<serde_json::Value> = BreakKind::ALL
        .iter()
        .map(|k| {
            json!({
                "kind": k,
                "label": k.label(),
                "icon": k.icon(),
                "color": k.color(),
            })
        })
        .collect();
    ok(&req.id, json!({ "kinds": kinds }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "breaks.expand" => Some(handle_expand(state, req)),
        "breaks.kinds" => Some(handle_kinds(state, req)),
        _ => None,
    }
}
