use serde::Deserialize;

use crate::schedule::DEFAULT_DAYS_PER_WEEK;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    /// Default week length used when a request does not carry its own
    /// `daysPerWeek`. Session-scoped only; nothing is persisted.
    pub days_per_week: u8,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            days_per_week: DEFAULT_DAYS_PER_WEEK,
        }
    }
}
