use crate::time::{display_span, ClockTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const DEFAULT_DAYS_PER_WEEK: u8 = 5;
pub const MAX_DAYS_PER_WEEK: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("period {id}: end time {end} is not after start time {start}")]
    MalformedPeriod {
        id: String,
        start: ClockTime,
        end: ClockTime,
    },
    #[error("period {id}: {offset} break minutes push it past midnight")]
    PeriodOverflowsDay { id: String, offset: u32 },
    #[error("break {id}: duration must be a positive number of minutes")]
    InvalidBreakDuration { id: String },
    #[error("break {id}: day of week {day} is outside 1-7")]
    InvalidBreakDay { id: String, day: u8 },
    #[error("period {id}: day of week {day} is outside 1-7")]
    InvalidPeriodDay { id: String, day: u8 },
    #[error("break draft needs a day of week when applyToAllDays is false")]
    MissingBreakDay,
    #[error("day of week {0} is outside 1-7")]
    InvalidDay(u8),
    #[error("days per week {0} is outside 1-7")]
    InvalidDaysPerWeek(u8),
}

/// Canonical break categories. Icon and color live here as a lookup so
/// every caller renders a break kind the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    Assembly,
    ShortBreak,
    Lunch,
    LongBreak,
    TeaBreak,
    Recess,
    Snack,
    Games,
}

impl BreakKind {
    pub const ALL: [BreakKind; 8] = [
        BreakKind::Assembly,
        BreakKind::ShortBreak,
        BreakKind::Lunch,
        BreakKind::LongBreak,
        BreakKind::TeaBreak,
        BreakKind::Recess,
        BreakKind::Snack,
        BreakKind::Games,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BreakKind::Assembly => "Assembly",
            BreakKind::ShortBreak => "Short Break",
            BreakKind::Lunch => "Lunch",
            BreakKind::LongBreak => "Long Break",
            BreakKind::TeaBreak => "Tea Break",
            BreakKind::Recess => "Recess",
            BreakKind::Snack => "Snack",
            BreakKind::Games => "Games",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            BreakKind::Assembly => "megaphone",
            BreakKind::ShortBreak => "coffee",
            BreakKind::Lunch => "utensils",
            BreakKind::LongBreak => "hourglass",
            BreakKind::TeaBreak => "cup",
            BreakKind::Recess => "sun",
            BreakKind::Snack => "cookie",
            BreakKind::Games => "gamepad",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BreakKind::Assembly => "#7c3aed",
            BreakKind::ShortBreak => "#0ea5e9",
            BreakKind::Lunch => "#f59e0b",
            BreakKind::LongBreak => "#6366f1",
            BreakKind::TeaBreak => "#10b981",
            BreakKind::Recess => "#f97316",
            BreakKind::Snack => "#ec4899",
            BreakKind::Games => "#22c55e",
        }
    }
}

/// One numbered teaching slot in the weekly template.
///
/// `period_number` 0 is the sentinel slot before the first numbered
/// period. `day_of_week` of `None` means the slot applies on every day.
/// `display_time` is derived presentation only; it is regenerated when
/// the times shift and passed through untouched otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: String,
    pub period_number: u32,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_time: Option<String>,
}

/// A named interruption anchored after period `after_period` on one
/// concrete day. Multi-day breaks are stored as one record per day;
/// there is no set-valued day field and no implicit day default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BreakKind,
    pub after_period: u32,
    pub duration_minutes: u32,
    pub day_of_week: u8,
}

/// Creation-time shape of a break, before fan-out into per-day records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BreakKind,
    pub after_period: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub day_of_week: Option<u8>,
    #[serde(default)]
    pub apply_to_all_days: bool,
}

/// Breaks whose `day_of_week` equals `day`, exactly. Fan-out into
/// per-day records already happened at creation time, so there is no
/// "all days" case to consider here.
pub fn applicable_breaks(breaks: &[Break], day: u8) -> Vec<&Break> {
    breaks.iter().filter(|b| b.day_of_week == day).collect()
}

/// Cumulative break minutes in front of `period_number`: the sum of
/// durations over breaks anchored strictly before it. Strict `<` keeps
/// a break "after period N" from moving period N itself, and ties on
/// the same anchor sum commutatively.
pub fn offset_minutes<'a, I>(breaks: I, period_number: u32) -> u32
where
    I: IntoIterator<Item = &'a Break>,
{
    // Saturating: any sum that would overflow is already far past the
    // 1440 minutes a day holds, so it still lands in the overflow error.
    breaks
        .into_iter()
        .filter(|b| b.after_period < period_number)
        .fold(0u32, |acc, b| acc.saturating_add(b.duration_minutes))
}

/// Shift one period forward by `offset` minutes, preserving its
/// duration. A zero offset returns the input unchanged, untouched
/// `display_time` included, so no-break days survive equality checks.
pub fn adjust_period(period: &Period, offset: u32) -> Result<Period, ScheduleError> {
    if period.end_time <= period.start_time {
        return Err(ScheduleError::MalformedPeriod {
            id: period.id.clone(),
            start: period.start_time,
            end: period.end_time,
        });
    }
    if offset == 0 {
        return Ok(period.clone());
    }

    let duration = period.end_time.minutes() - period.start_time.minutes();
    let overflow = || ScheduleError::PeriodOverflowsDay {
        id: period.id.clone(),
        offset,
    };
    let start = period
        .start_time
        .checked_add_minutes(offset)
        .ok_or_else(overflow)?;
    let end = start.checked_add_minutes(duration).ok_or_else(overflow)?;

    Ok(Period {
        id: period.id.clone(),
        period_number: period.period_number,
        start_time: start,
        end_time: end,
        day_of_week: period.day_of_week,
        display_time: Some(display_span(start, end)),
    })
}

fn validate_periods(periods: &[Period]) -> Result<(), ScheduleError> {
    for p in periods {
        if let Some(day) = p.day_of_week {
            if !(1..=MAX_DAYS_PER_WEEK).contains(&day) {
                return Err(ScheduleError::InvalidPeriodDay {
                    id: p.id.clone(),
                    day,
                });
            }
        }
    }
    Ok(())
}

fn validate_breaks(breaks: &[Break]) -> Result<(), ScheduleError> {
    for b in breaks {
        if b.duration_minutes == 0 {
            return Err(ScheduleError::InvalidBreakDuration { id: b.id.clone() });
        }
        if !(1..=MAX_DAYS_PER_WEEK).contains(&b.day_of_week) {
            return Err(ScheduleError::InvalidBreakDay {
                id: b.id.clone(),
                day: b.day_of_week,
            });
        }
    }
    Ok(())
}

fn adjust_day_unchecked(
    periods: &[Period],
    breaks: &[Break],
    day: u8,
) -> Result<Vec<Period>, ScheduleError> {
    let active = applicable_breaks(breaks, day);
    let mut out = Vec::with_capacity(periods.len());
    for p in periods {
        if p.day_of_week.is_some_and(|d| d != day) {
            continue;
        }
        let offset = offset_minutes(active.iter().copied(), p.period_number);
        out.push(adjust_period(p, offset)?);
    }
    Ok(out)
}

/// Adjusted schedule for a single day. Input order of periods is
/// preserved; periods pinned to another day are left out.
pub fn adjust_day(periods: &[Period], breaks: &[Break], day: u8) -> Result<Vec<Period>, ScheduleError> {
    if !(1..=MAX_DAYS_PER_WEEK).contains(&day) {
        return Err(ScheduleError::InvalidDay(day));
    }
    validate_periods(periods)?;
    validate_breaks(breaks)?;
    adjust_day_unchecked(periods, breaks, day)
}

/// Adjusted schedule for every day `1..=days_per_week`, keyed by day.
/// Days are independent: a break on one day never moves another day's
/// periods. Each call recomputes from scratch over read-only input.
pub fn adjust_week(
    periods: &[Period],
    breaks: &[Break],
    days_per_week: u8,
) -> Result<BTreeMap<u8, Vec<Period>>, ScheduleError> {
    if !(1..=MAX_DAYS_PER_WEEK).contains(&days_per_week) {
        return Err(ScheduleError::InvalidDaysPerWeek(days_per_week));
    }
    validate_periods(periods)?;
    validate_breaks(breaks)?;

    let mut week = BTreeMap::new();
    for day in 1..=days_per_week {
        week.insert(day, adjust_day_unchecked(periods, breaks, day)?);
    }
    Ok(week)
}

/// Fan a draft out into concrete per-day break records. `applyToAllDays`
/// yields one record per day with a fresh id from `next_id`; otherwise
/// the draft must carry an explicit day — a missing day is an error,
/// never a silent Monday.
pub fn expand_draft(
    draft: &BreakDraft,
    days_per_week: u8,
    mut next_id: impl FnMut() -> String,
) -> Result<Vec<Break>, ScheduleError> {
    if !(1..=MAX_DAYS_PER_WEEK).contains(&days_per_week) {
        return Err(ScheduleError::InvalidDaysPerWeek(days_per_week));
    }
    if draft.duration_minutes == 0 {
        return Err(ScheduleError::InvalidBreakDuration {
            id: draft.name.clone(),
        });
    }

    let days: Vec<u8> = if draft.apply_to_all_days {
        (1..=days_per_week).collect()
    } else {
        let day = draft.day_of_week.ok_or(ScheduleError::MissingBreakDay)?;
        if !(1..=MAX_DAYS_PER_WEEK).contains(&day) {
            return Err(ScheduleError::InvalidDay(day));
        }
        vec![day]
    };

    Ok(days
        .into_iter()
        .map(|day| Break {
            id: next_id(),
            name: draft.name.clone(),
            kind: draft.kind,
            after_period: draft.after_period,
            duration_minutes: draft.duration_minutes,
            day_of_week: day,
        })
        .collect())
}
