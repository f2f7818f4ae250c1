//! SLA countdown evaluation.
//!
//! A ticket carries up to three deadlines (respond, onsite, resolve). Each one is
//! re-evaluated against the clock on every request; nothing here is stored.
//!
//! The warning windows (2h for respond, 24h otherwise) and the 30% fraction are
//! presentation constants, not contractual SLA terms.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;

/// Share of the window, counted back from the deadline, that renders as a warning.
pub const WARNING_FRACTION: f64 = 0.3;

/// Label rendered once the deadline has passed or the ticket is flagged as breached.
pub const OVERDUE_LABEL: &str = "Overdue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SlaKind {
    Respond,
    Onsite,
    Resolve,
}

impl SlaKind {
    pub fn window(&self) -> TimeDelta {
        match self {
            SlaKind::Respond => TimeDelta::hours(2),
            SlaKind::Onsite | SlaKind::Resolve => TimeDelta::hours(24),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlaKind::Respond => "Response",
            SlaKind::Onsite => "Onsite",
            SlaKind::Resolve => "Resolution",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlaKind::Respond => "respond",
            SlaKind::Onsite => "onsite",
            SlaKind::Resolve => "resolve",
        }
    }
}

impl FromStr for SlaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "respond" => Ok(SlaKind::Respond),
            "onsite" => Ok(SlaKind::Onsite),
            "resolve" => Ok(SlaKind::Resolve),
            other => Err(format!("unknown SLA kind `{other}`")),
        }
    }
}

impl fmt::Display for SlaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SlaState {
    Ok,
    Warning,
    Overdue,
}

impl SlaState {
    /// Badge variant the client paints the chip with.
    pub fn variant(&self) -> &'static str {
        match self {
            SlaState::Ok => "secondary",
            SlaState::Warning => "warning",
            SlaState::Overdue => "destructive",
        }
    }
}

/// SlaDeadline
///
/// A single deadline as carried on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaDeadline {
    pub kind: SlaKind,
    pub due_at: DateTime<Utc>,
    pub breached: bool,
}

impl SlaDeadline {
    pub fn new(kind: SlaKind, due_at: DateTime<Utc>, breached: bool) -> Self {
        Self {
            kind,
            due_at,
            breached,
        }
    }

    pub fn evaluate(&self, now: DateTime<Utc>) -> SlaCountdown {
        evaluate(self.kind, self.due_at, Some(self.breached), now)
    }

    pub fn evaluate_now(&self) -> SlaCountdown {
        self.evaluate(Utc::now())
    }
}

/// SlaCountdown
///
/// The rendered chip: state, compact remaining-time label and the full chip text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SlaCountdown {
    pub kind: SlaKind,
    #[ts(type = "string")]
    pub due_at: DateTime<Utc>,
    pub state: SlaState,
    /// Whole seconds until the deadline; negative once it has passed.
    pub remaining_secs: i64,
    /// Compact remaining time (`45m`, `5h`, `3d`) or `Overdue`.
    pub remaining: String,
    /// Chip text, e.g. `Resolution: 5h`.
    pub label: String,
    pub variant: String,
}

/// classify
///
/// An explicit breach always wins over the clock.
pub fn classify(kind: SlaKind, delta: TimeDelta, breached: bool) -> SlaState {
    if breached || delta <= TimeDelta::zero() {
        return SlaState::Overdue;
    }
    let threshold_ms = kind.window().num_milliseconds() as f64 * WARNING_FRACTION;
    if delta.num_milliseconds() as f64 <= threshold_ms {
        SlaState::Warning
    } else {
        SlaState::Ok
    }
}

/// format_remaining
///
/// Compact remaining time, always truncated: under an hour in minutes, under a
/// day in hours, otherwise in days.
pub fn format_remaining(delta: TimeDelta) -> String {
    if delta <= TimeDelta::zero() {
        return OVERDUE_LABEL.to_string();
    }
    if delta < TimeDelta::hours(1) {
        format!("{}m", delta.num_minutes())
    } else if delta < TimeDelta::days(1) {
        format!("{}h", delta.num_hours())
    } else {
        format!("{}d", delta.num_days())
    }
}

/// evaluate
///
/// Computes the countdown for `due_at` as seen at `now`.
pub fn evaluate(
    kind: SlaKind,
    due_at: DateTime<Utc>,
    breached: Option<bool>,
    now: DateTime<Utc>,
) -> SlaCountdown {
    let delta = due_at - now;
    let state = classify(kind, delta, breached.unwrap_or(false));
    let remaining = match state {
        SlaState::Overdue => OVERDUE_LABEL.to_string(),
        SlaState::Ok | SlaState::Warning => format_remaining(delta),
    };

    SlaCountdown {
        kind,
        due_at,
        state,
        remaining_secs: delta.num_seconds(),
        label: format!("{}: {}", kind.label(), remaining),
        remaining,
        variant: state.variant().to_string(),
    }
}

/// Same as `evaluate` against the wall clock.
pub fn evaluate_now(kind: SlaKind, due_at: DateTime<Utc>, breached: Option<bool>) -> SlaCountdown {
    evaluate(kind, due_at, breached, Utc::now())
}
