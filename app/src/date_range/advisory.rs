use std::fmt::Display;

use crate::core::time::{Clock, DateRange};

/// The backend keeps detailed error logs for roughly this many days.
pub const DETAILED_LOG_RETENTION_DAYS: i64 = 90;

/// Ranges starting up to this many days beyond the retention window don't warn yet.
const TOLERANCE_DAYS: i64 = 5;

/// Non-blocking hint that the selected range reaches further back than the backend's
/// detailed history. Queries are still issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackAdvisory {
    pub days_back: i64,
}

impl LookbackAdvisory {
    pub fn title(&self) -> &'static str {
        "Hinweis zur Datenspeicherung"
    }
}

impl Display for LookbackAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Zeitraum > {} Tage: Detaillierte Fehlerprotokolle sind möglicherweise nicht mehr verfügbar (HP API Limit).",
            DETAILED_LOG_RETENTION_DAYS
        )
    }
}

pub fn lookback_advisory(range: &DateRange, clock: &impl Clock) -> Option<LookbackAdvisory> {
    let from = range.from()?;
    let days_back = clock.now().calendar_days_since(from);

    (days_back > DETAILED_LOG_RETENTION_DAYS + TOLERANCE_DAYS).then_some(LookbackAdvisory { days_back })
}
