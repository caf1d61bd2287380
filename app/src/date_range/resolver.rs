use crate::core::time::{Clock, Date, DateRange, SystemClock};

use super::{Preset, PresetDefinition, UnknownPresetError, filter_catalog, format_label};

/// Which catalog entry produced the current range, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "preset")]
pub enum PresetState {
    Preset(Preset),
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Selection {
    pub range: DateRange,
    pub preset: PresetState,
}

/// Maps presets and manual calendar selections to normalized date ranges.
///
/// Presets are evaluated against the clock on every call, nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct DateRangeResolver<C = SystemClock> {
    clock: C,
}

impl<C: Clock> DateRangeResolver<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn resolve(&self, preset: Preset) -> Selection {
        Selection {
            range: preset.compute(&self.clock.now()),
            preset: PresetState::Preset(preset),
        }
    }

    pub fn resolve_preset(&self, name: &str) -> Result<DateRange, UnknownPresetError> {
        let preset: Preset = name.parse()?;
        Ok(self.resolve(preset).range)
    }

    /// Lenient variant for identifiers coming from outside (URL, config): unknown names
    /// are logged and fall back to the unbounded range.
    pub fn resolve_preset_or_all(&self, name: &str) -> Selection {
        match name.parse::<Preset>() {
            Ok(preset) => self.resolve(preset),
            Err(e) => {
                tracing::warn!("{}, falling back to {}", e, Preset::All);
                self.resolve(Preset::All)
            }
        }
    }

    /// Day-normalized range for a calendar selection. A missing end selects a single day,
    /// reversed selections are swapped.
    pub fn resolve_manual_range(&self, start: Date, end: Option<Date>) -> Selection {
        Selection {
            range: DateRange::for_days(start, end.unwrap_or(start)),
            preset: PresetState::Custom,
        }
    }

    pub fn format_label(&self, range: &DateRange) -> String {
        format_label(range)
    }

    pub fn filter_catalog<S: AsRef<str>>(&self, allowed: &[S]) -> Vec<&'static PresetDefinition> {
        filter_catalog(allowed)
    }
}
