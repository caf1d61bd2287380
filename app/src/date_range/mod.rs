//! Date range selection for the report pages: a closed catalog of presets resolved
//! against a clock, manual calendar selection, display labels and the picker state
//! that ties them together.

mod advisory;
mod label;
mod picker;
mod preset;
mod resolver;

pub use advisory::{DETAILED_LOG_RETENTION_DAYS, LookbackAdvisory, lookback_advisory};
pub use label::{ALL_DATA_LABEL, PROMPT_LABEL, format_label};
pub use picker::DateRangePicker;
pub use preset::{CATALOG, Preset, PresetDefinition, UnknownPresetError, filter_catalog};
pub use resolver::{DateRangeResolver, PresetState, Selection};
