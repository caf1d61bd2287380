use crate::core::time::{Clock, Date, DateRange, SystemClock};

use super::{
    CATALOG, DateRangeResolver, Preset, PresetDefinition, PresetState, Selection, UnknownPresetError, format_label,
};

/// State of a date range selector: the presets it offers, the current range and which
/// preset (if any) produced it.
#[derive(Debug, Clone)]
pub struct DateRangePicker<C = SystemClock> {
    resolver: DateRangeResolver<C>,
    allowed: Vec<Preset>,
    selection: Selection,
}

impl<C: Clock> DateRangePicker<C> {
    pub fn new(resolver: DateRangeResolver<C>, allowed: &[Preset], default_preset: Preset) -> Self {
        let selection = resolver.resolve(default_preset);

        Self {
            resolver,
            allowed: allowed.to_vec(),
            selection,
        }
    }

    /// Offers the whole catalog, starting with all data.
    pub fn with_all_presets(resolver: DateRangeResolver<C>) -> Self {
        let all: Vec<Preset> = Preset::variants().collect();
        Self::new(resolver, &all, Preset::All)
    }

    /// Starts from an explicit range instead of a preset.
    pub fn with_range(resolver: DateRangeResolver<C>, allowed: &[Preset], range: DateRange) -> Self {
        let mut picker = Self::new(resolver, allowed, Preset::All);
        picker.set_range(range);
        picker
    }

    pub fn range(&self) -> &DateRange {
        &self.selection.range
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn preset_state(&self) -> PresetState {
        self.selection.preset
    }

    pub fn resolver(&self) -> &DateRangeResolver<C> {
        &self.resolver
    }

    pub fn label(&self) -> String {
        format_label(&self.selection.range)
    }

    pub fn visible_presets(&self) -> Vec<&'static PresetDefinition> {
        CATALOG
            .iter()
            .copied()
            .filter(|definition| self.allowed.contains(&definition.preset))
            .collect()
    }

    pub fn is_visible(&self, preset: Preset) -> bool {
        self.allowed.contains(&preset)
    }

    /// Replaces the range with the preset's range, evaluated now. Presets hidden from this
    /// picker are treated like unknown ones.
    pub fn select_preset(&mut self, preset: Preset) -> Result<&DateRange, UnknownPresetError> {
        if !self.is_visible(preset) {
            return Err(UnknownPresetError {
                name: preset.id().to_owned(),
            });
        }

        self.selection = self.resolver.resolve(preset);
        Ok(&self.selection.range)
    }

    pub fn select_preset_by_name(&mut self, name: &str) -> Result<&DateRange, UnknownPresetError> {
        let preset: Preset = name.parse()?;
        self.select_preset(preset)
    }

    pub fn select_manual(&mut self, start: Date, end: Option<Date>) -> &DateRange {
        self.selection = self.resolver.resolve_manual_range(start, end);
        &self.selection.range
    }

    /// Range replaced from outside the picker. An unbounded range shows as "all data",
    /// otherwise the preset state is kept.
    pub fn set_range(&mut self, range: DateRange) {
        self.selection.range = range;

        if range.is_unbounded() {
            self.selection.preset = PresetState::Preset(Preset::All);
        }
    }

    /// Changes the offered presets only. The current range stays as it is, even if its
    /// preset is no longer offered.
    pub fn restrict_presets(&mut self, allowed: &[Preset]) {
        self.allowed = allowed.to_vec();
    }
}
