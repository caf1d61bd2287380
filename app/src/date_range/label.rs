use crate::core::time::DateRange;

pub const ALL_DATA_LABEL: &str = "Alle Daten";
pub const PROMPT_LABEL: &str = "Zeitraum wählen";

pub fn format_label(range: &DateRange) -> String {
    match (range.from_date(), range.to_date()) {
        (None, None) => ALL_DATA_LABEL.to_owned(),
        (Some(from), Some(to)) => format!("{} - {}", from.to_display_string(), to.to_display_string()),
        (Some(from), None) => from.to_display_string(),
        (None, Some(_)) => PROMPT_LABEL.to_owned(),
    }
}
