use std::{fmt::Display, str::FromStr};

use crate::core::time::{DateRange, DateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Preset {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    Last3Months,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Unknown date range preset {name:?}")]
pub struct UnknownPresetError {
    pub name: String,
}

/// Catalog entry: identifier as used in URLs and configuration, display label and the
/// range computation anchored at the given instant.
pub struct PresetDefinition {
    pub preset: Preset,
    pub id: &'static str,
    pub label: &'static str,
    compute: fn(&DateTime) -> DateRange,
}

impl PresetDefinition {
    pub fn compute(&self, now: &DateTime) -> DateRange {
        (self.compute)(now)
    }
}

impl std::fmt::Debug for PresetDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetDefinition")
            .field("preset", &self.preset)
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

fn today(now: &DateTime) -> DateRange {
    DateRange::for_day(now.date())
}

fn yesterday(now: &DateTime) -> DateRange {
    DateRange::for_day(now.date().minus_days(1))
}

fn last_7_days(now: &DateTime) -> DateRange {
    DateRange::for_days(now.date().minus_days(7), now.date())
}

fn last_30_days(now: &DateTime) -> DateRange {
    DateRange::for_days(now.date().minus_days(30), now.date())
}

fn last_3_months(now: &DateTime) -> DateRange {
    DateRange::for_days(now.date().minus_months(3), now.date())
}

fn this_month(now: &DateTime) -> DateRange {
    DateRange::for_days(now.date().first_of_month(), now.date().last_of_month())
}

fn last_month(now: &DateTime) -> DateRange {
    let month = now.date().first_of_month().minus_months(1);
    DateRange::for_days(month, month.last_of_month())
}

fn this_year(now: &DateTime) -> DateRange {
    DateRange::for_days(now.date().first_of_year(), now.date().last_of_year())
}

fn last_year(now: &DateTime) -> DateRange {
    let year = now.date().first_of_year().minus_years(1);
    DateRange::for_days(year, year.last_of_year())
}

fn all(_: &DateTime) -> DateRange {
    DateRange::unbounded()
}

static TODAY: PresetDefinition = PresetDefinition {
    preset: Preset::Today,
    id: "today",
    label: "Heute",
    compute: today,
};

static YESTERDAY: PresetDefinition = PresetDefinition {
    preset: Preset::Yesterday,
    id: "yesterday",
    label: "Gestern",
    compute: yesterday,
};

static LAST_7_DAYS: PresetDefinition = PresetDefinition {
    preset: Preset::Last7Days,
    id: "last7days",
    label: "Letzte 7 Tage",
    compute: last_7_days,
};

static LAST_30_DAYS: PresetDefinition = PresetDefinition {
    preset: Preset::Last30Days,
    id: "last30days",
    label: "Letzte 30 Tage",
    compute: last_30_days,
};

static LAST_3_MONTHS: PresetDefinition = PresetDefinition {
    preset: Preset::Last3Months,
    id: "last3months",
    label: "Letzte 3 Monate",
    compute: last_3_months,
};

static THIS_MONTH: PresetDefinition = PresetDefinition {
    preset: Preset::ThisMonth,
    id: "thisMonth",
    label: "Dieser Monat",
    compute: this_month,
};

static LAST_MONTH: PresetDefinition = PresetDefinition {
    preset: Preset::LastMonth,
    id: "lastMonth",
    label: "Letzter Monat",
    compute: last_month,
};

static THIS_YEAR: PresetDefinition = PresetDefinition {
    preset: Preset::ThisYear,
    id: "thisYear",
    label: "Dieses Jahr",
    compute: this_year,
};

static LAST_YEAR: PresetDefinition = PresetDefinition {
    preset: Preset::LastYear,
    id: "lastYear",
    label: "Letztes Jahr",
    compute: last_year,
};

static ALL: PresetDefinition = PresetDefinition {
    preset: Preset::All,
    id: "all",
    label: "Alle Daten",
    compute: all,
};

/// All presets in declaration order, which is also the display order.
pub static CATALOG: [&PresetDefinition; 10] = [
    &TODAY,
    &YESTERDAY,
    &LAST_7_DAYS,
    &LAST_30_DAYS,
    &LAST_3_MONTHS,
    &THIS_MONTH,
    &LAST_MONTH,
    &THIS_YEAR,
    &LAST_YEAR,
    &ALL,
];

impl Preset {
    pub fn definition(&self) -> &'static PresetDefinition {
        match self {
            Preset::Today => &TODAY,
            Preset::Yesterday => &YESTERDAY,
            Preset::Last7Days => &LAST_7_DAYS,
            Preset::Last30Days => &LAST_30_DAYS,
            Preset::Last3Months => &LAST_3_MONTHS,
            Preset::ThisMonth => &THIS_MONTH,
            Preset::LastMonth => &LAST_MONTH,
            Preset::ThisYear => &THIS_YEAR,
            Preset::LastYear => &LAST_YEAR,
            Preset::All => &ALL,
        }
    }

    pub fn variants() -> impl Iterator<Item = Preset> {
        CATALOG.iter().map(|definition| definition.preset)
    }

    pub fn id(&self) -> &'static str {
        self.definition().id
    }

    pub fn label(&self) -> &'static str {
        self.definition().label
    }

    pub fn compute(&self, now: &DateTime) -> DateRange {
        self.definition().compute(now)
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Preset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|definition| definition.id == s)
            .map(|definition| definition.preset)
            .ok_or_else(|| UnknownPresetError { name: s.to_owned() })
    }
}

impl TryFrom<String> for Preset {
    type Error = UnknownPresetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Preset> for &'static str {
    fn from(value: Preset) -> Self {
        value.id()
    }
}

/// Restricts the catalog to the allowed identifiers, keeping catalog order. Identifiers
/// that are not part of the catalog are ignored.
pub fn filter_catalog<S: AsRef<str>>(allowed: &[S]) -> Vec<&'static PresetDefinition> {
    CATALOG
        .iter()
        .copied()
        .filter(|definition| allowed.iter().any(|name| name.as_ref() == definition.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;

    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_catalog_definitions_match_variants() {
        for definition in CATALOG.iter() {
            assert_eq!(definition.preset.definition().id, definition.id);
            assert_eq!(definition.id.parse::<Preset>(), Ok(definition.preset));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "lastDecade".parse::<Preset>(),
            Err(UnknownPresetError {
                name: "lastDecade".to_owned()
            })
        );
        assert!("Today".parse::<Preset>().is_err());
    }

    #[test]
    fn test_filter_catalog_keeps_declaration_order() {
        let visible: Vec<Preset> = filter_catalog(&["last7days", "today"])
            .into_iter()
            .map(|definition| definition.preset)
            .collect();

        assert_eq!(visible, vec![Preset::Today, Preset::Last7Days]);
    }

    #[test]
    fn test_filter_catalog_ignores_unknown() {
        let visible = filter_catalog(&["thisMonth".to_owned(), "lastDecade".to_owned()]);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].preset, Preset::ThisMonth);
    }

    #[test]
    fn test_serde_uses_identifier() {
        assert_json_eq!(Preset::Last7Days, json!("last7days"));
        assert_json_eq!(Preset::ThisMonth, json!("thisMonth"));

        let preset: Preset = serde_json::from_value(json!("lastYear")).unwrap();
        assert_eq!(preset, Preset::LastYear);
        assert!(serde_json::from_value::<Preset>(json!("nextYear")).is_err());
    }

    #[test]
    fn test_last_month_in_january() {
        let range = Preset::LastMonth.compute(&t!(2025-01-15, 12:00));

        assert_eq!(range.from_date(), Some(t!(2024-12-01)));
        assert_eq!(range.to_date(), Some(t!(2024-12-31)));
    }

    #[test]
    fn test_last_month_from_month_end() {
        let range = Preset::LastMonth.compute(&t!(2025-03-31, 12:00));

        assert_eq!(range.from_date(), Some(t!(2025-02-01)));
        assert_eq!(range.to_date(), Some(t!(2025-02-28)));
    }

    #[test]
    fn test_last_year() {
        let range = Preset::LastYear.compute(&t!(2024-02-29, 12:00));

        assert_eq!(range.from_date(), Some(t!(2023-01-01)));
        assert_eq!(range.to_date(), Some(t!(2023-12-31)));
    }
}
