use super::{Date, DateTime};

/// A date range with optional bounds. A missing bound means "no limit" on that side,
/// both missing is the unbounded range covering all data.
///
/// When both bounds are present, `from <= to` holds. Construction and deserialization
/// order the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "RangeBounds")]
pub struct DateRange {
    from: Option<DateTime>,
    to: Option<DateTime>,
}

#[derive(serde::Deserialize)]
struct RangeBounds {
    from: Option<DateTime>,
    to: Option<DateTime>,
}

impl From<RangeBounds> for DateRange {
    fn from(bounds: RangeBounds) -> Self {
        Self::new(bounds.from, bounds.to)
    }
}

impl DateRange {
    pub fn new(from: Option<DateTime>, to: Option<DateTime>) -> Self {
        match (from, to) {
            (Some(from), Some(to)) if from > to => Self {
                from: Some(to),
                to: Some(from),
            },
            _ => Self { from, to },
        }
    }

    pub fn unbounded() -> Self {
        Self { from: None, to: None }
    }

    pub fn between(a: DateTime, b: DateTime) -> Self {
        Self::new(Some(a), Some(b))
    }

    /// Start of the earlier day through the end of the later day.
    pub fn for_days(a: Date, b: Date) -> Self {
        let (first, last) = if a <= b { (a, b) } else { (b, a) };
        Self::between(first.start_of_day(), last.end_of_day())
    }

    pub fn for_day(day: Date) -> Self {
        Self::for_days(day, day)
    }

    pub fn from(&self) -> Option<&DateTime> {
        self.from.as_ref()
    }

    pub fn to(&self) -> Option<&DateTime> {
        self.to.as_ref()
    }

    pub fn from_date(&self) -> Option<Date> {
        self.from.map(|dt| dt.date())
    }

    pub fn to_date(&self) -> Option<Date> {
        self.to.map(|dt| dt.date())
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, datetime: &DateTime) -> bool {
        self.from.is_none_or(|from| from <= *datetime) && self.to.is_none_or(|to| *datetime <= to)
    }

    /// Number of calendar days touched by the range, `None` if a bound is missing.
    pub fn days_covered(&self) -> Option<i64> {
        let from = self.from_date()?;
        let to = self.to_date()?;
        Some(from.days_until(&to) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;

    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_between_orders_bounds() {
        let early = t!(2025-01-01, 10:00);
        let late = t!(2025-01-31, 10:00);

        assert_eq!(DateRange::between(late, early), DateRange::between(early, late));
        assert_eq!(DateRange::between(late, early).from(), Some(&early));
    }

    #[test]
    fn test_for_days_is_day_normalized() {
        let range = DateRange::for_days(t!(2025-01-31), t!(2025-01-01));

        assert_eq!(range.from(), Some(&t!(2025-01-01).start_of_day()));
        assert_eq!(range.to(), Some(&t!(2025-01-31).end_of_day()));
        assert_eq!(range.days_covered(), Some(31));
    }

    #[test]
    fn test_unbounded() {
        let range = DateRange::unbounded();

        assert!(range.is_unbounded());
        assert_eq!(range, DateRange::default());
        assert_eq!(range.days_covered(), None);
        assert!(range.contains(&t!(2001-01-01, 00:00)));
    }

    #[test]
    fn test_contains_open_end() {
        let range = DateRange::new(Some(t!(2025-01-01).start_of_day()), None);

        assert!(!range.contains(&t!(2024-12-31, 23:00)));
        assert!(range.contains(&t!(2025-01-01, 00:00)));
        assert!(range.contains(&t!(2030-01-01, 00:00)));
    }

    #[test]
    fn test_serialize_unbounded_as_nulls() {
        assert_json_eq!(DateRange::unbounded(), json!({ "from": null, "to": null }));
    }

    #[test]
    fn test_deserialize_orders_bounds() {
        let early = DateTime::from_iso("2025-01-01T00:00:00Z").unwrap();
        let late = DateTime::from_iso("2025-02-01T00:00:00Z").unwrap();

        let range: DateRange = serde_json::from_value(json!({
            "from": "2025-02-01T00:00:00Z",
            "to": "2025-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(range, DateRange::between(early, late));
    }
}
