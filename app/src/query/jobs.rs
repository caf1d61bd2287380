use crate::core::time::DateRange;

use super::{DeviceSelection, QueryParams, filter_value};

pub const JOBS_PAGE_SIZE: u32 = 25;

/// Paginated job list with free-text search and status/category filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsQuery {
    pub device: DeviceSelection,
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub problem_jobs: bool,
    pub status: Option<String>,
    pub click_category: Option<String>,
    pub range: DateRange,
}

impl Default for JobsQuery {
    fn default() -> Self {
        Self {
            device: DeviceSelection::All,
            page: 1,
            limit: JOBS_PAGE_SIZE,
            search: None,
            problem_jobs: false,
            status: None,
            click_category: None,
            range: DateRange::unbounded(),
        }
    }
}

impl JobsQuery {
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();

        params
            .push("device_id", &self.device)
            .push("page", self.page.max(1))
            .push("limit", self.limit)
            .push_opt("search", self.search.as_deref().filter(|s| !s.is_empty()))
            .push_flag("problem_jobs", self.problem_jobs)
            .push_opt("status", filter_value(self.status.as_deref()))
            .push_opt("click_category", filter_value(self.click_category.as_deref()))
            .push_range(&self.range);

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;

    #[test]
    fn test_defaults() {
        let params = JobsQuery::default().params();

        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["device_id", "page", "limit"]);
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("limit"), Some("25"));
    }

    #[test]
    fn test_all_filters() {
        let query = JobsQuery {
            device: DeviceSelection::device("47100122"),
            page: 3,
            search: Some("Flyer".to_owned()),
            problem_jobs: true,
            status: Some("PRINTED".to_owned()),
            click_category: Some("Multicolor".to_owned()),
            range: DateRange::for_day(t!(2025-06-15)),
            ..Default::default()
        };

        let params = query.params();

        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec![
                "device_id",
                "page",
                "limit",
                "search",
                "problem_jobs",
                "status",
                "click_category",
                "from_date",
                "to_date"
            ]
        );
        assert_eq!(params.get("problem_jobs"), Some("true"));
        assert_eq!(params.get("from_date"), Some("2025-06-15"));
        assert_eq!(params.get("to_date"), Some("2025-06-15"));
    }

    #[test]
    fn test_all_filter_values_are_omitted() {
        let query = JobsQuery {
            search: Some(String::new()),
            status: Some("all".to_owned()),
            click_category: Some("all".to_owned()),
            ..Default::default()
        };

        let params = query.params();

        assert!(!params.contains("search"));
        assert!(!params.contains("status"));
        assert!(!params.contains("click_category"));
    }

    #[test]
    fn test_search_is_sent_verbatim() {
        let all = JobsQuery {
            search: Some("all".to_owned()),
            ..Default::default()
        };
        let padded = JobsQuery {
            search: Some(" Flyer ".to_owned()),
            ..Default::default()
        };

        assert_eq!(all.params().get("search"), Some("all"));
        assert_eq!(padded.params().get("search"), Some(" Flyer "));
    }
}
