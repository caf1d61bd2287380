use crate::adapter::backend::{BackendError, JobList};
use crate::core::time::{Clock, Date, DateRange};
use crate::date_range::{DateRangePicker, DateRangeResolver};
use crate::port::DashboardApi;
use crate::query::{DeviceSelection, JobsQuery};

use super::{PageState, ReportPage};

/// Job list filters. Anything that changes the result set goes back to the first page.
#[derive(Debug, Clone, Default)]
pub struct JobsPage {
    query: JobsQuery,
}

impl JobsPage {
    pub fn new(device: DeviceSelection) -> Self {
        Self {
            query: JobsQuery {
                device,
                ..Default::default()
            },
        }
    }

    pub fn into_state<C: Clock>(self, resolver: DateRangeResolver<C>) -> PageState<Self, C> {
        PageState::new(self, DateRangePicker::with_all_presets(resolver))
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.page = page.max(1);
    }

    pub fn set_device(&mut self, device: DeviceSelection) {
        self.query.device = device;
        self.query.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.query.search = (!search.is_empty()).then_some(search);
        self.query.page = 1;
    }

    pub fn set_problem_jobs(&mut self, problem_jobs: bool) {
        self.query.problem_jobs = problem_jobs;
        self.query.page = 1;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.query.status = Some(status.into());
        self.query.page = 1;
    }

    pub fn set_click_category(&mut self, category: impl Into<String>) {
        self.query.click_category = Some(category.into());
        self.query.page = 1;
    }

    pub fn query(&self, range: &DateRange) -> JobsQuery {
        JobsQuery {
            range: *range,
            ..self.query.clone()
        }
    }
}

impl ReportPage for JobsPage {
    type Data = JobList;

    const NAME: &'static str = "jobs";

    async fn load<A: DashboardApi>(&self, api: &A, range: &DateRange, _today: Date) -> Result<JobList, BackendError> {
        api.jobs(&self.query(range).params()).await
    }

    fn on_range_changed(&mut self) {
        self.query.page = 1;
    }
}
