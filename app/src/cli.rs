//! Command-line interface definitions.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use printdash::adapter::backend::{BackendClient, NewDevice, device_names};
use printdash::core::time::{Clock, Date, SystemClock};
use printdash::date_range::{CATALOG, DateRangeResolver, Preset, format_label};
use printdash::page::devices::{add_device, remove_device};
use printdash::page::history::load_history;
use printdash::page::{
    AvailabilityPage, ClicksReportPage, DashboardPage, JobsPage, PageState, ReportPage, YearComparison,
};
use printdash::port::DashboardApi;
use printdash::query::{DeviceSelection, HISTORY_LIMIT, HistoryQuery, QueryParams, Resolution};
use printdash::settings::Settings;

/// Printdash - reports of the print production monitoring backend.
#[derive(Parser, Debug)]
#[command(name = "printdash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List date range presets with their current ranges
    Presets {
        /// Only show these preset ids
        #[arg(long, value_delimiter = ',')]
        allowed: Vec<String>,
    },

    /// Resolve a preset or calendar selection into query dates
    Range(RangeArgs),

    /// Production stats and impression trend
    Overview {
        #[command(flatten)]
        device: DeviceArgs,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Paginated job list
    Jobs(JobsArgs),

    /// Click report by category
    Clicks(ClicksArgs),

    /// Download the click report as CSV
    Export(ExportArgs),

    /// Availability and error analysis
    Availability {
        #[command(flatten)]
        device: DeviceArgs,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Pull new data from the vendor API into the backend
    Refresh(RefreshArgs),

    /// Manage configured presses
    #[command(subcommand)]
    Devices(DevicesCommand),

    /// Control the backend's job sync
    #[command(subcommand)]
    Sync(SyncCommand),

    /// Recent file imports and vendor API syncs
    Logs {
        #[arg(long, default_value_t = HISTORY_LIMIT)]
        limit: u32,
    },

    /// Show background sync state, or the live status of one press
    Status {
        /// Press id
        #[arg(long)]
        device: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DevicesCommand {
    /// List configured presses
    List,

    /// Register a press
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        model: String,
    },

    /// Remove a press
    Remove {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyncCommand {
    /// Start the periodic background sync
    Start,

    /// Stop the periodic background sync
    Stop,

    /// Sync jobs of one press now. "all" syncs the default press
    Jobs(DeviceArgs),
}

/// Date range selection shared by all report commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Preset id, e.g. last7days or thisMonth
    #[arg(long, conflicts_with = "from")]
    pub preset: Option<String>,

    /// First day (yyyy-mm-dd or dd.mm.yyyy)
    #[arg(long)]
    pub from: Option<Date>,

    /// Last day, defaults to the first day
    #[arg(long, requires = "from")]
    pub to: Option<Date>,
}

#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Press id, or "all"
    #[arg(long, short, default_value = "all")]
    pub device: DeviceSelection,
}

#[derive(Args, Debug)]
pub struct JobsArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    #[command(flatten)]
    pub range: RangeArgs,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Free-text search in job names
    #[arg(long)]
    pub search: Option<String>,

    /// Only jobs that were aborted or failed
    #[arg(long)]
    pub problem_jobs: bool,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args, Debug)]
pub struct ClicksArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    #[command(flatten)]
    pub range: RangeArgs,

    /// day, month or year
    #[arg(long, default_value = "day")]
    pub resolution: Resolution,

    #[arg(long)]
    pub one_shot: bool,

    /// Compare with the previous year
    #[arg(long)]
    pub yoy: Option<i32>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    #[command(flatten)]
    pub range: RangeArgs,

    #[arg(long)]
    pub one_shot: bool,

    /// Target file, defaults to clicks_report_<today>.csv
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RefreshArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    #[command(flatten)]
    pub range: RangeArgs,

    /// Ignore the backend's freshness check
    #[arg(long)]
    pub force: bool,
}

impl RangeArgs {
    /// Applies the selection to a page, which loads its data. Without a selection the
    /// page's default range is loaded.
    pub async fn apply<P, C, A>(&self, state: &mut PageState<P, C>, api: &A) -> anyhow::Result<()>
    where
        P: ReportPage,
        C: Clock,
        A: DashboardApi,
    {
        match (&self.preset, self.from) {
            (_, Some(from)) => state.select_manual(api, from, self.to).await,
            (Some(preset), None) => state.select_preset_by_name(api, preset).await?,
            (None, None) => {
                state.reload(api).await;
            }
        }

        Ok(())
    }
}

impl Commands {
    pub async fn run(self, settings: &Settings) -> anyhow::Result<()> {
        let resolver = DateRangeResolver::new(SystemClock);

        match self {
            Commands::Presets { allowed } => {
                let definitions = if allowed.is_empty() {
                    CATALOG.to_vec()
                } else {
                    resolver.filter_catalog(&allowed)
                };

                let now = resolver.clock().now();
                for definition in definitions {
                    println!(
                        "{:<12} {:<16} {}",
                        definition.id,
                        definition.label,
                        format_label(&definition.compute(&now))
                    );
                }
                Ok(())
            }

            Commands::Range(args) => {
                let selection = match (&args.preset, args.from) {
                    (_, Some(from)) => resolver.resolve_manual_range(from, args.to),
                    (Some(preset), None) => resolver.resolve(preset.parse()?),
                    (None, None) => resolver.resolve(Preset::All),
                };

                let mut params = QueryParams::new();
                params.push_range(&selection.range);

                println!("{}", resolver.format_label(&selection.range));
                print_json(&params)?;
                print_json(&selection)
            }

            Commands::Overview { device, range } => {
                let api = settings.backend.new_client()?;
                let mut state = DashboardPage::new(device.device).into_state(resolver);
                range.apply(&mut state, &api).await?;
                print_page(&state)
            }

            Commands::Jobs(args) => {
                let api = settings.backend.new_client()?;

                let mut page = JobsPage::new(args.device.device);
                if let Some(search) = args.search {
                    page.set_search(search);
                }
                if let Some(status) = args.status {
                    page.set_status(status);
                }
                if let Some(category) = args.category {
                    page.set_click_category(category);
                }
                page.set_problem_jobs(args.problem_jobs);

                let mut state = page.into_state(resolver);
                args.range.apply_without_load(&mut state)?;
                state.update(&api, |page| page.set_page(args.page)).await;

                print_page(&state)
            }

            Commands::Clicks(args) => {
                let api = settings.backend.new_client()?;
                let page = ClicksReportPage {
                    device: args.device.device,
                    one_shot: args.one_shot,
                    resolution: args.resolution,
                    year_comparison: args.yoy.map(YearComparison::for_year),
                };

                let mut state = page.into_state(resolver);
                args.range.apply(&mut state, &api).await?;

                if let Some(data) = state.data() {
                    println!("Datenquelle: {}", data.report.data_source_label());
                }
                print_page(&state)
            }

            Commands::Export(args) => {
                let api = settings.backend.new_client()?;
                let page = ClicksReportPage {
                    device: args.device.device,
                    one_shot: args.one_shot,
                    ..Default::default()
                };

                let mut state = page.into_state(resolver);
                args.range.apply_without_load(&mut state)?;

                let (file_name, export) = state.export(&api).await?;
                let target = args.out.unwrap_or_else(|| PathBuf::from(file_name));
                std::fs::write(&target, export.raw())
                    .with_context(|| format!("Error writing export to {}", target.display()))?;

                println!("{} Zeilen nach {} exportiert", export.rows.len(), target.display());
                Ok(())
            }

            Commands::Availability { device, range } => {
                let api = settings.backend.new_client()?;
                let mut state = AvailabilityPage::new(device.device).into_state(resolver);
                range.apply(&mut state, &api).await?;

                if let Some(advisory) = state.advisory() {
                    eprintln!("{}: {}", advisory.title(), advisory);
                }
                print_page(&state)
            }

            Commands::Refresh(args) => {
                let api = settings.backend.new_client()?;
                let page = ClicksReportPage {
                    device: args.device.device,
                    ..Default::default()
                };

                let mut state = page.into_state(resolver);
                args.range.apply_without_load(&mut state)?;

                let outcome = state.refresh(&api, args.force).await?;
                println!("{}", outcome.summary());
                Ok(())
            }

            Commands::Devices(command) => {
                let api = settings.backend.new_client()?;
                let devices = match command {
                    DevicesCommand::List => api.devices().await?,
                    DevicesCommand::Add { id, name, model } => add_device(&api, &NewDevice::new(id, name, model)?).await?,
                    DevicesCommand::Remove { id } => remove_device(&api, &id).await?,
                };

                let mut names: Vec<_> = device_names(&devices).into_iter().collect();
                names.sort();
                for (id, name) in names {
                    println!("{:<12} {}", id, name);
                }
                Ok(())
            }

            Commands::Sync(command) => {
                let api = settings.backend.new_client()?;
                match command {
                    SyncCommand::Start => {
                        let state = DashboardPage::default().into_state(resolver);
                        println!("{}", state.set_background_sync(&api, true).await?);
                    }
                    SyncCommand::Stop => {
                        let state = DashboardPage::default().into_state(resolver);
                        println!("{}", state.set_background_sync(&api, false).await?);
                    }
                    SyncCommand::Jobs(device) => {
                        let mut state = DashboardPage::new(device.device).into_state(resolver);
                        let outcome = state.sync_jobs(&api).await?;
                        println!("{}", outcome.summary());
                    }
                }
                Ok(())
            }

            Commands::Logs { limit } => {
                let api = settings.backend.new_client()?;
                print_json(&load_history(&api, HistoryQuery { limit }).await?)
            }

            Commands::Status { device } => {
                let api: BackendClient = settings.backend.new_client()?;
                match device {
                    Some(device_id) => print_json(&api.device_status(&device_id).await?),
                    None => print_json(&api.sync_status().await?),
                }
            }
        }
    }
}

impl RangeArgs {
    /// Changes the range without loading the page, for commands that only act on the
    /// selection.
    fn apply_without_load<P: ReportPage, C: Clock>(&self, state: &mut PageState<P, C>) -> anyhow::Result<()> {
        match (&self.preset, self.from) {
            (_, Some(from)) => state.picker_mut().select_manual(from, self.to),
            (Some(preset), None) => state.picker_mut().select_preset_by_name(preset)?,
            (None, None) => return Ok(()),
        };

        Ok(())
    }
}

fn print_page<P, C>(state: &PageState<P, C>) -> anyhow::Result<()>
where
    P: ReportPage,
    P::Data: Serialize,
    C: Clock,
{
    println!("Zeitraum: {}", state.picker().label());

    match (state.data(), state.error()) {
        (Some(data), _) => print_json(data),
        (None, Some(error)) if error.transient => bail!("Loading {} failed, try again later: {}", P::NAME, error),
        (None, Some(error)) => bail!("Loading {} failed: {}", P::NAME, error),
        (None, None) => bail!("Loading {} returned no data", P::NAME),
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
