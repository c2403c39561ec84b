use crate::{
    db::{activities::Activities, projects::Projects},
    libs::{
        activity::ActivitySort,
        codec::{ReportView, WindowQuery},
        config::Config,
        error::ReportError,
        messages::Message,
        paged::PageParams,
        report::Reports,
        tag::normalize_tags,
        view::View,
        window::TimeWindow,
    },
    msg_error_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(short, long, help = "day, week, month, quarter, year or custom")]
    timespan: Option<String>,
    #[arg(short, long, help = "Period token such as 2024-10 (week 10) or 2024-3 (quarter 3)")]
    value: Option<String>,
    #[arg(long, help = "Custom range start, YYYY-MM-DD")]
    start: Option<String>,
    #[arg(long, help = "Custom range end (exclusive), YYYY-MM-DD")]
    end: Option<String>,
    #[arg(short = 'c', long, help = "general, time[:d|w|m|q], project or tag")]
    view: Option<String>,
    #[arg(long, value_delimiter = ',', help = "Only activities with one of these tags")]
    tag: Vec<String>,
    #[arg(long, help = "Activity order as field:order, e.g. project:asc")]
    sort: Option<String>,
    #[arg(short, long, default_value_t = 1, help = "Page of the activity list")]
    page: u32,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true, help = "Move the window by this many periods")]
    shift: i32,
}

pub fn cmd(report_args: ReportArgs) -> Result<()> {
    let config = Config::read()?;
    let identity = config.identity()?;
    let settings = config.report_settings();
    let now = Utc::now();

    let nothing_selected =
        report_args.timespan.is_none() && report_args.value.is_none() && report_args.start.is_none() && report_args.end.is_none();
    let query = WindowQuery {
        timespan: if nothing_selected {
            Some(settings.default_timespan.as_str())
        } else {
            report_args.timespan.as_deref()
        },
        value: report_args.value.as_deref(),
        start: report_args.start.as_deref(),
        end: report_args.end.as_deref(),
    };

    let mut window = query.parse(now).map_err(client_error)?;
    window = shifted(window, report_args.shift);
    let view = ReportView::parse(report_args.view.as_deref(), &window).map_err(client_error)?;

    let activities = Activities::new()?;
    let projects = Projects::new()?;
    let tags = normalize_tags(&report_args.tag).map_err(client_error)?;
    let reports = Reports::new(&activities, &projects, settings.batch_size).with_tags(tags);

    match view {
        ReportView::General => {
            let page = PageParams::new(report_args.page.saturating_sub(1), settings.page_size);
            let report = reports.activities(&identity, &window, ActivitySort::parse(report_args.sort.as_deref()), &page)?;

            msg_print!(Message::ActivitiesHeader(window.formatted_label()), true);
            if report.activities.is_empty() {
                msg_info!(Message::ActivitiesNotFound);
            } else {
                View::activities(&report)?;
                msg_print!(Message::ReportPage(
                    report.page.number + 1,
                    report.page.total_pages,
                    report.page.total_elements
                ));
            }
        }
        ReportView::Time(bucketing) => {
            let report = reports.time_report(&identity, &window, bucketing)?;

            msg_print!(Message::TimeReportHeader(window.formatted_label(), report.bucketing.to_string()), true);
            View::time_report(&report)?;
        }
        ReportView::Project => {
            let report = reports.project_report(&identity, &window)?;

            msg_print!(Message::ProjectReportHeader(window.formatted_label()), true);
            View::project_report(&report)?;
        }
        ReportView::Tag => {
            let report = reports.tag_report(&identity, &window)?;

            msg_print!(Message::TagReportHeader(window.formatted_label()), true);
            if report.items.is_empty() {
                msg_info!(Message::TagsNotFound);
            } else {
                View::tag_report(&report)?;
            }
        }
    }

    msg_print!(Message::ReportNavigation(window.previous().label(), window.next().label()));

    Ok(())
}

fn shifted(window: TimeWindow, periods: i32) -> TimeWindow {
    (0..periods.unsigned_abs()).fold(window, |window, _| if periods < 0 { window.previous() } else { window.next() })
}

fn client_error(error: ReportError) -> anyhow::Error {
    if error.is_client_error() {
        msg_error_anyhow!(Message::InvalidReportInput(error.to_string()))
    } else {
        error.into()
    }
}
