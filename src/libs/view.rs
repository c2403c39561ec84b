use super::activity::Project;
use super::duration::ActivityDuration;
use super::formatter::{format_date, format_time};
use super::report::{ActivitiesReport, ProjectReport, TagReport, TimeReport};
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn activities(report: &ActivitiesReport) -> Result<()> {
        Self::activities_table(report).printstd();
        Ok(())
    }

    pub fn activities_table(report: &ActivitiesReport) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "START", "END", "DURATION", "PROJECT", "USER", "TAGS", "DESCRIPTION"]);
        for activity in &report.activities {
            let duration = activity.duration().map(|d| d.formatted).unwrap_or_default();
            table.add_row(row![
                activity.id.unwrap_or(0),
                format_date(activity.start.date_naive()),
                format_time(activity.start),
                format_time(activity.end),
                r->duration,
                report.project_title(activity.project_id).unwrap_or("-"),
                activity.username,
                activity.tags.join(", "),
                activity.description
            ]);
        }

        table
    }

    pub fn time_report(report: &TimeReport) -> Result<()> {
        Self::time_report_table(report).printstd();
        Ok(())
    }

    pub fn time_report_table(report: &TimeReport) -> Table {
        let mut table = Table::new();

        table.add_row(row![report.bucketing.to_string().to_uppercase(), "ACTIVITIES", "HOURS", "DURATION"]);
        for bucket in &report.buckets {
            let duration = bucket.duration();
            table.add_row(row![bucket.key.label(), r->bucket.count, r->format!("{:.2}", duration.decimal_hours), r->duration.formatted]);
        }
        let total = ActivityDuration::from_elapsed(report.total);
        table.add_row(row!["TOTAL", "", r->format!("{:.2}", total.decimal_hours), r->total.formatted]);

        table
    }

    pub fn project_report(report: &ProjectReport) -> Result<()> {
        Self::project_report_table(report).printstd();
        Ok(())
    }

    pub fn project_report_table(report: &ProjectReport) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "PROJECT", "ACTIVITIES", "HOURS", "DURATION"]);
        for item in &report.items {
            let duration = item.duration();
            table.add_row(row![
                item.project_id,
                item.title,
                r->item.count,
                r->format!("{:.2}", duration.decimal_hours),
                r->duration.formatted
            ]);
        }
        let total = ActivityDuration::from_elapsed(report.total);
        table.add_row(row!["", "TOTAL", "", r->format!("{:.2}", total.decimal_hours), r->total.formatted]);

        table
    }

    pub fn tag_report(report: &TagReport) -> Result<()> {
        Self::tag_report_table(report).printstd();
        Ok(())
    }

    /// No total row: an activity with several tags counts once per tag.
    pub fn tag_report_table(report: &TagReport) -> Table {
        let mut table = Table::new();

        table.add_row(row!["TAG", "ACTIVITIES", "HOURS", "DURATION"]);
        for item in &report.items {
            let duration = item.duration();
            table.add_row(row![item.tag, r->item.count, r->format!("{:.2}", duration.decimal_hours), r->duration.formatted]);
        }

        table
    }

    pub fn projects(projects: &[Project]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "ACTIVE"]);
        for project in projects {
            table.add_row(row![
                project.id.unwrap_or(0),
                project.title,
                project.description,
                if project.active { "yes" } else { "no" }
            ]);
        }
        table.printstd();

        Ok(())
    }
}
