#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use timebook::libs::activity::{Activity, Project};
    use timebook::libs::aggregate::{aggregate, aggregate_by_project, aggregate_by_tag, total, Bucketing};
    use timebook::libs::paged::PageParams;
    use timebook::libs::report::{ActivitiesReport, ProjectReport, TagReport, TimeReport};
    use timebook::libs::view::View;
    use timebook::libs::window::{Granularity, TimeWindow};

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    fn entries() -> Vec<Activity> {
        vec![
            Activity::new(at(4, 9), at(4, 11), "", 1),
            Activity::new(at(5, 9), at(5, 10), "", 2),
            Activity::new(at(5, 13), at(5, 16), "", 1),
        ]
    }

    fn projects() -> Vec<Project> {
        let mut website = Project::new("Website", "");
        website.id = Some(1);
        let mut accounting = Project::new("Accounting", "");
        accounting.id = Some(2);
        vec![website, accounting]
    }

    fn week() -> TimeWindow {
        TimeWindow::new(Granularity::Week, at(6, 12)).unwrap()
    }

    #[test]
    fn test_activities_table() {
        let report = ActivitiesReport {
            window: week(),
            activities: entries(),
            projects: projects(),
            page: PageParams::new(0, 20).page_of_total(3),
        };

        assert_eq!(report.project_title(2), Some("Accounting"));
        assert_eq!(report.project_title(9), None);
        assert_eq!(View::activities_table(&report).len(), 4);
    }

    #[test]
    fn test_time_report_table_has_total_row() {
        let buckets = aggregate(&entries(), Bucketing::Day).unwrap();
        let report = TimeReport {
            window: week(),
            bucketing: Bucketing::Day,
            total: total(&buckets),
            buckets,
        };

        assert_eq!(report.total, Duration::hours(6));
        assert_eq!(View::time_report_table(&report).len(), 4);
    }

    #[test]
    fn test_project_report_table_has_total_row() {
        let items = aggregate_by_project(&entries(), &projects()).unwrap();
        let report = ProjectReport {
            window: week(),
            items,
            total: Duration::hours(6),
        };

        let table = View::project_report_table(&report);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get_row(1).unwrap().get_cell(1).unwrap().get_content(), "Accounting");
    }

    #[test]
    fn test_tag_report_table_has_no_total_row() {
        let mut tagged = entries();
        tagged[0].tags = vec!["backend".to_string(), "review".to_string()];
        tagged[2].tags = vec!["review".to_string()];
        let report = TagReport {
            window: week(),
            items: aggregate_by_tag(&tagged, &[]).unwrap(),
        };

        let table = View::tag_report_table(&report);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get_row(2).unwrap().get_cell(0).unwrap().get_content(), "review");
    }
}
