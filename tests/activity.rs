#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use timebook::libs::activity::{Activity, ActivitySort, SortField, SortOrder};
    use timebook::libs::paged::PageParams;

    #[test]
    fn test_default_sort_is_newest_first() {
        let sort = ActivitySort::default();
        assert_eq!(sort.field, SortField::Start);
        assert_eq!(sort.order, SortOrder::Desc);
        assert_eq!(sort.to_string(), "start:desc");
    }

    #[test]
    fn test_parse_sort() {
        let sort = ActivitySort::parse(Some("project:asc"));
        assert_eq!(sort.field, SortField::Project);
        assert_eq!(sort.order, SortOrder::Asc);

        assert_eq!(ActivitySort::parse(Some("PROJECT")).order, SortOrder::Desc);
        assert_eq!(ActivitySort::parse(Some("duration:asc")), ActivitySort::default());
        assert_eq!(ActivitySort::parse(Some("start:sideways")), ActivitySort::default());
        assert_eq!(ActivitySort::parse(None), ActivitySort::default());
    }

    #[test]
    fn test_toggle_sort() {
        let sort = ActivitySort::default();

        let flipped = sort.toggled(SortField::Start);
        assert_eq!(flipped.order, SortOrder::Asc);
        assert_eq!(flipped.toggled(SortField::Start), sort);

        let by_project = flipped.toggled(SortField::Project);
        assert_eq!(by_project.field, SortField::Project);
        assert_eq!(by_project.order, SortOrder::Desc);
    }

    #[test]
    fn test_page_of_total() {
        let params = PageParams::new(2, 20);
        assert_eq!(params.offset(), 40);

        let page = params.page_of_total(41);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number, 2);
        assert!(page.is_last());

        assert_eq!(PageParams::new(0, 20).page_of_total(40).total_pages, 2);
        assert_eq!(PageParams::new(0, 20).page_of_total(0).total_pages, 0);
        assert_eq!(PageParams::new(0, 0).page_of_total(10).total_pages, 0);
    }

    #[test]
    fn test_activity_duration() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 4, 17, 45, 0).unwrap();
        let activity = Activity::new(start, end, "Planning", 1);

        assert_eq!(activity.id, None);
        assert_eq!(activity.duration().unwrap().formatted, "8:45 h");
        assert!(Activity::new(end, start, "", 1).duration().is_err());
    }
}
