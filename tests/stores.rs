#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rusqlite::Connection;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timebook::db::activities::Activities;
    use timebook::db::projects::Projects;
    use timebook::libs::activity::{Activity, ActivitySort, Project, SortField, SortOrder};
    use timebook::libs::paged::PageParams;
    use timebook::libs::report::{ActivityStore, ProjectStore, Reports};
    use timebook::libs::visibility::{build_visibility_filter, Identity, Role};
    use timebook::libs::window::{Granularity, TimeWindow};

    struct StoreTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        activities: Activities,
        projects: Projects,
        website: i64,
        accounting: i64,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("timebook.db");
            let activities = Activities::open(&db_path).unwrap();
            let mut projects = Projects::open(&db_path).unwrap();
            let website = projects.insert(1, &Project::new("Website", "Relaunch")).unwrap();
            let accounting = projects.insert(1, &Project::new("Accounting", "")).unwrap();

            StoreTestContext {
                _temp_dir: temp_dir,
                db_path,
                activities,
                projects,
                website,
                accounting,
            }
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    fn alice() -> Identity {
        Identity::new(1, "alice", vec![Role::User])
    }

    fn bob() -> Identity {
        Identity::new(1, "bob", vec![Role::User])
    }

    fn admin() -> Identity {
        Identity::new(1, "carol", vec![Role::Admin])
    }

    fn week() -> TimeWindow {
        TimeWindow::new(Granularity::Week, at(6, 12)).unwrap()
    }

    fn hours(start: DateTime<Utc>, hours: i64, project_id: i64) -> Activity {
        Activity::new(start, start + Duration::hours(hours), "work", project_id)
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_insert_takes_owner_from_identity(ctx: &mut StoreTestContext) {
        let mut entry = hours(at(4, 9), 2, ctx.website);
        entry.username = "mallory".to_string();
        entry.organization_id = 99;

        let id = ctx.activities.insert(&alice(), &entry).unwrap();
        let stored = ctx.activities.find_by_id(1, id).unwrap().unwrap();

        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.organization_id, 1);
        assert_eq!(stored.start, at(4, 9));
        assert_eq!(stored.end, at(4, 11));
        assert_eq!(stored.description, "work");
        assert!(ctx.activities.find_by_id(2, id).unwrap().is_none());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_subseconds_are_dropped(ctx: &mut StoreTestContext) {
        let start = at(4, 9) + Duration::milliseconds(750);
        let id = ctx
            .activities
            .insert(&alice(), &Activity::new(start, start + Duration::minutes(30), "", ctx.website))
            .unwrap();

        let stored = ctx.activities.find_by_id(1, id).unwrap().unwrap();
        assert_eq!(stored.start, at(4, 9));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_insert_rejects_reversed_interval(ctx: &mut StoreTestContext) {
        let reversed = Activity::new(at(4, 11), at(4, 9), "", ctx.website);
        assert!(ctx.activities.insert(&alice(), &reversed).is_err());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_insert_rejects_empty_interval(ctx: &mut StoreTestContext) {
        let empty = Activity::new(at(4, 9), at(4, 9), "", ctx.website);
        assert!(ctx.activities.insert(&alice(), &empty).is_err());

        let start = at(4, 9);
        let sub_second = Activity::new(start, start + Duration::milliseconds(400), "", ctx.website);
        assert!(ctx.activities.insert(&alice(), &sub_second).is_err());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_tags_are_stored_normalized(ctx: &mut StoreTestContext) {
        let entry = hours(at(4, 9), 1, ctx.website).with_tags(tags(&["Review", "backend", "review"]));
        let id = ctx.activities.insert(&alice(), &entry).unwrap();

        let stored = ctx.activities.find_by_id(1, id).unwrap().unwrap();
        assert_eq!(stored.tags, tags(&["backend", "review"]));

        let untagged = ctx.activities.insert(&alice(), &hours(at(5, 9), 1, ctx.website)).unwrap();
        assert!(ctx.activities.find_by_id(1, untagged).unwrap().unwrap().tags.is_empty());

        let invalid = hours(at(6, 9), 1, ctx.website).with_tags(tags(&["code review"]));
        assert!(ctx.activities.insert(&alice(), &invalid).is_err());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_find_by_tag(ctx: &mut StoreTestContext) {
        ctx.activities
            .insert(&alice(), &hours(at(4, 9), 1, ctx.website).with_tags(tags(&["backend"])))
            .unwrap();
        ctx.activities
            .insert(&alice(), &hours(at(5, 9), 1, ctx.website).with_tags(tags(&["backend", "review"])))
            .unwrap();
        ctx.activities.insert(&alice(), &hours(at(6, 9), 1, ctx.website)).unwrap();
        ctx.activities
            .insert(&bob(), &hours(at(6, 13), 1, ctx.accounting).with_tags(tags(&["review"])))
            .unwrap();

        let filter = build_visibility_filter(&alice(), &week()).with_tags(tags(&["review"]));
        let page = ctx.activities.find(&filter, &PageParams::new(0, 10)).unwrap();
        let starts: Vec<DateTime<Utc>> = page.activities.iter().map(|a| a.start).collect();
        assert_eq!(starts, vec![at(5, 9)]);
        assert_eq!(page.page.total_elements, 1);
        assert_eq!(page.activities[0].tags, tags(&["backend", "review"]));

        let filter = build_visibility_filter(&admin(), &week()).with_tags(tags(&["review", "backend"]));
        let page = ctx.activities.find(&filter, &PageParams::new(0, 10)).unwrap();
        assert_eq!(page.page.total_elements, 3);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_tags_are_shared_within_organization(ctx: &mut StoreTestContext) {
        let first = ctx
            .activities
            .insert(&alice(), &hours(at(4, 9), 1, ctx.website).with_tags(tags(&["review"])))
            .unwrap();
        ctx.activities
            .insert(&bob(), &hours(at(5, 9), 1, ctx.website).with_tags(tags(&["Review"])))
            .unwrap();
        let stranger = Identity::new(2, "erin", vec![Role::User]);
        ctx.activities
            .insert(&stranger, &hours(at(5, 9), 1, ctx.website).with_tags(tags(&["review"])))
            .unwrap();

        assert_eq!(count(&ctx.activities.conn, "tags"), 2);
        assert_eq!(count(&ctx.activities.conn, "activity_tags"), 3);

        ctx.activities.delete(&alice(), first).unwrap();
        assert_eq!(count(&ctx.activities.conn, "activity_tags"), 2);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_update_respects_ownership(ctx: &mut StoreTestContext) {
        let entry = hours(at(4, 9), 1, ctx.website).with_tags(tags(&["backend"]));
        let id = ctx.activities.insert(&alice(), &entry).unwrap();

        let mut changed = ctx.activities.find_by_id(1, id).unwrap().unwrap();
        changed.start = at(4, 10);
        changed.end = at(4, 12);
        changed.description = "review".to_string();
        changed.project_id = ctx.accounting;
        changed.tags = tags(&["review"]);

        assert!(ctx.activities.update(&bob(), &changed).is_err());
        let untouched = ctx.activities.find_by_id(1, id).unwrap().unwrap();
        assert_eq!((untouched.start, untouched.end), (at(4, 9), at(4, 10)));
        assert_eq!(untouched.tags, tags(&["backend"]));

        ctx.activities.update(&admin(), &changed).unwrap();
        let stored = ctx.activities.find_by_id(1, id).unwrap().unwrap();
        assert_eq!((stored.start, stored.end), (at(4, 10), at(4, 12)));
        assert_eq!(stored.description, "review");
        assert_eq!(stored.project_id, ctx.accounting);
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.tags, tags(&["review"]));

        changed.tags.clear();
        ctx.activities.update(&alice(), &changed).unwrap();
        assert!(ctx.activities.find_by_id(1, id).unwrap().unwrap().tags.is_empty());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_update_rejects_missing_and_empty(ctx: &mut StoreTestContext) {
        let id = ctx.activities.insert(&alice(), &hours(at(4, 9), 1, ctx.website)).unwrap();
        let mut stored = ctx.activities.find_by_id(1, id).unwrap().unwrap();

        stored.end = stored.start;
        assert!(ctx.activities.update(&alice(), &stored).is_err());
        assert_eq!(ctx.activities.find_by_id(1, id).unwrap().unwrap().end, at(4, 10));

        let mut missing = hours(at(4, 9), 1, ctx.website);
        assert!(ctx.activities.update(&admin(), &missing).is_err());
        missing.id = Some(id + 100);
        assert!(ctx.activities.update(&admin(), &missing).is_err());

        let stranger = Identity::new(2, "erin", vec![Role::Admin]);
        stored.end = at(4, 11);
        assert!(ctx.activities.update(&stranger, &stored).is_err());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_find_is_scoped_to_window_and_user(ctx: &mut StoreTestContext) {
        ctx.activities.insert(&alice(), &hours(at(4, 0), 1, ctx.website)).unwrap();
        ctx.activities.insert(&alice(), &hours(at(10, 23), 1, ctx.website)).unwrap();
        ctx.activities.insert(&alice(), &hours(at(11, 0), 1, ctx.website)).unwrap();
        ctx.activities.insert(&alice(), &hours(at(3, 23), 1, ctx.website)).unwrap();
        ctx.activities.insert(&bob(), &hours(at(5, 8), 1, ctx.accounting)).unwrap();

        let filter = build_visibility_filter(&alice(), &week());
        let page = ctx.activities.find(&filter, &PageParams::new(0, 10)).unwrap();
        let starts: Vec<DateTime<Utc>> = page.activities.iter().map(|a| a.start).collect();
        assert_eq!(starts, vec![at(10, 23), at(4, 0)]);
        assert_eq!(page.page.total_elements, 2);

        let filter = build_visibility_filter(&admin(), &week());
        let page = ctx.activities.find(&filter, &PageParams::new(0, 10)).unwrap();
        assert_eq!(page.page.total_elements, 3);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_find_sorts_by_project_title(ctx: &mut StoreTestContext) {
        ctx.activities.insert(&alice(), &hours(at(4, 9), 1, ctx.website)).unwrap();
        ctx.activities.insert(&alice(), &hours(at(5, 9), 1, ctx.accounting)).unwrap();
        ctx.activities.insert(&alice(), &hours(at(6, 9), 1, ctx.website)).unwrap();

        let sort = ActivitySort {
            field: SortField::Project,
            order: SortOrder::Asc,
        };
        let filter = build_visibility_filter(&alice(), &week()).with_sort(sort);
        let page = ctx.activities.find(&filter, &PageParams::new(0, 10)).unwrap();

        let projects: Vec<i64> = page.activities.iter().map(|a| a.project_id).collect();
        assert_eq!(projects, vec![ctx.accounting, ctx.website, ctx.website]);
        assert_eq!(page.activities[1].start, at(4, 9));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_find_pages(ctx: &mut StoreTestContext) {
        for day in 4..=8 {
            ctx.activities.insert(&alice(), &hours(at(day, 9), 1, ctx.website)).unwrap();
        }

        let filter = build_visibility_filter(&alice(), &week());
        let last = ctx.activities.find(&filter, &PageParams::new(2, 2)).unwrap();

        assert_eq!(last.activities.len(), 1);
        assert_eq!(last.activities[0].start, at(4, 9));
        assert_eq!(last.page.total_elements, 5);
        assert_eq!(last.page.total_pages, 3);
        assert!(last.page.is_last());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_delete_respects_ownership(ctx: &mut StoreTestContext) {
        let id = ctx.activities.insert(&alice(), &hours(at(4, 9), 1, ctx.website)).unwrap();

        assert!(ctx.activities.delete(&bob(), id).is_err());
        assert!(ctx.activities.find_by_id(1, id).unwrap().is_some());

        ctx.activities.delete(&admin(), id).unwrap();
        assert!(ctx.activities.find_by_id(1, id).unwrap().is_none());
        assert!(ctx.activities.delete(&admin(), id).is_err());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_projects_lookup(ctx: &mut StoreTestContext) {
        let other = ctx.projects.insert(2, &Project::new("Elsewhere", "")).unwrap();

        let listed: Vec<String> = ctx.projects.list(1).unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(listed, vec!["Accounting", "Website"]);

        let found = ctx.projects.find_by_ids(1, &[ctx.website, other]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(ctx.website));
        assert_eq!(found[0].description, "Relaunch");
        assert!(found[0].active);

        assert!(ctx.projects.find_by_ids(1, &[]).unwrap().is_empty());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_reports_over_sqlite(ctx: &mut StoreTestContext) {
        ctx.activities.insert(&alice(), &hours(at(4, 9), 2, ctx.website)).unwrap();
        ctx.activities.insert(&alice(), &hours(at(6, 13), 3, ctx.website)).unwrap();
        ctx.activities.insert(&bob(), &hours(at(5, 8), 1, ctx.accounting)).unwrap();

        let activities = Activities::open(&ctx.db_path).unwrap();
        let projects = Projects::open(&ctx.db_path).unwrap();
        let reports = Reports::new(&activities, &projects, 2);

        let own = reports
            .activities(&alice(), &week(), ActivitySort::default(), &PageParams::new(0, 20))
            .unwrap();
        assert_eq!(own.activities.len(), 2);

        let all = reports
            .activities(&admin(), &week(), ActivitySort::default(), &PageParams::new(0, 20))
            .unwrap();
        assert_eq!(all.activities.len(), 3);

        let by_project = reports.project_report(&admin(), &week()).unwrap();
        let titles: Vec<&str> = by_project.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Accounting", "Website"]);
        assert_eq!(by_project.total, Duration::hours(6));
    }
}
