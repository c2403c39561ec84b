#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use timebook::libs::activity::ActivitySort;
    use timebook::libs::visibility::{build_visibility_filter, Identity, Role};
    use timebook::libs::window::{Granularity, TimeWindow};

    fn window() -> TimeWindow {
        TimeWindow::new(Granularity::Week, Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_user_sees_only_own_activities() {
        let alice = Identity::new(7, "alice", vec![Role::User]);
        let filter = build_visibility_filter(&alice, &window());

        assert_eq!(filter.organization_id, 7);
        assert_eq!(filter.username.as_deref(), Some("alice"));
        assert_eq!(filter.start, window().start());
        assert_eq!(filter.end, window().end());
        assert_eq!(filter.sort, ActivitySort::default());
        assert!(filter.admits_user("alice"));
        assert!(!filter.admits_user("bob"));
    }

    #[test]
    fn test_admin_sees_whole_organization() {
        let admin = Identity::new(7, "carol", vec![Role::User, Role::Admin]);
        let filter = build_visibility_filter(&admin, &window());

        assert_eq!(filter.organization_id, 7);
        assert_eq!(filter.username, None);
        assert!(filter.admits_user("bob"));
    }

    #[test]
    fn test_tag_restriction_matches_any_tag() {
        let alice = Identity::new(7, "alice", vec![Role::User]);
        let filter = build_visibility_filter(&alice, &window());
        assert!(filter.tags.is_empty());
        assert!(filter.admits_tags(&[]));

        let filter = filter.with_tags(vec!["review".to_string(), "ops".to_string()]);
        assert!(filter.admits_tags(&["backend".to_string(), "ops".to_string()]));
        assert!(!filter.admits_tags(&["backend".to_string()]));
        assert!(!filter.admits_tags(&[]));
    }

    #[test]
    fn test_identity_without_roles_is_not_admin() {
        let nobody = Identity::new(3, "dave", vec![]);
        assert!(!nobody.is_admin());
        assert_eq!(build_visibility_filter(&nobody, &window()).username.as_deref(), Some("dave"));
    }

    #[test]
    fn test_role_names() {
        assert_eq!("ROLE_ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("role_user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("ROLE_ROOT".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "ROLE_ADMIN");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"ROLE_USER\"");
    }
}
