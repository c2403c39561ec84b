#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timebook::libs::config::{parse_roles, Config, IdentityConfig, ReportConfig, CONFIG_FILE_NAME};
    use timebook::libs::visibility::Role;
    use timebook::libs::window::Granularity;

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(config, Config::default());
        assert!(config.identity().is_err());
        assert_eq!(config.report_settings(), ReportConfig::default());
        assert_eq!(config.report_settings().default_timespan, Granularity::Week);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            identity: Some(IdentityConfig {
                organization_id: 4,
                username: "alice".to_string(),
                roles: vec![Role::User, Role::Admin],
            }),
            report: Some(ReportConfig {
                page_size: 50,
                batch_size: 1000,
                default_timespan: Granularity::Month,
            }),
        };

        config.save_to(&path).unwrap();
        let read = Config::read_from(&path).unwrap();

        assert_eq!(read, config);
        let identity = read.identity().unwrap();
        assert_eq!(identity.organization_id, 4);
        assert_eq!(identity.username, "alice");
        assert!(identity.is_admin());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_file_format(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{
                "identity": { "organization_id": 1, "username": "bob", "roles": ["ROLE_USER"] },
                "report": { "page_size": 10, "batch_size": 200, "default_timespan": "quarter" }
            }"#,
        )
        .unwrap();

        let config = Config::read_from(&path).unwrap();
        assert_eq!(config.report_settings().default_timespan, Granularity::Quarter);
        assert!(!config.identity().unwrap().is_admin());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::read_from(&path).is_err());
    }

    #[test]
    fn test_parse_roles() {
        assert_eq!(parse_roles("ROLE_USER, ROLE_ADMIN").unwrap(), vec![Role::User, Role::Admin]);
        assert_eq!(parse_roles("ROLE_ADMIN,ROLE_ADMIN").unwrap(), vec![Role::Admin]);
        assert_eq!(parse_roles("").unwrap(), vec![Role::User]);
        assert!(parse_roles("ROLE_ROOT").is_err());
    }
}
