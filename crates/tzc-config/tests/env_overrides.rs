use figment::Jail;
use tzc_config::TzcConfig;
use tzc_core::enums::Strategy;

#[test]
fn env_fills_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("TZC_MYSQL__HOST", "env-host");
        jail.set_env("TZC_MYSQL__PORT", "3310");
        jail.set_env("TZC_MYSQL__USER", "env-user");
        jail.set_env("TZC_RUN__HALT_ON_ERROR", "true");
        jail.set_env("TZC_RUN__STRATEGY", "per-column");

        let config = TzcConfig::load().expect("config loads");
        assert_eq!(config.mysql.host, "env-host");
        assert_eq!(config.mysql.port, 3310);
        assert_eq!(config.mysql.user, "env-user");
        assert!(config.run.halt_on_error);
        assert_eq!(config.run.strategy, Some(Strategy::PerColumn));
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tzc")?;
        jail.create_file(
            ".tzc/config.toml",
            r#"
[mysql]
host = "toml-host"
user = "toml-user"
"#,
        )?;
        jail.set_env("TZC_MYSQL__HOST", "env-host");

        let config = TzcConfig::load().expect("config loads");
        assert_eq!(config.mysql.host, "env-host");
        assert_eq!(config.mysql.user, "toml-user");
        Ok(())
    });
}
