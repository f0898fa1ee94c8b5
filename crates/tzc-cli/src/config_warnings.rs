use tzc_config::TzcConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TzcConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TzcConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.mysql.is_configured() && has_single_underscore_key(&env_keys, "TZC_MYSQL") {
        warnings.push(
            "MySQL config has no user while TZC_MYSQL_* env vars exist. Use double underscores (example: TZC_MYSQL__USER)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "TZC_RUN") {
        warnings.push(
            "TZC_RUN_* env vars are ignored. Use double underscores (example: TZC_RUN__HALT_ON_ERROR)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    let nested = format!("{section}__");
    keys.iter()
        .any(|key| key.starts_with(section) && !key.starts_with(&nested))
}
