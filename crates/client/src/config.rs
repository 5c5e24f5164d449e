use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding [`CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "FIELDREPORT_CONFIG";

/// Environment variable overriding `[api].base_url`.
const BASE_URL_ENV: &str = "API_BASE_URL";

/// Parse config file contents. Unparseable input yields defaults.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// Apply environment overrides on top of a parsed config.
pub fn apply_overrides(mut config: AppConfig, base_url: Option<String>) -> AppConfig {
    if let Some(url) = base_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        config.api.base_url = url;
    }
    config
}

/// Read `.env` and the config file and store the result in the global
/// `OnceLock`. Safe to call multiple times; only the first call has effect.
///
/// If the file is missing or unparseable, every setting takes its default.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| CONFIG_PATH.to_string());
        let parsed = match std::fs::read_to_string(&path) {
            Ok(contents) => parse_config(&contents),
            Err(e) => {
                tracing::info!(%path, error = %e, "config file not found, using defaults");
                AppConfig::default()
            }
        };
        let config = apply_overrides(parsed, std::env::var(BASE_URL_ENV).ok());
        tracing::info!(base_url = %config.api.base_url, "configuration loaded");
        config
    })
}

/// The loaded configuration, or defaults if [`load_config`] has not run.
pub fn config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}
