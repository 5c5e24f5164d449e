use serde::{Deserialize, Serialize};

/// Remote service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound for a single upload or listing request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://cubica-photo-app.onrender.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Wizard behaviour knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WizardOptions {
    /// Flip the evidence category after each successful upload so the next
    /// capture defaults to the other kind.
    #[serde(default = "default_true")]
    pub auto_flip_category: bool,
    /// Lifetime of transient upload notices.
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            auto_flip_category: true,
            notice_ttl_secs: default_notice_ttl_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_notice_ttl_secs() -> u64 {
    3
}

/// Login retry budget. The backend sleeps when idle and can take most of a
/// minute to answer the first request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LoginPolicy {
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,
    /// After this long without an answer the UI says the service is waking up.
    #[serde(default = "default_slow_notice_ms")]
    pub slow_notice_ms: u64,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout_ms: default_attempt_timeout_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            max_wait_ms: default_max_wait_ms(),
            slow_notice_ms: default_slow_notice_ms(),
        }
    }
}

fn default_attempt_timeout_ms() -> u64 {
    12_000
}

fn default_retry_delay_ms() -> u64 {
    3_000
}

fn default_max_wait_ms() -> u64 {
    60_000
}

fn default_slow_notice_ms() -> u64 {
    1_800
}

/// Where session-scoped client state is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    ".fieldreport/session.json".to_string()
}

/// Top-level config file structure matching `config.toml`.
///
/// Every section and field has a default so a missing or partial file still
/// yields a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub wizard: WizardOptions,
    #[serde(default)]
    pub login: LoginPolicy,
    #[serde(default)]
    pub storage: StorageConfig,
}
