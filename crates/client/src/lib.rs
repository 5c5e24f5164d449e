pub mod api;
pub mod auth;
pub mod config;
pub mod error_convert;
pub mod store;

pub use api::ApiClient;
pub use auth::{login, login_with_retry, LoginProgress};
pub use config::{config, load_config};
pub use store::JsonFileStore;
