pub mod auth;
pub mod config;
pub mod error;
pub mod evidence;
pub mod location;
pub mod report;

pub use auth::*;
pub use config::*;
pub use error::*;
pub use evidence::*;
pub use location::*;
pub use report::*;
