use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Answer of `POST /auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// The technician identity that scopes uploads and report ownership.
///
/// The session id is opaque to the wizard; today it is the login username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub session_id: String,
    pub display_name: String,
}

impl SessionIdentity {
    pub const DEFAULT_DISPLAY_NAME: &'static str = "Technician";
    /// Session id of the supervisor account that may browse all reports.
    pub const ADMIN_SESSION_ID: &'static str = "admin";

    pub fn new(session_id: impl Into<String>, display_name: Option<String>) -> Self {
        let display_name = display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DISPLAY_NAME.to_string());
        Self {
            session_id: session_id.into(),
            display_name,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.session_id.trim().eq_ignore_ascii_case(Self::ADMIN_SESSION_ID)
    }

    /// Initials for the avatar chip.
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}
