use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the intervention an evidence photo documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceCategory {
    /// Before the work.
    #[default]
    Previa,
    /// After the work.
    Posterior,
}

impl EvidenceCategory {
    /// Wire value sent in the `category` multipart field.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceCategory::Previa => "previa",
            EvidenceCategory::Posterior => "posterior",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EvidenceCategory::Previa => "Before",
            EvidenceCategory::Posterior => "After",
        }
    }

    /// Parse a wire value; unknown values yield `None`.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previa" => Some(EvidenceCategory::Previa),
            "posterior" => Some(EvidenceCategory::Posterior),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            EvidenceCategory::Previa => EvidenceCategory::Posterior,
            EvidenceCategory::Posterior => EvidenceCategory::Previa,
        }
    }
}

impl fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All categories in display order.
pub const ALL_CATEGORIES: &[EvidenceCategory] =
    &[EvidenceCategory::Previa, EvidenceCategory::Posterior];

/// Acknowledgement body returned by both upload endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadAck {
    /// Server message, or `fallback` when the server sent none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
