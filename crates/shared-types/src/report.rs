use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of `GET /report/generate/{session}` in JSON mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReport {
    #[serde(default)]
    pub url: Option<String>,
}

impl GeneratedReport {
    /// The durable link, if the server actually produced one.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Who generated a report, as reported by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedBy {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl GeneratedBy {
    pub fn display(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.username.as_deref().filter(|u| !u.trim().is_empty()))
            .unwrap_or("—")
    }
}

/// A generated report row on the reports page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Whether the signed document was bundled into the report.
    #[serde(default)]
    pub includes_document: bool,
    #[serde(default)]
    pub generated_by: Option<GeneratedBy>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub incident_number: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ReportSummary {
    pub fn author(&self) -> &str {
        self.generated_by
            .as_ref()
            .map(GeneratedBy::display)
            .unwrap_or("—")
    }

    pub fn incident_display(&self) -> String {
        display_incident(self.incident_number.as_deref().unwrap_or_default())
    }
}

/// One page of `GET /reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    #[serde(default)]
    pub data: Vec<ReportSummary>,
    #[serde(default)]
    pub total: i64,
    #[serde(default = "default_total_pages")]
    pub total_pages: i64,
}

fn default_total_pages() -> i64 {
    1
}

impl Default for ReportPage {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            total_pages: 1,
        }
    }
}

impl ReportPage {
    pub fn has_next(&self, page: i64) -> bool {
        page < self.total_pages
    }
}

/// Page sizes offered by the reports page.
pub const PAGE_SIZES: &[i64] = &[5, 10, 20, 50];

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Query for `GET /reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub page: i64,
    pub limit: i64,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub incident_search: String,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            incident_search: String::new(),
        }
    }
}

impl ReportQuery {
    /// Clamp the page to >= 1 and the limit to one of [`PAGE_SIZES`].
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        if !PAGE_SIZES.contains(&self.limit) {
            self.limit = DEFAULT_PAGE_SIZE;
        }
        self
    }

    /// Query string pairs in wire order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("search", self.search.clone()),
            ("incidentSearch", self.incident_search.clone()),
        ]
    }
}

/// Render an incident number without its `INC`/`INC-` prefix.
///
/// Blank input renders as an em dash.
pub fn display_incident(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return "—".to_string();
    }
    let upper = s.to_ascii_uppercase();
    if upper.starts_with("INC-") {
        return s[4..].trim().to_string();
    }
    if upper.starts_with("INC") {
        let rest = s[3..].trim();
        return rest.strip_prefix('-').unwrap_or(rest).trim().to_string();
    }
    s.to_string()
}
