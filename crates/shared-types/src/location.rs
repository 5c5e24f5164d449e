use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A store/site a technician can report on.
///
/// Immutable once fetched. The remote service has used both numeric and
/// string identifiers, so the id is normalised to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub city: String,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
            city: city.into(),
        }
    }

    /// Department as used for filtering (surrounding whitespace ignored).
    pub fn department_key(&self) -> &str {
        self.department.trim()
    }

    /// City as used for filtering (surrounding whitespace ignored).
    pub fn city_key(&self) -> &str {
        self.city.trim()
    }

    /// Label shown in the location picker: "name — department, city".
    pub fn option_label(&self) -> String {
        format!("{} — {}, {}", self.name, self.department, self.city)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Parse the `GET /locations` payload leniently.
///
/// Anything that is not a JSON array yields an empty set; array elements that
/// cannot be read as a location (no usable id, wrong shape) are skipped.
pub fn parse_location_list(body: &str) -> Vec<Location> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Location>(item).ok())
        .filter(|loc| !loc.id.trim().is_empty())
        .collect()
}
