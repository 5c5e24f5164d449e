//! Department / city / free-text narrowing of the location set.
//!
//! Sorting follows Spanish collation at base strength: case and accents are
//! ignored, except that `ñ` is its own letter ordered after `n`.

use shared_types::Location;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sentinel option value meaning "no filter".
pub const ALL: &str = "";

const COMBINING_TILDE: char = '\u{0303}';

/// A value/label pair for a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    fn all(label: &str) -> Self {
        Self {
            value: ALL.to_string(),
            label: label.to_string(),
        }
    }

    fn value(v: String) -> Self {
        Self {
            label: v.clone(),
            value: v,
        }
    }
}

/// Lowercase and strip diacritics for substring search.
pub fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Sort key approximating Spanish base-strength collation.
pub fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    let mut after_n = false;
    for c in s.nfd() {
        if is_combining_mark(c) {
            if c == COMBINING_TILDE && after_n {
                // `~` sorts after every ASCII letter, so "ña" lands after "nz".
                key.push('~');
            }
            continue;
        }
        let mut lowered = c.to_lowercase();
        let first = lowered.next().unwrap_or(c);
        key.push(first);
        key.extend(lowered);
        after_n = first == 'n';
    }
    key
}

/// Locale-aware comparison with a raw-string tiebreak so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<&str> = values.map(str::trim).filter(|v| !v.is_empty()).collect();
    let mut out: Vec<String> = set.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| compare_names(a, b));
    out
}

/// Distinct trimmed departments, sorted.
pub fn departments(locations: &[Location]) -> Vec<String> {
    sorted_distinct(locations.iter().map(|l| l.department.as_str()))
}

/// Distinct trimmed cities, narrowed to `department` unless it is [`ALL`].
pub fn cities(locations: &[Location], department: &str) -> Vec<String> {
    sorted_distinct(
        locations
            .iter()
            .filter(|l| department == ALL || l.department_key() == department)
            .map(|l| l.city.as_str()),
    )
}

pub fn department_options(locations: &[Location]) -> Vec<FilterOption> {
    std::iter::once(FilterOption::all("All departments"))
        .chain(departments(locations).into_iter().map(FilterOption::value))
        .collect()
}

pub fn city_options(locations: &[Location], department: &str) -> Vec<FilterOption> {
    std::iter::once(FilterOption::all("All cities"))
        .chain(cities(locations, department).into_iter().map(FilterOption::value))
        .collect()
}

/// Current filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionFilter {
    department: String,
    city: String,
    query: String,
}

impl SelectionFilter {
    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Choose a department. A chosen city that does not exist in the new
    /// department falls back to [`ALL`].
    pub fn set_department(&mut self, locations: &[Location], department: &str) {
        self.department = department.trim().to_string();
        if self.city != ALL && !cities(locations, &self.department).contains(&self.city) {
            tracing::debug!(city = %self.city, department = %self.department, "city filter reset");
            self.city = ALL.to_string();
        }
    }

    pub fn set_city(&mut self, city: &str) {
        self.city = city.trim().to_string();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.department != ALL || self.city != ALL || !self.query.trim().is_empty()
    }

    /// Whether `location` passes every non-empty predicate.
    pub fn matches(&self, location: &Location) -> bool {
        if self.department != ALL && location.department_key() != self.department {
            return false;
        }
        if self.city != ALL && location.city_key() != self.city {
            return false;
        }
        let q = fold(self.query.trim());
        if q.is_empty() {
            return true;
        }
        [&location.name, &location.city, &location.department]
            .iter()
            .any(|field| fold(field).contains(&q))
    }

    /// Filtered view of `locations`, sorted by name.
    pub fn apply<'a>(&self, locations: &'a [Location]) -> Vec<&'a Location> {
        let mut out: Vec<&Location> = locations.iter().filter(|l| self.matches(l)).collect();
        out.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
        out
    }
}
