use std::fmt;

/// The four wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    /// Pick the location being reported on.
    #[default]
    Location,
    /// Upload before/after evidence photos.
    Evidence,
    /// Upload the signed acknowledgement document.
    Document,
    /// Generate and share the report.
    Report,
}

/// All steps in display order.
pub const ALL_STEPS: &[Step] = &[Step::Location, Step::Evidence, Step::Document, Step::Report];

impl Step {
    pub const FIRST: Step = Step::Location;
    pub const LAST: Step = Step::Report;

    /// 1-based position, as persisted.
    pub fn number(&self) -> u8 {
        match self {
            Step::Location => 1,
            Step::Evidence => 2,
            Step::Document => 3,
            Step::Report => 4,
        }
    }

    /// Build from a 1-based position, clamping into [1, 4].
    pub fn from_number_clamped(n: i64) -> Self {
        match n {
            i64::MIN..=1 => Step::Location,
            2 => Step::Evidence,
            3 => Step::Document,
            _ => Step::Report,
        }
    }

    /// Restore a persisted value. Absent or non-numeric input yields the
    /// first step; numeric input is clamped.
    pub fn parse_stored(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .map(Step::from_number_clamped)
            .unwrap_or(Step::FIRST)
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Location => Some(Step::Evidence),
            Step::Evidence => Some(Step::Document),
            Step::Document => Some(Step::Report),
            Step::Report => None,
        }
    }

    pub fn prev(&self) -> Option<Step> {
        match self {
            Step::Location => None,
            Step::Evidence => Some(Step::Location),
            Step::Document => Some(Step::Evidence),
            Step::Report => Some(Step::Document),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::Location => "Location",
            Step::Evidence => "Evidence",
            Step::Document => "Signed document",
            Step::Report => "Report",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
