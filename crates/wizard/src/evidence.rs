use serde::{Deserialize, Serialize};
use shared_types::EvidenceCategory;

/// Per-location tally of successfully submitted evidence photos.
///
/// Append-only from the client's point of view: the only way down is a full
/// reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceCounts {
    #[serde(default)]
    previa: u32,
    #[serde(default)]
    posterior: u32,
}

impl EvidenceCounts {
    pub fn new(previa: u32, posterior: u32) -> Self {
        Self { previa, posterior }
    }

    /// Count one successful submission of `kind`.
    pub fn record(&mut self, kind: EvidenceCategory) {
        match kind {
            EvidenceCategory::Previa => self.previa = self.previa.saturating_add(1),
            EvidenceCategory::Posterior => self.posterior = self.posterior.saturating_add(1),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn previa(&self) -> u32 {
        self.previa
    }

    pub fn posterior(&self) -> u32 {
        self.posterior
    }

    pub fn get(&self, kind: EvidenceCategory) -> u32 {
        match kind {
            EvidenceCategory::Previa => self.previa,
            EvidenceCategory::Posterior => self.posterior,
        }
    }

    pub fn total(&self) -> u32 {
        self.previa.saturating_add(self.posterior)
    }

    /// At least one photo of either kind.
    pub fn has_any(&self) -> bool {
        self.total() > 0
    }

    /// At least one photo of each kind; required to generate a report.
    pub fn is_complete(&self) -> bool {
        self.previa >= 1 && self.posterior >= 1
    }
}
