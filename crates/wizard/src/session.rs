use crate::evidence::EvidenceCounts;
use crate::step::Step;
use crate::storage::{
    SessionStore, KEY_DOCUMENT_READY, KEY_EVIDENCE, KEY_LOCATION, KEY_LOCATION_LOCKED, KEY_STEP,
    WIZARD_KEYS,
};
use shared_types::EvidenceCategory;

/// Progress of one location visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardSession {
    step: Step,
    location_id: Option<String>,
    evidence: EvidenceCounts,
    document_ready: bool,
    report_url: Option<String>,
    /// Set on the first advance; the location then stays until a reset.
    location_locked: bool,
}

impl WizardSession {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn location_id(&self) -> Option<&str> {
        self.location_id.as_deref()
    }

    pub fn evidence(&self) -> EvidenceCounts {
        self.evidence
    }

    pub fn document_ready(&self) -> bool {
        self.document_ready
    }

    pub fn report_url(&self) -> Option<&str> {
        self.report_url.as_deref()
    }

    pub fn is_location_locked(&self) -> bool {
        self.location_locked
    }

    /// Gate for leaving the current step.
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Location => self.location_id.is_some(),
            Step::Evidence => self.evidence.has_any(),
            Step::Document => self.document_ready,
            Step::Report => false,
        }
    }

    /// Move forward when the gate allows it. Returns whether the step moved.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                self.location_locked = true;
                true
            }
            None => false,
        }
    }

    /// Move back one step. Returns whether the step moved.
    pub fn retreat(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Change the selected location. Only allowed on the first step of a
    /// visit that has not moved past it; any change wipes the progress tied to
    /// the previous location.
    pub fn select_location(&mut self, id: Option<String>) -> bool {
        if self.step != Step::Location || self.location_locked {
            return false;
        }
        let id = id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        if id == self.location_id {
            return false;
        }
        self.location_id = id;
        self.evidence.reset();
        self.document_ready = false;
        self.report_url = None;
        true
    }

    pub fn record_evidence(&mut self, kind: EvidenceCategory) {
        self.evidence.record(kind);
    }

    pub fn mark_document_ready(&mut self) {
        self.document_ready = true;
    }

    /// Location chosen and both kinds of evidence present.
    pub fn can_generate_report(&self) -> bool {
        self.location_id.is_some() && self.evidence.is_complete()
    }

    pub fn set_report_url(&mut self, url: Option<String>) {
        self.report_url = url;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Write the durable part of the session.
    pub fn save(&self, store: &mut impl SessionStore) {
        store.set(KEY_STEP, &self.step.number().to_string());
        match &self.location_id {
            Some(id) => store.set(KEY_LOCATION, id),
            None => store.remove(KEY_LOCATION),
        }
        match serde_json::to_string(&self.evidence) {
            Ok(json) => store.set(KEY_EVIDENCE, &json),
            Err(e) => tracing::warn!(error = %e, "failed to encode evidence counts"),
        }
        store.set(KEY_DOCUMENT_READY, if self.document_ready { "true" } else { "false" });
        store.set(KEY_LOCATION_LOCKED, if self.location_locked { "true" } else { "false" });
    }

    /// Rebuild a session from `store`.
    ///
    /// A step past the first without a location is not a valid session, so it
    /// restarts at the first step.
    pub fn restore(store: &impl SessionStore) -> Self {
        let step = Step::parse_stored(store.get(KEY_STEP).as_deref());
        let location_id = store
            .get(KEY_LOCATION)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let evidence = store
            .get(KEY_EVIDENCE)
            .and_then(|raw| serde_json::from_str::<EvidenceCounts>(&raw).ok())
            .unwrap_or_default();
        let document_ready = store.get(KEY_DOCUMENT_READY).as_deref() == Some("true");
        let location_locked = location_id.is_some()
            && (step > Step::FIRST || store.get(KEY_LOCATION_LOCKED).as_deref() == Some("true"));

        if step > Step::FIRST && location_id.is_none() {
            tracing::info!(%step, "restored step has no location, starting over");
            return Self::default();
        }

        Self {
            step,
            location_id,
            evidence,
            document_ready,
            report_url: None,
            location_locked,
        }
    }

    /// Remove every wizard key from `store`.
    pub fn forget(store: &mut impl SessionStore) {
        store.remove_all(WIZARD_KEYS);
    }
}
