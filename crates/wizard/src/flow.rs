use crate::filter::{self, FilterOption, SelectionFilter};
use crate::pipeline::{
    DocumentUpload, EvidenceUpload, Notice, Operation, ReportBackend, ReportRequest,
    DOCUMENT_FAILED, DOCUMENT_OK, EVIDENCE_FAILED, EVIDENCE_OK, REPORT_FAILED,
};
use crate::session::WizardSession;
use crate::share;
use crate::slots::{FileSlots, PickedFile, PreviewRegistry, SlotKind};
use crate::step::Step;
use crate::storage::{SessionStore, KEY_DISPLAY_NAME, KEY_SESSION_ID, SESSION_KEYS};
use shared_types::{
    AppError, EvidenceCategory, GeneratedReport, Location, SessionIdentity, UploadAck,
    WizardOptions,
};
use std::time::Duration;

/// The upload wizard: one technician, one location visit at a time.
///
/// Remote calls are split in two. `begin_*` validates, marks the operation
/// busy and returns the request; `finish_*` applies the outcome. The caller
/// performs the request in between, so no borrow of the wizard is held across
/// an await.
pub struct Wizard<S: SessionStore, P: PreviewRegistry> {
    store: S,
    identity: Option<SessionIdentity>,
    options: WizardOptions,
    locations: Vec<Location>,
    locations_loaded: bool,
    filter: SelectionFilter,
    session: WizardSession,
    category: EvidenceCategory,
    note: String,
    slots: FileSlots<P>,
    evidence_op: Operation,
    document_op: Operation,
    report_op: Operation,
}

fn message_or(error: &AppError, fallback: &str) -> String {
    if error.message.trim().is_empty() {
        fallback.to_string()
    } else {
        error.message.clone()
    }
}

impl<S: SessionStore, P: PreviewRegistry> Wizard<S, P> {
    /// Build a wizard, restoring identity and progress from `store`.
    pub fn new(store: S, registry: P, options: WizardOptions) -> Self {
        let identity = store
            .get(KEY_SESSION_ID)
            .filter(|id| !id.trim().is_empty())
            .map(|id| SessionIdentity::new(id, store.get(KEY_DISPLAY_NAME)));
        let session = WizardSession::restore(&store);
        tracing::debug!(step = %session.step(), logged_in = identity.is_some(), "wizard restored");
        Self {
            store,
            identity,
            options,
            locations: Vec::new(),
            locations_loaded: false,
            filter: SelectionFilter::default(),
            session,
            category: EvidenceCategory::default(),
            note: String::new(),
            slots: FileSlots::new(registry),
            evidence_op: Operation::default(),
            document_op: Operation::default(),
            report_op: Operation::default(),
        }
    }

    fn persist(&mut self) {
        self.session.save(&mut self.store);
    }

    // ── Identity ────────────────────────────────────────────────────

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn login(&mut self, identity: SessionIdentity) {
        self.store.set(KEY_SESSION_ID, &identity.session_id);
        self.store.set(KEY_DISPLAY_NAME, &identity.display_name);
        tracing::info!(session_id = %identity.session_id, "session started");
        self.identity = Some(identity);
    }

    /// Reset the visit and forget the technician.
    pub fn logout(&mut self) {
        self.reset();
        self.store.remove_all(SESSION_KEYS);
        if let Some(identity) = self.identity.take() {
            tracing::info!(session_id = %identity.session_id, "session ended");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &WizardOptions {
        &self.options
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.options.notice_ttl_secs)
    }

    // ── Locations and filters ───────────────────────────────────────

    /// Install the fetched location set.
    pub fn set_locations(&mut self, locations: Vec<Location>) {
        tracing::info!(count = locations.len(), "locations loaded");
        self.locations = locations;
        self.locations_loaded = true;
        self.reconcile_selection();
    }

    /// Fetch and install the location set. On failure the set stays as it was.
    pub async fn load_locations<B: ReportBackend>(&mut self, backend: &B) -> Result<(), AppError> {
        match backend.fetch_locations().await {
            Ok(list) => {
                self.set_locations(list);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load locations");
                Err(e)
            }
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn filter(&self) -> &SelectionFilter {
        &self.filter
    }

    pub fn filtered_locations(&self) -> Vec<&Location> {
        self.filter.apply(&self.locations)
    }

    pub fn department_options(&self) -> Vec<FilterOption> {
        filter::department_options(&self.locations)
    }

    pub fn city_options(&self) -> Vec<FilterOption> {
        filter::city_options(&self.locations, self.filter.department())
    }

    pub fn set_department(&mut self, department: &str) {
        self.filter.set_department(&self.locations, department);
        self.reconcile_selection();
    }

    pub fn set_city(&mut self, city: &str) {
        self.filter.set_city(city);
        self.reconcile_selection();
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.set_query(query);
        self.reconcile_selection();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.reconcile_selection();
    }

    /// Drop a first-step selection the filtered view no longer shows. A
    /// locked selection is left alone.
    fn reconcile_selection(&mut self) {
        if !self.locations_loaded
            || self.session.step() != Step::Location
            || self.session.is_location_locked()
        {
            return;
        }
        let Some(selected) = self.session.location_id() else {
            return;
        };
        let visible = self
            .filter
            .apply(&self.locations)
            .iter()
            .any(|l| l.id == selected);
        if !visible {
            tracing::debug!(location_id = %selected, "selection hidden by filters, cleared");
            self.session.select_location(None);
            self.persist();
        }
    }

    /// Choose a location from the filtered view, or clear the choice.
    ///
    /// Returns whether the selection changed.
    pub fn select_location(&mut self, id: Option<&str>) -> bool {
        if let Some(id) = id {
            if !self.filtered_locations().iter().any(|l| l.id == id) {
                return false;
            }
        }
        let changed = self.session.select_location(id.map(str::to_string));
        if changed {
            self.slots.clear_all();
            self.note.clear();
            self.persist();
        }
        changed
    }

    pub fn selected_location(&self) -> Option<&Location> {
        let id = self.session.location_id()?;
        self.locations.iter().find(|l| l.id == id)
    }

    // ── Steps ───────────────────────────────────────────────────────

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn step(&self) -> Step {
        self.session.step()
    }

    pub fn can_advance(&self) -> bool {
        self.session.can_advance()
    }

    pub fn advance(&mut self) -> bool {
        let moved = self.session.advance();
        if moved {
            tracing::debug!(step = %self.session.step(), "advanced");
            self.persist();
        }
        moved
    }

    /// Step back. Leaving the report step also dismisses its error.
    pub fn retreat(&mut self) -> bool {
        let moved = self.session.retreat();
        if moved {
            self.report_op.try_again();
            self.persist();
        }
        moved
    }

    /// Start a new visit: first step, nothing selected, nothing uploaded.
    /// Filters are kept.
    pub fn reset(&mut self) {
        self.session.reset();
        self.slots.clear_all();
        self.note.clear();
        self.category = EvidenceCategory::default();
        self.evidence_op.reset();
        self.document_op.reset();
        self.report_op.reset();
        WizardSession::forget(&mut self.store);
        tracing::info!("wizard reset");
    }

    // ── Evidence inputs ─────────────────────────────────────────────

    pub fn category(&self) -> EvidenceCategory {
        self.category
    }

    pub fn set_category(&mut self, category: EvidenceCategory) {
        self.category = category;
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: &str) {
        self.note = note.to_string();
    }

    // ── File slots ──────────────────────────────────────────────────

    pub fn slots(&self) -> &FileSlots<P> {
        &self.slots
    }

    pub fn pick(&mut self, kind: SlotKind, files: Vec<PickedFile>) {
        self.slots.pick(kind, files);
    }

    pub fn preview(&mut self, kind: SlotKind) -> Option<String> {
        self.slots.preview(kind).map(str::to_string)
    }

    pub fn clear_slot(&mut self, kind: SlotKind) {
        self.slots.clear(kind);
    }

    // ── Operations ──────────────────────────────────────────────────

    pub fn evidence_op(&self) -> &Operation {
        &self.evidence_op
    }

    pub fn document_op(&self) -> &Operation {
        &self.document_op
    }

    pub fn report_op(&self) -> &Operation {
        &self.report_op
    }

    fn session_id(&self) -> Result<String, AppError> {
        self.identity
            .as_ref()
            .map(|i| i.session_id.clone())
            .ok_or_else(|| AppError::unauthorized("Sign in to continue"))
    }

    fn location_id(&self) -> Result<String, AppError> {
        self.session
            .location_id()
            .map(str::to_string)
            .ok_or_else(|| AppError::missing("location", "Select a location first"))
    }

    fn is_current_location(&self, location_id: &str) -> bool {
        self.session.location_id() == Some(location_id)
    }

    fn require_step(&self, step: Step) -> Result<(), AppError> {
        if self.session.step() < step {
            return Err(AppError::missing(
                "step",
                format!(
                    "Finish the earlier steps before the {} step",
                    step.label().to_lowercase()
                ),
            ));
        }
        Ok(())
    }

    pub fn can_submit_evidence(&self) -> bool {
        self.session.step() >= Step::Evidence
            && self.identity.is_some()
            && self.session.location_id().is_some()
            && !self.slots.is_empty(SlotKind::EvidenceImage)
            && !self.evidence_op.is_busy()
    }

    /// Validate and mark the evidence upload busy.
    pub fn begin_evidence_upload(&mut self) -> Result<EvidenceUpload, AppError> {
        let session_id = self.session_id()?;
        let location_id = self.location_id()?;
        self.require_step(Step::Evidence)?;
        let file = self
            .slots
            .first(SlotKind::EvidenceImage)
            .cloned()
            .ok_or_else(|| AppError::missing("file", "Choose a photo first"))?;
        self.evidence_op.begin()?;
        let note = Some(self.note.trim().to_string()).filter(|n| !n.is_empty());
        tracing::info!(%location_id, category = %self.category, "evidence upload started");
        Ok(EvidenceUpload {
            session_id,
            location_id,
            category: self.category,
            file,
            note,
        })
    }

    /// Apply the evidence upload outcome. `None` when the answer belongs to a
    /// location that is no longer selected and was discarded.
    pub fn finish_evidence_upload(
        &mut self,
        upload: &EvidenceUpload,
        result: Result<UploadAck, AppError>,
    ) -> Option<Notice> {
        if !self.is_current_location(&upload.location_id) {
            tracing::warn!(location_id = %upload.location_id, "stale evidence response discarded");
            self.evidence_op.reset();
            return None;
        }
        match result {
            Ok(ack) => {
                let message = ack.message_or(EVIDENCE_OK);
                self.session.record_evidence(upload.category);
                self.slots.clear(SlotKind::EvidenceImage);
                self.note.clear();
                if self.options.auto_flip_category {
                    self.category = upload.category.opposite();
                }
                self.persist();
                let counts = self.session.evidence();
                tracing::info!(
                    previa = counts.previa(),
                    posterior = counts.posterior(),
                    "evidence recorded"
                );
                self.evidence_op.succeed(message.clone());
                Some(Notice::success(message))
            }
            Err(e) => {
                tracing::warn!(error = %e, "evidence upload failed");
                let message = message_or(&e, EVIDENCE_FAILED);
                self.evidence_op.fail(e);
                Some(Notice::error(message))
            }
        }
    }

    pub fn can_submit_document(&self) -> bool {
        self.session.step() >= Step::Document
            && self.identity.is_some()
            && self.session.location_id().is_some()
            && (!self.slots.is_empty(SlotKind::DocumentPdf)
                || !self.slots.is_empty(SlotKind::DocumentImages))
            && !self.document_op.is_busy()
    }

    pub fn begin_document_upload(&mut self) -> Result<DocumentUpload, AppError> {
        let session_id = self.session_id()?;
        let location_id = self.location_id()?;
        self.require_step(Step::Document)?;
        let pdf = self.slots.first(SlotKind::DocumentPdf).cloned();
        let images = self.slots.files(SlotKind::DocumentImages).to_vec();
        if pdf.is_none() && images.is_empty() {
            return Err(AppError::missing(
                "document",
                "Attach the signed PDF or at least one photo",
            ));
        }
        self.document_op.begin()?;
        tracing::info!(%location_id, has_pdf = pdf.is_some(), images = images.len(), "document upload started");
        Ok(DocumentUpload {
            session_id,
            location_id,
            pdf,
            images,
        })
    }

    pub fn finish_document_upload(
        &mut self,
        upload: &DocumentUpload,
        result: Result<UploadAck, AppError>,
    ) -> Option<Notice> {
        if !self.is_current_location(&upload.location_id) {
            tracing::warn!(location_id = %upload.location_id, "stale document response discarded");
            self.document_op.reset();
            return None;
        }
        match result {
            Ok(ack) => {
                let message = ack.message_or(DOCUMENT_OK);
                self.session.mark_document_ready();
                self.slots.clear(SlotKind::DocumentPdf);
                self.slots.clear(SlotKind::DocumentImages);
                self.persist();
                self.document_op.succeed(message.clone());
                Some(Notice::success(message))
            }
            Err(e) => {
                tracing::warn!(error = %e, "document upload failed");
                let message = message_or(&e, DOCUMENT_FAILED);
                self.document_op.fail(e);
                Some(Notice::error(message))
            }
        }
    }

    pub fn can_generate_report(&self) -> bool {
        self.identity.is_some() && self.session.can_generate_report() && !self.report_op.is_busy()
    }

    /// Re-check the report preconditions, clear any previous link and mark the
    /// generation busy. Nothing changes when a precondition fails.
    pub fn begin_report(&mut self) -> Result<ReportRequest, AppError> {
        let session_id = self.session_id()?;
        let location_id = self.location_id()?;
        if !self.session.evidence().is_complete() {
            return Err(AppError::missing(
                "evidence",
                "Upload at least one before and one after photo",
            ));
        }
        self.report_op.begin()?;
        self.session.set_report_url(None);
        tracing::info!(%location_id, "report generation started");
        Ok(ReportRequest {
            session_id,
            location_id,
        })
    }

    pub fn finish_report(
        &mut self,
        request: &ReportRequest,
        result: Result<GeneratedReport, AppError>,
    ) -> Option<Notice> {
        if !self.is_current_location(&request.location_id) {
            tracing::warn!(location_id = %request.location_id, "stale report response discarded");
            self.report_op.reset();
            return None;
        }
        let outcome = result.and_then(|report| {
            report
                .link()
                .map(str::to_string)
                .ok_or_else(|| AppError::internal("The server did not return a report link"))
        });
        match outcome {
            Ok(url) => {
                tracing::info!(%url, "report generated");
                self.session.set_report_url(Some(url));
                self.report_op.succeed("Report ready");
                Some(Notice::success("Report ready"))
            }
            Err(e) => {
                tracing::warn!(error = %e, "report generation failed");
                let message = message_or(&e, REPORT_FAILED);
                self.report_op.fail(e);
                Some(Notice::error(message))
            }
        }
    }

    /// Dismiss a report error so generation can be attempted again.
    pub fn retry_report(&mut self) {
        self.report_op.try_again();
    }

    pub fn report_url(&self) -> Option<&str> {
        self.session.report_url()
    }

    // ── Convenience drivers ─────────────────────────────────────────

    pub async fn submit_evidence<B: ReportBackend>(
        &mut self,
        backend: &B,
    ) -> Result<Option<Notice>, AppError> {
        let upload = self.begin_evidence_upload()?;
        let result = backend.upload_evidence(&upload).await;
        Ok(self.finish_evidence_upload(&upload, result))
    }

    pub async fn submit_document<B: ReportBackend>(
        &mut self,
        backend: &B,
    ) -> Result<Option<Notice>, AppError> {
        let upload = self.begin_document_upload()?;
        let result = backend.upload_document(&upload).await;
        Ok(self.finish_document_upload(&upload, result))
    }

    pub async fn generate_report<B: ReportBackend>(
        &mut self,
        backend: &B,
    ) -> Result<Option<Notice>, AppError> {
        let request = self.begin_report()?;
        let result = backend.generate_report(&request).await;
        Ok(self.finish_report(&request, result))
    }

    // ── Sharing ─────────────────────────────────────────────────────

    /// WhatsApp link for the generated report, labelled like the location
    /// picker.
    pub fn share_link(&self) -> Option<String> {
        let url = self.session.report_url()?;
        let label = self
            .selected_location()
            .map(Location::option_label)
            .unwrap_or_default();
        Some(share::whatsapp_link(&share::share_text(&label, url)))
    }

    /// Sharing ends the visit and the session.
    pub fn finish_share(&mut self) {
        self.logout();
    }
}
