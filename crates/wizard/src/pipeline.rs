//! Remote operations of the wizard: their requests, their state and the
//! backend seam they go through.

use crate::slots::PickedFile;
use shared_types::{AppError, EvidenceCategory, GeneratedReport, Location, UploadAck};

/// Lifecycle of one remote operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OpStatus {
    #[default]
    Idle,
    Busy,
    Success(String),
    Error(AppError),
}

/// State of a single kind of remote operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    status: OpStatus,
}

impl Operation {
    pub fn status(&self) -> &OpStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.status, OpStatus::Busy)
    }

    pub fn error(&self) -> Option<&AppError> {
        match &self.status {
            OpStatus::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Enter `Busy`. Refused while already busy.
    pub(crate) fn begin(&mut self) -> Result<(), AppError> {
        if self.is_busy() {
            return Err(AppError::bad_request("Operation already in progress"));
        }
        self.status = OpStatus::Busy;
        Ok(())
    }

    pub(crate) fn succeed(&mut self, message: impl Into<String>) {
        self.status = OpStatus::Success(message.into());
    }

    pub(crate) fn fail(&mut self, error: AppError) {
        self.status = OpStatus::Error(error);
    }

    /// Leave `Error` for `Idle`. Other states are untouched.
    pub fn try_again(&mut self) {
        if matches!(self.status, OpStatus::Error(_)) {
            self.status = OpStatus::Idle;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.status = OpStatus::Idle;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short message about a finished upload, shown for a few seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

pub const EVIDENCE_OK: &str = "Evidence uploaded";
pub const EVIDENCE_FAILED: &str = "Could not upload the evidence";
pub const DOCUMENT_OK: &str = "Signed document uploaded";
pub const DOCUMENT_FAILED: &str = "Could not upload the signed document";
pub const REPORT_FAILED: &str = "Could not generate the report";

// ── Requests ────────────────────────────────────────────────────────

/// Everything `POST /evidence/upload` needs.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceUpload {
    pub session_id: String,
    pub location_id: String,
    pub category: EvidenceCategory,
    pub file: PickedFile,
    pub note: Option<String>,
}

/// Everything `POST /document/upload` needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub session_id: String,
    pub location_id: String,
    pub pdf: Option<PickedFile>,
    pub images: Vec<PickedFile>,
}

/// Everything `GET /report/generate/{session}` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub session_id: String,
    pub location_id: String,
}

// ── Backend seam ────────────────────────────────────────────────────

/// The remote service as seen by the wizard.
#[allow(async_fn_in_trait)]
pub trait ReportBackend {
    /// Fetch the full location set. Malformed payloads degrade to empty.
    async fn fetch_locations(&self) -> Result<Vec<Location>, AppError>;

    async fn upload_evidence(&self, upload: &EvidenceUpload) -> Result<UploadAck, AppError>;

    async fn upload_document(&self, upload: &DocumentUpload) -> Result<UploadAck, AppError>;

    async fn generate_report(&self, request: &ReportRequest) -> Result<GeneratedReport, AppError>;
}
