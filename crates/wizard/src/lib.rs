//! Upload wizard state machine: pick a location, upload evidence, upload the
//! signed document, generate the report.

pub mod evidence;
pub mod filter;
pub mod flow;
pub mod pipeline;
pub mod session;
pub mod share;
pub mod slots;
pub mod step;
pub mod storage;

pub use evidence::EvidenceCounts;
pub use filter::{FilterOption, SelectionFilter};
pub use flow::Wizard;
pub use pipeline::{
    DocumentUpload, EvidenceUpload, Notice, NoticeLevel, OpStatus, Operation, ReportBackend,
    ReportRequest,
};
pub use session::WizardSession;
pub use slots::{DataUrlPreviews, FileSlots, PickedFile, PreviewRegistry, PreviewUrl, SlotKind};
pub use step::{Step, ALL_STEPS};
pub use storage::{MemoryStore, SessionStore};
