mod document_step;
mod evidence_step;
mod location_step;
mod report_step;

use crate::auth::{use_auth, AppWizard, AuthState};
use dioxus::prelude::*;
use shared_types::AppError;
use std::sync::Arc;
use shared_ui::{use_toast, Button, ButtonVariant, StepIndicator, ToastOptions, Toasts};
use wizard::{PickedFile, SlotKind, Step, ALL_STEPS};

use document_step::DocumentStep;
use evidence_step::EvidenceStep;
use location_step::LocationStep;
use report_step::ReportStep;

/// What a file slot card needs to render.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SlotView {
    pub file_name: Option<String>,
    pub file_size: usize,
    pub count: usize,
    pub preview_href: Option<Arc<str>>,
    pub caption: Option<String>,
}

impl SlotView {
    pub fn of(wizard: &AppWizard, kind: SlotKind) -> Self {
        let slots = wizard.slots();
        let first = slots.first(kind);
        Self {
            file_name: first.map(|f| f.name.clone()),
            file_size: first.map(|f| f.size()).unwrap_or_default(),
            count: slots.count(kind),
            preview_href: slots.current_preview(kind).map(|p| p.shared_href()),
            caption: slots.preview_caption(kind),
        }
    }
}

/// Read every file chosen in a file input into memory.
async fn read_picked_files(evt: &FormEvent) -> Result<Vec<PickedFile>, AppError> {
    let mut picked = Vec::new();
    for file in evt.files() {
        let name = file.name();
        let bytes = file
            .read_bytes()
            .await
            .map_err(|_| AppError::bad_request(format!("Could not read {name}")))?;
        picked.push(PickedFile::new(name, file.content_type(), bytes.to_vec()));
    }
    Ok(picked)
}

/// Put the files of a file input into `kind` and build its preview.
///
/// A cancelled picker delivers no files and leaves the slot alone.
pub(crate) fn pick_files(auth: AuthState, toast: Toasts, kind: SlotKind, evt: FormEvent) {
    let mut wizard = auth.wizard;
    spawn(async move {
        match read_picked_files(&evt).await {
            Ok(files) if files.is_empty() => {}
            Ok(files) => {
                tracing::debug!(?kind, count = files.len(), "files picked");
                let mut w = wizard.write();
                w.pick(kind, files);
                w.preview(kind);
            }
            Err(e) => {
                toast.error(e.friendly_message(), ToastOptions::new());
            }
        }
    });
}

/// The four-step upload wizard.
#[component]
pub fn WizardPage() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let mut wizard = auth.wizard;
    let mut loading = use_signal(|| false);

    // Locations are fetched once per app run; the list survives page changes.
    use_future(move || async move {
        if !wizard.read().locations().is_empty() {
            return;
        }
        loading.set(true);
        match auth.api().locations().await {
            Ok(list) => wizard.write().set_locations(list),
            Err(e) => {
                tracing::warn!(error = %e, "locations unavailable");
                toast.error(
                    format!("Could not load locations: {}", e.friendly_message()),
                    ToastOptions::new(),
                );
            }
        }
        loading.set(false);
    });

    let step = wizard.read().step();
    let labels: Vec<String> = ALL_STEPS.iter().map(|s| s.label().to_string()).collect();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./wizard.css") }

        div { class: "wizard",
            StepIndicator { labels, current: step.number() as usize }

            div { class: "wizard-body",
                match step {
                    Step::Location => rsx! { LocationStep { loading: loading() } },
                    Step::Evidence => rsx! { EvidenceStep {} },
                    Step::Document => rsx! { DocumentStep {} },
                    Step::Report => rsx! { ReportStep {} },
                }
            }

            WizardFooter { step }
        }
    }
}

/// Start over / back / continue. The report step adds its own actions.
#[component]
fn WizardFooter(step: Step) -> Element {
    let auth = use_auth();
    let mut wizard = auth.wizard;
    let can_advance = wizard.read().can_advance();
    let busy = {
        let w = wizard.read();
        w.evidence_op().is_busy() || w.document_op().is_busy() || w.report_op().is_busy()
    };

    rsx! {
        div { class: "wizard-footer",
            Button {
                class: "wizard-reset",
                variant: ButtonVariant::Ghost,
                disabled: busy,
                onclick: move |_| {
                    wizard.write().reset();
                },
                "Start over"
            }
            if step != Step::FIRST {
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: busy,
                    onclick: move |_| {
                        wizard.write().retreat();
                    },
                    "Back"
                }
            }
            if step != Step::LAST {
                Button {
                    class: "wizard-continue",
                    disabled: !can_advance || busy,
                    onclick: move |_| {
                        wizard.write().advance();
                    },
                    "Continue"
                }
            }
        }
    }
}
