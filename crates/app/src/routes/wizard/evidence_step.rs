use super::{pick_files, SlotView};
use crate::auth::{show_notice, use_auth};
use dioxus::prelude::*;
use shared_types::ALL_CATEGORIES;
use shared_ui::{
    use_toast, Button, Card, CardContent, CardFooter, EvidenceTile, FileSlotCard, Input,
    PreviewKind, SlotIcon, ToastOptions,
};
use wizard::SlotKind;

const KIND: SlotKind = SlotKind::EvidenceImage;

/// Step 2: before/after photos, one upload at a time.
#[component]
pub fn EvidenceStep() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let mut wizard = auth.wizard;

    let (location, category, counts, note, slot, can_submit, busy) = {
        let w = wizard.read();
        (
            w.selected_location().map(|l| l.name.clone()).unwrap_or_default(),
            w.category(),
            w.session().evidence(),
            w.note().to_string(),
            SlotView::of(&w, KIND),
            w.can_submit_evidence(),
            w.evidence_op().is_busy(),
        )
    };
    let preview_kind = if slot.preview_href.is_some() {
        PreviewKind::Image
    } else {
        PreviewKind::None
    };

    let upload = move |_: MouseEvent| {
        let begun = wizard.write().begin_evidence_upload();
        let request = match begun {
            Ok(request) => request,
            Err(e) => {
                toast.error(e.friendly_message(), ToastOptions::new());
                return;
            }
        };
        let api = auth.api();
        spawn(async move {
            let result = api.evidence_upload(&request).await;
            let notice = wizard.write().finish_evidence_upload(&request, result);
            if let Some(notice) = notice {
                show_notice(toast, notice, &auth);
            }
        });
    };

    rsx! {
        Card {
            title: "Evidence",
            subtitle: "{location}",
            CardContent {
                div { class: "evidence-tiles",
                    for kind in ALL_CATEGORIES.iter().copied() {
                        EvidenceTile {
                            key: "{kind}",
                            label: kind.display_name().to_string(),
                            count: counts.get(kind),
                            active: kind == category,
                            onclick: move |_| {
                                if !busy {
                                    wizard.write().set_category(kind);
                                }
                            },
                        }
                    }
                }

                FileSlotCard {
                    label: format!("{} photo", category.display_name()),
                    hint: "Tap to take or choose a photo",
                    accept: KIND.accept().to_string(),
                    multiple: KIND.multiple(),
                    file_name: slot.file_name,
                    file_size: slot.file_size,
                    count: slot.count,
                    preview_href: slot.preview_href,
                    preview_kind,
                    caption: slot.caption,
                    icon: SlotIcon::Camera,
                    disabled: busy,
                    on_files: move |evt: FormEvent| pick_files(auth, toast, KIND, evt),
                    on_clear: move |_| wizard.write().clear_slot(KIND),
                }

                Input {
                    label: "Note (optional)",
                    multiline: true,
                    placeholder: "What does this photo show?",
                    value: note,
                    disabled: busy,
                    on_input: move |e: FormEvent| wizard.write().set_note(&e.value()),
                }
            }
            CardFooter {
                p { class: "evidence-hint",
                    if counts.is_complete() {
                        "Both before and after photos are in. You can continue or add more."
                    } else if counts.has_any() {
                        "You can continue, but the report needs a before and an after photo."
                    } else {
                        "Upload at least one before and one after photo."
                    }
                }
                Button {
                    disabled: !can_submit,
                    busy,
                    busy_label: "Uploading...",
                    onclick: upload,
                    "Upload photo"
                }
            }
        }
    }
}
