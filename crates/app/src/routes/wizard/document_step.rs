use super::{pick_files, SlotView};
use crate::auth::{show_notice, use_auth};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdCircleCheck;
use dioxus_free_icons::Icon;
use shared_ui::{
    use_toast, Button, Card, CardContent, CardFooter, FileSlotCard, PreviewKind, SlotIcon,
    ToastOptions,
};
use wizard::SlotKind;

/// Step 3: the signed acknowledgement, as a PDF or as photos of the paper.
#[component]
pub fn DocumentStep() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let mut wizard = auth.wizard;

    let (pdf, images, ready, can_submit, busy) = {
        let w = wizard.read();
        (
            SlotView::of(&w, SlotKind::DocumentPdf),
            SlotView::of(&w, SlotKind::DocumentImages),
            w.session().document_ready(),
            w.can_submit_document(),
            w.document_op().is_busy(),
        )
    };
    let pdf_preview = if pdf.preview_href.is_some() {
        PreviewKind::Pdf
    } else {
        PreviewKind::None
    };
    let images_preview = if images.preview_href.is_some() {
        PreviewKind::Image
    } else {
        PreviewKind::None
    };

    let upload = move |_: MouseEvent| {
        let begun = wizard.write().begin_document_upload();
        let request = match begun {
            Ok(request) => request,
            Err(e) => {
                toast.error(e.friendly_message(), ToastOptions::new());
                return;
            }
        };
        let api = auth.api();
        spawn(async move {
            let result = api.document_upload(&request).await;
            let notice = wizard.write().finish_document_upload(&request, result);
            if let Some(notice) = notice {
                show_notice(toast, notice, &auth);
            }
        });
    };

    rsx! {
        Card {
            title: "Signed document",
            subtitle: "Attach the signed PDF, photos of the signed paper, or both.",
            CardContent {
                if ready {
                    div { class: "document-ready",
                        Icon::<LdCircleCheck> { icon: LdCircleCheck, width: 18, height: 18 }
                        span { "Signed document received. You can replace it or continue." }
                    }
                }

                div { class: "document-slots",
                    FileSlotCard {
                        label: "Signed PDF",
                        hint: "Choose the PDF file",
                        accept: SlotKind::DocumentPdf.accept().to_string(),
                        file_name: pdf.file_name,
                        file_size: pdf.file_size,
                        count: pdf.count,
                        preview_href: pdf.preview_href,
                        preview_kind: pdf_preview,
                        caption: pdf.caption,
                        icon: SlotIcon::Pdf,
                        disabled: busy,
                        on_files: move |evt: FormEvent| pick_files(auth, toast, SlotKind::DocumentPdf, evt),
                        on_clear: move |_| wizard.write().clear_slot(SlotKind::DocumentPdf),
                    }
                    FileSlotCard {
                        label: "Photos of the signed paper",
                        hint: "Choose one or more photos",
                        accept: SlotKind::DocumentImages.accept().to_string(),
                        multiple: SlotKind::DocumentImages.multiple(),
                        file_name: images.file_name,
                        file_size: images.file_size,
                        count: images.count,
                        preview_href: images.preview_href,
                        preview_kind: images_preview,
                        caption: images.caption,
                        icon: SlotIcon::Gallery,
                        disabled: busy,
                        on_files: move |evt: FormEvent| pick_files(auth, toast, SlotKind::DocumentImages, evt),
                        on_clear: move |_| wizard.write().clear_slot(SlotKind::DocumentImages),
                    }
                }
            }
            CardFooter {
                Button {
                    disabled: !can_submit,
                    busy,
                    busy_label: "Uploading...",
                    onclick: upload,
                    "Upload document"
                }
            }
        }
    }
}
