use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaCamera, FaFilePdf, FaImages};
use dioxus_free_icons::Icon;
use std::sync::Arc;

/// What the slot can show inline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PreviewKind {
    #[default]
    None,
    Image,
    Pdf,
}

/// Placeholder glyph shown while the slot is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SlotIcon {
    #[default]
    Camera,
    Pdf,
    Gallery,
}

/// Human-readable file size.
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// Drop-zone style file picker with preview and a clear button.
///
/// The whole card is a label for the hidden file input, so clicking anywhere
/// opens the picker. The clear button stops propagation so it does not.
#[component]
pub fn FileSlotCard(
    label: String,
    #[props(default)] hint: String,
    accept: String,
    #[props(default = false)] multiple: bool,
    /// Name of the (first) chosen file, if any.
    #[props(default)]
    file_name: Option<String>,
    #[props(default)] file_size: usize,
    #[props(default)] count: usize,
    /// Shared so re-renders compare by pointer instead of copying the URL.
    #[props(default)]
    preview_href: Option<Arc<str>>,
    #[props(default)] preview_kind: PreviewKind,
    #[props(default)] caption: Option<String>,
    #[props(default)] icon: SlotIcon,
    #[props(default = false)] disabled: bool,
    on_files: EventHandler<FormEvent>,
    on_clear: EventHandler<()>,
) -> Element {
    let has_file = file_name.is_some();
    let size_text = format_size(file_size);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label {
            class: "file-slot",
            "data-filled": has_file,
            "data-disabled": disabled,
            input {
                r#type: "file",
                class: "file-slot-input",
                accept: "{accept}",
                multiple: multiple,
                disabled: disabled,
                onchange: move |evt: FormEvent| on_files.call(evt),
            }
            match (preview_href.as_ref(), preview_kind) {
                (Some(href), PreviewKind::Image) => rsx! {
                    img { class: "file-slot-preview", src: "{href}", alt: "{label}" }
                },
                (Some(href), PreviewKind::Pdf) => rsx! {
                    iframe { class: "file-slot-preview pdf", src: "{href}", title: "{label}" }
                },
                _ => rsx! {
                    div { class: "file-slot-placeholder",
                        span { class: "file-slot-icon",
                            match icon {
                                SlotIcon::Camera => rsx! { Icon::<FaCamera> { icon: FaCamera, width: 28, height: 28 } },
                                SlotIcon::Pdf => rsx! { Icon::<FaFilePdf> { icon: FaFilePdf, width: 28, height: 28 } },
                                SlotIcon::Gallery => rsx! { Icon::<FaImages> { icon: FaImages, width: 28, height: 28 } },
                            }
                        }
                        span { class: "file-slot-label", "{label}" }
                        if !hint.is_empty() {
                            span { class: "file-slot-hint", "{hint}" }
                        }
                    }
                },
            }
            if let Some(name) = file_name.as_ref() {
                div { class: "file-slot-meta",
                    span { class: "file-slot-name", "{name}" }
                    span { class: "file-slot-size", "{size_text}" }
                    if multiple && count > 1 {
                        span { class: "file-slot-count", "{count} files" }
                    }
                    button {
                        r#type: "button",
                        class: "file-slot-clear",
                        disabled: disabled,
                        onclick: move |evt: MouseEvent| {
                            evt.stop_propagation();
                            evt.prevent_default();
                            on_clear.call(());
                        },
                        "Remove"
                    }
                }
            }
            if let Some(text) = caption.as_ref() {
                p { class: "file-slot-caption", "{text}" }
            }
        }
    }
}
