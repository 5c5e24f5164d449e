use dioxus::prelude::*;

/// Counter tile for one evidence category. Highlighted while the count is
/// still zero.
#[component]
pub fn EvidenceTile(
    label: String,
    count: u32,
    #[props(default = false)] active: bool,
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
) -> Element {
    let state = if count == 0 { "missing" } else { "ok" };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        button {
            r#type: "button",
            class: "evidence-tile",
            "data-state": state,
            "data-active": active,
            "aria-pressed": active,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            span { class: "evidence-tile-count", "{count}" }
            span { class: "evidence-tile-label", "{label}" }
        }
    }
}
