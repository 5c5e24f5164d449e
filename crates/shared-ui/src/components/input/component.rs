use dioxus::prelude::*;

/// Labelled text field. `multiline` renders a textarea for free-form notes.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] autocomplete: String,
    #[props(default = false)] multiline: bool,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "input-wrapper",
            if !label.is_empty() {
                span { class: "input-label", "{label}" }
            }
            if multiline {
                textarea {
                    rows: 3,
                    value: value,
                    placeholder: placeholder,
                    disabled: disabled,
                    oninput: move |evt| on_input.call(evt),
                    ..merged,
                }
            } else {
                input {
                    r#type: "{input_type}",
                    value: value,
                    placeholder: placeholder,
                    autocomplete: autocomplete,
                    disabled: disabled,
                    oninput: move |evt| on_input.call(evt),
                    ..merged,
                }
            }
        }
    }
}
