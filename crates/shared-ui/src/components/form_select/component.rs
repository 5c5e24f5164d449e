use dioxus::prelude::*;

/// One entry of a [`FormSelect`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Native select fed from a list of options.
///
/// When `placeholder` is set it is rendered as a first, empty-valued option,
/// so a blank `value` shows the placeholder.
#[component]
pub fn FormSelect(
    /// Current selected value.
    #[props(default)]
    value: String,
    options: Vec<SelectOption>,
    /// Called with the newly selected value.
    #[props(default)]
    on_change: Option<EventHandler<String>>,
    #[props(default)]
    label: String,
    #[props(default)]
    placeholder: String,
    #[props(default = false)]
    disabled: bool,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "form-select-wrapper",
            if !label.is_empty() {
                span { class: "form-select-label", "{label}" }
            }
            select {
                class: "form-select",
                value: value.clone(),
                disabled: disabled,
                onchange: move |evt| {
                    if let Some(handler) = &on_change {
                        handler.call(evt.value());
                    }
                },
                if !placeholder.is_empty() {
                    option { value: "", selected: value.is_empty(), "{placeholder}" }
                }
                for opt in options.iter() {
                    option {
                        key: "{opt.value}",
                        value: "{opt.value}",
                        selected: opt.value == value,
                        "{opt.label}"
                    }
                }
            }
        }
    }
}
