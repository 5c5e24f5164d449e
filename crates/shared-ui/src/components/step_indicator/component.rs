use dioxus::prelude::*;

/// Where a step sits relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Done,
    Current,
    Upcoming,
}

impl StepState {
    /// State of 1-based `step` when the wizard is at `current`.
    pub fn of(step: usize, current: usize) -> Self {
        match step.cmp(&current) {
            std::cmp::Ordering::Less => StepState::Done,
            std::cmp::Ordering::Equal => StepState::Current,
            std::cmp::Ordering::Greater => StepState::Upcoming,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            StepState::Done => "done",
            StepState::Current => "current",
            StepState::Upcoming => "upcoming",
        }
    }
}

/// Numbered progress header for the wizard. `current` is 1-based.
#[component]
pub fn StepIndicator(labels: Vec<String>, current: usize) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        ol { class: "step-indicator",
            for (i, label) in labels.iter().enumerate() {
                li {
                    key: "{i}",
                    class: "step-indicator-item",
                    "data-state": StepState::of(i + 1, current).class(),
                    span { class: "step-indicator-number", "{i + 1}" }
                    span { class: "step-indicator-label", "{label}" }
                }
            }
        }
    }
}
