use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// "Page 2 of 5 (43 reports)".
pub fn page_summary(page: i64, total_pages: i64, total: i64) -> String {
    let total_pages = total_pages.max(1);
    let noun = if total == 1 { "report" } else { "reports" };
    format!("Page {} of {} ({} {})", page.clamp(1, total_pages), total_pages, total, noun)
}

/// Page-number pagination with Previous/Next buttons.
#[component]
pub fn Pagination(page: Signal<i64>, total_pages: i64, total: i64) -> Element {
    let mut page = page;
    let current = *page.read();
    let summary = page_summary(current, total_pages, total);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        nav { class: "pagination",
            Button {
                variant: ButtonVariant::Secondary,
                disabled: current <= 1,
                onclick: move |_| {
                    let p = *page.read();
                    page.set((p - 1).max(1));
                },
                "Previous"
            }
            span { class: "pagination-info", "{summary}" }
            Button {
                variant: ButtonVariant::Secondary,
                disabled: current >= total_pages,
                onclick: move |_| {
                    let p = *page.read();
                    page.set(p + 1);
                },
                "Next"
            }
        }
    }
}
