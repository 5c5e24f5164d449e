use dioxus::prelude::*;

/// Scrollable table with a fixed header row.
///
/// When `empty` is set the body is replaced by `empty_message`.
#[component]
pub fn DataTable(
    columns: Vec<String>,
    #[props(default = false)] empty: bool,
    #[props(default = "Nothing to show.".to_string())] empty_message: String,
    children: Element,
) -> Element {
    let span = columns.len().max(1).to_string();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                thead {
                    tr {
                        for (i, column) in columns.iter().enumerate() {
                            th { key: "{i}", "{column}" }
                        }
                    }
                }
                tbody {
                    if empty {
                        tr { class: "data-table-empty",
                            td { colspan: "{span}", "{empty_message}" }
                        }
                    } else {
                        {children}
                    }
                }
            }
        }
    }
}

#[component]
pub fn DataTableRow(
    #[props(default = false)] muted: bool,
    children: Element,
) -> Element {
    rsx! {
        tr {
            class: if muted { "data-table-row muted" } else { "data-table-row" },
            {children}
        }
    }
}

/// Table data cell. `label` is repeated on narrow screens where the header
/// row is hidden.
#[component]
pub fn DataTableCell(
    #[props(default)] label: String,
    #[props(default)] class: String,
    children: Element,
) -> Element {
    rsx! {
        td { class: "{class}", "data-label": "{label}", {children} }
    }
}
