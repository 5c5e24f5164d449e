use crate::auth::use_auth;
use crate::format_helpers::format_optional_datetime;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdExternalLink, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{ReportQuery, ReportSummary, PAGE_SIZES};
use shared_ui::{
    use_toast, Badge, BadgeTone, Button, ButtonVariant, Card, CardContent, ConfirmDialog,
    DataTable, DataTableCell, DataTableRow, FormSelect, Input, Pagination, SelectOption,
    ToastOptions,
};

const COLUMNS: &[&str] = &["Report", "Incident", "Document", "Generated by", "Date", ""];

/// Page to land on after deleting a row: the previous page when the deleted
/// row was the last one on a page past the first.
pub fn page_after_delete(page: i64, rows_on_page: usize) -> i64 {
    if rows_on_page <= 1 && page > 1 {
        page - 1
    } else {
        page
    }
}

/// Generated reports, searchable and paginated.
#[component]
pub fn Reports() -> Element {
    let auth = use_auth();
    let toast = use_toast();

    let mut page = use_signal(|| 1i64);
    let mut limit = use_signal(|| ReportQuery::default().limit);
    let mut search = use_signal(String::new);
    let mut incident = use_signal(String::new);
    let mut dialog_open = use_signal(|| false);
    let mut target = use_signal(|| None::<ReportSummary>);
    let mut deleting = use_signal(|| None::<String>);

    let mut data = use_resource(move || {
        let query = ReportQuery {
            page: page(),
            limit: limit(),
            search: search().trim().to_string(),
            incident_search: incident().trim().to_string(),
        }
        .normalized();
        let api = auth.api();
        async move { api.list_reports(&query).await }
    });

    let confirm_delete = move |_: ()| {
        let Some(report) = target() else {
            return;
        };
        let Some(identity) = auth.identity() else {
            return;
        };
        let rows_on_page = data
            .read()
            .as_ref()
            .and_then(|r| r.as_ref().ok())
            .map(|p| p.data.len())
            .unwrap_or_default();
        let api = auth.api();
        deleting.set(Some(report.id.clone()));
        spawn(async move {
            match api.delete_report(&report.id, &identity.session_id).await {
                Ok(()) => {
                    toast.success("Report deleted".to_string(), ToastOptions::new());
                    let next = page_after_delete(page(), rows_on_page);
                    if next != page() {
                        page.set(next);
                    } else {
                        data.restart();
                    }
                }
                Err(e) => {
                    toast.error(e.friendly_message(), ToastOptions::new());
                }
            }
            deleting.set(None);
            target.set(None);
        });
    };

    let has_filters = !search.read().is_empty() || !incident.read().is_empty();
    let size_options: Vec<SelectOption> = PAGE_SIZES
        .iter()
        .map(|n| SelectOption::new(n.to_string(), format!("{n} per page")))
        .collect();
    let dialog_description = target
        .read()
        .as_ref()
        .map(|r| format!("\"{}\" will be removed for everyone. This cannot be undone.", r.title))
        .unwrap_or_default();

    let body = match &*data.read() {
        Some(Ok(result)) => rsx! {
            ReportTable {
                rows: result.data.clone(),
                deleting: deleting(),
                on_delete: move |report: ReportSummary| {
                    target.set(Some(report));
                    dialog_open.set(true);
                },
            }
            Pagination {
                page,
                total_pages: result.total_pages,
                total: result.total,
            }
        },
        Some(Err(e)) => {
            let message = e.friendly_message();
            rsx! {
                Card {
                    CardContent {
                        p { class: "reports-error", "{message}" }
                        Button {
                            variant: ButtonVariant::Secondary,
                            onclick: move |_| data.restart(),
                            "Retry"
                        }
                    }
                }
            }
        }
        None => rsx! {
            p { class: "reports-loading", "Loading reports..." }
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./reports.css") }

        div { class: "reports-page",
            h1 { class: "reports-title", "Reports" }

            div { class: "reports-filters",
                Input {
                    value: search(),
                    placeholder: "Search by title or technician",
                    on_input: move |evt: FormEvent| {
                        search.set(evt.value());
                        page.set(1);
                    },
                }
                Input {
                    value: incident(),
                    placeholder: "Incident number",
                    on_input: move |evt: FormEvent| {
                        incident.set(evt.value());
                        page.set(1);
                    },
                }
                FormSelect {
                    value: limit().to_string(),
                    options: size_options,
                    on_change: move |v: String| {
                        if let Ok(n) = v.parse::<i64>() {
                            limit.set(n);
                            page.set(1);
                        }
                    },
                }
                if has_filters {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            search.set(String::new());
                            incident.set(String::new());
                            page.set(1);
                        },
                        "Clear"
                    }
                }
            }

            {body}

            ConfirmDialog {
                open: dialog_open(),
                on_open_change: move |open: bool| dialog_open.set(open),
                title: "Delete report?",
                description: dialog_description,
                on_confirm: confirm_delete,
            }
        }
    }
}

#[component]
fn ReportTable(
    rows: Vec<ReportSummary>,
    deleting: Option<String>,
    on_delete: EventHandler<ReportSummary>,
) -> Element {
    let columns: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let empty = rows.is_empty();
    let rows: Vec<(ReportSummary, bool)> = rows
        .into_iter()
        .map(|r| {
            let busy = deleting.as_deref() == Some(r.id.as_str());
            (r, busy)
        })
        .collect();

    rsx! {
        DataTable {
            columns,
            empty,
            empty_message: "No reports match these filters.",
            for (report, busy) in rows {
                ReportRow { key: "{report.id}", report, busy, on_delete }
            }
        }
    }
}

#[component]
fn ReportRow(report: ReportSummary, busy: bool, on_delete: EventHandler<ReportSummary>) -> Element {
    let incident = report.incident_display();
    let author = report.author().to_string();
    let date = format_optional_datetime(report.created_at.as_ref());
    let has_document = report.includes_document;
    let url = report.url.clone().filter(|u| !u.trim().is_empty());
    let title = if report.title.trim().is_empty() {
        "Untitled report".to_string()
    } else {
        report.title.clone()
    };

    rsx! {
        DataTableRow { muted: busy,
            DataTableCell { label: "Report", class: "reports-cell-title", "{title}" }
            DataTableCell { label: "Incident", "{incident}" }
            DataTableCell { label: "Document",
                Badge { tone: BadgeTone::from_ok(has_document),
                    if has_document { "Included" } else { "Missing" }
                }
            }
            DataTableCell { label: "Generated by", "{author}" }
            DataTableCell { label: "Date", "{date}" }
            DataTableCell { label: "", class: "reports-cell-actions",
                if let Some(href) = url {
                    a {
                        class: "reports-open",
                        href: "{href}",
                        target: "_blank",
                        rel: "noopener",
                        title: "Open report",
                        Icon::<LdExternalLink> { icon: LdExternalLink, width: 16, height: 16 }
                    }
                }
                Button {
                    variant: ButtonVariant::Danger,
                    disabled: busy,
                    title: "Delete report",
                    onclick: move |_| on_delete.call(report.clone()),
                    Icon::<LdTrash2> { icon: LdTrash2, width: 16, height: 16 }
                }
            }
        }
    }
}
