use crate::auth::{show_notice, use_auth};
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdExternalLink, LdShare2};
use dioxus_free_icons::Icon;
use shared_ui::{
    use_toast, Badge, BadgeTone, Button, ButtonVariant, Card, CardContent, CardFooter,
    ToastOptions,
};
use wizard::OpStatus;

/// Step 4: generate the report, then open or share it.
#[component]
pub fn ReportStep() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let mut wizard = auth.wizard;

    let (location, counts, document_ready, status, can_generate, report_url, share_link) = {
        let w = wizard.read();
        (
            w.selected_location().map(|l| l.option_label()).unwrap_or_default(),
            w.session().evidence(),
            w.session().document_ready(),
            w.report_op().status().clone(),
            w.can_generate_report(),
            w.report_url().map(str::to_string),
            w.share_link(),
        )
    };
    let busy = status == OpStatus::Busy;
    let failure = match &status {
        OpStatus::Error(e) => Some(e.friendly_message()),
        _ => None,
    };
    let previa = counts.previa();
    let posterior = counts.posterior();

    let generate = move |_: MouseEvent| {
        let begun = wizard.write().begin_report();
        let request = match begun {
            Ok(request) => request,
            Err(e) => {
                toast.error(e.friendly_message(), ToastOptions::new());
                return;
            }
        };
        let api = auth.api();
        spawn(async move {
            let result = api.report_generate(&request).await;
            let notice = wizard.write().finish_report(&request, result);
            if let Some(notice) = notice {
                show_notice(toast, notice, &auth);
            }
        });
    };

    rsx! {
        Card {
            title: "Report",
            subtitle: "{location}",
            CardContent {
                dl { class: "report-summary",
                    dt { "Before photos" }
                    dd { "{previa}" }
                    dt { "After photos" }
                    dd { "{posterior}" }
                    dt { "Signed document" }
                    dd {
                        Badge { tone: BadgeTone::from_ok(document_ready),
                            if document_ready { "Received" } else { "Missing" }
                        }
                    }
                }

                if !counts.is_complete() {
                    p { class: "report-warning",
                        "Go back and upload at least one before and one after photo."
                    }
                }

                if let Some(message) = failure.clone() {
                    div { class: "report-error", role: "alert",
                        p { "{message}" }
                        Button {
                            variant: ButtonVariant::Secondary,
                            onclick: move |_| wizard.write().retry_report(),
                            "Try again"
                        }
                    }
                }

                if let Some(url) = report_url.clone() {
                    div { class: "report-ready",
                        a {
                            class: "report-link",
                            href: "{url}",
                            target: "_blank",
                            rel: "noopener",
                            Icon::<LdExternalLink> { icon: LdExternalLink, width: 16, height: 16 }
                            span { "Open report" }
                        }
                        if let Some(link) = share_link.clone() {
                            a {
                                class: "button report-share",
                                "data-style": "share",
                                href: "{link}",
                                target: "_blank",
                                rel: "noopener",
                                onclick: move |_| {
                                    tracing::info!("report shared, ending session");
                                    wizard.write().finish_share();
                                    navigator().replace(Route::Login {});
                                },
                                Icon::<LdShare2> { icon: LdShare2, width: 16, height: 16 }
                                span { "Share on WhatsApp" }
                            }
                        }
                    }
                }
            }
            CardFooter {
                if report_url.is_none() {
                    Button {
                        disabled: !can_generate || failure.is_some(),
                        busy,
                        busy_label: "Generating...",
                        onclick: generate,
                        "Generate report"
                    }
                } else {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| wizard.write().reset(),
                        "Start a new visit"
                    }
                }
            }
        }
    }
}
