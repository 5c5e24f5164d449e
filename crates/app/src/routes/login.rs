use crate::auth::use_auth;
use crate::routes::Route;
use client::LoginProgress;
use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardFooter, Input};

const WAKING_UP: &str = "The service is waking up. This can take up to a minute…";

/// Status line shown under the form while a login is in flight.
fn progress_message(progress: LoginProgress, woke: bool) -> Option<String> {
    match progress {
        LoginProgress::WakingUp => Some(WAKING_UP.to_string()),
        LoginProgress::Attempt(n) if n > 1 => Some(format!("{WAKING_UP} (attempt {n})")),
        LoginProgress::Attempt(_) if woke => Some(WAKING_UP.to_string()),
        LoginProgress::Attempt(_) => None,
    }
}

#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| None::<String>);
    let mut status = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    use_effect(move || {
        if auth.is_authenticated() {
            navigator().replace(Route::WizardPage {});
        }
    });

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        if loading() {
            return;
        }
        loading.set(true);
        error_msg.set(None);
        status.set(None);

        let api = auth.api();
        let policy = client::config().login;
        let mut woke = false;
        let result = client::login(&api, &username(), &password(), policy, move |p| {
            woke |= p == LoginProgress::WakingUp;
            status.set(progress_message(p, woke));
        })
        .await;

        match result {
            Ok(identity) => {
                tracing::info!(session_id = %identity.session_id, "signed in");
                auth.sign_in(identity);
                password.set(String::new());
                navigator().replace(Route::WizardPage {});
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign in failed");
                error_msg.set(Some(e.friendly_message()));
            }
        }
        status.set(None);
        loading.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card {
                class: "auth-card",
                title: "Field Report",
                subtitle: "Sign in with your technician account",
                CardContent {
                    if let Some(msg) = error_msg() {
                        div { class: "auth-error", "{msg}" }
                    }

                    form { onsubmit: handle_login,
                        div { class: "auth-field",
                            Input {
                                label: "Username",
                                id: "username",
                                autocomplete: "username",
                                placeholder: "Your technician id",
                                value: username(),
                                disabled: loading(),
                                on_input: move |e: FormEvent| username.set(e.value()),
                            }
                        }
                        div { class: "auth-field",
                            Input {
                                label: "Password",
                                input_type: "password",
                                id: "password",
                                autocomplete: "current-password",
                                placeholder: "Enter your password",
                                value: password(),
                                disabled: loading(),
                                on_input: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "auth-submit button",
                            "data-style": "primary",
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }

                    if let Some(msg) = status() {
                        p { class: "auth-status", role: "status", "{msg}" }
                    }
                }
                CardFooter {
                    p { class: "auth-hint", "Ask your coordinator if you do not have an account." }
                }
            }
        }
    }
}
