pub mod login;
pub mod not_found;
pub mod reports;
pub mod wizard;

use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdClipboardList, LdFileText, LdLogOut};
use dioxus_free_icons::Icon;

use login::Login;
use not_found::NotFound;
use reports::Reports;
use wizard::WizardPage;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/wizard")]
    WizardPage {},
    #[route("/reports")]
    Reports {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Auth guard layout. Sends signed-out visitors back to the login page.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();

    if auth.is_authenticated() {
        rsx! { Outlet::<Route> {} }
    } else {
        navigator().replace(Route::Login {});
        rsx! {
            div { class: "auth-guard-loading",
                p { "Redirecting to login..." }
            }
        }
    }
}

/// Top bar with navigation, the technician's initials and sign-out.
#[component]
fn AppLayout() -> Element {
    let mut auth = use_auth();
    let route: Route = use_route();
    let identity = auth.identity();
    let initials = identity.as_ref().map(|i| i.initials()).unwrap_or_default();
    let is_admin = identity.as_ref().is_some_and(|i| i.is_admin());
    let display_name = identity
        .as_ref()
        .map(|i| i.display_name.clone())
        .unwrap_or_default();

    let handle_logout = move |_: MouseEvent| {
        auth.sign_out();
        navigator().replace(Route::Login {});
    };

    rsx! {
        div { class: "app-shell",
            header { class: "app-navbar",
                span { class: "app-brand", "Field Report" }
                nav { class: "app-nav",
                    Link {
                        to: Route::WizardPage {},
                        class: if matches!(route, Route::WizardPage {}) { "app-nav-link active" } else { "app-nav-link" },
                        Icon::<LdClipboardList> { icon: LdClipboardList, width: 18, height: 18 }
                        span { "New visit" }
                    }
                    if is_admin {
                        Link {
                            to: Route::Reports {},
                            class: if matches!(route, Route::Reports {}) { "app-nav-link active" } else { "app-nav-link" },
                            Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 }
                            span { "Reports" }
                        }
                    }
                }
                div { class: "app-user",
                    span { class: "app-avatar", title: "{display_name}", "{initials}" }
                    button {
                        class: "app-logout",
                        title: "Sign out",
                        onclick: handle_logout,
                        Icon::<LdLogOut> { icon: LdLogOut, width: 18, height: 18 }
                    }
                }
            }
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}
