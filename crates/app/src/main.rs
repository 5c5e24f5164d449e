use dioxus::prelude::*;

mod auth;
mod format_helpers;
mod routes;
use auth::AuthState;
use routes::Route;

const THEME_BASE: Asset = asset!("/assets/theme-base.css");

fn main() {
    client::load_config();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let state = use_hook(|| AuthState::new(client::config()));

    let state = match state {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "cannot start the API client");
            let message = e.friendly_message();
            return rsx! {
                document::Link { rel: "stylesheet", href: THEME_BASE }
                div { class: "startup-error",
                    h1 { "Field Report could not start" }
                    p { "{message}" }
                }
            };
        }
    };
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_BASE }
        shared_ui::ToastProvider {
            Router::<Route> {}
        }
    }
}
