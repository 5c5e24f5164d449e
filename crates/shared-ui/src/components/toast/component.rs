use dioxus::prelude::*;
use dioxus_primitives::toast as prim;
use std::time::Duration;

pub use dioxus_primitives::toast::{consume_toast, use_toast, ToastOptions, ToastType, Toasts};

/// Toast options for upload notices that disappear after `ttl`.
pub fn transient(ttl: Duration) -> ToastOptions {
    ToastOptions::new().duration(ttl)
}

#[component]
pub fn ToastProvider(props: prim::ToastProviderProps) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::ToastProvider { ..props }
    }
}
