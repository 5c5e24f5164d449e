//! Handing a generated report to a messaging app.

const WHATSAPP_BASE: &str = "https://wa.me/?text=";

/// Message body shared with the client.
pub fn share_text(location_label: &str, report_url: &str) -> String {
    format!("Technical report - {}\n{}", location_label.trim(), report_url.trim())
}

/// `wa.me` link that opens WhatsApp with `text` prefilled.
pub fn whatsapp_link(text: &str) -> String {
    format!("{WHATSAPP_BASE}{}", urlencoding::encode(text))
}
