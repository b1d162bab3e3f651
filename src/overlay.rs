use crate::constants::{HINT_OVERLAY_ID, START_OVERLAY_ID};
use web_sys as web;

#[inline]
pub fn hide_start(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        // fallback for pages without the CSS class
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hint_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(HINT_OVERLAY_ID)
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(true)
}

#[inline]
pub fn toggle_hint(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) {
        _ = el.class_list().toggle("hidden");
    }
}

/// Render the panel summary into the hint overlay.
pub fn update_hint(document: &web::Document, summary: &str) {
    if let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) {
        let hint_html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>{}</div>",
            summary
        );
        el.set_inner_html(&hint_html);
    }
}
