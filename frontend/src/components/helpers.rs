//! Small UI utilities shared by the views.
//!
//! - **User Feedback**: temporary "toast" notifications for saves and failures.
//! - **Formatting**: thousands-separated counts and compact timestamps.
//! - **Markdown**: splitting an exported document into front matter and body,
//!   and rendering the body for preview.

use chrono::NaiveDateTime;
use num_format::{Locale, ToFormattedString};
use pulldown_cmark::{html, Event, Parser};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const TOAST_MS: u32 = 3000;

#[derive(Clone, Copy, PartialEq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast is a plain `div` appended to `<body>` and removed after a few
/// seconds. Text is set with `set_text_content`, so messages are never parsed
/// as HTML.
pub fn show_toast(message: &str, kind: ToastKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(message));
    let html_toast: HtmlElement = toast.unchecked_into();
    let background = match kind {
        ToastKind::Info => "rgba(0, 0, 0, 0.8)",
        ToastKind::Error => "rgba(183, 28, 28, 0.9)",
    };
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", background).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

pub fn format_count(count: usize) -> String {
    count.to_formatted_string(&Locale::en)
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Splits an exported document into `(front matter, body)`.
///
/// The closing fence starts a line; a `---` inside a YAML block scalar is
/// indented and never matches. Anything that does not start with a `---`
/// fence is treated as all body.
pub fn split_markdown(document: &str) -> (&str, &str) {
    const CLOSE: &str = "\n---\n\n";
    if let Some(rest) = document.strip_prefix("---\n") {
        if let Some(end) = rest.find(CLOSE) {
            return (&rest[..=end], &rest[end + CLOSE.len()..]);
        }
    }
    ("", document)
}

/// Renders a Markdown body to HTML. Raw HTML in the source is shown as text.
pub fn render_markdown(body: &str) -> String {
    let events = Parser::new(body).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut rendered = String::new();
    html::push_html(&mut rendered, events);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_separates_front_matter_from_body() {
        let (front, body) = split_markdown("---\ntitle: Hi\n---\n\n# Body\n");
        assert_eq!(front, "title: Hi\n");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn split_without_fence_is_all_body() {
        assert_eq!(split_markdown("plain"), ("", "plain"));
    }

    #[test]
    fn counts_use_thousands_separators() {
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn split_ignores_indented_fences_inside_front_matter() {
        let document = "---\ntitle: Hi\nNotes: |-\n  one\n  ---\n\n  three\n---\n\nBody text";
        let (front, body) = split_markdown(document);
        assert_eq!(front, "title: Hi\nNotes: |-\n  one\n  ---\n\n  three\n");
        assert_eq!(body, "Body text");
    }

    #[test]
    fn raw_html_is_escaped_in_previews() {
        let rendered = render_markdown("<script>alert(1)</script>\n\n**bold** and <img src=x onerror=alert(1)>");
        assert!(!rendered.contains("<script>"), "{rendered}");
        assert!(!rendered.contains("<img"), "{rendered}");
        assert!(rendered.contains("&lt;script&gt;"), "{rendered}");
        assert!(rendered.contains("<strong>bold</strong>"), "{rendered}");
    }
}
