//! HTML rendering for the dashboard pages.
//!
//! Renderers are pure functions from fetched data to markup. Flags that
//! could not be fetched are left out; nothing here can fail.
//!
//! - `layout`: page shell, login and error pages
//! - `tables`: match selector, captions and data tables
//! - `charts`: the infographic and statistics charts
//! - `svg`: the small SVG drawing layer the charts are built on

pub mod charts;
pub mod layout;
pub mod svg;
pub mod tables;

/// Escape text for use in HTML content and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
