//! HTML Escaping
//!
//! The one escaping rule used everywhere escaping is specified. Raw
//! `inner_html` content deliberately bypasses it (caller-trusted markup).

/// Escape HTML special characters
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
