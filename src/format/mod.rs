//! Formatting Module
//!
//! Renders client responses as text for the command line and the agent
//! server, exports pages and computes simple content statistics.

mod analysis;
mod export;
mod text;

pub use analysis::{analyze_page, sections, PageAnalysis, Section};
pub use export::{export_page, to_html, to_json, to_markdown, to_plain_text, ExportFormat};
pub use text::{
    edit_requests_text, page_markdown, page_text, search_results_markdown, search_results_text,
    PageTextOptions,
};

// == Helpers ==
/// Removes anything that looks like an HTML tag.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Cuts `input` to at most `max_chars` characters, reporting whether it did.
pub fn truncate_chars(input: &str, max_chars: usize) -> (&str, bool) {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => (&input[..idx], true),
        None => (input, false),
    }
}
