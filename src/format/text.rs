//! Human-readable rendering of client responses.

use std::fmt::Write;

use super::{strip_html, truncate_chars};
use crate::models::{EditRequestsResponse, Page, SearchResponse};

const SNIPPET_CHARS: usize = 100;
const CITATION_DESCRIPTION_CHARS: usize = 150;
const CLI_CONTENT_PREVIEW_CHARS: usize = 500;
const AGENT_CONTENT_PREVIEW_CHARS: usize = 2000;
const AGENT_MAX_CITATIONS: usize = 10;
const AGENT_MAX_IMAGES: usize = 5;

// == Search ==
/// Plain listing used by the command line.
pub fn search_results_text(query: &str, response: &SearchResponse, show_snippet: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\nFound {} results for '{}':\n",
        response.results.len(),
        query
    );
    for (i, result) in response.results.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, result.title);
        let _ = writeln!(out, "   Slug: {}", result.slug);
        let _ = writeln!(out, "   Views: {}", result.view_count);
        if show_snippet {
            let snippet = strip_html(&result.snippet);
            let (cut, _) = truncate_chars(&snippet, SNIPPET_CHARS);
            let _ = writeln!(out, "   Snippet: {}...", cut);
        }
        out.push('\n');
    }
    out
}

/// Markdown listing returned to agents. Highlight markup becomes bold.
pub fn search_results_markdown(query: &str, response: &SearchResponse) -> String {
    let mut out = format!(
        "Found {} results for '{}':\n\n",
        response.results.len(),
        query
    );
    for (i, result) in response.results.iter().enumerate() {
        let _ = writeln!(out, "{}. **{}**", i + 1, result.title);
        let _ = writeln!(out, "   - Slug: {}", result.slug);
        let _ = writeln!(out, "   - Views: {}", result.view_count);
        let _ = writeln!(out, "   - Relevance: {:.2}", result.relevance_score);
        if !result.snippet.is_empty() {
            let snippet = strip_html(&result.snippet.replace("<em>", "**").replace("</em>", "**"));
            match truncate_chars(&snippet, SNIPPET_CHARS) {
                (cut, true) => {
                    let _ = writeln!(out, "   - Snippet: {}...", cut);
                }
                (all, false) => {
                    let _ = writeln!(out, "   - Snippet: {}", all);
                }
            }
        }
        out.push('\n');
    }
    out
}

// == Page ==
/// What the command line shows of a page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTextOptions {
    pub content: bool,
    pub full: bool,
    pub citations: bool,
}

/// Plain rendering used by the command line.
pub fn page_text(page: &Page, options: PageTextOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", page.title);
    let _ = writeln!(out, "{}", "=".repeat(page.title.chars().count()));

    if options.content {
        let _ = writeln!(out, "\nContent:");
        let _ = writeln!(out, "{}", "-".repeat(50));
        match truncate_chars(&page.content, CLI_CONTENT_PREVIEW_CHARS) {
            (cut, true) if !options.full => {
                let _ = writeln!(
                    out,
                    "{}...\n[Content truncated. Use --full to see complete content]",
                    cut
                );
            }
            _ => {
                let _ = writeln!(out, "{}", page.content);
            }
        }
    }

    let _ = writeln!(out, "\nCitations: {}", page.citations.len());
    if options.citations {
        for citation in &page.citations {
            let _ = writeln!(out, "\n[{}] {}", citation.id, citation.title);
            let _ = writeln!(out, "  {}", citation.url);
            if !citation.description.is_empty() {
                let (cut, _) = truncate_chars(&citation.description, CITATION_DESCRIPTION_CHARS);
                let _ = writeln!(out, "  {}...", cut);
            }
        }
    }

    let _ = writeln!(out, "\nImages: {}", page.images.len());

    if let Some(stats) = &page.stats {
        let _ = writeln!(out, "\nStatistics:");
        let _ = writeln!(out, "  Total Views: {}", stats.total_views);
        let _ = writeln!(out, "  Daily Average: {:.2}", stats.daily_avg_views);
    }
    out
}

/// Markdown rendering returned to agents: capped citation and image lists
/// and a content preview.
pub fn page_markdown(page: &Page, include_content: bool) -> String {
    let mut out = format!("# {}\n\n**Slug:** {}\n\n", page.title, page.slug);

    if !page.description.is_empty() {
        let _ = write!(out, "{}\n\n", page.description);
    }

    if !page.citations.is_empty() {
        let _ = write!(out, "## Citations ({})\n\n", page.citations.len());
        for citation in page.citations.iter().take(AGENT_MAX_CITATIONS) {
            let _ = writeln!(out, "- [{}] **{}**", citation.id, citation.title);
            let _ = writeln!(out, "  - URL: {}", citation.url);
            if !citation.description.is_empty() {
                let (cut, _) = truncate_chars(&citation.description, CITATION_DESCRIPTION_CHARS);
                let _ = writeln!(out, "  - {}...", cut);
            }
        }
        if page.citations.len() > AGENT_MAX_CITATIONS {
            let _ = writeln!(
                out,
                "\n*... and {} more citations*",
                page.citations.len() - AGENT_MAX_CITATIONS
            );
        }
    }

    if !page.images.is_empty() {
        let _ = write!(out, "\n## Images ({})\n\n", page.images.len());
        for image in page.images.iter().take(AGENT_MAX_IMAGES) {
            let _ = writeln!(out, "- **{}**", image.caption);
            let _ = writeln!(out, "  - URL: {}", image.url);
        }
    }

    if include_content && !page.content.is_empty() {
        match truncate_chars(&page.content, AGENT_CONTENT_PREVIEW_CHARS) {
            (cut, true) => {
                let _ = write!(out, "\n## Content Preview\n\n{}...\n\n", cut);
                let _ = writeln!(
                    out,
                    "*Content truncated. Full content has {} characters*",
                    page.content.chars().count()
                );
            }
            (all, false) => {
                let _ = write!(out, "\n## Content\n\n{}\n", all);
            }
        }
    }
    out
}

// == Edit Requests ==
pub fn edit_requests_text(slug: &str, response: &EditRequestsResponse) -> String {
    let mut out = format!(
        "\nEdit requests for '{}': {} total{}\n",
        slug,
        response.total_count,
        if response.has_more { " (more available)" } else { "" }
    );
    for (i, edit) in response.edit_requests.iter().enumerate() {
        let _ = writeln!(out, "\n{}. Status: {}", i + 1, or_unknown(&edit.status));
        let _ = writeln!(out, "   Summary: {}", or_na(&edit.summary));
        let _ = writeln!(out, "   Type: {}", or_unknown(&edit.kind));
        if !edit.created_at.is_empty() {
            let _ = writeln!(out, "   Created: {}", edit.created_at);
        }
    }
    out
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "Unknown"
    } else {
        value
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}
