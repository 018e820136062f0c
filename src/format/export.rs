//! Page export to standalone documents.

use std::fmt::Write;
use std::str::FromStr;

use super::strip_html;
use crate::models::Page;

/// Document formats a page can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
    Html,
    Text,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => Ok(ExportFormat::Html),
            "txt" | "text" => Ok(ExportFormat::Text),
            other => Err(format!(
                "unsupported format: {}. Use 'markdown', 'json', 'html' or 'txt'",
                other
            )),
        }
    }
}

/// Renders `page` in the requested format.
pub fn export_page(page: &Page, format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Markdown => Ok(to_markdown(page)),
        ExportFormat::Json => to_json(page),
        ExportFormat::Html => Ok(to_html(page)),
        ExportFormat::Text => Ok(to_plain_text(page)),
    }
}

/// Title, description, tag-free content and a numbered citation list.
pub fn to_markdown(page: &Page) -> String {
    let mut md = format!("# {}\n\n", page.title);

    if !page.description.is_empty() {
        let _ = write!(md, "{}\n\n", page.description);
    }
    if !page.content.is_empty() {
        let _ = write!(md, "{}\n\n", strip_html(&page.content));
    }

    if !page.citations.is_empty() {
        md.push_str("## Citations\n\n");
        for (i, citation) in page.citations.iter().enumerate() {
            let _ = writeln!(md, "{}. **{}**", i + 1, citation.title);
            if !citation.description.is_empty() {
                let _ = writeln!(md, "   {}", citation.description);
            }
            if !citation.url.is_empty() {
                let _ = writeln!(md, "   {}", citation.url);
            }
            md.push('\n');
        }
    }
    md
}

pub fn to_json(page: &Page) -> serde_json::Result<String> {
    serde_json::to_string_pretty(page)
}

const HTML_STYLE: &str = "        body { max-width: 800px; margin: 0 auto; padding: 20px; font-family: sans-serif; line-height: 1.6; }
        h1 { color: #333; border-bottom: 3px solid #4CAF50; padding-bottom: 10px; }
        h2 { color: #555; margin-top: 30px; }
        .description { color: #666; font-style: italic; margin-bottom: 20px; }
        .citation { margin: 10px 0; padding: 10px; background: #f5f5f5; border-left: 4px solid #4CAF50; }
        .citation a { color: #4CAF50; text-decoration: none; }
";

/// Standalone HTML document. Page content is already markup and is embedded
/// as is; every other field is escaped.
pub fn to_html(page: &Page) -> String {
    let title = escape_html(&page.title);
    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
         <title>{}</title>\n    <style>\n{}    </style>\n</head>\n<body>\n    <h1>{}</h1>\n",
        title, HTML_STYLE, title
    );

    if !page.description.is_empty() {
        let _ = writeln!(
            html,
            "    <div class=\"description\">{}</div>",
            escape_html(&page.description)
        );
    }
    if !page.content.is_empty() {
        let _ = writeln!(html, "    <div>{}</div>", page.content);
    }

    if !page.citations.is_empty() {
        html.push_str("    <h2>Citations</h2>\n");
        for citation in &page.citations {
            html.push_str("    <div class=\"citation\">\n");
            let _ = writeln!(html, "        <strong>{}</strong><br>", escape_html(&citation.title));
            if !citation.description.is_empty() {
                let _ = writeln!(html, "        {}<br>", escape_html(&citation.description));
            }
            if !citation.url.is_empty() {
                let url = escape_html(&citation.url);
                let _ = writeln!(html, "        <a href=\"{}\" target=\"_blank\">{}</a>", url, url);
            }
            html.push_str("    </div>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Like [`to_markdown`] without markup.
pub fn to_plain_text(page: &Page) -> String {
    let mut text = format!(
        "{}\n{}\n\n",
        page.title,
        "=".repeat(page.title.chars().count())
    );

    if !page.description.is_empty() {
        let _ = write!(text, "{}\n\n", page.description);
    }
    if !page.content.is_empty() {
        let _ = write!(text, "{}\n\n", strip_html(&page.content));
    }

    if !page.citations.is_empty() {
        let _ = writeln!(text, "CITATIONS\n{}", "-".repeat(50));
        for (i, citation) in page.citations.iter().enumerate() {
            let _ = writeln!(text, "{}. {}", i + 1, citation.title);
            if !citation.description.is_empty() {
                let _ = writeln!(text, "   {}", citation.description);
            }
            if !citation.url.is_empty() {
                let _ = writeln!(text, "   {}", citation.url);
            }
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Citation;

    fn page() -> Page {
        Page {
            slug: "Rust".to_string(),
            title: "Rust".to_string(),
            description: "A language".to_string(),
            content: "Rust is <b>fast</b>.".to_string(),
            citations: vec![Citation {
                id: "1".to_string(),
                title: "Rust Book".to_string(),
                url: "https://doc.rust-lang.org/book/".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_to_markdown() {
        let md = to_markdown(&page());
        assert_eq!(
            md,
            "# Rust\n\nA language\n\nRust is fast.\n\n## Citations\n\n\
             1. **Rust Book**\n   https://doc.rust-lang.org/book/\n\n"
        );
    }

    #[test]
    fn test_to_plain_text() {
        let text = to_plain_text(&page());
        assert!(text.starts_with("Rust\n====\n\nA language\n\nRust is fast.\n\n"));
        assert!(text.contains("CITATIONS\n-----"));
        assert!(text.contains("1. Rust Book\n"));
    }

    #[test]
    fn test_to_json_round_trips_fields() {
        let json = export_page(&page(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["slug"], "Rust");
        assert_eq!(value["citations"][0]["title"], "Rust Book");
    }

    #[test]
    fn test_to_html() {
        let mut page = page();
        page.citations[0].description = "Chapter <1> & more".to_string();
        let html = export_page(&page, ExportFormat::Html).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Rust</title>"));
        assert!(html.contains("<div class=\"description\">A language</div>"));
        assert!(html.contains("<div>Rust is <b>fast</b>.</div>"));
        assert!(html.contains("Chapter &lt;1&gt; &amp; more<br>"));
        assert!(html.contains(
            "<a href=\"https://doc.rust-lang.org/book/\" target=\"_blank\">"
        ));
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("HTML".parse::<ExportFormat>(), Ok(ExportFormat::Html));
        assert_eq!("MD".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("text".parse::<ExportFormat>(), Ok(ExportFormat::Text));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
