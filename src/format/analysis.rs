//! Simple content statistics for a page.

use serde::Serialize;

use super::strip_html;
use crate::models::Page;

const WORDS_PER_MINUTE: f64 = 200.0;

/// Counts describing a page's body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageAnalysis {
    pub title: String,
    pub word_count: usize,
    pub character_count: usize,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    pub heading_count: usize,
    pub link_count: usize,
    pub citation_count: usize,
    pub reading_time_minutes: f64,
    /// Reading time as `"<m>m <s>s"`
    pub reading_time_readable: String,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    /// 0 to 10, from word and sentence length
    pub complexity_score: f64,
    pub complexity_level: &'static str,
    /// Headings that open a section, in order
    pub section_titles: Vec<String>,
}

/// A heading and the text under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

pub fn analyze_page(page: &Page) -> PageAnalysis {
    let clean = strip_html(&page.content);
    let words: Vec<&str> = clean.split_whitespace().collect();
    let word_count = words.len();
    let sentence_count = clean
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    let reading_time = word_count as f64 / WORDS_PER_MINUTE;

    let avg_word_length = ratio(
        words.iter().map(|w| w.chars().count()).sum::<usize>(),
        word_count,
    );
    let avg_sentence_length = ratio(word_count, sentence_count);
    let complexity = ((avg_word_length - 3.0) * 0.5 + avg_sentence_length / 20.0).min(10.0);

    PageAnalysis {
        title: page.title.clone(),
        word_count,
        character_count: clean.chars().count(),
        paragraph_count: clean.split("\n\n").filter(|p| !p.trim().is_empty()).count(),
        sentence_count,
        heading_count: page.content.lines().filter(|l| is_heading(l)).count(),
        link_count: count_markdown_links(&page.content),
        citation_count: page.citations.len(),
        reading_time_minutes: round_to(reading_time, 1),
        reading_time_readable: format!(
            "{}m {}s",
            reading_time.trunc() as u64,
            (reading_time.fract() * 60.0) as u64
        ),
        avg_word_length: round_to(avg_word_length, 2),
        avg_sentence_length: round_to(avg_sentence_length, 2),
        complexity_score: round_to(complexity, 2),
        complexity_level: complexity_level(complexity),
        section_titles: sections(page).into_iter().map(|s| s.title).collect(),
    }
}

fn complexity_level(score: f64) -> &'static str {
    match score {
        s if s < 3.0 => "Very Easy",
        s if s < 5.0 => "Easy",
        s if s < 7.0 => "Medium",
        s if s < 8.5 => "Hard",
        _ => "Very Hard",
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Splits markdown content at `#` headings. Text before the first heading
/// is dropped.
pub fn sections(page: &Page) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in page.content.lines() {
        if line.starts_with('#') {
            if let Some((title, body)) = current.take() {
                sections.push(finish_section(title, &body));
            }
            current = Some((line.trim_start_matches('#').trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((title, body)) = current {
        sections.push(finish_section(title, &body));
    }
    sections
}

fn finish_section(title: String, body: &[&str]) -> Section {
    Section {
        title,
        content: body.join("\n").trim().to_string(),
    }
}

fn is_heading(line: &str) -> bool {
    let rest = line.trim_start_matches('#');
    rest.len() < line.len() && rest.starts_with(char::is_whitespace)
}

/// Counts `[text](target)` links with non-empty text and target.
fn count_markdown_links(content: &str) -> usize {
    let mut count = 0;
    let mut rest = content;
    while let Some(open) = rest.find('[') {
        rest = &rest[open + 1..];
        let Some(close) = rest.find(']') else { break };
        let text = &rest[..close];
        let after = &rest[close + 1..];
        if !text.is_empty() && !text.contains('[') && after.starts_with('(') {
            if let Some(end) = after.find(')') {
                if end > 1 {
                    count += 1;
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }
    }
    count
}
