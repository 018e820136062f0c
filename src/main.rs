//! Grokipedia command-line front end
//!
//! Thin wrapper over [`grokipedia::GrokipediaClient`]: parses arguments,
//! makes one call and prints the result. `grokipedia mcp` runs the agent
//! server on stdio instead.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grokipedia::client::{DEFAULT_EDIT_REQUEST_LIMIT, DEFAULT_SEARCH_LIMIT};
use grokipedia::format::{self, ExportFormat, PageTextOptions};
use grokipedia::mcp::McpServer;
use grokipedia::{ClientConfig, GrokipediaClient, RetryPolicy};

#[derive(Debug, Parser)]
#[command(
    name = "grokipedia",
    version,
    about = "Search and retrieve content from Grokipedia",
    after_help = "Examples:\n  grokipedia search \"Python programming\"\n  grokipedia search \"machine learning\" --limit 20\n  grokipedia get United_Petroleum --citations\n  grokipedia get \"Python_(programming_language)\" --full"
)]
struct Cli {
    /// Upstream base URL [env: GROKIPEDIA_BASE_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds [env: GROKIPEDIA_TIMEOUT_SECS]
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Attempts per request, including the first [env: GROKIPEDIA_MAX_ATTEMPTS]
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    /// Disable the response cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for articles
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Show snippet in results
        #[arg(long)]
        snippet: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a specific page by slug
    Get {
        /// Page slug (e.g. "United_Petroleum")
        slug: String,
        /// Exclude content
        #[arg(long)]
        no_content: bool,
        /// Do not validate links
        #[arg(long)]
        no_validate_links: bool,
        /// Show citations
        #[arg(long)]
        citations: bool,
        /// Show full content without truncation
        #[arg(long)]
        full: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// List edit requests for a page
    Edits {
        slug: String,
        #[arg(long, default_value_t = DEFAULT_EDIT_REQUEST_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a page as markdown, json, html or text
    Export {
        slug: String,
        #[arg(long, default_value = "markdown")]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print content statistics for a page
    Analyze {
        slug: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the agent-protocol server on stdio
    Mcp,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries command output and the JSON-RPC stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grokipedia=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Environment first (lenient, see [`ClientConfig::from_env`]), then flags.
fn build_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = ClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..config
        };
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(attempts) = cli.max_attempts {
        config.retry = RetryPolicy::new(
            attempts,
            config.retry.base_delay(),
            config.retry.max_delay(),
        );
    }
    if cli.no_cache {
        config.cache_enabled = false;
    }
    config
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = GrokipediaClient::new(build_config(&cli))?;

    match cli.command {
        Command::Search {
            query,
            limit,
            offset,
            snippet,
            json,
        } => {
            let response = client.search(&query, limit, offset).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", format::search_results_text(&query, &response, snippet));
            }
        }
        Command::Get {
            slug,
            no_content,
            no_validate_links,
            citations,
            full,
            json,
        } => {
            let response = client
                .get_page(&slug, !no_content, !no_validate_links)
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let options = PageTextOptions {
                    content: !no_content,
                    full,
                    citations,
                };
                print!("{}", format::page_text(&response.page, options));
            }
        }
        Command::Edits {
            slug,
            limit,
            offset,
            json,
        } => {
            let response = client
                .list_edit_requests_by_slug(&slug, limit, offset)
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", format::edit_requests_text(&slug, &response));
            }
        }
        Command::Export {
            slug,
            format,
            output,
        } => {
            let response = client.get_page(&slug, true, true).await?;
            let document = format::export_page(&response.page, format)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, document)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "page exported");
                }
                None => print!("{}", document),
            }
        }
        Command::Analyze { slug, json } => {
            let response = client.get_page(&slug, true, true).await?;
            let analysis = format::analyze_page(&response.page);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("{}", analysis.title);
                println!("  Words: {}", analysis.word_count);
                println!("  Characters: {}", analysis.character_count);
                println!("  Paragraphs: {}", analysis.paragraph_count);
                println!("  Sentences: {}", analysis.sentence_count);
                println!("  Headings: {}", analysis.heading_count);
                println!("  Links: {}", analysis.link_count);
                println!("  Citations: {}", analysis.citation_count);
                println!("  Reading time: {}", analysis.reading_time_readable);
                println!(
                    "  Complexity: {} ({:.2})",
                    analysis.complexity_level, analysis.complexity_score
                );
                if !analysis.section_titles.is_empty() {
                    println!("  Sections:");
                    for title in &analysis.section_titles {
                        println!("    - {}", title);
                    }
                }
            }
        }
        Command::Mcp => {
            McpServer::new(client.clone()).serve_stdio().await?;
        }
    }

    client.close().await;
    Ok(())
}
