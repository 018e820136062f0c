//! Tool declarations and dispatch.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::protocol::RpcError;
use crate::client::{GrokipediaClient, DEFAULT_SEARCH_LIMIT};
use crate::format::{page_markdown, search_results_markdown};

pub const SEARCH_TOOL: &str = "grokipedia_search";
pub const GET_PAGE_TOOL: &str = "grokipedia_get_page";

/// Result of a tool call as shown to the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    fn error(text: String) -> Self {
        Self {
            text,
            is_error: true,
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "content": [{"type": "text", "text": self.text}],
            "isError": self.is_error,
        })
    }
}

/// Schemas advertised by `tools/list`.
pub fn tool_definitions() -> Value {
    json!([
        {
            "name": SEARCH_TOOL,
            "description": "Search for articles in Grokipedia",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query string"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results (default: 12)",
                        "default": DEFAULT_SEARCH_LIMIT
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Number of results to skip for pagination (default: 0)",
                        "default": 0
                    }
                },
                "required": ["query"]
            }
        },
        {
            "name": GET_PAGE_TOOL,
            "description": "Get a specific page from Grokipedia by its slug",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "slug": {
                        "type": "string",
                        "description": "Page slug (e.g., 'United_Petroleum')"
                    },
                    "include_content": {
                        "type": "boolean",
                        "description": "Whether to include full content (default: true)",
                        "default": true
                    },
                    "validate_links": {
                        "type": "boolean",
                        "description": "Whether to validate links (default: true)",
                        "default": true
                    }
                },
                "required": ["slug"]
            }
        }
    ])
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    #[serde(default)]
    query: String,
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    offset: u32,
}

#[derive(Debug, Deserialize)]
struct GetPageArgs {
    #[serde(default)]
    slug: String,
    #[serde(default = "default_true")]
    include_content: bool,
    #[serde(default = "default_true")]
    validate_links: bool,
}

fn default_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

fn default_true() -> bool {
    true
}

/// Runs a tool. Unknown tools and malformed arguments are protocol errors;
/// failures of the underlying request come back as an error tool output.
pub async fn call_tool(
    client: &GrokipediaClient,
    name: &str,
    arguments: Value,
) -> Result<ToolOutput, RpcError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    debug!(tool = name, "tool call");

    match name {
        SEARCH_TOOL => {
            let args: SearchArgs = parse_args(arguments)?;
            if args.query.trim().is_empty() {
                return Ok(ToolOutput::error(
                    "Error: Query parameter is required".to_string(),
                ));
            }
            Ok(match client.search(&args.query, args.limit, args.offset).await {
                Ok(response) => ToolOutput::ok(search_results_markdown(&args.query, &response)),
                Err(err) => ToolOutput::error(format!("Grokipedia error: {}", err)),
            })
        }
        GET_PAGE_TOOL => {
            let args: GetPageArgs = parse_args(arguments)?;
            if args.slug.trim().is_empty() {
                return Ok(ToolOutput::error(
                    "Error: Slug parameter is required".to_string(),
                ));
            }
            Ok(
                match client
                    .get_page(&args.slug, args.include_content, args.validate_links)
                    .await
                {
                    Ok(response) => {
                        ToolOutput::ok(page_markdown(&response.page, args.include_content))
                    }
                    Err(err) => ToolOutput::error(format!("Grokipedia error: {}", err)),
                },
            )
        }
        other => Err(RpcError::InvalidParams(format!("Unknown tool: {}", other))),
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(arguments: Value) -> Result<T, RpcError> {
    serde_json::from_value(arguments).map_err(|e| RpcError::InvalidParams(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn offline_client() -> GrokipediaClient {
        GrokipediaClient::new(ClientConfig::builder().base_url("http://127.0.0.1:9").build())
            .unwrap()
    }

    #[test]
    fn test_definitions_list_both_tools() {
        let tools = tool_definitions();
        let names: Vec<&str> = tools
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec![SEARCH_TOOL, GET_PAGE_TOOL]);
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["query"]));
        assert_eq!(tools[0]["inputSchema"]["properties"]["limit"]["default"], 12);
    }

    #[tokio::test]
    async fn test_missing_query_is_tool_error() {
        let output = call_tool(&offline_client(), SEARCH_TOOL, json!({"limit": 3}))
            .await
            .unwrap();
        assert!(output.is_error);
        assert_eq!(output.text, "Error: Query parameter is required");
    }

    #[tokio::test]
    async fn test_missing_slug_is_tool_error() {
        let output = call_tool(&offline_client(), GET_PAGE_TOOL, Value::Null)
            .await
            .unwrap();
        assert!(output.is_error);
        assert_eq!(output.text, "Error: Slug parameter is required");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let err = call_tool(&offline_client(), "grokipedia_delete", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, RpcError::InvalidParams("Unknown tool: grokipedia_delete".into()));
    }

    #[tokio::test]
    async fn test_malformed_arguments_are_protocol_errors() {
        let err = call_tool(&offline_client(), SEARCH_TOOL, json!({"query": "x", "limit": "many"}))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::InvalidParams(_)));
    }

    #[test]
    fn test_output_shape() {
        let value = ToolOutput::ok("hello".to_string()).to_value();
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "hello");
        assert_eq!(value["isError"], false);
    }
}
