//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes text analysis and extraction to AI assistants over stdio. The
//! server is a presentation layer over `wordlens-core`: each `#[tool]`
//! method delegates to core functions and converts their errors to
//! [`McpError`].
//!
//! Size limits and strict extraction come from the loaded configuration,
//! the same as for the CLI commands.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use wordlens_core::{
    AnalysisSnapshot, ExtractionError, ExtractionResult, IngestOptions, analyze, ingest,
};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
}

/// Parameters for the `extract_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ExtractTextParams {
    /// File name of the document; its extension selects the extraction strategy.
    pub filename: String,
    /// Raw document content.
    pub content: String,
}

#[derive(serde::Serialize)]
struct ExtractAndAnalyze<'a> {
    extraction: &'a ExtractionResult,
    analysis: &'a AnalysisSnapshot,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// MCP server exposing text analysis to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    ingest: IngestOptions,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(IngestOptions::default())
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server that applies `ingest` to every input.
    pub fn new(ingest: IngestOptions) -> Self {
        Self {
            tool_router: Self::tool_router(),
            ingest,
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
            }))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Compute statistics and a readability score for text.
    #[tool(description = "Analyze text: counts, averages, reading time, readability (0-100).")]
    #[tracing::instrument(
        skip(self, params),
        fields(otel.kind = "server", text_len = params.text.len())
    )]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(limit) = self.ingest.max_bytes
            && params.text.len() > limit
        {
            let err = ExtractionError::FileTooLarge {
                size: params.text.len(),
                limit,
            };
            return Err(McpError::invalid_params(err.to_string(), None));
        }

        let snapshot = analyze(&params.text);
        let json = to_json(&snapshot)?;

        tracing::info!(
            tool = "analyze_text",
            words = snapshot.word_count,
            score = snapshot.readability_score,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Extract text from a document, then analyze it.
    #[tool(description = "Extract and analyze a txt/md/rtf document; others get a placeholder.")]
    #[tracing::instrument(
        skip(self, params),
        fields(otel.kind = "server", filename = %params.filename)
    )]
    fn extract_text(
        &self,
        Parameters(params): Parameters<ExtractTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let extraction = ingest(&params.filename, params.content.as_bytes(), &self.ingest)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let snapshot = analyze(&extraction.text);

        let json = to_json(&ExtractAndAnalyze {
            extraction: &extraction,
            analysis: &snapshot,
        })?;

        tracing::info!(
            tool = "extract_text",
            strategy = %extraction.strategy,
            warned = extraction.warning.is_some(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use analyze_text for pasted text and extract_text for documents.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
