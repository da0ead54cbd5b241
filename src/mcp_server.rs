use crate::config::Config;
use crate::report::SearchReportBuilder;
use crate::types::*;

use anyhow::{Context, Result};
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct GitSearchMcpServer {
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

impl GitSearchMcpServer {
    /// Create a server with configuration from the default file and environment
    pub fn new() -> Result<Self> {
        let config = Config::new().context("Failed to load configuration")?;
        Ok(Self::with_config(config))
    }

    /// Create a server with an explicit configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one search on the blocking pool and map failures to `Error:` text
    pub async fn run_search(&self, req: SearchRequest) -> Result<String, String> {
        let config = Arc::clone(&self.config);

        tokio::task::spawn_blocking(move || {
            SearchReportBuilder::new(&config.search).build(&req)
        })
        .await
        .map_err(|e| format!("Error: search task failed: {}", e))?
        .map_err(|e| {
            if e.is_user_error() {
                tracing::warn!("Search rejected: {}", e);
            } else {
                tracing::error!("Search failed: {}", e);
            }
            e.to_user_string()
        })
    }
}

#[tool_router(router = tool_router)]
impl GitSearchMcpServer {
    #[tool(
        description = "Search the last 5 git commits whose message (mode=message) or changed lines (mode=content) match an extended regex. Returns commit headers and diffs filtered by file_glob / file_extensions, cut to max_chars characters."
    )]
    async fn search(&self, Parameters(req): Parameters<SearchRequest>) -> Result<String, String> {
        self.run_search(req).await
    }

    #[tool(description = "Search last 5 git commit diffs whose commit message matches a regex pattern")]
    async fn search_git_diffs_by_msg(
        &self,
        Parameters(req): Parameters<FixedModeSearchRequest>,
    ) -> Result<String, String> {
        self.run_search(req.with_mode(SearchMode::Message)).await
    }

    #[tool(
        description = "Search last 5 commits whose diff adds or removes lines matching a regex pattern (like git log -G)"
    )]
    async fn search_git_diff_by_content(
        &self,
        Parameters(req): Parameters<FixedModeSearchRequest>,
    ) -> Result<String, String> {
        self.run_search(req.with_mode(SearchMode::Content)).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GitSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "git-search-mcp".into(),
                title: Some("Git Search - Regex Search over Recent Commits".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Regex search over recent git history. \
                Use search with mode=message to match commit messages or mode=content to match changed lines; \
                narrow the shown diffs with file_glob or file_extensions and raise max_chars for longer output."
                    .into(),
            ),
        }
    }
}

impl GitSearchMcpServer {
    pub async fn serve_stdio(self) -> Result<()> {
        tracing::info!("Starting git search MCP server");

        let transport = rmcp::transport::io::stdio();

        self.serve(transport).await?.waiting().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests;
