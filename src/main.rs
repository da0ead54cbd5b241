use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use git_search_mcp::config::Config;
use git_search_mcp::mcp_server::GitSearchMcpServer;
use git_search_mcp::report::SearchReportBuilder;
use git_search_mcp::types::{SearchMode, SearchRequest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Regex search over recent git history, served over MCP stdio
#[derive(Parser, Debug)]
#[command(name = "git-search-mcp", version, long_version = LONG_VERSION)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "GIT_SEARCH_MCP_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the MCP tools over stdio (default)
    Serve,
    /// Run a single search and print the report
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Extended regex pattern
    #[arg(long)]
    regex: String,

    /// Path to the git repository
    #[arg(long)]
    repo_path: Option<String>,

    /// Match against commit messages or changed lines
    #[arg(long, value_enum, default_value_t = SearchMode::Message)]
    mode: SearchMode,

    /// Only show changed files matching this glob
    #[arg(long)]
    file_glob: Option<String>,

    /// Only show changed files with this extension (repeatable)
    #[arg(long = "file-extension")]
    file_extensions: Vec<String>,

    /// Maximum number of characters to print
    #[arg(long)]
    max_chars: Option<usize>,
}

impl From<SearchArgs> for SearchRequest {
    fn from(args: SearchArgs) -> Self {
        SearchRequest {
            regex: args.regex,
            repo_path: args.repo_path,
            mode: args.mode,
            file_glob: args.file_glob,
            file_extensions: args.file_extensions,
            max_chars: args.max_chars,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            GitSearchMcpServer::with_config(config).serve_stdio().await?;
        }
        Command::Search(args) => {
            let req = SearchRequest::from(args);
            let report = tokio::task::spawn_blocking(move || {
                SearchReportBuilder::new(&config.search).build(&req)
            })
            .await
            .context("Search task failed")?;

            match report {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    println!("{}", e.to_user_string());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
