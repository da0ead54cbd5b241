//! # git-search-mcp - Regex Search over Recent Git History
//!
//! A Model Context Protocol (MCP) server that lets AI assistants search the
//! recent commit history of a local git repository with a regular expression,
//! either against commit messages or against the lines a commit changed.
//!
//! ## Overview
//!
//! Each search walks history from `HEAD`, keeps at most five matching commits
//! (newest first), renders each one as a header plus its path-filtered diff
//! against the first parent, and cuts the report to a character budget.
//!
//! ## Architecture
//!
//! ```text
//! MCP client ──stdio──▶ GitSearchMcpServer ──▶ SearchReportBuilder
//!                                                 │
//!                         ┌───────────────────────┼──────────────────┐
//!                         ▼                       ▼                  ▼
//!                   CommitSelector          DiffRenderer        truncate_report
//!                   (history walk)     (diff + PathFilter)
//! ```
//!
//! ## Modules
//!
//! - [`mcp_server`]: MCP protocol server exposing the search tools
//! - [`report`]: report assembly and truncation
//! - [`git`]: commit selection, diff extraction, path filtering, rendering
//! - [`config`]: configuration with file and environment variable support
//! - [`types`]: MCP request types with JSON schema
//! - [`error`]: error types
//! - [`paths`]: platform config locations
//!
//! ## Usage Example
//!
//! ```no_run
//! use git_search_mcp::config::SearchConfig;
//! use git_search_mcp::report::SearchReportBuilder;
//! use git_search_mcp::types::{SearchMode, SearchRequest};
//!
//! let config = SearchConfig::default();
//! let mut req = SearchRequest::new("add.*parameter");
//! req.mode = SearchMode::Message;
//! req.file_extensions = vec![".py".to_string()];
//!
//! match SearchReportBuilder::new(&config).build(&req) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("{}", e.to_user_string()),
//! }
//! ```

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Git history selection and diff rendering
pub mod git;

/// MCP server implementation exposing the search tools
pub mod mcp_server;

/// Platform-specific configuration paths
pub mod paths;

/// Search report assembly and truncation
pub mod report;

/// MCP request types with JSON schema definitions
pub mod types;

#[cfg(test)]
mod test_support;
