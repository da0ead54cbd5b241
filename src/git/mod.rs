//! Git history access for regex search over recent commits
//!
//! Selects matching commits, extracts their diffs against the first parent and
//! renders them as text blocks.

/// Commit-vs-parent diffs split into per-file entries
pub mod diff;
/// Glob and extension filters over changed file paths
pub mod filter;
/// Per-commit text rendering
pub mod renderer;
/// History walking and commit matching
pub mod selector;

pub use diff::DiffEntry;
pub use filter::PathFilter;
pub use renderer::DiffRenderer;
pub use selector::{CommitMatcher, CommitRecord, CommitSelector, MAX_COMMITS};
