//! Search report assembly: select, render, concatenate, truncate

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::git::selector::open_repository;
use crate::git::{CommitMatcher, CommitSelector, DiffRenderer, PathFilter};
use crate::types::{SearchMode, SearchRequest};
use std::time::Instant;

/// Appended to a cut report when `mark_truncation` is enabled
pub const TRUNCATION_MARKER: &str = "\n[truncated]";

/// Builds the text returned for one search request
///
/// Holds no state between calls: each `build` opens the repository, reads it,
/// and drops the handle before returning.
pub struct SearchReportBuilder<'a> {
    config: &'a SearchConfig,
}

impl<'a> SearchReportBuilder<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, req: &SearchRequest) -> Result<String, SearchError> {
        let start_time = Instant::now();
        req.validate().map_err(SearchError::Validation)?;

        let repo_path = req
            .repo_path
            .as_deref()
            .unwrap_or(&self.config.default_repo_path);
        let max_chars = req.max_chars.unwrap_or(self.config.default_max_chars);

        tracing::info!(
            "Git search: pattern='{}', mode={}, repo='{}', max_chars={}",
            req.regex,
            req.mode,
            repo_path,
            max_chars
        );

        let matcher = CommitMatcher::new(&req.regex, req.mode)?;
        let filter = PathFilter::new(req.file_glob.as_deref(), &req.file_extensions)?;
        let repo = open_repository(repo_path)?;

        let commits = CommitSelector::new(&repo, self.config.context_lines).select(&matcher)?;
        if commits.is_empty() {
            tracing::info!("No matching commits ({} ms)", start_time.elapsed().as_millis());
            return Ok(no_matches_message(&req.regex, req.mode));
        }

        let renderer = DiffRenderer::new(&repo, &filter, self.config.context_lines);
        let mut report = summary_line(commits.len(), &req.regex, req.mode);
        for commit in &commits {
            report.push_str(&renderer.render(commit)?);
        }

        let full_len = report.chars().count();
        let report = truncate_report(report, max_chars, self.config.mark_truncation);

        tracing::info!(
            "Found {} commits, report {} of {} chars ({} ms)",
            commits.len(),
            report.chars().count(),
            full_len,
            start_time.elapsed().as_millis()
        );
        Ok(report)
    }
}

/// Informational result for a search without matches; never truncated
pub fn no_matches_message(pattern: &str, mode: SearchMode) -> String {
    match mode {
        SearchMode::Message => format!("No commits found matching pattern '{}'", pattern),
        SearchMode::Content => format!(
            "No commits found with diff content matching pattern '{}'",
            pattern
        ),
    }
}

/// First line of a non-empty report, followed by a blank line
pub fn summary_line(count: usize, pattern: &str, mode: SearchMode) -> String {
    match mode {
        SearchMode::Message => format!("Found {} commits matching pattern '{}':\n\n", count, pattern),
        SearchMode::Content => format!(
            "Found {} commits with diff content matching pattern '{}':\n\n",
            count, pattern
        ),
    }
}

/// Keep at most `max_chars` characters of `text`
///
/// The cut lands on a character boundary. With `mark` set, a cut report ends in
/// [`TRUNCATION_MARKER`] and the marker counts toward `max_chars`.
pub fn truncate_report(mut text: String, max_chars: usize, mark: bool) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text;
    };

    let marker_len = TRUNCATION_MARKER.chars().count();
    if mark && max_chars > marker_len {
        let keep = text
            .char_indices()
            .nth(max_chars - marker_len)
            .map_or(cut, |(idx, _)| idx);
        text.truncate(keep);
        text.push_str(TRUNCATION_MARKER);
    } else {
        text.truncate(cut);
    }
    text
}
