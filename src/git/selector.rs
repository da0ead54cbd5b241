use crate::error::SearchError;
use crate::git::diff::{changed_lines_match, commit_diff};
use crate::types::SearchMode;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{Commit, ErrorCode, Oid, Repository, Sort};
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Upper bound on commits returned by a single search
pub const MAX_COMMITS: usize = 5;

/// A commit selected by a search, with everything the report needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Object id, used to re-resolve the commit when rendering
    pub id: Oid,
    /// Full commit SHA hash (40 characters)
    pub hash: String,
    /// Author display name
    pub author: String,
    /// Commit timestamp in RFC 3339 with the committer's UTC offset
    pub date: String,
    /// Commit message with surrounding whitespace trimmed
    pub message: String,
    /// First parent, `None` for root commits
    pub parent: Option<Oid>,
}

impl CommitRecord {
    pub fn from_commit(commit: &Commit<'_>) -> Self {
        let time = commit.time();
        let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
            .unwrap_or_else(|| Utc.fix());
        let date = DateTime::from_timestamp(time.seconds(), 0)
            .map(|utc| utc.with_timezone(&offset).to_rfc3339())
            .unwrap_or_else(|| time.seconds().to_string());

        Self {
            id: commit.id(),
            hash: commit.id().to_string(),
            author: String::from_utf8_lossy(commit.author().name_bytes()).into_owned(),
            date,
            message: String::from_utf8_lossy(commit.message_bytes())
                .trim()
                .to_string(),
            parent: commit.parent_id(0).ok(),
        }
    }

    /// First 8 hex characters of the hash
    pub fn short_hash(&self) -> &str {
        &self.hash[..self.hash.len().min(8)]
    }
}

/// Compiled match criterion for one search
#[derive(Debug, Clone)]
pub enum CommitMatcher {
    /// Regex over the full commit message; `^` and `$` anchor at line boundaries
    Message(Regex),
    /// Regex over lines added or removed by the commit
    Content(Regex),
}

impl CommitMatcher {
    pub fn new(pattern: &str, mode: SearchMode) -> Result<Self, SearchError> {
        match mode {
            SearchMode::Message => RegexBuilder::new(pattern)
                .multi_line(true)
                .build()
                .map(CommitMatcher::Message),
            SearchMode::Content => Regex::new(pattern).map(CommitMatcher::Content),
        }
        .map_err(|e| SearchError::invalid_pattern(pattern, &e))
    }

    pub fn mode(&self) -> SearchMode {
        match self {
            CommitMatcher::Message(_) => SearchMode::Message,
            CommitMatcher::Content(_) => SearchMode::Content,
        }
    }

    fn is_match(
        &self,
        repo: &Repository,
        commit: &Commit<'_>,
        context_lines: u32,
    ) -> Result<bool, git2::Error> {
        match self {
            CommitMatcher::Message(regex) => {
                Ok(regex.is_match(&String::from_utf8_lossy(commit.message_bytes())))
            }
            // Merges show no diff in a plain history log, so they never match on content
            CommitMatcher::Content(_) if commit.parent_count() > 1 => Ok(false),
            CommitMatcher::Content(regex) => {
                let diff = commit_diff(repo, commit, context_lines)?;
                changed_lines_match(&diff, regex)
            }
        }
    }
}

/// Open the repository at `path` without searching parent directories
pub fn open_repository(path: &str) -> Result<Repository, SearchError> {
    Repository::open(Path::new(path)).map_err(|e| SearchError::invalid_repository(path, &e))
}

/// Walks history from HEAD and picks the newest commits satisfying a matcher
pub struct CommitSelector<'repo> {
    repo: &'repo Repository,
    context_lines: u32,
}

impl<'repo> CommitSelector<'repo> {
    pub fn new(repo: &'repo Repository, context_lines: u32) -> Self {
        Self {
            repo,
            context_lines,
        }
    }

    /// Return up to [`MAX_COMMITS`] matching commits, newest first
    ///
    /// A repository without any commits yields an empty list.
    pub fn select(&self, matcher: &CommitMatcher) -> Result<Vec<CommitRecord>, SearchError> {
        if let Err(e) = self.repo.head() {
            if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) {
                tracing::debug!("Repository has no commits yet");
                return Ok(Vec::new());
            }
            return Err(e.into());
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_head()?;

        let mut selected = Vec::new();
        let mut scanned = 0usize;

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            scanned += 1;

            if matcher.is_match(self.repo, &commit, self.context_lines)? {
                tracing::debug!("Commit {} matches", commit.id());
                selected.push(CommitRecord::from_commit(&commit));
                if selected.len() >= MAX_COMMITS {
                    break;
                }
            }
        }

        tracing::debug!(
            "Scanned {} commits, selected {} ({} mode)",
            scanned,
            selected.len(),
            matcher.mode()
        );
        Ok(selected)
    }
}
