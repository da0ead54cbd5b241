//! Path filtering for changed files in a rendered diff

use crate::error::SearchError;
use globset::{GlobBuilder, GlobMatcher};

/// Predicate restricting which changed files contribute to a rendered diff
///
/// A path passes when it satisfies the glob (if any) and ends with one of the
/// extensions (if any). With neither set, every path passes.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    glob: Option<GlobMatcher>,
    extensions: Vec<String>,
}

impl PathFilter {
    /// A filter that accepts every path
    pub fn all() -> Self {
        Self::default()
    }

    /// Compile a filter from an optional glob and a list of extensions
    ///
    /// In the glob, `*` stays within one path component; use `**` to cross
    /// directories.
    ///
    /// Extensions may be given with or without the leading dot (`"py"` and
    /// `".py"` are equivalent).
    pub fn new(glob: Option<&str>, extensions: &[String]) -> Result<Self, SearchError> {
        let glob = glob
            .map(|pattern| {
                GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map(|g| g.compile_matcher())
                    .map_err(|e| SearchError::InvalidPathFilter {
                        glob: pattern.to_string(),
                        reason: e.kind().to_string(),
                    })
            })
            .transpose()?;

        let extensions = extensions
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.')))
            .collect();

        Ok(Self { glob, extensions })
    }

    pub fn is_unrestricted(&self) -> bool {
        self.glob.is_none() && self.extensions.is_empty()
    }

    /// Check a single repository-relative path
    pub fn matches_path(&self, path: &str) -> bool {
        let glob_ok = self
            .glob
            .as_ref()
            .is_none_or(|matcher| matches_glob_suffix(matcher, path));
        let ext_ok =
            self.extensions.is_empty() || self.extensions.iter().any(|ext| path.ends_with(ext));
        glob_ok && ext_ok
    }

    /// Check a diff entry: either side of a rename may satisfy the filter
    pub fn accepts(&self, old_path: Option<&str>, new_path: Option<&str>) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        old_path.is_some_and(|p| self.matches_path(p))
            || new_path.is_some_and(|p| self.matches_path(p))
    }
}

/// Match against the full path, then against each trailing run of components,
/// so a relative pattern like `src/*.rs` also matches `crates/x/src/lib.rs`.
fn matches_glob_suffix(matcher: &GlobMatcher, path: &str) -> bool {
    let path = path.trim_start_matches('/');
    if matcher.is_match(path) {
        return true;
    }

    let parts: Vec<&str> = path.split('/').collect();
    (1..parts.len()).any(|i| matcher.is_match(parts[i..].join("/")))
}
