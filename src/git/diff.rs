//! Commit-vs-parent diff extraction shared by the selector and the renderer

use git2::{Commit, Delta, Diff, DiffFindOptions, DiffOptions, Patch, Repository};
use regex::Regex;
use std::borrow::Cow;

/// One changed file of a commit-vs-parent comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// Path before the change; `None` for added files
    pub old_path: Option<String>,
    /// Path after the change; `None` for deleted files
    pub new_path: Option<String>,
    /// Unified patch text: file header lines followed by hunks
    pub patch: Vec<u8>,
}

impl DiffEntry {
    /// A pure rename, mode change or binary file has no hunks and thus no body
    pub fn has_body(&self) -> bool {
        !self.patch.is_empty()
    }

    /// Patch text with invalid UTF-8 replaced by U+FFFD
    pub fn patch_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.patch)
    }
}

/// Diff `commit` against its first parent, or against the empty tree for a root commit
pub fn commit_diff<'repo>(
    repo: &'repo Repository,
    commit: &Commit<'_>,
    context_lines: u32,
) -> Result<Diff<'repo>, git2::Error> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };

    let mut diff_opts = DiffOptions::new();
    diff_opts
        .context_lines(context_lines)
        .interhunk_lines(0)
        .ignore_whitespace(false);

    let mut diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))?;
    diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;
    Ok(diff)
}

/// Split a diff into per-file entries, in the order libgit2 produces them
pub fn diff_entries(diff: &Diff<'_>) -> Result<Vec<DiffEntry>, git2::Error> {
    let mut entries = Vec::with_capacity(diff.deltas().len());

    for idx in 0..diff.deltas().len() {
        let Some(delta) = diff.get_delta(idx) else {
            continue;
        };
        let status = delta.status();
        let old_path = (status != Delta::Added)
            .then(|| delta.old_file().path().map(|p| p.to_string_lossy().into_owned()))
            .flatten();
        let new_path = (status != Delta::Deleted)
            .then(|| delta.new_file().path().map(|p| p.to_string_lossy().into_owned()))
            .flatten();

        let patch = match Patch::from_diff(diff, idx)? {
            Some(patch) => patch_body(&patch, old_path.as_deref(), new_path.as_deref())?,
            None => Vec::new(),
        };

        entries.push(DiffEntry {
            old_path,
            new_path,
            patch,
        });
    }

    Ok(entries)
}

/// Pickaxe check: does any added or removed line of the diff match `regex`?
///
/// Binary files contribute no lines and therefore never match.
pub fn changed_lines_match(diff: &Diff<'_>, regex: &Regex) -> Result<bool, git2::Error> {
    for idx in 0..diff.deltas().len() {
        let Some(patch) = Patch::from_diff(diff, idx)? else {
            continue;
        };
        for hunk_idx in 0..patch.num_hunks() {
            for line_idx in 0..patch.num_lines_in_hunk(hunk_idx)? {
                let line = patch.line_in_hunk(hunk_idx, line_idx)?;
                if !matches!(line.origin(), '+' | '-') {
                    continue;
                }
                let content = String::from_utf8_lossy(line.content());
                if regex.is_match(content.trim_end_matches(['\n', '\r'])) {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}

fn patch_body(
    patch: &Patch<'_>,
    old_path: Option<&str>,
    new_path: Option<&str>,
) -> Result<Vec<u8>, git2::Error> {
    let mut body = Vec::new();
    if patch.num_hunks() == 0 {
        return Ok(body);
    }

    match old_path {
        Some(path) => body.extend_from_slice(format!("--- a/{}\n", path).as_bytes()),
        None => body.extend_from_slice(b"--- /dev/null\n"),
    }
    match new_path {
        Some(path) => body.extend_from_slice(format!("+++ b/{}\n", path).as_bytes()),
        None => body.extend_from_slice(b"+++ /dev/null\n"),
    }

    for hunk_idx in 0..patch.num_hunks() {
        let (hunk, line_count) = patch.hunk(hunk_idx)?;
        body.extend_from_slice(hunk.header());

        for line_idx in 0..line_count {
            let line = patch.line_in_hunk(hunk_idx, line_idx)?;
            match line.origin() {
                origin @ ('+' | '-' | ' ') => {
                    body.push(origin as u8);
                    body.extend_from_slice(line.content());
                }
                // "\ No newline at end of file" markers carry their own text
                '=' | '>' | '<' => body.extend_from_slice(line.content()),
                _ => {}
            }
        }
    }

    Ok(body)
}
