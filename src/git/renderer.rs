use crate::error::SearchError;
use crate::git::diff::{commit_diff, diff_entries};
use crate::git::filter::PathFilter;
use crate::git::selector::CommitRecord;
use git2::Repository;

/// Width of the dashed line closing every commit block
pub const SEPARATOR_WIDTH: usize = 80;

/// Renders a selected commit as a header plus its path-filtered patch
pub struct DiffRenderer<'a> {
    repo: &'a Repository,
    filter: &'a PathFilter,
    context_lines: u32,
}

impl<'a> DiffRenderer<'a> {
    pub fn new(repo: &'a Repository, filter: &'a PathFilter, context_lines: u32) -> Self {
        Self {
            repo,
            filter,
            context_lines,
        }
    }

    /// Render one commit block, separator included
    pub fn render(&self, record: &CommitRecord) -> Result<String, SearchError> {
        let commit = self.repo.find_commit(record.id)?;
        let diff = commit_diff(self.repo, &commit, self.context_lines)?;

        let mut block = render_header(record);
        block.push_str("Diff:\n");

        let mut shown = 0usize;
        for entry in diff_entries(&diff)? {
            if !entry.has_body()
                || !self
                    .filter
                    .accepts(entry.old_path.as_deref(), entry.new_path.as_deref())
            {
                continue;
            }
            block.push_str(&entry.patch_text());
            shown += 1;
        }

        tracing::debug!("Rendered commit {} with {} file(s)", record.short_hash(), shown);

        block.push_str(&"-".repeat(SEPARATOR_WIDTH));
        block.push_str("\n\n");
        Ok(block)
    }
}

/// `Commit:`/`Author:`/`Date:`/`Message:` lines for a commit
pub fn render_header(record: &CommitRecord) -> String {
    format!(
        "Commit: {}\nAuthor: {}\nDate: {}\nMessage: {}\n",
        record.short_hash(),
        record.author,
        record.date,
        record.message
    )
}
