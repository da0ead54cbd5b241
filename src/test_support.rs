//! Throwaway git repositories for unit tests
//!
//! Commits get a fixed author and a clock that advances one minute per commit
//! starting at 2024-01-01T00:00:00Z (+01:00), so output is deterministic.

use git2::{Oid, Repository, Signature, Time};
use std::cell::Cell;
use std::path::Path;
use tempfile::TempDir;

const START_SECONDS: i64 = 1_704_067_200;

pub struct TestRepo {
    pub repo: Repository,
    pub dir: TempDir,
    clock: Cell<i64>,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self {
            dir,
            repo,
            clock: Cell::new(START_SECONDS),
        }
    }

    pub fn path_str(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }

    /// Write text files into the work tree and commit them
    pub fn commit(&self, message: &str, files: &[(&str, &str)]) -> Oid {
        for (path, content) in files {
            self.write(path, content.as_bytes());
        }
        self.commit_index(message)
    }

    /// Write a single file with arbitrary bytes and commit it
    pub fn commit_bytes(&self, message: &str, path: &str, bytes: &[u8]) -> Oid {
        self.write(path, bytes);
        self.commit_index(message)
    }

    /// Move a file without changing its content and commit the rename
    pub fn rename(&self, message: &str, from: &str, to: &str) -> Oid {
        let root = self.dir.path();
        std::fs::rename(root.join(from), root.join(to)).unwrap();

        let mut index = self.repo.index().unwrap();
        index.remove_path(Path::new(from)).unwrap();
        index.add_path(Path::new(to)).unwrap();
        index.write().unwrap();
        self.commit_index(message)
    }

    /// Commit the current tree on top of `parent` without moving HEAD
    pub fn side_commit(&self, message: &str, parent: Oid) -> Oid {
        let parent = self.repo.find_commit(parent).unwrap();
        let tree = parent.tree().unwrap();
        self.commit_tree(None, message, &tree, &[&parent])
    }

    /// Write files and commit them with HEAD as first parent and `other` as second
    pub fn merge(&self, message: &str, files: &[(&str, &str)], other: Oid) -> Oid {
        for (path, content) in files {
            self.write(path, content.as_bytes());
        }
        let tree_id = self.repo.index().unwrap().write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        let other = self.repo.find_commit(other).unwrap();
        self.commit_tree(Some("HEAD"), message, &tree, &[&head, &other])
    }

    fn write(&self, path: &str, bytes: &[u8]) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, bytes).unwrap();

        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(path)).unwrap();
        index.write().unwrap();
    }

    fn commit_index(&self, message: &str) -> Oid {
        let mut index = self.repo.index().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.commit_tree(Some("HEAD"), message, &tree, &parents)
    }

    fn commit_tree(
        &self,
        update_ref: Option<&str>,
        message: &str,
        tree: &git2::Tree<'_>,
        parents: &[&git2::Commit<'_>],
    ) -> Oid {
        let seconds = self.clock.get();
        self.clock.set(seconds + 60);
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 60)).unwrap();

        self.repo
            .commit(update_ref, &sig, &sig, message, tree, parents)
            .unwrap()
    }
}
