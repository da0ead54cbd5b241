//! Shared fixture: a git repository in a temp dir with deterministic commits
//!
//! Mirrors the crate's unit-test repository: author "Test User", a clock that
//! starts at 2024-01-01T00:00:00Z and advances one minute per commit, and a
//! +01:00 offset on every signature.

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
        let dir = TempDir::new().expect("Should create temp dir");
        let repo = Repository::init(dir.path()).expect("Should init repository");
        Self {
            dir,
            repo,
            clock: Cell::new(START_SECONDS),
        }
    }

    pub fn path_str(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }

    pub fn commit(&self, message: &str, files: &[(&str, &str)]) -> Oid {
        let mut index = self.repo.index().unwrap();
        for (name, content) in files {
            let full = self.dir.path().join(name);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&full, content).unwrap();
            index.add_path(Path::new(name)).unwrap();
        }
        index.write().unwrap();

        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let seconds = self.clock.get();
        self.clock.set(seconds + 60);
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 60)).unwrap();

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }
}

pub fn short(oid: Oid) -> String {
    oid.to_string()[..8].to_string()
}
