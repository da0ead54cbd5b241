use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a search pattern is matched against
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Match the regex against the full commit message
    #[default]
    Message,
    /// Match the regex against lines added or removed by the commit's diff
    Content,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Message => f.write_str("message"),
            SearchMode::Content => f.write_str("content"),
        }
    }
}

/// Request to search recent git history
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Extended regex pattern to search for
    pub regex: String,
    /// Path to git repository (defaults to the server's configured path, usually ".")
    #[serde(default)]
    pub repo_path: Option<String>,
    /// Match against commit messages ("message") or diff content ("content")
    #[serde(default)]
    pub mode: SearchMode,
    /// Glob pattern restricting which changed files are shown (e.g. "**/*.py")
    #[serde(default)]
    pub file_glob: Option<String>,
    /// File extensions restricting which changed files are shown (e.g. [".py", "rs"])
    #[serde(default)]
    pub file_extensions: Vec<String>,
    /// Maximum character limit of the returned text (default 1000)
    #[serde(default)]
    pub max_chars: Option<usize>,
}

/// Request for the fixed-mode search tools
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FixedModeSearchRequest {
    /// Extended regex pattern to search for
    pub regex: String,
    /// Path to git repository (defaults to the server's configured path, usually ".")
    #[serde(default)]
    pub repo_path: Option<String>,
    /// Glob pattern restricting which changed files are shown (e.g. "**/*.py")
    #[serde(default)]
    pub file_glob: Option<String>,
    /// File extensions restricting which changed files are shown (e.g. [".py", "rs"])
    #[serde(default)]
    pub file_extensions: Vec<String>,
    /// Maximum character limit of the returned text (default 1000)
    #[serde(default)]
    pub max_chars: Option<usize>,
}

impl FixedModeSearchRequest {
    pub fn with_mode(self, mode: SearchMode) -> SearchRequest {
        SearchRequest {
            regex: self.regex,
            repo_path: self.repo_path,
            mode,
            file_glob: self.file_glob,
            file_extensions: self.file_extensions,
            max_chars: self.max_chars,
        }
    }
}

impl SearchRequest {
    /// Create a message-mode request with every optional field unset
    pub fn new(regex: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            repo_path: None,
            mode: SearchMode::default(),
            file_glob: None,
            file_extensions: Vec::new(),
            max_chars: None,
        }
    }

    /// Reject requests that cannot be searched before touching the repository
    pub fn validate(&self) -> Result<(), String> {
        if self.regex.is_empty() {
            return Err("regex must not be empty".to_string());
        }
        if let Some(glob) = &self.file_glob
            && glob.trim().is_empty()
        {
            return Err("file_glob must not be blank when provided".to_string());
        }
        if self.file_extensions.iter().any(|ext| ext.trim_matches('.').is_empty()) {
            return Err("file_extensions must not contain empty entries".to_string());
        }
        Ok(())
    }
}
