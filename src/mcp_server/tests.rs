use super::*;
use crate::config::SearchConfig;
use crate::test_support::TestRepo;

fn server_for(repo: &TestRepo) -> GitSearchMcpServer {
    GitSearchMcpServer::with_config(Config {
        search: SearchConfig {
            default_repo_path: repo.path_str(),
            ..SearchConfig::default()
        },
    })
}

fn sample_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.commit("init", &[("a.txt", "hello\n")]);
    repo.commit("feat: add parameter x", &[("lib.py", "def f(x):\n    return x\n")]);
    repo
}

#[test]
fn test_get_info() {
    let server = GitSearchMcpServer::with_config(Config::default());

    let info = server.get_info();

    assert_eq!(info.server_info.name, "git-search-mcp");
    assert!(info.server_info.title.is_some());
    assert!(info.instructions.is_some());
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.prompts.is_none());
}

#[test]
fn test_tools_are_registered() {
    let server = GitSearchMcpServer::with_config(Config::default());

    let names: Vec<String> = server
        .tool_router
        .list_all()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();

    assert!(names.contains(&"search".to_string()));
    assert!(names.contains(&"search_git_diffs_by_msg".to_string()));
    assert!(names.contains(&"search_git_diff_by_content".to_string()));
}

#[tokio::test]
async fn test_search_tool_uses_configured_repo() {
    let repo = sample_repo();
    let server = server_for(&repo);

    let result = server
        .search(Parameters(SearchRequest::new("add parameter")))
        .await
        .unwrap();

    assert!(result.starts_with("Found 1 commits matching pattern 'add parameter'"));
    assert!(result.contains("Message: feat: add parameter x\n"));
}

#[tokio::test]
async fn test_search_tool_error_prefix() {
    let repo = sample_repo();
    let server = server_for(&repo);

    let err = server
        .search(Parameters(SearchRequest::new("(unclosed")))
        .await
        .unwrap_err();

    assert!(err.starts_with("Error: Invalid regex pattern"));
}

#[tokio::test]
async fn test_search_tool_invalid_repo() {
    let server = GitSearchMcpServer::with_config(Config::default());
    let req = SearchRequest {
        repo_path: Some("/nonexistent/path/12345".to_string()),
        ..SearchRequest::new("x")
    };

    let err = server.search(Parameters(req)).await.unwrap_err();
    assert!(err.starts_with("Error: Invalid git repository"));
}

#[tokio::test]
async fn test_fixed_mode_tools() {
    let repo = sample_repo();
    let server = server_for(&repo);
    let req = FixedModeSearchRequest {
        regex: r"return x".to_string(),
        repo_path: None,
        file_glob: Some("**/*.py".to_string()),
        file_extensions: vec![],
        max_chars: Some(10_000),
    };

    let by_msg = server
        .search_git_diffs_by_msg(Parameters(req.clone()))
        .await
        .unwrap();
    assert_eq!(by_msg, "No commits found matching pattern 'return x'");

    let by_content = server
        .search_git_diff_by_content(Parameters(req))
        .await
        .unwrap();
    assert!(by_content.starts_with("Found 1 commits with diff content matching pattern 'return x'"));
    assert!(by_content.contains("+++ b/lib.py"));
}

#[tokio::test]
async fn test_concurrent_searches_are_independent() {
    let repo = sample_repo();
    let server = server_for(&repo);

    let (a, b) = tokio::join!(
        server.run_search(SearchRequest::new("init")),
        server.run_search(SearchRequest::new("init")),
    );

    assert_eq!(a.unwrap(), b.unwrap());
}
