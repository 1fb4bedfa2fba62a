use github_repo_search::error::SearchClientError;
use github_repo_search::github::GitHubClient;
use github_repo_search::search::{fetch_repositories, REPOS_PER_PAGE};
use github_repo_search::types::{FetchParams, QueryId};

fn get_test_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN").ok()
}

#[tokio::test]
async fn test_github_client_creation() {
    let client = GitHubClient::new("test_token".to_string());
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_invalid_endpoint_rejected() {
    let client = GitHubClient::with_endpoint("test_token".to_string(), "::not a url::");
    assert!(matches!(
        client.unwrap_err(),
        SearchClientError::InvalidEndpoint(_)
    ));
}

#[tokio::test]
#[ignore = "Requires valid GitHub token"]
async fn test_current_user_login() {
    let token = get_test_token().expect("GITHUB_TOKEN not set");
    let client = GitHubClient::new(token).expect("Failed to create client");

    let login = client
        .current_user_login()
        .await
        .expect("Failed to resolve viewer");
    assert!(!login.is_empty());
}

#[tokio::test]
#[ignore = "Requires valid GitHub token"]
async fn test_search_repositories_first_page() {
    let token = get_test_token().expect("GITHUB_TOKEN not set");
    let client = GitHubClient::new(token).expect("Failed to create client");

    let page = client
        .search_repositories("rust in:name", 10, None)
        .await
        .expect("Failed to search repositories");

    assert_eq!(page.repositories.len(), 10);
    assert!(page.repository_count > 10);
    assert!(page.end_cursor.is_some());

    for repo in &page.repositories {
        assert!(!repo.id.is_empty());
        assert!(!repo.name.is_empty());
        assert!(!repo.url.is_empty());
    }
}

#[tokio::test]
#[ignore = "Requires valid GitHub token"]
async fn test_fetch_second_page_is_disjoint_from_first() {
    let token = get_test_token().expect("GITHUB_TOKEN not set");
    let client = GitHubClient::new(token).expect("Failed to create client");

    let first = fetch_repositories(
        &client,
        FetchParams {
            search_query: "rust".to_string(),
            current_page: 1,
            query_id: QueryId::next(),
        },
    )
    .await
    .expect("Failed to fetch page 1");

    let second = fetch_repositories(
        &client,
        FetchParams {
            search_query: "rust".to_string(),
            current_page: 2,
            query_id: QueryId::next(),
        },
    )
    .await
    .expect("Failed to fetch page 2");

    assert_eq!(first.repositories.len(), REPOS_PER_PAGE as usize);
    assert_eq!(second.repositories.len(), REPOS_PER_PAGE as usize);

    let mut seen_ids = std::collections::HashSet::new();
    for repo in first.repositories.iter().chain(second.repositories.iter()) {
        assert!(seen_ids.insert(repo.id.clone()), "Found duplicate repository ID: {}", repo.id);
    }
}

#[tokio::test]
#[ignore = "Requires valid GitHub token"]
async fn test_repository_info() {
    let token = get_test_token().expect("GITHUB_TOKEN not set");
    let client = GitHubClient::new(token).expect("Failed to create client");

    // Look a repository up through search so the node id is real
    let page = client
        .search_repositories("repo:rust-lang/rust", 1, None)
        .await
        .expect("Failed to search repositories");
    let id = &page.repositories[0].id;

    let info = client
        .repository_info(id)
        .await
        .expect("Failed to fetch repository info");

    assert_eq!(info.name, "rust");
    assert_eq!(info.owner_nickname, "rust-lang");
    assert_eq!(info.owner_url, "https://github.com/rust-lang");
    assert!(info.stargazer_count > 0);
    assert!(info.languages.len() <= 5);
}

#[tokio::test]
#[ignore = "Requires valid GitHub token"]
async fn test_repository_info_unknown_id() {
    let token = get_test_token().expect("GITHUB_TOKEN not set");
    let client = GitHubClient::new(token).expect("Failed to create client");

    let result = client.repository_info("not-a-node-id").await;

    assert!(result.is_err());
    match result.unwrap_err() {
        SearchClientError::DetailFetch(_) => {} // Expected
        other => panic!("Expected DetailFetch error, got: {:?}", other),
    }
}
