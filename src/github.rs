use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::error::{Result, SearchClientError};
use crate::types::{Repository, RepositoryInfo, SearchPage};

const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const VIEWER_QUERY: &str = r#"
query {
  viewer {
    login
  }
}
"#;

const SEARCH_REPOSITORIES_QUERY: &str = r#"
query searchRepositories($query: String!, $first: Int!, $after: String) {
  search(query: $query, type: REPOSITORY, first: $first, after: $after) {
    repositoryCount
    edges {
      node {
        ... on Repository {
          name
          id
          url
          stargazerCount
          updatedAt
        }
      }
    }
    pageInfo {
      endCursor
    }
  }
}
"#;

const REPOSITORY_INFO_QUERY: &str = r#"
query GetRepositoryInfo($id: ID!) {
  node(id: $id) {
    ... on Repository {
      name
      stargazerCount
      updatedAt
      owner {
        login
        avatarUrl
      }
      languages(first: 5) {
        edges {
          node {
            name
          }
        }
      }
      description
    }
  }
}
"#;

/// The two remote operations the paginated search effect is built on.
///
/// `GitHubClient` is the production implementation; tests drive the
/// pagination protocol against an in-memory one.
#[async_trait]
pub trait RepositorySearch {
    /// Resolve the login handle of the authenticated viewer.
    async fn current_user_login(&self) -> Result<String>;

    /// Execute one search call: up to `first` repositories after `after`.
    async fn search_repositories(
        &self,
        query: &str,
        first: u32,
        after: Option<&str>,
    ) -> Result<SearchPage>;
}

#[derive(Debug)]
pub struct GitHubClient {
    client: Client,
    token: String,
    endpoint: Url,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self> {
        Self::with_endpoint(token, GRAPHQL_ENDPOINT)
    }

    /// Create a client against a non-default GraphQL endpoint.
    pub fn with_endpoint(token: String, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| SearchClientError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        let client = Client::builder()
            .user_agent("GitHub Repository Search/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            client,
            token,
            endpoint,
        })
    }

    /// POST one GraphQL operation and decode the `{data, errors}` envelope.
    ///
    /// Errors come back as a plain description so each operation can wrap
    /// them in its own failure kind.
    async fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> std::result::Result<T, String> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("bearer {}", self.token))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, body));
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| format!("malformed response: {}", e))?;

        if let Some(error) = envelope.errors.first() {
            return Err(format!("GraphQL error: {}", error.message));
        }

        envelope
            .data
            .ok_or_else(|| "response carried no data".to_string())
    }

    pub async fn current_user_login(&self) -> Result<String> {
        tracing::debug!("resolving current viewer login");

        let data: ViewerData = self
            .post_graphql(VIEWER_QUERY, json!({}))
            .await
            .map_err(SearchClientError::Auth)?;

        Ok(data.viewer.login)
    }

    pub async fn search_repositories(
        &self,
        query: &str,
        first: u32,
        after: Option<&str>,
    ) -> Result<SearchPage> {
        tracing::debug!(query, first, after = after.unwrap_or(""), "searching repositories");

        let variables = json!({ "query": query, "first": first, "after": after });
        let data: SearchData = self
            .post_graphql(SEARCH_REPOSITORIES_QUERY, variables)
            .await
            .map_err(SearchClientError::SearchFetch)?;

        let search = data.search;
        Ok(SearchPage {
            repositories: search.edges.into_iter().map(|edge| edge.node).collect(),
            repository_count: search.repository_count,
            end_cursor: search.page_info.end_cursor,
        })
    }

    /// Fetch the detail record for a repository by its opaque node id.
    pub async fn repository_info(&self, repository_id: &str) -> Result<RepositoryInfo> {
        let data: NodeData = self
            .post_graphql(REPOSITORY_INFO_QUERY, json!({ "id": repository_id }))
            .await
            .map_err(SearchClientError::DetailFetch)?;

        let node = data.node.ok_or_else(|| {
            SearchClientError::DetailFetch(format!("no node found for id {}", repository_id))
        })?;

        let repository: RepositoryNode = serde_json::from_value(node).map_err(|e| {
            SearchClientError::DetailFetch(format!(
                "id {} does not resolve to a repository: {}",
                repository_id, e
            ))
        })?;

        Ok(repository.into())
    }
}

#[async_trait]
impl RepositorySearch for GitHubClient {
    async fn current_user_login(&self) -> Result<String> {
        GitHubClient::current_user_login(self).await
    }

    async fn search_repositories(
        &self,
        query: &str,
        first: u32,
        after: Option<&str>,
    ) -> Result<SearchPage> {
        GitHubClient::search_repositories(self, query, first, after).await
    }
}

// GraphQL wire format.

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    login: String,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    search: SearchConnection,
}

#[derive(Debug, Deserialize)]
struct SearchConnection {
    #[serde(rename = "repositoryCount")]
    repository_count: u32,
    edges: Vec<SearchEdge>,
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct SearchEdge {
    node: Repository,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(rename = "endCursor")]
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NodeData {
    node: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    name: String,
    #[serde(rename = "stargazerCount")]
    stargazer_count: u32,
    #[serde(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
    owner: RepositoryOwner,
    languages: LanguageConnection,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositoryOwner {
    login: String,
    #[serde(rename = "avatarUrl")]
    avatar_url: String,
}

#[derive(Debug, Deserialize)]
struct LanguageConnection {
    edges: Vec<LanguageEdge>,
}

#[derive(Debug, Deserialize)]
struct LanguageEdge {
    node: LanguageNode,
}

#[derive(Debug, Deserialize)]
struct LanguageNode {
    name: String,
}

impl From<RepositoryNode> for RepositoryInfo {
    fn from(node: RepositoryNode) -> Self {
        RepositoryInfo {
            name: node.name,
            stargazer_count: node.stargazer_count,
            updated_at: node.updated_at,
            owner_url: format!("https://github.com/{}", node.owner.login),
            owner_photo: node.owner.avatar_url,
            owner_nickname: node.owner.login,
            languages: node
                .languages
                .edges
                .into_iter()
                .map(|edge| edge.node.name)
                .collect(),
            description: node.description,
        }
    }
}
