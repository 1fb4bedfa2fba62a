use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Repository summary as returned by the search query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "stargazerCount")]
    pub stargazer_count: u32,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Detail view of a single repository, flattened from the node lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryInfo {
    pub name: String,
    pub stargazer_count: u32,
    pub updated_at: DateTime<Utc>,
    pub owner_nickname: String,
    pub owner_photo: String,
    pub owner_url: String,
    /// Language names in remote-reported prominence order, at most five.
    pub languages: Vec<String>,
    pub description: Option<String>,
}

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier minted once per fetch invocation.
///
/// Strictly increasing within the process, so the most recently minted id
/// always compares distinct from every superseded one. The store admits only
/// the batch carrying the id it last issued; everything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(u64);

impl QueryId {
    /// Mint a fresh identifier.
    pub fn next() -> Self {
        QueryId(NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Arguments for one invocation of the paginated search effect.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub search_query: String,
    pub current_page: u32,
    pub query_id: QueryId,
}

/// One page slice as returned by a single search call.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub repositories: Vec<Repository>,
    pub repository_count: u32,
    pub end_cursor: Option<String>,
}

/// Result of a fetch invocation, tagged with the id it was issued under.
#[derive(Debug, Clone)]
pub struct SearchResultBatch {
    pub repositories: Vec<Repository>,
    pub total_repositories: u32,
    pub query_id: QueryId,
}
