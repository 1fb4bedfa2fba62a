use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use github_repo_search::error::{Result, SearchClientError};
use github_repo_search::github::RepositorySearch;
use github_repo_search::types::{Repository, SearchPage};

/// In-memory search backend with forward-only cursors, shaped like the
/// remote search connection: every call reports the full result count and a
/// cursor usable only to request the next contiguous slice.
pub struct FakeBackend {
    viewer_login: Option<String>,
    repositories: Vec<Repository>,
    queries: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

pub fn sample_repository(index: usize) -> Repository {
    Repository {
        id: format!("repo-{}", index),
        name: format!("repository-{}", index),
        url: format!("https://github.com/example/repository-{}", index),
        stargazer_count: index as u32,
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

impl FakeBackend {
    pub fn new(count: usize) -> Self {
        FakeBackend {
            viewer_login: Some("octocat".to_string()),
            repositories: (0..count).map(sample_repository).collect(),
            queries: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Simulate a missing session: viewer resolution fails.
    pub fn unauthenticated(mut self) -> Self {
        self.viewer_login = None;
        self
    }

    /// Delay every search call, for driving out-of-order completions.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every effective query string this backend has been asked to run.
    pub fn seen_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositorySearch for FakeBackend {
    async fn current_user_login(&self) -> Result<String> {
        self.viewer_login
            .clone()
            .ok_or_else(|| SearchClientError::Auth("no session".to_string()))
    }

    async fn search_repositories(
        &self,
        query: &str,
        first: u32,
        after: Option<&str>,
    ) -> Result<SearchPage> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.queries.lock().unwrap().push(query.to_string());

        let start = match after {
            None => 0,
            Some(cursor) => cursor
                .strip_prefix("cursor:")
                .and_then(|raw| raw.parse::<usize>().ok())
                .ok_or_else(|| {
                    SearchClientError::SearchFetch(format!("unknown cursor {}", cursor))
                })?,
        };

        let end = (start + first as usize).min(self.repositories.len());
        let repositories: Vec<Repository> = self
            .repositories
            .get(start..end)
            .map(|slice| slice.to_vec())
            .unwrap_or_default();
        let end_cursor = if repositories.is_empty() {
            None
        } else {
            Some(format!("cursor:{}", end))
        };

        Ok(SearchPage {
            repositories,
            repository_count: self.repositories.len() as u32,
            end_cursor,
        })
    }
}
