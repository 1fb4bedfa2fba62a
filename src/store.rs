use crate::types::{QueryId, Repository, SearchResultBatch};

/// Live search state: the current page, the visible result set, and the id
/// of the most recently issued query.
///
/// The store is mutated only through its transitions, and every transition
/// takes `&mut self`, so updates are atomic with respect to the surrounding
/// single-task execution. Staleness is handled at admission: a batch is
/// visible only while its query id is still the last one issued.
#[derive(Debug, Default)]
pub struct SearchStore {
    current_page: u32,
    last_query_id: Option<QueryId>,
    repositories: Vec<Repository>,
    total_repositories: u32,
}

impl SearchStore {
    pub fn new() -> Self {
        SearchStore {
            current_page: 1,
            last_query_id: None,
            repositories: Vec::new(),
            total_repositories: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn total_repositories(&self) -> u32 {
        self.total_repositories
    }

    /// Replace the current page. Does not trigger a fetch; dispatching a
    /// fetch for the new page is the caller's responsibility.
    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page;
    }

    /// Record `id` as the most recent query intent. Must be called before
    /// the corresponding fetch is dispatched.
    pub fn issue_query(&mut self, id: QueryId) {
        self.last_query_id = Some(id);
    }

    /// Admit a completed batch if it belongs to the last issued query.
    ///
    /// A batch carrying a superseded id is dropped without touching state,
    /// so completions may arrive in any order. Returns whether the batch
    /// was admitted.
    pub fn admit_result(&mut self, batch: SearchResultBatch) -> bool {
        if self.last_query_id != Some(batch.query_id) {
            tracing::debug!(stale = ?batch.query_id, last = ?self.last_query_id, "dropping stale batch");
            return false;
        }

        self.repositories = batch.repositories;
        self.total_repositories = batch.total_repositories;
        true
    }
}
