use crate::error::Result;
use crate::github::RepositorySearch;
use crate::types::{FetchParams, SearchResultBatch};

pub const REPOS_PER_PAGE: u32 = 10;
pub const MAX_PAGES: u32 = 10;

/// Number of pages the presentation layer may offer for a result count.
pub fn total_pages(total_repositories: u32) -> u32 {
    total_repositories.div_ceil(REPOS_PER_PAGE).min(MAX_PAGES)
}

/// Fetch the page of repositories described by `params`.
///
/// An empty or whitespace-only search query is rewritten to the viewer's own
/// repositories; anything else is scoped to repository names. The returned
/// batch carries the caller's query id so the store can reject it once a
/// newer query has been issued.
///
/// The remote search only paginates forward, so landing on page N means
/// advancing a cursor past the first (N-1)*10 results with a look-ahead call
/// before fetching the ten-result slice itself. Page 1 needs no cursor and
/// costs a single call.
pub async fn fetch_repositories<B: RepositorySearch + ?Sized>(
    backend: &B,
    params: FetchParams,
) -> Result<SearchResultBatch> {
    let trimmed = params.search_query.trim();
    let query = if trimmed.is_empty() {
        let login = backend.current_user_login().await?;
        format!("user:{}", login)
    } else {
        format!("{} in:name", trimmed)
    };

    let mut boundary_cursor = None;
    if params.current_page > 1 {
        let look_ahead = (params.current_page - 1).saturating_mul(REPOS_PER_PAGE);
        tracing::debug!(
            page = params.current_page,
            look_ahead,
            "advancing cursor to page boundary"
        );
        let boundary = backend.search_repositories(&query, look_ahead, None).await?;
        boundary_cursor = boundary.end_cursor;
    }

    let page = backend
        .search_repositories(&query, REPOS_PER_PAGE, boundary_cursor.as_deref())
        .await?;

    Ok(SearchResultBatch {
        repositories: page.repositories,
        total_repositories: page.repository_count,
        query_id: params.query_id,
    })
}
