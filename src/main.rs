mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use colored::*;
use github_repo_search::github::GitHubClient;
use github_repo_search::persist::{self, FileSession, PersistedSearchState};
use github_repo_search::search::{fetch_repositories, total_pages};
use github_repo_search::store::SearchStore;
use github_repo_search::types::{FetchParams, QueryId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let client = GitHubClient::with_endpoint(cli.token.clone(), &cli.endpoint)
        .context("Failed to create GitHub client")?;

    if let Some(repository_id) = &cli.repository {
        show_repository(&client, repository_id).await;
        return Ok(());
    }

    let mut session = FileSession::new(&cli.session_file);
    let persisted = persist::load(&session);

    // An explicit --query starts over on page 1, the way typing in the
    // search box does; otherwise the persisted session is resumed.
    let search_query = match &cli.query {
        Some(query) => query.clone(),
        None => persisted.search_query.clone(),
    };
    let current_page = match (&cli.query, cli.page) {
        (_, Some(page)) => page.max(1),
        (Some(_), None) => 1,
        (None, None) => persisted.current_page,
    };

    let mut store = SearchStore::new();
    store.set_current_page(current_page);

    let query_id = QueryId::next();
    store.issue_query(query_id);

    println!("{}", "GitHub Repository Search".bold().green());
    if search_query.trim().is_empty() {
        println!("{}\n", "Listing your repositories".dimmed());
    } else {
        println!("{} {}\n", "Searching for".dimmed(), search_query.trim().bold());
    }

    let batch = match fetch_repositories(
        &client,
        FetchParams {
            search_query: search_query.clone(),
            current_page,
            query_id,
        },
    )
    .await
    {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("{} {}", "Failed to load repositories:".red(), e);
            std::process::exit(1);
        }
    };

    if store.admit_result(batch) {
        persist::save_best_effort(
            &mut session,
            &PersistedSearchState {
                search_query,
                current_page,
            },
        );
    }

    render_results(&store);
    Ok(())
}

fn render_results(store: &SearchStore) {
    if store.repositories().is_empty() {
        println!("{}", "Nothing found".yellow());
        return;
    }

    for repo in store.repositories() {
        println!(
            "{}  {} stars  updated {}  {}",
            repo.name.bold(),
            repo.stargazer_count,
            repo.updated_at.format("%Y-%m-%d"),
            repo.url.blue()
        );
        println!("    id: {}", repo.id.dimmed());
    }

    println!(
        "\n{} repositories, page {} of {}",
        store.total_repositories(),
        store.current_page(),
        total_pages(store.total_repositories())
    );
}

async fn show_repository(client: &GitHubClient, repository_id: &str) {
    let info = match client.repository_info(repository_id).await {
        Ok(info) => info,
        Err(e) => {
            eprintln!("{} {}", "Failed to load repository info:".red(), e);
            std::process::exit(1);
        }
    };

    println!(
        "{} - {} stars - updated {}",
        info.name.bold().green(),
        info.stargazer_count,
        info.updated_at.format("%Y-%m-%d")
    );
    println!("{} ({})", info.owner_nickname, info.owner_url.blue());
    if !info.languages.is_empty() {
        println!("Languages: {}", info.languages.join(", "));
    }
    if let Some(description) = &info.description {
        println!("{}", description);
    }
}
