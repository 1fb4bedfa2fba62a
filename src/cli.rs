use clap::Parser;

#[derive(Parser)]
#[command(name = "github-repo-search")]
#[command(about = "Search GitHub repositories from the terminal, ten per page")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub token for the GraphQL API
    #[arg(long, env = "GITHUB_TOKEN")]
    pub token: String,

    /// GraphQL endpoint to query
    #[arg(
        long,
        env = "GITHUB_GRAPHQL_URL",
        default_value = "https://api.github.com/graphql"
    )]
    pub endpoint: String,

    /// Search text; when omitted the persisted query is reused, and an empty
    /// query lists the authenticated user's own repositories
    #[arg(long)]
    pub query: Option<String>,

    /// Page to fetch, 1-based
    #[arg(long)]
    pub page: Option<u32>,

    /// Show the detail view for a repository id instead of searching
    #[arg(long)]
    pub repository: Option<String>,

    /// File holding the persisted search session
    #[arg(long, env = "SESSION_FILE", default_value = ".github-repo-search.json")]
    pub session_file: String,
}
