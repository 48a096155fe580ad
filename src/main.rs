//! GitHub search - command line entry point

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use tokio::runtime::Handle;

use github_search::{
    Config,
    domain::SearchResult,
    infrastructure::{FakeGitHubRepository, GitHubApiClient, GitHubRepository, SearchRepository},
    init_tracing,
    presentation::{ScreenState, Schedulers, SearchViewModel},
};

/// Search GitHub repositories
#[derive(Debug, Parser)]
#[command(name = "github-search", version)]
struct Cli {
    /// Search query, using GitHub search syntax
    query: String,

    /// Use the offline fake repository instead of the GitHub API
    #[arg(long)]
    fake: bool,

    /// Configuration file to load instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|_| {
            eprintln!("Failed to load configuration, using defaults");
            Config::default()
        }),
    };

    // Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!(
        build_date = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown"),
        git_sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        "Starting github-search {}",
        env!("CARGO_PKG_VERSION")
    );

    let repository: Arc<dyn SearchRepository> = if cli.fake {
        tracing::info!(
            results = config.fake.results_per_query,
            "Using fake repository"
        );
        Arc::new(FakeGitHubRepository::new(config.fake.results_per_query))
    } else {
        if config
            .github
            .token
            .as_deref()
            .map_or(true, |t| t.trim().is_empty())
        {
            tracing::info!("GitHub token not provided; unauthenticated search is rate limited");
        }
        let client = GitHubApiClient::from_config(&config.github)?;
        tracing::info!(base_url = client.base_url(), "Using GitHub repository");
        Arc::new(GitHubRepository::new(Arc::new(client)))
    };

    let (schedulers, mut main_loop) = Schedulers::background(Handle::current());
    let view_model = SearchViewModel::new(repository, Arc::new(schedulers));

    let state = view_model.subscribe_to_state();
    let observer = state.observe(render);

    view_model.search(&cli.query);
    while state.value().is_idle() {
        if !main_loop.run_next().await {
            break;
        }
    }
    state.remove_observer(observer);
    view_model.clear();

    Ok(match state.value() {
        ScreenState::Working(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn render(state: &ScreenState) {
    match state {
        ScreenState::Idle => {}
        ScreenState::Working(response) => {
            let items = response.items.as_deref().unwrap_or_default();
            println!(
                "Number of results: {}",
                response.total_count.unwrap_or_default()
            );
            for result in items {
                println!("{}", describe(result));
            }
        }
        ScreenState::Error(error) => eprintln!("Search failed: {error}"),
    }
}

fn describe(result: &SearchResult) -> String {
    let mut line = result.display_name();
    if result.private {
        line.push_str(" [private]");
    }
    if let Some(description) = result.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(" - ");
        line.push_str(description);
    }
    line
}
