use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use gitlab_search_lib::{project_progress_bar, Args, Command, GitLabSearcher, SearchError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up GITLAB_URL / GITLAB_TOKEN from a local .env before parsing
    dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gitlab_search_lib=warn,gs=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let Command::Search(search) = args.command;

    let searcher = match GitLabSearcher::from_args(&search) {
        Ok(searcher) => searcher.with_progress(project_progress_bar()),
        Err(e) => {
            error!("failed to create gitlab client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // First Ctrl+C stops the run, a second one quits
    let cancel = searcher.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Shutdown requested, stopping the search");
            cancel.cancel();
        }
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    info!("Searching {} for '{}'", search.url, search.keyword);
    let mut stdout = std::io::stdout().lock();
    match searcher
        .run(&search.keyword, search.groups.as_deref(), &mut stdout)
        .await
    {
        Ok(_) => ExitCode::SUCCESS,
        Err(SearchError::Upstream { stage, source }) if source.is_rate_limited() => {
            error!("{}: {}", stage, source);
            error!("GitLab rejected the request rate, raise --delay and re-run");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
