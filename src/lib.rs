//! # GitLab Search
//!
//! A Rust library for searching every project of a set of GitLab groups for
//! a keyword, one project at a time, and printing a readable report.
//!
//! ## Main Components
//!
//! - [`GitLabSearcher`]: Drives a run: resolves groups, lists projects and
//!   searches them with a pause in between
//! - [`GitLab`]: The GitLab operations a run needs, implemented by
//!   [`GitLabClient`]
//! - [`ProjectSummary`]: The per-project outcome and its text rendering
//! - [`Args`]: Command line argument structure
//!
//! ## Example
//!
//! ```no_run
//! use gitlab_search_lib::{GitLabClient, GitLabSearcher, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = GitLabClient::new("https://gitlab.example.com", "glpat-...")?;
//!     let searcher = GitLabSearcher::new(client, SearchOptions::default());
//!
//!     let mut stdout = std::io::stdout();
//!     searcher.run("TODO", Some("12,34"), &mut stdout).await?;
//!
//!     Ok(())
//! }
//! ```

mod args;
mod error;
pub mod gitlab;
mod gitlab_searcher;
mod projects;
mod rate_limit;
mod report;
mod scope;

// Re-export main components for documentation and external use
pub use crate::args::{Args, Command, SearchArgs};
pub use crate::error::{SearchError, SearchResult, Stage};
pub use crate::gitlab::{Blob, GitLab, GitLabClient, GitLabError, GroupId, Project};
pub use crate::gitlab_searcher::{
    project_progress_bar, GitLabSearcher, RunSummary, SearchOptions, DEFAULT_MAX_RESULTS,
    MAX_DISPLAY_CAP,
};
pub use crate::projects::list_projects;
pub use crate::rate_limit::{Interrupted, RequestPacer, DEFAULT_DELAY};
pub use crate::report::{normalize_hit_text, ProjectSummary};
pub use crate::scope::{parse_group_ids, resolve_groups};
