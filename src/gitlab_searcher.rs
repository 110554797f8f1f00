use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::args::SearchArgs;
use crate::error::{SearchError, SearchResult, Stage};
use crate::gitlab::{GitLab, GitLabClient, GitLabError, Project, MAX_PER_PAGE};
use crate::projects::list_projects;
use crate::rate_limit::{RequestPacer, DEFAULT_DELAY};
use crate::report::ProjectSummary;
use crate::scope::resolve_groups;

/// Default number of hits shown per project.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Largest usable display cap. The `cap + 1` probe has to fit in a single
/// GitLab page or truncation goes unnoticed.
pub const MAX_DISPLAY_CAP: usize = MAX_PER_PAGE as usize - 1;

/// Knobs for a search run.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Hits shown per project. GitLab is asked for one more to detect
    /// truncation.
    pub max_results: usize,
    /// Pause between two project searches.
    pub delay: Duration,
    /// Page size when listing group projects.
    pub per_page: u32,
    /// Drop archived projects before searching.
    pub skip_archived: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            delay: DEFAULT_DELAY,
            per_page: MAX_PER_PAGE,
            skip_archived: false,
        }
    }
}

impl From<&SearchArgs> for SearchOptions {
    fn from(args: &SearchArgs) -> Self {
        Self {
            max_results: args.max_results as usize,
            delay: Duration::from_secs(args.delay),
            per_page: args.per_page,
            skip_archived: args.skip_archived,
        }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub groups: usize,
    pub projects: usize,
    pub searched: usize,
    pub with_results: usize,
}

pub struct GitLabSearcher<G> {
    gitlab: G,
    options: SearchOptions,
    pacer: RequestPacer,
    progress: ProgressBar,
    cancel: CancellationToken,
}

impl GitLabSearcher<GitLabClient> {
    /// Build a searcher talking to the instance named in `args`.
    pub fn from_args(args: &SearchArgs) -> Result<Self, GitLabError> {
        let client = GitLabClient::new(&args.url, &args.token)?;
        Ok(Self::new(client, SearchOptions::from(args)))
    }
}

impl<G: GitLab> GitLabSearcher<G> {
    /// Create a new searcher. Progress output is hidden until
    /// [`with_progress`](Self::with_progress) is used.
    ///
    /// `max_results` is clamped to `1..=MAX_DISPLAY_CAP`.
    pub fn new(gitlab: G, mut options: SearchOptions) -> Self {
        let cap = options.max_results.clamp(1, MAX_DISPLAY_CAP);
        if cap != options.max_results {
            warn!(
                "max_results {} is outside 1..={}, using {}",
                options.max_results, MAX_DISPLAY_CAP, cap
            );
            options.max_results = cap;
        }

        let pacer = RequestPacer::new(options.delay);
        Self {
            gitlab,
            options,
            pacer,
            progress: ProgressBar::hidden(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Token that stops the run at the next project or pause.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Search one project, asking for one hit more than the display cap.
    pub async fn search_project(
        &self,
        project: &Project,
        keyword: &str,
    ) -> SearchResult<ProjectSummary> {
        let cap = self.options.max_results;
        let limit = cap
            .checked_add(1)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(MAX_PER_PAGE);

        let hits = self
            .gitlab
            .search_blobs(project.id, keyword, limit)
            .await
            .map_err(|e| {
                SearchError::upstream(
                    Stage::Search {
                        project: project.name.clone(),
                    },
                    e,
                )
            })?;

        debug!("Project [{}] returned {} hits", project.name, hits.len());
        Ok(ProjectSummary::new(project.name.clone(), hits, cap))
    }

    /// Resolve groups, list their projects and search each one in turn,
    /// writing the report to `out` as projects complete.
    ///
    /// The first GitLab failure ends the run; whatever was already written
    /// stays in `out`.
    pub async fn run<W: Write + ?Sized>(
        &self,
        keyword: &str,
        groups: Option<&str>,
        out: &mut W,
    ) -> SearchResult<RunSummary> {
        let spec = groups.filter(|s| !s.is_empty());
        writeln!(out, "Keyword: [{}]", keyword)?;
        writeln!(out, "Groups: [{}]", spec.unwrap_or("all visible groups"))?;

        let group_ids = resolve_groups(&self.gitlab, spec).await?;
        writeln!(out, "There are [{}] groups", group_ids.len())?;

        let mut projects = list_projects(&self.gitlab, &group_ids, self.options.per_page).await?;
        if self.options.skip_archived {
            let before = projects.len();
            projects.retain(|p| !p.archived);
            info!("Skipping {} archived projects", before - projects.len());
        }
        write!(out, "There are [{}] projects\n\n", projects.len())?;
        out.flush()?;

        let mut summary = RunSummary {
            groups: group_ids.len(),
            projects: projects.len(),
            ..RunSummary::default()
        };

        self.progress.set_length(projects.len() as u64);
        let result = self.search_all(&projects, keyword, out, &mut summary).await;
        self.progress.finish_and_clear();

        if let Err(SearchError::Cancelled) = &result {
            warn!(
                "Search cancelled after {} of {} projects",
                summary.searched, summary.projects
            );
        }
        result?;

        info!(
            "Searched {} projects, {} with results",
            summary.searched, summary.with_results
        );
        Ok(summary)
    }

    async fn search_all<W: Write + ?Sized>(
        &self,
        projects: &[Project],
        keyword: &str,
        out: &mut W,
        summary: &mut RunSummary,
    ) -> SearchResult<()> {
        for (i, project) in projects.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(SearchError::Cancelled);
            }

            // No pause before the first search, and none after the last.
            if i > 0 {
                self.progress
                    .set_message(format!("Waiting {:?} for the rate limit", self.pacer.delay()));
                self.pacer
                    .pause(&self.cancel)
                    .await
                    .map_err(|_| SearchError::Cancelled)?;
            }

            if project.archived {
                debug!("Project [{}] is archived", project.name);
            }
            self.progress
                .set_message(format!("Searching [{}]", project.name));

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(SearchError::Cancelled),
                outcome = self.search_project(project, keyword) => outcome?,
            };

            self.progress.suspend(|| -> std::io::Result<()> {
                outcome.render(out)?;
                out.flush()
            })?;

            summary.searched += 1;
            if outcome.has_results() {
                summary.with_results += 1;
            }
            self.progress.inc(1);
        }
        Ok(())
    }
}

/// Progress bar counting searched projects, drawn on stderr.
pub fn project_progress_bar() -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");

    let pb = ProgressBar::new(0);
    pb.set_style(style);
    pb
}
