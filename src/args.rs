use clap::{Parser, Subcommand};

/// GitLab code search CLI: look for a keyword in every project of your groups,
/// one project at a time so GitLab's search rate limit is respected.
#[derive(Parser, Debug)]
#[clap(
    name = "gs",
    author,
    version,
    about,
    long_about = "Search every project of one or more GitLab groups for a keyword and print a readable report, project by project."
)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Perform a thorough search of your GitLab projects
    Search(SearchArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct SearchArgs {
    /// GitLab URL, e.g. https://gitlab.example.com
    #[clap(short, long, env = "GITLAB_URL")]
    pub url: String,

    /// Personal access token.
    #[clap(short, long, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Search keyword.
    #[clap(short, long)]
    pub keyword: String,

    /// Specific group ids separated by a comma. All visible groups when omitted.
    #[clap(short, long)]
    pub groups: Option<String>,

    /// Maximum number of results shown per project.
    #[clap(long, value_name = "NUM", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=99))]
    pub max_results: u32,

    /// Seconds to wait between two project searches.
    #[clap(long, value_name = "SECS", default_value_t = 6)]
    pub delay: u64,

    /// Page size used when listing a group's projects.
    #[clap(long, value_name = "NUM", default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: u32,

    /// Leave archived projects out of the search.
    #[clap(long)]
    pub skip_archived: bool,
}
