use std::fmt;
use std::io;

use thiserror::Error;

use crate::gitlab::{GitLabError, GroupId};

/// Which step of a run talked to GitLab when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    ListGroups,
    ListProjects { group: GroupId },
    Search { project: String },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ListGroups => write!(f, "failed to get groups"),
            Stage::ListProjects { group } => {
                write!(f, "failed to get projects of group {}", group)
            }
            Stage::Search { project } => {
                write!(f, "failed to search keyword in project [{}]", project)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid group id '{token}': {reason}")]
    InvalidInput { token: String, reason: String },

    #[error("{stage}: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: GitLabError,
    },

    #[error("search cancelled")]
    Cancelled,

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

impl SearchError {
    pub(crate) fn upstream(stage: Stage, source: GitLabError) -> Self {
        Self::Upstream { stage, source }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
