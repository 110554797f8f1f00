//! In-memory [`GitLab`] used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{Blob, GitLab, GitLabError, GroupId, Project};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListGroups,
    ListProjects { group: GroupId, per_page: u32 },
    Search { project: u64, keyword: String, limit: u32 },
}

#[derive(Default)]
pub(crate) struct FakeGitLab {
    pub groups: Vec<GroupId>,
    pub projects: HashMap<GroupId, Vec<Project>>,
    pub hits: HashMap<u64, Vec<Blob>>,
    pub fail_groups: bool,
    pub fail_projects_for: Option<GroupId>,
    pub fail_search_for: Option<u64>,
    /// How long each blob search takes.
    pub search_latency: Option<Duration>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGitLab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(mut self, group: GroupId, projects: Vec<Project>) -> Self {
        self.projects.insert(group, projects);
        self
    }

    pub fn with_hits(mut self, project: u64, hits: Vec<Blob>) -> Self {
        self.hits.insert(project, hits);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub(crate) fn project(id: u64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        archived: false,
    }
}

pub(crate) fn blobs(count: usize) -> Vec<Blob> {
    (0..count)
        .map(|i| Blob {
            path: format!("src/file_{}.rs", i),
            data: format!("let foo_{} = 1;\n", i),
            line: i as u64 + 1,
        })
        .collect()
}

#[async_trait]
impl GitLab for FakeGitLab {
    async fn list_groups(&self) -> Result<Vec<GroupId>, GitLabError> {
        self.record(Call::ListGroups);
        if self.fail_groups {
            return Err(GitLabError::Auth("401 Unauthorized".to_string()));
        }
        Ok(self.groups.clone())
    }

    async fn list_group_projects(
        &self,
        group: GroupId,
        per_page: u32,
    ) -> Result<Vec<Project>, GitLabError> {
        self.record(Call::ListProjects { group, per_page });
        if self.fail_projects_for == Some(group) {
            return Err(GitLabError::NotFound(format!("404 Group {} Not Found", group)));
        }
        Ok(self.projects.get(&group).cloned().unwrap_or_default())
    }

    async fn search_blobs(
        &self,
        project_id: u64,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<Blob>, GitLabError> {
        self.record(Call::Search {
            project: project_id,
            keyword: keyword.to_string(),
            limit,
        });
        if let Some(latency) = self.search_latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail_search_for == Some(project_id) {
            return Err(GitLabError::Http("connection reset".to_string()));
        }
        let hits = self.hits.get(&project_id).cloned().unwrap_or_default();
        Ok(hits.into_iter().take(limit as usize).collect())
    }
}
