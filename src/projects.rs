//! Expanding groups into their projects.

use tracing::{debug, info};

use crate::error::{SearchError, SearchResult, Stage};
use crate::gitlab::{GitLab, GroupId, Project};

/// List the projects of every group, in group order then GitLab order.
///
/// Projects shared by several groups show up once per group. The first
/// failing group aborts the whole listing.
pub async fn list_projects<G: GitLab + ?Sized>(
    gitlab: &G,
    groups: &[GroupId],
    per_page: u32,
) -> SearchResult<Vec<Project>> {
    let mut projects = Vec::new();

    for &group in groups {
        let found = gitlab
            .list_group_projects(group, per_page)
            .await
            .map_err(|e| SearchError::upstream(Stage::ListProjects { group }, e))?;
        debug!("Group {} has {} projects", group, found.len());
        projects.extend(found);
    }

    info!(
        "Found {} projects across {} groups",
        projects.len(),
        groups.len()
    );
    Ok(projects)
}
