//! GitLab API access.
//!
//! The search run only needs three capabilities from GitLab: discovering
//! groups, listing a group's projects and searching a project's blobs.
//! They are expressed by the [`GitLab`] trait so the orchestration code can
//! run against [`GitLabClient`] or any substitute.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitLab API operations
//! - [`types`] - Projects, blobs and the raw API payloads
//! - [`client`] - reqwest-backed implementation

mod client;
mod error;
mod types;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::{GitLabClient, MAX_PER_PAGE};
pub use error::GitLabError;
pub use types::{Blob, GroupId, Project};

/// The GitLab operations a search run depends on.
#[async_trait]
pub trait GitLab: Send + Sync {
    /// List the ids of every group visible to the caller.
    async fn list_groups(&self) -> Result<Vec<GroupId>, GitLabError>;

    /// List the projects of a group, requesting `per_page` projects per page.
    async fn list_group_projects(
        &self,
        group: GroupId,
        per_page: u32,
    ) -> Result<Vec<Project>, GitLabError>;

    /// Search a project's blobs, returning at most `limit` hits in
    /// provider order.
    async fn search_blobs(
        &self,
        project_id: u64,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<Blob>, GitLabError>;
}

#[async_trait]
impl<T: GitLab + ?Sized> GitLab for Arc<T> {
    async fn list_groups(&self) -> Result<Vec<GroupId>, GitLabError> {
        (**self).list_groups().await
    }

    async fn list_group_projects(
        &self,
        group: GroupId,
        per_page: u32,
    ) -> Result<Vec<Project>, GitLabError> {
        (**self).list_group_projects(group, per_page).await
    }

    async fn search_blobs(
        &self,
        project_id: u64,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<Blob>, GitLabError> {
        (**self).search_blobs(project_id, keyword, limit).await
    }
}
