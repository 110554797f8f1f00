//! GitLab REST client built on reqwest.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::GitLabError;
use super::types::{Blob, BlobResponse, GroupId, GroupResponse, Project, ProjectResponse};
use super::GitLab;

/// Largest page size the GitLab API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Thin client for the handful of GitLab v4 endpoints a search run needs.
#[derive(Clone)]
pub struct GitLabClient {
    client: Client,
    base: String,
    token: String,
}

impl GitLabClient {
    /// Create a new client.
    ///
    /// `url` is the instance root (e.g. "https://gitlab.example.com"); the
    /// `/api/v4` suffix is added when missing.
    pub fn new(url: &str, token: &str) -> Result<Self, GitLabError> {
        let base = api_base(url)?;

        let client = Client::builder()
            .user_agent(concat!("gitlab-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base,
            token: token.to_string(),
        })
    }

    /// Fetch a single page and report the next page number, if any.
    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(Vec<T>, Option<u32>), GitLabError> {
        let url = format!("{}{}", self.base, path);
        debug!("Requesting URL: {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(GitLabError::from_status(status, &headers, &body));
        }

        let next = next_page(response.headers());
        let body = response.text().await?;
        let items: Vec<T> = serde_json::from_str(&body)
            .map_err(|e| GitLabError::Deserialize(format!("{} from {}", e, url)))?;
        Ok((items, next))
    }

    /// Walk every page of a list endpoint.
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
    ) -> Result<Vec<T>, GitLabError> {
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let mut page: u32 = 1;
        let mut all = Vec::new();

        loop {
            let query = [("per_page", per_page.to_string()), ("page", page.to_string())];
            let (items, next) = self.get_page::<T>(path, &query).await?;
            let received = items.len();
            all.extend(items);

            match following_page(page, received, next) {
                Some(n) => {
                    debug!("{} page {} done, continuing with page {}", path, page, n);
                    page = n;
                }
                None => break,
            }
        }

        Ok(all)
    }
}

#[async_trait]
impl GitLab for GitLabClient {
    async fn list_groups(&self) -> Result<Vec<GroupId>, GitLabError> {
        let groups: Vec<GroupResponse> = self.get_all("/groups", MAX_PER_PAGE).await?;
        Ok(groups.into_iter().map(|g| g.id).collect())
    }

    async fn list_group_projects(
        &self,
        group: GroupId,
        per_page: u32,
    ) -> Result<Vec<Project>, GitLabError> {
        let path = format!("/groups/{}/projects", group);
        let projects: Vec<ProjectResponse> = self.get_all(&path, per_page).await?;
        Ok(projects.into_iter().map(Project::from).collect())
    }

    async fn search_blobs(
        &self,
        project_id: u64,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<Blob>, GitLabError> {
        let path = format!("/projects/{}/search", project_id);
        let query = [
            ("scope", "blobs".to_string()),
            ("search", keyword.to_string()),
            ("per_page", limit.clamp(1, MAX_PER_PAGE).to_string()),
        ];
        let (blobs, _) = self.get_page::<BlobResponse>(&path, &query).await?;
        Ok(blobs.into_iter().map(Blob::from).collect())
    }
}

/// Normalize a user supplied instance URL into the v4 API base.
fn api_base(url: &str) -> Result<String, GitLabError> {
    let invalid = |reason: &str| GitLabError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }

    if trimmed.ends_with("/api/v4") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}/api/v4", trimmed))
    }
}

/// Decide which page to fetch after `page`, if any.
///
/// Stops on an empty page, a missing next page, or a next page that does
/// not move forward.
fn following_page(page: u32, received: usize, next: Option<u32>) -> Option<u32> {
    match next {
        Some(n) if received > 0 && n > page => Some(n),
        _ => None,
    }
}

/// Read GitLab's `X-Next-Page` header. Empty on the last page.
fn next_page(headers: &HeaderMap) -> Option<u32> {
    headers
        .get("X-Next-Page")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u32>().ok())
}
