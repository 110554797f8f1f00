//! Turning the `--groups` argument into concrete group ids.

use tracing::info;

use crate::error::{SearchError, SearchResult, Stage};
use crate::gitlab::{GitLab, GroupId};

/// Resolve the groups a run covers.
///
/// Any non-empty spec, even one made of whitespace, is parsed as comma
/// separated ids and no request is made. Only a missing or empty spec
/// discovers every group visible to the token. Duplicates are kept in
/// both cases.
pub async fn resolve_groups<G: GitLab + ?Sized>(
    gitlab: &G,
    spec: Option<&str>,
) -> SearchResult<Vec<GroupId>> {
    match spec {
        Some(spec) if !spec.is_empty() => parse_group_ids(spec),
        _ => {
            info!("No groups given, discovering all visible groups");
            gitlab
                .list_groups()
                .await
                .map_err(|e| SearchError::upstream(Stage::ListGroups, e))
        }
    }
}

/// Parse a comma separated list of group ids.
///
/// Whitespace around each id is ignored. Any empty, non-numeric or zero
/// entry rejects the whole list.
pub fn parse_group_ids(spec: &str) -> SearchResult<Vec<GroupId>> {
    spec.split(',')
        .map(|raw| {
            let token = raw.trim();
            let invalid = |reason: String| SearchError::InvalidInput {
                token: token.to_string(),
                reason,
            };
            match token.parse::<GroupId>() {
                Ok(0) => Err(invalid("group ids must be positive".to_string())),
                Ok(id) => Ok(id),
                Err(e) => Err(invalid(e.to_string())),
            }
        })
        .collect()
}
