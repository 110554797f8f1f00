//! GitLab data types used by the search run.

use serde::Deserialize;

/// Numeric identifier of a GitLab group.
pub type GroupId = u64;

/// A project discovered under a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    /// Full name including namespace, e.g. "Team / backend".
    pub name: String,
    pub archived: bool,
}

/// A single blob search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub path: String,
    /// Raw matched text. May carry tabs and surrounding newlines.
    pub data: String,
    /// 1-based line where `data` starts.
    pub line: u64,
}

/// Group entry as returned by `GET /groups`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GroupResponse {
    pub id: u64,
}

/// Project entry as returned by `GET /groups/:id/projects`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProjectResponse {
    pub id: u64,
    pub name_with_namespace: String,
    #[serde(default)]
    pub archived: bool,
}

/// Blob entry as returned by `GET /projects/:id/search?scope=blobs`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BlobResponse {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub startline: u64,
}

impl From<ProjectResponse> for Project {
    fn from(p: ProjectResponse) -> Self {
        Self {
            id: p.id,
            name: p.name_with_namespace,
            archived: p.archived,
        }
    }
}

impl From<BlobResponse> for Blob {
    fn from(b: BlobResponse) -> Self {
        // Older GitLab versions only send `filename`; newer ones send both.
        let path = b.filename.or(b.path).unwrap_or_default();
        Self {
            path,
            data: b.data,
            line: b.startline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_response() {
        let raw = r#"{"id": 42, "name": "api", "name_with_namespace": "Team / api", "archived": true}"#;
        let parsed: ProjectResponse = serde_json::from_str(raw).unwrap();
        let project = Project::from(parsed);
        assert_eq!(project.id, 42);
        assert_eq!(project.name, "Team / api");
        assert!(project.archived);
    }

    #[test]
    fn test_project_archived_defaults_to_false() {
        let raw = r#"{"id": 7, "name_with_namespace": "Team / web"}"#;
        let parsed: ProjectResponse = serde_json::from_str(raw).unwrap();
        assert!(!Project::from(parsed).archived);
    }

    #[test]
    fn test_blob_from_response() {
        let raw = r#"{
            "basename": "main",
            "data": "\tfoo()\n",
            "path": "src/main.go",
            "filename": "src/main.go",
            "id": null,
            "ref": "main",
            "startline": 12,
            "project_id": 10
        }"#;
        let parsed: BlobResponse = serde_json::from_str(raw).unwrap();
        let blob = Blob::from(parsed);
        assert_eq!(blob.path, "src/main.go");
        assert_eq!(blob.data, "\tfoo()\n");
        assert_eq!(blob.line, 12);
    }

    #[test]
    fn test_blob_falls_back_to_path() {
        let raw = r#"{"path": "README.md", "data": "foo", "startline": 1}"#;
        let parsed: BlobResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(Blob::from(parsed).path, "README.md");
    }
}
