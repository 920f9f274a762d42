use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// How one upload request concluded. Serialized into the query string of the
/// redirect that ends the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub code: u16,
    pub status: String,
    pub msg: String,
}

impl Outcome {
    pub fn new(code: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            status: code.canonical_reason().unwrap_or("Unknown").to_string(),
            msg: msg.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == StatusCode::OK.as_u16()
    }

    /// Append the outcome to a base URL as `code`, `status` and `msg` query
    /// parameters, URL-encoded.
    pub fn redirect_url(&self, base: &str) -> String {
        // Three scalar fields; serialization cannot fail in practice.
        let query = serde_urlencoded::to_string(self).unwrap_or_default();
        format!("{base}?{query}")
    }
}

/// Resolved destination of one upload: bucket, folder path and object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub bucket: String,
    pub path: String,
    pub name: String,
}

impl UploadTarget {
    /// Apply form-field overrides on top of the configured defaults. Empty
    /// form values count as absent. The path always ends with a separator.
    pub fn resolve(
        default_bucket: &str,
        original_name: &str,
        bucket: Option<String>,
        path: Option<String>,
        name: Option<String>,
    ) -> Self {
        let bucket = bucket
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| default_bucket.to_string());
        let mut path = path
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "/".to_string());
        if !path.ends_with('/') {
            path.push('/');
        }
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| original_name.to_string());
        Self { bucket, path, name }
    }

    /// Object key under the bucket.
    pub fn key(&self) -> String {
        format!("{}{}", self.path, self.name)
    }
}
