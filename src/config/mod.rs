use std::env;

use anyhow::{Result, bail};

const DEFAULT_STAGING_DIR: &str = "./tmp";

/// Multipart body ceiling, generous enough for browser file uploads (32 MiB).
const DEFAULT_MAX_UPLOAD_SIZE: usize = 32 * 1024 * 1024;

const REQUIRED_KEYS: [&str; 6] = [
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_REGION",
    "AWS_BUCKET",
    "URL_SUCCESS",
    "URL_FAIL",
];

/// Gateway configuration, built once at startup and injected into the
/// handler and storage client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,

    /// Bucket used when the form does not override it.
    pub default_bucket: String,

    /// Base URLs the browser is redirected to with the outcome appended.
    pub success_url: String,
    pub fail_url: String,

    /// Custom S3 endpoint (e.g. MinIO). None means AWS proper.
    pub endpoint_url: Option<String>,

    /// Directory uploads are staged in before the remote put.
    pub staging_dir: String,

    pub max_upload_size: usize,
}

impl AppConfig {
    /// Load configuration from environment variables. Fails with a single
    /// message naming every missing required key.
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing: Vec<&str> = Vec::new();
        let mut require = |key: &'static str| -> String {
            match get(key) {
                Some(value) => value,
                None => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let access_key = require("AWS_ACCESS_KEY_ID");
        let secret_key = require("AWS_SECRET_ACCESS_KEY");
        let region = require("AWS_REGION");
        let default_bucket = require("AWS_BUCKET");
        let success_url = require("URL_SUCCESS");
        let fail_url = require("URL_FAIL");

        if !missing.is_empty() {
            bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        Ok(Self {
            access_key,
            secret_key,
            region,
            default_bucket,
            success_url,
            fail_url,
            endpoint_url: get("S3_ENDPOINT"),
            staging_dir: get("STAGING_DIR").unwrap_or_else(|| DEFAULT_STAGING_DIR.to_string()),
            max_upload_size: get("MAX_UPLOAD_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
        })
    }

    /// Cheap credential sanity check, run per request before the remote put.
    pub fn credentials_ok(&self) -> bool {
        !self.access_key.trim().is_empty() && !self.secret_key.trim().is_empty()
    }
}
