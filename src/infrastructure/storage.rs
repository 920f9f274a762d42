use crate::config::AppConfig;
use crate::services::storage::S3StorageService;
use aws_sdk_s3::config::{Credentials, Region};
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &AppConfig) -> Arc<S3StorageService> {
    info!(
        "☁️  S3 Storage: region {} (default bucket: {})",
        config.region, config.default_bucket
    );

    let mut loader = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .credentials_provider(Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        ));
    if let Some(endpoint) = &config.endpoint_url {
        info!("☁️  S3 endpoint override: {}", endpoint);
        loader = loader.endpoint_url(endpoint);
    }
    let aws_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&aws_config);
    if config.endpoint_url.is_some() {
        // MinIO and friends want path-style addressing.
        builder = builder.force_path_style(true);
    }

    let s3_client = aws_sdk_s3::Client::from_conf(builder.build());
    Arc::new(S3StorageService::new(s3_client))
}
