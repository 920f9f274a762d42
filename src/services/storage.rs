use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

/// Seam in front of the storage SDK: a single synchronous-per-request
/// "put object" call. No retry, no multipart upload, no resumability.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_length: i64,
        content_type: &str,
    ) -> Result<()>;
}

pub struct S3StorageService {
    client: Client,
}

impl S3StorageService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStorage for S3StorageService {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_length: i64,
        content_type: &str,
    ) -> Result<()> {
        let output = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_length(content_length)
            .content_type(content_type)
            .send()
            .await?;

        debug!("put_object response etag: {:?}", output.e_tag());
        Ok(())
    }
}
