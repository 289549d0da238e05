use super::{ObjectStorage, content_type_for, object_key};
use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use futures_util::future::BoxFuture;

/// S3 (or S3-compatible) bucket holding product images.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    cfg: StorageConfig,
}

impl S3Storage {
    /// Builds the client from the static keys in `cfg`. A custom endpoint
    /// switches to path-style addressing.
    pub fn new(cfg: StorageConfig) -> AppResult<Self> {
        if cfg.bucket.is_empty() {
            return Err(AppError::ConfigError("storage.bucket is empty".into()));
        }
        let credentials = Credentials::new(
            cfg.access_key_id.clone(),
            cfg.secret_access_key.clone(),
            None,
            None,
            "zenshop-config",
        );
        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &cfg.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());
        Ok(Self { client, cfg })
    }

    /// Public URL of `key`.
    pub fn object_url(&self, key: &str) -> String {
        public_url(&self.cfg, key)
    }
}

fn public_url(cfg: &StorageConfig, key: &str) -> String {
    match &cfg.endpoint {
        Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), cfg.bucket, key),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            cfg.bucket, cfg.region, key
        ),
    }
}

impl ObjectStorage for S3Storage {
    fn put_object(&self, bytes: Vec<u8>, file_name: &str) -> BoxFuture<'_, AppResult<String>> {
        let key = object_key(file_name, Utc::now().timestamp());
        let content_type = content_type_for(file_name);
        Box::pin(async move {
            let size = bytes.len();
            self.client
                .put_object()
                .bucket(&self.cfg.bucket)
                .key(&key)
                .content_type(content_type)
                .body(ByteStream::from(bytes))
                .send()
                .await
                .map_err(|e| {
                    AppError::StorageError(format!(
                        "Unable to upload image: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;
            log::info!("Uploaded object {key} ({size} bytes, {content_type})");
            Ok(self.object_url(&key))
        })
    }

    fn delete_object(&self, key: &str) -> BoxFuture<'_, AppResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            // S3 answers 204 whether or not the key existed
            self.client
                .delete_object()
                .bucket(&self.cfg.bucket)
                .key(&key)
                .send()
                .await
                .map_err(|e| {
                    AppError::StorageError(format!(
                        "Unable to delete image: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;
            log::info!("Deleted object {key}");
            Ok(())
        })
    }
}
