//! MinIO/S3-compatible media store
//!
//! Photos are written under `{public_prefix}/{folder}/` and served straight
//! from the bucket through an anonymous-read policy on that prefix.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::media_store::{extension_for_content_type, MediaStore};
use super::sigv4::Signer;
use crate::core::config::MediaStoreConfig;
use crate::core::error::{AppError, Result};

/// Where objects go in the bucket and how their public URLs look
#[derive(Debug, Clone)]
struct ObjectLayout {
    public_endpoint: String,
    bucket: String,
    public_prefix: String,
    folder: String,
}

impl ObjectLayout {
    fn key_for(&self, id: Uuid, extension: &str) -> String {
        format!(
            "{}/{}/{}.{}",
            self.public_prefix, self.folder, id, extension
        )
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket, key)
    }
}

pub struct S3MediaStore {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    layout: ObjectLayout,
    endpoint: String,
    access_key: String,
    secret_key: String,
    region_name: String,
    /// HTTP client for bucket policy operations
    http_client: Client,
}

impl S3MediaStore {
    /// Connect to the bucket, creating it and its public-read policy if needed
    pub async fn new(config: MediaStoreConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create S3 credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to open bucket: {}", e)))?;

        // Path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let store = Self {
            bucket,
            region,
            credentials,
            layout: ObjectLayout {
                public_endpoint: config.public_endpoint,
                bucket: config.bucket,
                public_prefix: config.public_prefix,
                folder: config.folder,
            },
            endpoint: config.endpoint,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        };

        store.ensure_bucket_exists().await;
        store.set_public_read_policy().await;

        info!(
            "Media store ready: endpoint={}, bucket={}, folder={}/{}",
            store.endpoint, store.layout.bucket, store.layout.public_prefix, store.layout.folder
        );

        Ok(store)
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Create the bucket; an "already exists" answer is fine
    async fn ensure_bucket_exists(&self) {
        let created = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match created {
            Ok(_) => info!("Bucket '{}' created", self.bucket.name()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }
    }

    /// Allow anonymous GET on the public prefix so photo URLs resolve
    async fn set_public_read_policy(&self) {
        let bucket_name = self.bucket.name();
        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!(
                        "arn:aws:s3:::{}/{}/*",
                        bucket_name, self.layout.public_prefix
                    )]
                }
            ]
        })
        .to_string();

        match self.put_bucket_policy(&bucket_name, &policy).await {
            Ok(()) => info!(
                "Set public read policy for {}/{}/*",
                bucket_name, self.layout.public_prefix
            ),
            // Startup continues; the policy can be applied with `mc anonymous set download`
            Err(e) => warn!("Failed to set bucket policy for '{}': {}", bucket_name, e),
        }
    }

    async fn put_bucket_policy(&self, bucket_name: &str, policy: &str) -> Result<()> {
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let host_header = match endpoint_url.port() {
            Some(p) => format!("{}:{}", host, p),
            None => host.to_string(),
        };

        let signer = Signer {
            access_key: &self.access_key,
            secret_key: &self.secret_key,
            region: &self.region_name,
            service: "s3",
        };
        let signed = signer.sign(
            "PUT",
            &host_header,
            &format!("/{}", bucket_name),
            "policy=",
            policy.as_bytes(),
            Utc::now(),
        )?;

        let response = self
            .http_client
            .put(format!("{}/{}?policy", self.endpoint, bucket_name))
            .header("Host", &host_header)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.payload_hash)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Internal(format!(
                "Failed to set bucket policy: {} - {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn upload_image(&self, data: Vec<u8>, content_type: &str) -> Result<String> {
        let key = self
            .layout
            .key_for(Uuid::new_v4(), extension_for_content_type(content_type));

        let response = self
            .bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to upload '{}': {}", key, e))
            })?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(AppError::ExternalServiceError(format!(
                "Media store rejected '{}' with status {}",
                key, status
            )));
        }

        debug!(
            "Uploaded photo '{}' ({} bytes) to bucket '{}'",
            key,
            data.len(),
            self.bucket.name()
        );
        Ok(self.layout.public_url(&key))
    }
}
