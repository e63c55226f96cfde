// src/aws/s3.rs

//! Object-storage fetch of service configuration.

use std::path::Path;

use tracing::info;

use crate::aws::run_aws;
use crate::errors::Result;

/// Downloads service configuration from object storage into the working
/// directory before the child is spawned. Any failure here is fatal: the
/// service cannot run without its configuration.
pub trait ConfigFetcher {
    /// Download a single object `key` to the local path `dest`.
    fn fetch_file(&self, key: &str, dest: &Path) -> Result<()>;

    /// Download every object under `prefix` into `./<prefix>`, preserving
    /// relative path structure.
    fn fetch_folder(&self, prefix: &str) -> Result<()>;
}

/// Production fetcher over `aws s3 cp`.
pub struct S3Fetcher {
    region: String,
    bucket: String,
}

impl S3Fetcher {
    pub fn new(region: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
        }
    }
}

impl ConfigFetcher for S3Fetcher {
    fn fetch_file(&self, key: &str, dest: &Path) -> Result<()> {
        info!(
            "Downloading configuration from s3://{}/{}",
            self.bucket, key
        );
        run_aws(&self.region, &copy_file_args(&self.bucket, key, dest))?;
        info!("Configuration downloaded successfully.");
        Ok(())
    }

    fn fetch_folder(&self, prefix: &str) -> Result<()> {
        info!(
            "Downloading configuration folder from s3://{}/{}",
            self.bucket, prefix
        );
        run_aws(&self.region, &copy_folder_args(&self.bucket, prefix))?;
        info!("Configuration downloaded successfully.");
        Ok(())
    }
}

/// `aws s3 cp s3://<bucket>/<key> <dest>`
pub fn copy_file_args(bucket: &str, key: &str, dest: &Path) -> Vec<String> {
    vec![
        "s3".to_string(),
        "cp".to_string(),
        format!("s3://{bucket}/{key}"),
        dest.display().to_string(),
    ]
}

/// `aws s3 cp --recursive s3://<bucket>/<prefix> <prefix>`
pub fn copy_folder_args(bucket: &str, prefix: &str) -> Vec<String> {
    vec![
        "s3".to_string(),
        "cp".to_string(),
        "--recursive".to_string(),
        format!("s3://{bucket}/{prefix}"),
        prefix.to_string(),
    ]
}
