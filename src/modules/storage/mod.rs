//! Storage module for report photos
//!
//! Defines the [`MediaStore`] seam used by report submission and an
//! S3/MinIO-backed implementation that returns public URLs.

mod media_store;
mod s3_media_store;
mod sigv4;

pub use media_store::{extension_for_content_type, MediaStore};
pub use s3_media_store::S3MediaStore;
