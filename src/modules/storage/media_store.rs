use async_trait::async_trait;

use crate::core::error::Result;

/// Hosted media service that accepts image payloads and hands back a
/// publicly fetchable URL.
///
/// An `Err` means the upload did not happen; callers must not persist
/// anything that references it.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload_image(&self, data: Vec<u8>, content_type: &str) -> Result<String>;
}

/// File extension used for an uploaded image's object key
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/heic" => "heic",
        "image/heif" => "heif",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for_content_type("image/jpeg"), "jpg");
        assert_eq!(extension_for_content_type("image/png"), "png");
        assert_eq!(extension_for_content_type("application/pdf"), "bin");
    }
}
