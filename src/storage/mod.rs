//! Object storage for product images.

pub mod s3;

pub use s3::S3Storage;

use crate::error::AppResult;
use futures_util::future::BoxFuture;
use std::path::Path;
use std::sync::Arc;

/// Blob store holding uploaded product images.
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under a key derived from `file_name` and returns the
    /// public URL of the new object.
    fn put_object(&self, bytes: Vec<u8>, file_name: &str) -> BoxFuture<'_, AppResult<String>>;

    /// Removes the object stored under `key`. Missing objects are not an error.
    fn delete_object(&self, key: &str) -> BoxFuture<'_, AppResult<()>>;
}

pub type SharedStorage = Arc<dyn ObjectStorage>;

/// Builds the object key `<stem>_<unix-seconds><.ext>`.
///
/// Characters outside `[A-Za-z0-9._-]` in the stem become `_` so the key
/// can be used verbatim in a URL path.
pub fn object_key(file_name: &str, unix_secs: i64) -> String {
    let path = Path::new(file_name);
    let stem: String = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.is_empty() { "upload".to_string() } else { stem };

    match extension(file_name) {
        Some(ext) => format!("{stem}_{unix_secs}.{ext}"),
        None => format!("{stem}_{unix_secs}"),
    }
}

fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_owned)
}

/// Content type sent with the upload, chosen from the file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension(file_name).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Object key of a stored URL: its last path segment.
pub fn key_from_url(url: &str) -> Option<&str> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|key| !key.is_empty() && !key.contains(':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_keeps_extension() {
        assert_eq!(object_key("phone.png", 1700000000), "phone_1700000000.png");
        assert_eq!(object_key("IMG 01.JPG", 5), "IMG_01_5.JPG");
    }

    #[test]
    fn test_object_key_without_extension() {
        assert_eq!(object_key("README", 42), "README_42");
        assert_eq!(object_key("", 42), "upload_42");
    }

    #[test]
    fn test_object_key_uses_last_extension() {
        assert_eq!(object_key("archive.tar.gz", 1), "archive.tar_1.gz");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("manual.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_key_from_url() {
        assert_eq!(
            key_from_url("https://shop.s3.ap-southeast-1.amazonaws.com/phone_17.png"),
            Some("phone_17.png")
        );
        assert_eq!(key_from_url("http://localhost:9000/shop/x_1.gif"), Some("x_1.gif"));
        assert_eq!(key_from_url(""), None);
        assert_eq!(key_from_url("https://"), None);
    }
}
