//! Storage for uploaded profile photos.
//!
//! Uploaded files land in the configured directory under a
//! `<field>_<millis><ext>` name; only the generated filename is stored
//! on the user row.

use crate::errors::{ServiceError, ServiceResult};
use chrono::Utc;
use std::path::Path;

/// Persists an uploaded photo and returns the generated filename.
pub async fn save_photo(
    upload_dir: &str,
    field_name: &str,
    original_name: &str,
    data: &[u8],
) -> ServiceResult<String> {
    let ext = Path::new(original_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let filename = format!("{}_{}{}", field_name, Utc::now().timestamp_millis(), ext);

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| ServiceError::internal_error(format!("Upload dir unavailable: {}", e)))?;
    tokio::fs::write(Path::new(upload_dir).join(&filename), data)
        .await
        .map_err(|e| ServiceError::internal_error(format!("Photo write failed: {}", e)))?;

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_photo_keeps_extension_and_field_prefix() {
        let dir = std::env::temp_dir().join("ehr-upload-test");
        let dir = dir.to_string_lossy().to_string();

        let filename = save_photo(&dir, "photo", "portrait.png", b"not-a-real-png")
            .await
            .unwrap();

        assert!(filename.starts_with("photo_"));
        assert!(filename.ends_with(".png"));
        let stored = tokio::fs::read(Path::new(&dir).join(&filename)).await.unwrap();
        assert_eq!(stored, b"not-a-real-png");
    }

    #[tokio::test]
    async fn missing_extension_is_tolerated() {
        let dir = std::env::temp_dir().join("ehr-upload-test");
        let dir = dir.to_string_lossy().to_string();

        let filename = save_photo(&dir, "photo", "portrait", b"bytes").await.unwrap();
        assert!(filename.starts_with("photo_"));
        assert!(!filename.contains('.'));
    }
}
