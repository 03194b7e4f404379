//! Audio upload handler.

use std::path::Path;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Multipart field carrying the audio file.
const FILE_FIELD: &str = "file";

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Stored name to pass as `audio_filename`
    pub filename: String,
    /// Name the client sent
    pub original_name: String,
}

/// Stored name for an upload: a fresh UUID plus the original extension
/// (including the dot), or no extension when the original has none.
pub fn stored_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{}{}", Uuid::new_v4(), ext)
}

/// `POST /upload`
///
/// The body is written as-is; content type and size are not validated
/// beyond the request body limit.
pub async fn upload_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;

        let filename = stored_filename(&original_name);
        let path = state.upload_dir().join(&filename);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        metrics::record_upload(data.len());
        info!(
            filename = %filename,
            original_name = %original_name,
            bytes = data.len(),
            "Stored upload"
        );

        return Ok(Json(UploadResponse {
            filename,
            original_name,
        }));
    }

    Err(ApiError::bad_request("Missing required 'file' field"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_filename_keeps_extension() {
        let name = stored_filename("My Song.mp3");
        assert!(name.ends_with(".mp3"));
        assert_eq!(name.len(), 36 + 4);
        assert!(Uuid::parse_str(&name[..36]).is_ok());
    }

    #[test]
    fn test_stored_filename_without_extension() {
        assert_eq!(stored_filename("recording").len(), 36);
        assert_eq!(stored_filename("").len(), 36);
        assert_eq!(stored_filename(".hidden").len(), 36);
    }

    #[test]
    fn test_stored_filename_uses_last_extension() {
        assert!(stored_filename("take.final.wav").ends_with(".wav"));
        assert_ne!(stored_filename("a.wav"), stored_filename("a.wav"));
    }
}
