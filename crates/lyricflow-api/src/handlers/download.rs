//! Rendered video download handler.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use tokio_util::io::ReaderStream;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Whether `filename` names a file directly inside the output directory.
pub fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains("..")
}

/// `GET /download/:filename`
///
/// Streams the whole file; range requests are not supported.
pub async fn download_video(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    if !is_plain_filename(&filename) {
        return Err(ApiError::not_found("File not found"));
    }

    let path = state.output_dir().join(&filename);
    let file_size = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => return Err(ApiError::not_found("File not found")),
    };

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, file_size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename.replace('"', "")),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filenames() {
        assert!(is_plain_filename("3f2c.mp4"));
        assert!(!is_plain_filename(""));
        assert!(!is_plain_filename("../secret.mp4"));
        assert!(!is_plain_filename("a/b.mp4"));
        assert!(!is_plain_filename("a\\b.mp4"));
        assert!(!is_plain_filename(".."));
    }
}
