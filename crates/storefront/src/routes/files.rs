//! File upload and serving route handlers.
//!
//! Uploaded files live in the blob store and are served back by id with
//! long-lived cache headers; a stored file is immutable, so clients can
//! cache it forever.

use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::Response,
};
use serde::Serialize;

use clearcart_core::FileId;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::storage::{FileMetadata, StoredFile};

/// Content types accepted for image uploads.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// An uploaded file, pulled out of a multipart body and validated.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Extract and validate a single file field from a multipart body.
///
/// Validation order is fixed: field presence, then content type, then
/// size. `max_bytes` failures name the limit in whole megabytes.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a missing field, a disallowed
/// content type, an oversized payload, or a malformed multipart body.
pub async fn read_image_field(
    multipart: &mut Multipart,
    field_name: &str,
    max_bytes: usize,
) -> Result<UploadedFile> {
    Ok(read_upload_form(multipart, field_name, max_bytes).await?.0)
}

/// Like [`read_image_field`], but also collects an optional `folder`
/// text field from the same multipart body.
async fn read_upload_form(
    multipart: &mut Multipart,
    field_name: &str,
    max_bytes: usize,
) -> Result<(UploadedFile, Option<String>)> {
    let mut file = None;
    let mut folder = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?
    {
        match field.name() {
            Some(name) if name == field_name => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?;

                file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("folder") => {
                folder = field.text().await.ok().filter(|f| !f.is_empty());
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    if !ALLOWED_IMAGE_TYPES.contains(&file.content_type.as_str()) {
        return Err(AppError::BadRequest(
            "Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed".to_string(),
        ));
    }

    if file.bytes.len() > max_bytes {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {}MB",
            max_bytes / (1024 * 1024)
        )));
    }

    Ok((file, folder))
}

/// Response from a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: FileId,
    pub filename: String,
}

/// Upload an image.
///
/// POST /api/upload (multipart, field `file`, optional text field `folder`)
///
/// # Errors
///
/// Returns 400 for a missing field, wrong content type, or an oversized
/// payload.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let (file, folder) =
        read_upload_form(&mut multipart, "file", state.config().max_upload_bytes).await?;

    let stored = state
        .files()
        .put(
            &file.bytes,
            &file.filename,
            &file.content_type,
            FileMetadata {
                folder: Some(folder.unwrap_or_else(|| "uploads".to_string())),
                owner: None,
                original_name: Some(file.filename.clone()),
            },
        )
        .await?;

    tracing::info!(file_id = %stored.id, length = stored.length, "file uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            file_id: stored.id,
            filename: stored.filename,
        }),
    ))
}

/// Serve a stored file by id.
///
/// GET /api/files/{fileId}
///
/// Stored files never change, so the response is marked immutable and
/// cacheable for a year.
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown one.
pub async fn serve(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let id =
        FileId::parse(&id).map_err(|_| AppError::BadRequest("Invalid file id".to_string()))?;

    let file = state.files().get(id).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_LENGTH, file.length)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", file.filename),
        )
        .header(
            header::CACHE_CONTROL,
            "public, max-age=31536000, immutable",
        )
        .body(Body::from(file.bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Fetch a stored file's metadata without its payload.
///
/// GET /api/files/{fileId}/info
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown one.
pub async fn info(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<StoredFile>> {
    let id =
        FileId::parse(&id).map_err(|_| AppError::BadRequest("Invalid file id".to_string()))?;

    let file = state.files().info(id).await?;

    Ok(Json(file))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::extract::{FromRequest, Request};
    use axum::http::header::CONTENT_TYPE;

    const BOUNDARY: &str = "form-part-boundary";
    const ONE_MIB: usize = 1024 * 1024;

    fn file_part(field: &str, filename: &str, content_type: &str, data: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
        )
    }

    fn text_part(field: &str, value: &str) -> String {
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n")
    }

    async fn multipart_from(parts: &[String]) -> Multipart {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        let request = Request::builder()
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(axum::body::Body::from(body))
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }

    fn bad_request_message(err: AppError) -> String {
        match err {
            AppError::BadRequest(message) => message,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let mut multipart = multipart_from(&[text_part("folder", "avatars")]).await;

        let err = read_image_field(&mut multipart, "file", ONE_MIB)
            .await
            .unwrap_err();

        assert_eq!(bad_request_message(err), "No file uploaded");
    }

    #[tokio::test]
    async fn non_image_content_type_is_rejected() {
        let mut multipart =
            multipart_from(&[file_part("file", "notes.txt", "text/plain", "hello")]).await;

        let err = read_image_field(&mut multipart, "file", ONE_MIB)
            .await
            .unwrap_err();

        assert_eq!(
            bad_request_message(err),
            "Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed"
        );
    }

    #[tokio::test]
    async fn oversized_payload_is_rejected_with_limit_in_message() {
        let payload = "x".repeat(ONE_MIB + 1);
        let mut multipart =
            multipart_from(&[file_part("avatar", "big.png", "image/png", &payload)]).await;

        let err = read_image_field(&mut multipart, "avatar", ONE_MIB)
            .await
            .unwrap_err();

        assert_eq!(
            bad_request_message(err),
            "File too large. Maximum size is 1MB"
        );
    }

    #[tokio::test]
    async fn content_type_is_checked_before_size() {
        let payload = "x".repeat(ONE_MIB + 1);
        let mut multipart =
            multipart_from(&[file_part("file", "big.bin", "application/octet-stream", &payload)])
                .await;

        let err = read_image_field(&mut multipart, "file", ONE_MIB)
            .await
            .unwrap_err();

        assert!(bad_request_message(err).starts_with("Invalid file type"));
    }

    #[tokio::test]
    async fn valid_upload_keeps_file_and_folder() {
        let mut multipart = multipart_from(&[
            file_part("file", "pic.png", "image/png", "png-bytes"),
            text_part("folder", "avatars"),
        ])
        .await;

        let (file, folder) = read_upload_form(&mut multipart, "file", ONE_MIB)
            .await
            .unwrap();

        assert_eq!(file.filename, "pic.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.bytes, b"png-bytes");
        assert_eq!(folder.as_deref(), Some("avatars"));
    }
}
