//! Paper upload route.
//!
//! `POST /upload` takes a multipart form with a `file` field and answers with
//! `{ url, filename, size }` or `{ error }`.

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use bestpapers_core::upload::{UploadError, UploadPolicy, UploadRequest};
use bestpapers_shared::AppError;
use tracing::{error, info};

use crate::{AppState, response::ApiError};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Name of the form field carrying the file.
const FILE_FIELD: &str = "file";

/// Creates the upload routes.
///
/// The request body limit follows the policy's maximum file size, so an
/// oversized file still reaches the handler and is reported as too large.
pub fn routes(state: &AppState) -> Router<AppState> {
    let body_limit = state
        .uploads
        .policy()
        .max_file_size()
        .saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    Router::new().route(
        "/upload",
        post(upload_paper).layer(DefaultBodyLimit::max(body_limit)),
    )
}

/// POST `/upload`
async fn upload_paper(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request = match read_file_field(state.uploads.policy(), multipart).await {
        Ok(request) => request,
        Err(err) => return reject(err),
    };

    match state.uploads.upload(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => reject(err.into()),
    }
}

/// Pull the `file` field out of the form.
///
/// The extension is checked from the part headers before the body is read.
/// `Ok(None)` means the form had no usable file.
async fn read_file_field(
    policy: &UploadPolicy,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Option<UploadRequest>, AppError> {
    let Ok(mut multipart) = multipart else {
        return Ok(None);
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => return Err(multipart_error(policy, &e)),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_owned) else {
            return Ok(None);
        };
        policy.validate_name(Some(filename.as_str()))?;

        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(policy, &e))?;

        return Ok(Some(UploadRequest::new(filename, content_type, bytes)));
    }
}

/// A body cut off by the size limit is a too-large file; anything else is a
/// broken request.
fn multipart_error(policy: &UploadPolicy, err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::FileTooLarge {
            max: policy.max_file_size(),
        }
        .into()
    } else {
        AppError::Internal(format!("multipart read failed: {err}"))
    }
}

fn reject(err: AppError) -> Response {
    if err.is_server_error() {
        error!(error = %err, code = err.error_code(), "Upload failed");
    } else {
        info!(reason = %err.public_message(), "Upload rejected");
    }
    ApiError(err).into_response()
}
