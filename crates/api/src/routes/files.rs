//! Serves files written by the local upload fallback.
//!
//! Development only: the files live in a temp directory of this process, so
//! their URLs are meaningless to any other process or after a restart.

use axum::{
    Router,
    extract::{Path, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use bestpapers_core::storage::StorageError;
use bestpapers_core::upload::{content_type_for, is_served_name};
use bestpapers_shared::AppError;
use tracing::error;

use crate::{
    AppState,
    response::{ApiError, json_error},
};

/// Creates the fallback file routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/files/{filename}", get(serve_file))
}

/// GET `/files/{filename}`
async fn serve_file(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    let Some(store) = state.uploads.backends().fallback() else {
        return not_found();
    };
    if !is_served_name(&filename) {
        return not_found();
    }

    match store.get(&filename).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, content_type_for(&filename).to_string()),
                (CONTENT_DISPOSITION, format!("inline; filename=\"{filename}\"")),
            ],
            bytes,
        )
            .into_response(),
        Err(StorageError::NotFound { .. }) => not_found(),
        Err(e) => {
            error!(error = %e, filename = %filename, "Failed to read fallback file");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "File could not be read")
        }
    }
}

fn not_found() -> Response {
    ApiError(AppError::NotFound("File not found".to_string())).into_response()
}
