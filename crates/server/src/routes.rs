use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use cardscan_ocr::{IdRecord, OcrBackend, PipelineError, MAX_IMAGE_BYTES};

use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/extract", post(extract))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Slightly above the core's 5 MiB ceiling: multipart framing adds
        // overhead, and oversize files should reach the pipeline's own
        // check so the caller gets the specific error.
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024))
        .with_state(state)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html>
  <head><title>Identity Card Extraction API</title></head>
  <body>
    <h1>Identity Card Extraction API</h1>
    <p>OCR service extracting ID number, name, date of birth and gender
    from identity-card photographs (English and Hindi text).</p>
    <ul>
      <li><code>POST /extract</code> — multipart upload of a JPEG/PNG card image (max 5 MiB)</li>
      <li><code>GET /health</code> — service and OCR engine status</li>
    </ul>
  </body>
</html>
"#;

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn extract(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Err(e) => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    "Malformed multipart request",
                    &e.to_string(),
                )
            }
            Ok(None) => break,
            Ok(Some(field)) => {
                if field.name() == Some("file") || field.file_name().is_some() {
                    let media_type = field.content_type().unwrap_or_default().to_string();
                    match field.bytes().await {
                        Ok(data) => {
                            upload = Some((data, media_type));
                            break;
                        }
                        Err(e) => {
                            return failure(
                                StatusCode::BAD_REQUEST,
                                "Failed to read upload",
                                &e.to_string(),
                            )
                        }
                    }
                }
            }
        }
    }
    let Some((data, media_type)) = upload else {
        return failure(
            StatusCode::BAD_REQUEST,
            "No file uploaded",
            "expected a multipart `file` field",
        );
    };

    // The pipeline blocks on the OCR engine; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        state.pipeline.extract_identity_fields(&data, &media_type)
    })
    .await;

    match result {
        Ok(Ok(record)) => {
            tracing::info!("extraction succeeded");
            success(record)
        }
        Ok(Err(err)) => {
            tracing::warn!("extraction failed: {err}");
            failure(status_for(&err), "Failed to process image", &err.to_string())
        }
        Err(e) => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Extraction task failed",
            &e.to_string(),
        ),
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Response {
    let check =
        tokio::task::spawn_blocking(move || state.pipeline.recognizer().health_check()).await;
    match check {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "ocr_available": true,
            })),
        )
            .into_response(),
        Ok(Err(e)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "error": e.to_string(),
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "unhealthy",
                "error": e.to_string(),
            })),
        )
            .into_response(),
    }
}

fn success(record: IdRecord) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": record,
            "message": "Information extracted successfully",
        })),
    )
        .into_response()
}

fn failure(status: StatusCode, error: &str, detail: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": error,
            "detail": detail,
        })),
    )
        .into_response()
}

/// Each pipeline failure kind renders as a distinct status so clients can
/// show an actionable message: input rejection (413/415), bad input image
/// (422), or an upstream engine problem (502).
fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        PipelineError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        PipelineError::Preprocess(_)
        | PipelineError::NoTextRecognized
        | PipelineError::NoFieldsExtracted => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::Ocr(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardscan_ocr::OcrError;

    #[test]
    fn status_mapping_is_distinct_per_failure_kind() {
        assert_eq!(
            status_for(&PipelineError::PayloadTooLarge { size: 1, limit: 0 }),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status_for(&PipelineError::UnsupportedMediaType("image/gif".into())),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            status_for(&PipelineError::NoTextRecognized),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&PipelineError::NoFieldsExtracted),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&PipelineError::Ocr(OcrError::NotAvailable)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn success_envelope_contains_record_fields() {
        let record = IdRecord {
            id_number: Some("987654321098".into()),
            ..Default::default()
        };
        let json = json!({
            "success": true,
            "data": record,
            "message": "Information extracted successfully",
        });
        assert_eq!(json["data"]["id_number"], "987654321098");
        assert!(json["data"]["name"].is_null());
    }
}
