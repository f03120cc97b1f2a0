//! HTTP API surface.
//!
//! Thin transport over the engine: request shaping, upload handling, and
//! error-to-status mapping live here, nothing else. Per-file upload failures
//! are isolated — one bad file produces one error entry without affecting
//! sibling files.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;
use docrag_core::{DocumentMetadata, Error};
use docrag_engine::Engine;
use docrag_extract::ExtractorRegistry;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Shared state behind every handler.
pub struct AppState {
    pub engine: Engine,
    pub extractors: ExtractorRegistry,
    pub upload_dir: PathBuf,
    pub max_file_bytes: u64,
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    // Multipart framing overhead on top of the per-file cap
    let body_limit = state.max_file_bytes as usize + 1024 * 1024;

    Router::new()
        .route("/api/health", get(health))
        .route("/api/upload", post(upload))
        .route("/api/search", post(search))
        .route("/api/documents", get(list_documents).delete(clear))
        .route("/api/documents/:id", delete(delete_document))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.engine.stats().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "timestamp": Utc::now().to_rfc3339(),
                "documents_indexed": stats.total_documents,
            })),
        ),
        Err(err) => error_response(&err),
    }
}

async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut success: Vec<Value> = Vec::new();
    let mut errors: Vec<Value> = Vec::new();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let Some(raw_name) = field.file_name().map(str::to_string) else {
                    continue;
                };

                let filename = sanitize_filename(&raw_name);
                if filename.is_empty() {
                    errors.push(json!({ "filename": raw_name, "error": "invalid filename" }));
                    continue;
                }
                if !state.extractors.supports(Path::new(&filename)) {
                    errors.push(json!({ "filename": filename, "error": "file type not allowed" }));
                    continue;
                }

                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        errors.push(json!({ "filename": filename, "error": e.to_string() }));
                        continue;
                    }
                };
                if bytes.len() as u64 > state.max_file_bytes {
                    errors.push(json!({
                        "filename": filename,
                        "error": format!("file exceeds {} bytes", state.max_file_bytes),
                    }));
                    continue;
                }

                let file_id = Uuid::new_v4();
                let saved_path = state.upload_dir.join(format!("{file_id}_{filename}"));
                if let Err(e) = tokio::fs::write(&saved_path, &bytes).await {
                    errors.push(json!({ "filename": filename, "error": e.to_string() }));
                    continue;
                }

                match ingest_file(&state, file_id, &filename, &saved_path).await {
                    Ok(meta) => success.push(json!({
                        "id": meta.id,
                        "name": meta.name,
                        "size": bytes.len(),
                        "chunks": meta.fragment_count,
                        "uploaded_at": meta.ingested_at.to_rfc3339(),
                    })),
                    Err(err) => {
                        warn!("Failed to ingest '{}': {}", filename, err);
                        errors.push(json!({ "filename": filename, "error": err.to_string() }));
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                errors.push(json!({ "filename": Value::Null, "error": e.to_string() }));
                break;
            }
        }
    }

    if success.is_empty() && errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no files provided" })),
        );
    }

    let total_documents = state
        .engine
        .stats()
        .await
        .map(|s| s.total_documents)
        .unwrap_or(0);

    let status = if errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    (
        status,
        Json(json!({
            "success": success,
            "errors": errors,
            "total_documents": total_documents,
        })),
    )
}

async fn ingest_file(
    state: &AppState,
    file_id: Uuid,
    filename: &str,
    path: &Path,
) -> docrag_core::Result<DocumentMetadata> {
    let text = state.extractors.extract(path).await?;
    state.engine.ingest(Some(file_id), filename, &text).await
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: String,
    top_k: Option<usize>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> (StatusCode, Json<Value>) {
    match state.engine.query(&request.query, request.top_k).await {
        Ok(response) => {
            let mut body = serde_json::to_value(&response).unwrap_or_else(|_| json!({}));
            if let Some(map) = body.as_object_mut() {
                map.insert("timestamp".to_string(), json!(Utc::now().to_rfc3339()));
            }
            (StatusCode::OK, Json(body))
        }
        Err(err) => error_response(&err),
    }
}

async fn list_documents(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.engine.list_documents().await {
        Ok(documents) => {
            let total = documents.len();
            (
                StatusCode::OK,
                Json(json!({ "documents": documents, "total": total })),
            )
        }
        Err(err) => error_response(&err),
    }
}

async fn delete_document(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<String>,
) -> (StatusCode, Json<Value>) {
    let Ok(id) = Uuid::parse_str(&id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid document id" })),
        );
    };

    match state.engine.delete_document(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "message": "document deleted successfully" })),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "document not found" })),
        ),
        Err(err) => error_response(&err),
    }
}

async fn clear(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.engine.clear().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "index cleared" })),
        ),
        Err(err) => error_response(&err),
    }
}

/// Map an engine error to a status code and JSON error envelope.
fn error_response(err: &Error) -> (StatusCode, Json<Value>) {
    let status = match err {
        Error::EmptyQuery | Error::NoDocuments | Error::EmptyContent(_) => StatusCode::BAD_REQUEST,
        Error::Extraction(_) | Error::Chunking(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

/// Strip any path components and replace shell-hostile characters, keeping
/// the extension intact for extractor dispatch.
fn sanitize_filename(raw: &str) -> String {
    let name = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // A name of only dots or separators carries no usable stem
    if cleaned.chars().all(|c| c == '.' || c == '_' || c == '-') {
        return String::new();
    }

    cleaned
}
