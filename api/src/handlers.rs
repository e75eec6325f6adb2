use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pdf_qa::QaChain;

use crate::error::ApiError;
use crate::models::{AskResponse, ErrorResponse, HealthResponse, UploadResponse};
use crate::state::AppState;

pub const UPLOAD_OK_MESSAGE: &str = "✅ PDF uploaded and processed!";
pub const NO_DOCUMENT_REPLY: &str = "⚠️ Please upload a PDF first.";

pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let bytes = field.bytes().await?;
        upload = Some((filename, bytes));
    }

    let (filename, bytes) = upload.ok_or(ApiError::MissingField("file"))?;
    log::info!("Received {} ({} bytes)", filename, bytes.len());

    let processor = state.processor.clone();
    let gemini = state.gemini.clone();
    let chain = tokio::task::spawn_blocking(move || -> anyhow::Result<QaChain> {
        let document = processor.process_pdf_bytes(&filename, &bytes)?;
        Ok(QaChain::build(document, gemini))
    })
    .await
    .map_err(|e| ApiError::DocumentProcessing(e.to_string()))?
    .map_err(|e| ApiError::DocumentProcessing(format!("{e:#}")))?;

    log::info!("QA chain ready with {} chunks", chain.chunk_count());
    state.install(chain).await;

    Ok(Json(UploadResponse {
        message: UPLOAD_OK_MESSAGE.to_string(),
    }))
}

pub async fn ask(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AskResponse>, ApiError> {
    let mut question = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("request") {
            question = Some(field.text().await?);
        }
    }

    let question = question.ok_or(ApiError::MissingField("request"))?;

    let Some(chain) = state.current_chain().await else {
        return Ok(Json(AskResponse {
            reply: NO_DOCUMENT_REPLY.to_string(),
        }));
    };

    log::info!("Asking question: {}", question);
    let reply = chain
        .invoke(&question)
        .await
        .map_err(|e| ApiError::Generation(format!("{e:#}")))?;

    Ok(Json(AskResponse { reply }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
            error_type: None,
        }),
    )
}
