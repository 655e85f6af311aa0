//! The PDF analysis endpoint

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::Router;
use tracing::info;

use crate::llm::groq::{models, DEFAULT_TEMPERATURE};
use crate::models::AppState;
use crate::pdf;
use crate::prompt;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze-pdf/", post(analyze_pdf))
        .with_state(state)
}

/// Analyze an uploaded PDF and return the model's business insights.
///
/// Each request moves through validation, extraction, and analysis in
/// sequence; the first failing step determines the response status.
async fn analyze_pdf(State(state): State<AppState>, multipart: Multipart) -> AppResult<String> {
    let (filename, bytes) = read_file_field(multipart).await?;

    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(AppError::InvalidRequest(
            "Only PDF files are supported.".to_string(),
        ));
    }

    info!(filename = %filename, size = bytes.len(), "Analyzing uploaded PDF");

    let company_text = pdf::extract_text(&bytes)?;
    // Emptiness is unknowable before extraction, so this check sits here
    // rather than in front of the parse.
    if company_text.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "The uploaded PDF contains no extractable text.".to_string(),
        ));
    }

    let prompt = prompt::build_analysis_prompt(&company_text);
    let request = LLMRequest {
        model: models::DEFAULT.to_string(),
        messages: vec![LLMMessage::user(prompt)],
        max_tokens: None,
        temperature: Some(DEFAULT_TEMPERATURE),
    };

    let response = state.llm.create_chat_completion(&request).await?;
    let content = response.content.into_text();
    info!(content = %content, "Raw LLM content");

    Ok(content)
}

/// Pull the required `file` field out of the multipart body.
async fn read_file_field(mut multipart: Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidRequest(format!("Failed to read upload: {e}")))?;
            return Ok((filename, bytes.to_vec()));
        }
    }

    Err(AppError::InvalidRequest(
        "Missing \"file\" field.".to_string(),
    ))
}
