use super::{
    form::{FormState, InputSource},
    page::{self, Outcome, PageView},
    types::{DownloadForm, ErrorResponse, SummarizeRequest, SummarizeResponse},
};
use crate::{
    Error, Result,
    summarizer::{
        DEFAULT_LANGUAGE, DEFAULT_SUMMARY_WORDS, ModelInfo, SummaryRequest, SummaryStyle,
        Summarizer, TextStats, text,
    },
};
use axum::{
    Form,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
}

pub async fn index() -> Html<String> {
    let form = FormState::default();
    Html(page::render(&PageView {
        form: &form,
        input_text: None,
        outcome: Outcome::Pending,
    }))
}

/// Validates source text and builds the request. Nothing reaches the model
/// unless this succeeds.
fn build_request(
    source_text: &str,
    style: SummaryStyle,
    max_words: u32,
    language: &str,
) -> Result<SummaryRequest> {
    text::validate_source_text(source_text)?;
    SummaryRequest::new(source_text, style, max_words, language)
}

fn log_failure(request_id: Uuid, err: &Error) {
    match err {
        Error::InvalidInput(_) => warn!("[{}] Rejected request: {}", request_id, err),
        _ => error!("[{}] Failed to summarize: {}", request_id, err),
    }
}

pub async fn summarize_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let request_id = Uuid::new_v4();

    let form = match FormState::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => {
            log_failure(request_id, &e);
            let form = FormState::default();
            let html = page::render(&PageView {
                form: &form,
                input_text: None,
                outcome: Outcome::Failure {
                    message: e.to_string(),
                    show_hint: false,
                },
            });
            return (e.status_code(), Html(html));
        }
    };

    info!(
        "[{}] Received form submission ({:?} input)",
        request_id, form.input_method
    );

    let (input_text, result) = match form.source().map(InputSource::into_text) {
        Some(Ok(source_text)) => {
            let result = match build_request(
                &source_text,
                form.style,
                form.max_words,
                &form.language,
            ) {
                Ok(request) => {
                    state
                        .summarizer
                        .summarize_with_id(request_id, &request)
                        .await
                }
                Err(e) => Err(e),
            };
            (Some(source_text), result)
        }
        Some(Err(e)) => (None, Err(e)),
        None => (
            None,
            Err(Error::invalid_input("Please upload a .txt or .md file")),
        ),
    };

    let input_text = input_text.as_deref();
    match result {
        Ok(result) => {
            let stats = TextStats::compute(input_text.unwrap_or_default(), &result.summary_text);
            let html = page::render(&PageView {
                form: &form,
                input_text,
                outcome: Outcome::Success {
                    summary: &result.summary_text,
                    stats: &stats,
                },
            });
            (StatusCode::OK, Html(html))
        }
        Err(e) => {
            log_failure(request_id, &e);
            let html = page::render(&PageView {
                form: &form,
                input_text,
                outcome: Outcome::Failure {
                    message: e.to_string(),
                    show_hint: e.is_configuration() || e.is_upstream(),
                },
            });
            (e.status_code(), Html(html))
        }
    }
}

pub async fn download(Form(form): Form<DownloadForm>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"summary.txt\"",
            ),
        ],
        form.summary,
    )
}

pub async fn summarize_api(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> std::result::Result<Json<SummarizeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] Received summarize request with {} characters",
        request_id,
        request.text.chars().count()
    );

    match summarize_json(&state, request_id, &request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            log_failure(request_id, &e);
            Err((
                e.status_code(),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

async fn summarize_json(
    state: &AppState,
    request_id: Uuid,
    request: &SummarizeRequest,
) -> Result<SummarizeResponse> {
    let style = match request.style.as_deref() {
        Some(style) => style.parse()?,
        None => SummaryStyle::default(),
    };
    let summary_request = build_request(
        &request.text,
        style,
        request.max_words.unwrap_or(DEFAULT_SUMMARY_WORDS),
        request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
    )?;

    let result = state
        .summarizer
        .summarize_with_id(request_id, &summary_request)
        .await?;

    Ok(SummarizeResponse {
        request_id: request_id.to_string(),
        stats: TextStats::compute(&request.text, &result.summary_text),
        word_count: result.word_count,
        summary: result.summary_text,
        generated_at: chrono::Utc::now(),
    })
}

pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.summarizer.model_info())
}
