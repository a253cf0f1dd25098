use advocate_core::error::CoreError;
use advocate_genai::GenAiError;
use advocate_pipeline::PipelineError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`PipelineError`] for failures
/// while generating content, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `advocate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure inside the generation pipeline.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Pipeline(err) => classify_pipeline_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(core: &CoreError) -> ErrorParts {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Config(msg) | CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a pipeline error into an HTTP status, error code, and message.
///
/// - Failures of the external AI services map to 502 with a sanitized message.
/// - Marketing output without any campaign ideas also maps to 502.
/// - File and serialization errors map to 500.
fn classify_pipeline_error(err: &PipelineError) -> ErrorParts {
    match err {
        PipelineError::Core(core) => classify_core_error(core),
        PipelineError::GenAi(GenAiError::Core(core)) => classify_core_error(core),
        PipelineError::GenAi(genai) => {
            tracing::error!(error = %genai, "Upstream AI service error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "An upstream AI service request failed".to_string(),
            )
        }
        PipelineError::NoCampaignIdeas => {
            tracing::warn!("Marketing output contained no campaign ideas");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
        }
        PipelineError::Io(_) | PipelineError::Json(_) => {
            tracing::error!(error = %err, "Pipeline error");
            internal()
        }
    }
}
