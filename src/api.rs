//! REST API Server for the Financial Advisor
//!
//! Exposes the advisor pipeline via HTTP endpoints
//! Integrates with the browser frontend (form posts)

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::advisor::Advisor;
use crate::error::{AdvisorError, ValidationError};
use crate::models::InvestorProfile;
use crate::profile::ProfileValidator;

/// Answer used when the engine reply has no extractable text
pub const UNEXTRACTABLE_ANSWER: &str = "Error: Could not extract response content";

/// =============================
/// Request Models
/// =============================

/// Raw form fields, before any type conversion
#[derive(Debug, Default, Deserialize)]
pub struct AskForm {
    pub question: Option<String>,
    pub age: Option<String>,
    pub monthly_salary: Option<String>,
    pub risk_appetite: Option<String>,
}

/// Profile fields exactly as the caller supplied them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileEcho {
    pub age: Option<i64>,
    pub monthly_salary: Option<f64>,
    pub risk_appetite: Option<String>,
}

#[derive(Debug)]
struct ParsedAsk {
    question: String,
    profile: InvestorProfile,
    echo: Option<ProfileEcho>,
}

/// =============================
/// Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub success: bool,
    pub message: String,
    pub question: String,
    pub answer: String,
    pub investor_profile: Option<ProfileEcho>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error_details: String,
    pub answer: Option<String>,
}

impl ErrorResponse {
    fn new(reason: &str) -> Self {
        Self {
            success: false,
            message: format!("Error processing question: {}", reason),
            error_details: reason.to_string(),
            answer: None,
        }
    }
}

fn failure(status: StatusCode, reason: &str) -> Response {
    (status, Json(ErrorResponse::new(reason))).into_response()
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub advisor: Arc<Advisor>,
}

/// =============================
/// Helpers: Form → Typed Fields
/// =============================

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_field<T: std::str::FromStr>(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ValidationError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::Malformed { field, value: raw }),
    }
}

fn parse_ask_form(form: AskForm) -> Result<ParsedAsk, ValidationError> {
    let question = non_blank(form.question).ok_or(ValidationError::EmptyQuestion)?;
    let age: Option<i64> = parse_field("age", form.age)?;
    let monthly_salary: Option<f64> = parse_field("monthly_salary", form.monthly_salary)?;
    let risk_appetite = non_blank(form.risk_appetite);

    let profile = ProfileValidator::validate(age, monthly_salary, risk_appetite.as_deref())?;

    let echo = (age.is_some() || monthly_salary.is_some() || risk_appetite.is_some()).then(|| {
        ProfileEcho {
            age,
            monthly_salary,
            risk_appetite,
        }
    });

    Ok(ParsedAsk {
        question,
        profile,
        echo,
    })
}

async fn read_multipart(mut multipart: Multipart) -> Result<AskForm, String> {
    let mut form = AskForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.map_err(|e| e.to_string())?;

        match name.as_str() {
            "question" => form.question = Some(value),
            "age" => form.age = Some(value),
            "monthly_salary" => form.monthly_salary = Some(value),
            "risk_appetite" => form.risk_appetite = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

/// Accepts urlencoded and multipart bodies
async fn read_ask_form(request: Request) -> Result<AskForm, String> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| e.body_text())?;
        read_multipart(multipart).await
    } else {
        let Form(form) = Form::<AskForm>::from_request(request, &())
            .await
            .map_err(|e| e.body_text())?;
        Ok(form)
    }
}

/// =============================
/// Info Endpoints
/// =============================

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Financial Advisor API is running",
        "endpoints": {
            "/api/ask": "POST - Ask a financial question",
            "/api/health": "GET - Health check"
        }
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "Financial Advisor"
    }))
}

/// =============================
/// Main Question Endpoint
/// =============================

async fn ask_question(State(state): State<ApiState>, request: Request) -> Response {
    let request_id = Uuid::new_v4();

    let form = match read_ask_form(request).await {
        Ok(form) => form,
        Err(reason) => {
            warn!(%request_id, "Rejected malformed form body: {}", reason);
            return failure(StatusCode::BAD_REQUEST, &reason);
        }
    };

    let parsed = match parse_ask_form(form) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(%request_id, "Rejected invalid request: {}", e);
            return failure(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    info!(
        %request_id,
        question = %parsed.question,
        has_profile = parsed.echo.is_some(),
        "Received question"
    );

    match state.advisor.ask(&parsed.question, &parsed.profile).await {
        Ok(advice) => {
            let answer = match advice.response.answer_text {
                Some(text) => text,
                None => {
                    warn!(
                        %request_id,
                        error = ?advice.response.error_message,
                        "Engine reply had no extractable answer"
                    );
                    UNEXTRACTABLE_ANSWER.to_string()
                }
            };

            info!(%request_id, elapsed_ms = advice.elapsed_ms, "Question answered");

            let body = AskResponse {
                success: true,
                message: "Question answered successfully".to_string(),
                question: parsed.question,
                answer,
                investor_profile: parsed.echo,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e @ AdvisorError::Validation(_)) => {
            warn!(%request_id, "Rejected invalid request: {}", e);
            failure(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            error!(%request_id, "Error processing question: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(advisor: Arc<Advisor>) -> Router {
    let state = ApiState { advisor };

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/ask", post(ask_question))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    advisor: Arc<Advisor>,
    bind_addr: &str,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(advisor);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    info!("API Server listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
