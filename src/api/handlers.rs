//! HTTP request handlers

use super::types::{
    ChatRouteRequest, ContentListResponse, ErrorResponse, LabNextPayload, LabNextRequest,
    LabNextResponse, LoginForm, OkResponse, TokenResponse,
};
use super::AppState;
use crate::auth::AuthError;
use crate::content::{ContentError, ContentItem, ContentItemCreate, ContentStatus, ContentType};
use crate::reasoning::{advise, SystemResponse};
use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::Value;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(get_version))
        // Chat reasoning
        .route("/reason/chat-route", post(chat_route))
        .route("/reason/lab-next", post(lab_next))
        .route("/reason/feedback", post(feedback))
        .route("/internal/notify-sales", post(notify_sales))
        // Public content
        .route("/content/case-studies", get(list_case_studies))
        .route("/content/case-studies/:slug", get(get_case_study))
        .route("/content/jobs", get(list_jobs))
        .route("/content/jobs/:slug", get(get_job))
        // Admin content
        .route(
            "/admin/content",
            get(admin_list_content).post(admin_create_content),
        )
        .route(
            "/admin/content/:id",
            get(admin_get_content).put(admin_update_content),
        )
        .route("/admin/content/:id/publish", post(admin_publish_content))
        .route("/admin/content/:id/archive", post(admin_archive_content))
        // Auth
        .route("/auth/login", post(login))
        .with_state(state)
}

async fn health() -> Json<OkResponse> {
    Json(OkResponse { ok: true })
}

async fn get_version() -> &'static str {
    concat!("ameotech-backend ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Chat Reasoning
// ============================================================

async fn chat_route(
    State(state): State<AppState>,
    Json(req): Json<ChatRouteRequest>,
) -> Result<Json<SystemResponse>, AppError> {
    let session_id = req
        .session_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("session_id is required".to_string()))?;
    let message = req.message.unwrap_or_default();
    let page = req.page.filter(|p| !p.is_empty()).unwrap_or_else(|| "/".to_string());

    let handle = state.sessions.get_or_create(&session_id);
    // Held for the whole turn so concurrent requests for one session queue up
    let mut session = handle.lock().await;
    let response = state.engine.process(&mut session, &message, &page);
    Ok(Json(response))
}

async fn lab_next(Json(req): Json<LabNextRequest>) -> Json<LabNextResponse> {
    let lab_tool = req.tool().map(str::to_string);
    let result = req.into_result();
    let advice = advise(lab_tool.as_deref(), &result);
    tracing::debug!(lab_tool = ?lab_tool, actions = advice.next_actions.len(), "Lab advice");

    Json(LabNextResponse {
        action: "show_next_actions",
        action_payload: LabNextPayload {
            next_actions: advice.next_actions.clone(),
        },
        bot_reply: advice.bot_reply,
        next_actions: advice.next_actions,
    })
}

async fn feedback(Json(payload): Json<Value>) -> Json<OkResponse> {
    tracing::info!(feedback = %payload, "Chat feedback");
    Json(OkResponse { ok: true })
}

async fn notify_sales(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Json<OkResponse> {
    state.notifier.notify(payload);
    Json(OkResponse { ok: true })
}

// ============================================================
// Public Content
// ============================================================

fn published(state: &AppState, content_type: ContentType) -> Json<ContentListResponse> {
    Json(ContentListResponse {
        items: state
            .content
            .list(Some(content_type), Some(ContentStatus::Published)),
    })
}

fn published_by_slug(
    state: &AppState,
    content_type: ContentType,
    slug: &str,
    not_found: &str,
) -> Result<Json<ContentItem>, AppError> {
    state
        .content
        .get_by_slug(content_type, slug, Some(ContentStatus::Published))
        .map(Json)
        .map_err(|_| AppError::NotFound(not_found.to_string()))
}

async fn list_case_studies(State(state): State<AppState>) -> Json<ContentListResponse> {
    published(&state, ContentType::CaseStudy)
}

async fn get_case_study(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ContentItem>, AppError> {
    published_by_slug(&state, ContentType::CaseStudy, &slug, "Case study not found")
}

async fn list_jobs(State(state): State<AppState>) -> Json<ContentListResponse> {
    published(&state, ContentType::JobPost)
}

async fn get_job(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ContentItem>, AppError> {
    published_by_slug(&state, ContentType::JobPost, &slug, "Job not found")
}

// ============================================================
// Admin Content
// ============================================================

fn require_editor(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let role_header = headers.get("x-role").and_then(|v| v.to_str().ok());

    if state.auth.resolve_role(bearer, role_header).can_edit_content() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Forbidden".to_string()))
    }
}

async fn admin_list_content(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ContentListResponse>, AppError> {
    require_editor(&state, &headers)?;
    Ok(Json(ContentListResponse {
        items: state.content.list(None, None),
    }))
}

async fn admin_create_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ContentItemCreate>,
) -> Result<Json<ContentItem>, AppError> {
    require_editor(&state, &headers)?;
    Ok(Json(state.content.create(payload)?))
}

async fn admin_get_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ContentItem>, AppError> {
    require_editor(&state, &headers)?;
    Ok(Json(state.content.get(&id)?))
}

async fn admin_update_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<ContentItemCreate>,
) -> Result<Json<ContentItem>, AppError> {
    require_editor(&state, &headers)?;
    Ok(Json(state.content.update(&id, payload)?))
}

async fn admin_publish_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ContentItem>, AppError> {
    require_editor(&state, &headers)?;
    Ok(Json(state.content.set_status(&id, ContentStatus::Published)?))
}

async fn admin_archive_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ContentItem>, AppError> {
    require_editor(&state, &headers)?;
    Ok(Json(state.content.set_status(&id, ContentStatus::Archived)?))
}

// ============================================================
// Auth
// ============================================================

async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let access_token = state.auth.login(&form.username, &form.password)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound(_) => AppError::NotFound("Content item not found".to_string()),
            ContentError::DuplicateSlug(_) => AppError::Conflict(e.to_string()),
            ContentError::Invalid(_) => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
            AuthError::Token(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
