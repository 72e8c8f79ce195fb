//! JSON routes over the audit store

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::commands::audit::AuditStore;
use crate::error::AuditError;
use crate::models::issue::{Issue, IssuePatch};
use crate::models::project::{Crawl, Project, Url, UrlInput};
use crate::models::summary::{CrawlSummary, IssueTypeGroup, IssueView};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: AuditStore,
}

/// Create the API router
pub fn create_router(store: AuditStore) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/{project_id}", get(get_project))
        .route(
            "/api/projects/{project_id}/crawls",
            get(list_crawls).post(start_crawl),
        )
        .route(
            "/api/projects/{project_id}/summary/latest",
            get(latest_summary),
        )
        .route("/api/crawls/{crawl_id}", get(get_crawl).delete(delete_crawl))
        .route("/api/crawls/{crawl_id}/summary", get(crawl_summary))
        .route("/api/crawls/{crawl_id}/finalize", post(finalize_crawl))
        .route("/api/crawls/{crawl_id}/fail", post(fail_crawl))
        .route("/api/crawls/{crawl_id}/urls", post(record_url))
        .route(
            "/api/crawls/{crawl_id}/issues",
            get(list_issues).post(record_issue),
        )
        .route("/api/crawls/{crawl_id}/issues/by-type", get(issue_type_groups))
        .route("/api/issues/{issue_id}", get(get_issue).patch(update_issue))
        .route("/api/urls/{url_id}", get(get_url))
        .route("/api/settings", get(get_settings).patch(save_settings))
        .fallback(not_found_handler)
        .with_state(state)
}

/// Error body: `{ error, message, retryable }`.
pub struct ApiError(AuditError);

impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        ApiError(err)
    }
}

/// Undecodable bodies and queries are validation errors, answered with the
/// same JSON envelope as every other failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AuditError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AuditError::Validation(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AuditError::NotFound { .. } => StatusCode::NOT_FOUND,
            AuditError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuditError::Incomplete { .. } | AuditError::Conflict { .. } => StatusCode::CONFLICT,
            AuditError::TransientStorage(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuditError::DataIntegrity(_) | AuditError::Storage(_) | AuditError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self.0);
        } else {
            log::debug!("Request rejected: {}", self.0);
        }
        let body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
            "retryable": self.0.is_retryable(),
        });
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "message": "no such route", "retryable": false })),
    )
}

#[derive(Debug, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub domain: String,
}

async fn list_projects(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    Ok(Json(state.store.list_projects().await?))
}

async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let project = state.store.create_project(body.name, body.domain).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(State(state): State<AppState>, Path(project_id): Path<i64>) -> ApiResult<Project> {
    Ok(Json(state.store.get_project(project_id).await?))
}

async fn list_crawls(State(state): State<AppState>, Path(project_id): Path<i64>) -> ApiResult<Vec<Crawl>> {
    Ok(Json(state.store.list_crawls(project_id).await?))
}

async fn start_crawl(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let crawl = state.store.start_crawl(project_id).await?;
    Ok((StatusCode::CREATED, Json(crawl)))
}

async fn latest_summary(State(state): State<AppState>, Path(project_id): Path<i64>) -> ApiResult<CrawlSummary> {
    Ok(Json(state.store.get_latest_crawl_summary(project_id).await?))
}

async fn get_crawl(State(state): State<AppState>, Path(crawl_id): Path<i64>) -> ApiResult<Crawl> {
    Ok(Json(state.store.get_crawl(crawl_id).await?))
}

async fn delete_crawl(
    State(state): State<AppState>,
    Path(crawl_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_crawl(crawl_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn crawl_summary(State(state): State<AppState>, Path(crawl_id): Path<i64>) -> ApiResult<CrawlSummary> {
    Ok(Json(state.store.get_crawl_summary(crawl_id).await?))
}

async fn finalize_crawl(State(state): State<AppState>, Path(crawl_id): Path<i64>) -> ApiResult<Crawl> {
    Ok(Json(state.store.finalize_crawl(crawl_id).await?))
}

async fn fail_crawl(State(state): State<AppState>, Path(crawl_id): Path<i64>) -> ApiResult<Crawl> {
    Ok(Json(state.store.fail_crawl(crawl_id).await?))
}

async fn record_url(
    State(state): State<AppState>,
    Path(crawl_id): Path<i64>,
    input: Result<Json<UrlInput>, JsonRejection>,
) -> ApiResult<Url> {
    let Json(input) = input?;
    Ok(Json(state.store.record_url(crawl_id, input).await?))
}

#[derive(Debug, Deserialize)]
pub struct NewDetection {
    pub url_id: i64,
    pub issue_code: String,
    #[serde(default)]
    pub details: Map<String, Value>,
}

async fn record_issue(
    State(state): State<AppState>,
    Path(crawl_id): Path<i64>,
    body: Result<Json<NewDetection>, JsonRejection>,
) -> ApiResult<Issue> {
    let Json(body) = body?;
    let issue = state
        .store
        .record_issue(crawl_id, body.url_id, body.issue_code, body.details)
        .await?;
    Ok(Json(issue))
}

#[derive(Debug, Deserialize)]
pub struct IssueQuery {
    /// Issue type code, e.g. `TITLE_MISSING`.
    #[serde(rename = "type")]
    pub issue_code: String,
}

async fn list_issues(
    State(state): State<AppState>,
    Path(crawl_id): Path<i64>,
    query: Result<Query<IssueQuery>, QueryRejection>,
) -> ApiResult<Vec<IssueView>> {
    let Query(query) = query?;
    Ok(Json(state.store.list_issues(crawl_id, query.issue_code).await?))
}

async fn issue_type_groups(State(state): State<AppState>, Path(crawl_id): Path<i64>) -> ApiResult<Vec<IssueTypeGroup>> {
    Ok(Json(state.store.get_issue_type_groups(crawl_id).await?))
}

async fn get_issue(State(state): State<AppState>, Path(issue_id): Path<i64>) -> ApiResult<Issue> {
    Ok(Json(state.store.get_issue(issue_id).await?))
}

async fn update_issue(
    State(state): State<AppState>,
    Path(issue_id): Path<i64>,
    patch: Result<Json<IssuePatch>, JsonRejection>,
) -> ApiResult<Issue> {
    let Json(patch) = patch?;
    Ok(Json(state.store.update_issue(issue_id, patch).await?))
}

async fn get_url(State(state): State<AppState>, Path(url_id): Path<i64>) -> ApiResult<Url> {
    Ok(Json(state.store.get_url(url_id).await?))
}

async fn get_settings(State(state): State<AppState>) -> ApiResult<Value> {
    Ok(Json(state.store.get_settings().await?))
}

async fn save_settings(
    State(state): State<AppState>,
    partial: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(partial) = partial?;
    Ok(Json(state.store.save_settings(partial).await?))
}
