/// Project endpoints
///
/// All routes require a valid access token and only ever see the caller's
/// own projects.
///
/// - `POST /projects` - Create a project
/// - `GET /projects?page&limit` - List own projects, newest first
/// - `PUT /projects/:id` - Partially update a project
/// - `DELETE /projects/:id` - Delete a project and its tasks

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskhub_shared::{
    auth::context::AuthContext,
    models::project::{NewProject, Project, ProjectChanges},
    pagination::{Page, PageRequest},
};

use super::MessageResponse;
use crate::{
    app::AppState,
    error::ApiResult,
    extract::{parse_id, parse_number, ApiJson, ApiQuery},
};

/// Paging parameters, kept as strings so a bad value becomes a 400 with a
/// readable message
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// One page of projects
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_projects: i64,
}

impl From<Page<Project>> for ProjectListResponse {
    fn from(page: Page<Project>) -> Self {
        Self {
            projects: page.items,
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_projects: page.total,
        }
    }
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<NewProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = state.projects.create(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Lists the caller's projects
///
/// `page` defaults to 1 and `limit` to 6. Values below 1 are rejected with
/// `400 Bad Request`.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiQuery(query): ApiQuery<ListProjectsQuery>,
) -> ApiResult<Json<ProjectListResponse>> {
    let request = PageRequest::new(
        parse_number(query.page.as_deref(), "page")?,
        parse_number(query.limit.as_deref(), "limit")?,
    )?;

    let page = state.projects.list(auth.user_id, request).await?;
    Ok(Json(page.into()))
}

/// Applies the fields present in the body; absent fields are unchanged
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<ProjectChanges>,
) -> ApiResult<Json<Project>> {
    let id = parse_id(&id, "Project")?;
    let project = state.projects.update(auth.user_id, id, changes).await?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "Project")?;
    state.projects.delete(auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
