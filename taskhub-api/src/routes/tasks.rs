/// Task endpoints
///
/// Access to a task is decided by its parent project's owner. Every route
/// requires a valid access token.
///
/// - `POST /tasks` - Create a task in one of the caller's projects
/// - `GET /tasks/:projectId?status&page&limit` - List a project's tasks
/// - `PUT /tasks/:id` - Partially update a task
/// - `DELETE /tasks/:id` - Delete a task

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskhub_shared::{
    auth::context::AuthContext,
    models::task::{due_date, NewTask, Task, TaskChanges, TaskStatus},
    pagination::{Page, PageRequest},
};

use super::MessageResponse;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{parse_id, parse_number, ApiJson, ApiQuery},
};

/// Body of `POST /tasks`
///
/// `projectId` stays a string so a missing or malformed id is answered the
/// same way as an unknown project.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default, deserialize_with = "due_date::optional")]
    pub due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    fn into_new_task(self) -> ApiResult<NewTask> {
        let project_id = parse_id(self.project_id.as_deref().unwrap_or_default(), "Project")?;

        Ok(NewTask {
            project_id,
            title: self.title,
            description: self.description,
            status: self.status,
            due_date: self.due_date,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// `todo`, `in-progress` or `done`; empty means no filter
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListTasksQuery {
    fn status(&self) -> ApiResult<Option<TaskStatus>> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .map(|status| status.parse::<TaskStatus>().map_err(ApiError::BadRequest))
            .transpose()
    }
}

/// One page of tasks
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_tasks: i64,
}

impl From<Page<Task>> for TaskListResponse {
    fn from(page: Page<Task>) -> Self {
        Self {
            tasks: page.items,
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_tasks: page.total,
        }
    }
}

/// Creates a task
///
/// # Errors
///
/// - `404 Not Found`: the project is missing, malformed or belongs to someone else
/// - `422 Unprocessable Entity`: blank title
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.tasks.create(auth.user_id, req.into_new_task()?).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Lists the tasks of one of the caller's projects, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<String>,
    ApiQuery(query): ApiQuery<ListTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let project_id = parse_id(&project_id, "Project")?;
    let status = query.status()?;
    let request = PageRequest::new(
        parse_number(query.page.as_deref(), "page")?,
        parse_number(query.limit.as_deref(), "limit")?,
    )?;

    let page = state
        .tasks
        .list_by_project(auth.user_id, project_id, status, request)
        .await?;
    Ok(Json(page.into()))
}

/// Applies the fields present in the body; `"dueDate": null` clears the date
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<TaskChanges>,
) -> ApiResult<Json<Task>> {
    let id = parse_id(&id, "Task")?;
    let task = state.tasks.update(auth.user_id, id, changes).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "Task")?;
    state.tasks.delete(auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(status: Option<&str>) -> ListTasksQuery {
        ListTasksQuery {
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!(query(None).status().unwrap(), None);
        assert_eq!(query(Some("")).status().unwrap(), None);
        assert_eq!(query(Some("in-progress")).status().unwrap(), Some(TaskStatus::InProgress));
        assert!(matches!(query(Some("finished")).status(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_create_request_project_id() {
        let id = uuid::Uuid::new_v4();
        let req = CreateTaskRequest {
            project_id: Some(id.to_string()),
            title: "Task 1".to_string(),
            ..Default::default()
        };
        assert_eq!(req.into_new_task().unwrap().project_id, id);

        for project_id in [None, Some(String::new()), Some("42".to_string())] {
            let req = CreateTaskRequest {
                project_id,
                ..Default::default()
            };
            assert!(matches!(
                req.into_new_task(),
                Err(ApiError::NotFound(msg)) if msg == "Project not found"
            ));
        }
    }
}
