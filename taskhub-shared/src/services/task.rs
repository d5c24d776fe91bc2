/// Task service
///
/// Tasks have no owner of their own. Permission always flows through the
/// parent project:
///
/// ```text
/// requester ──owns──▶ project ◀──belongs to── task
/// ```
///
/// [`TaskService::authorize`] resolves that chain and is the single entry
/// point every mutation goes through. The store then repeats the owner
/// check inside the write itself, so a project deleted between the two
/// calls surfaces as `NotFound` instead of touching an orphan.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::project::ProjectService;
use crate::{
    error::{ServiceError, ServiceResult},
    models::{
        project::Project,
        task::{NewTask, Task, TaskChanges, TaskFilter, TaskStatus},
    },
    pagination::{paginate, Page, PageRequest},
    store::Store,
};

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
    projects: ProjectService,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>, projects: ProjectService) -> Self {
        Self { store, projects }
    }

    /// Creates a task inside a project owned by `owner_id`
    ///
    /// # Errors
    ///
    /// - `Validation` if the title is blank
    /// - `NotFound` if the project is missing or owned by someone else;
    ///   no task is created in that case
    pub async fn create(&self, owner_id: Uuid, input: NewTask) -> ServiceResult<Task> {
        let input = input.normalized();
        input.validate()?;

        let project_id = input.project_id;
        let task = self
            .store
            .insert_task(owner_id, input)
            .await?
            .ok_or(ServiceError::NotFound("Project"))?;

        info!(task_id = %task.id, %project_id, %owner_id, "Task created");
        Ok(task)
    }

    /// Lists a project's tasks, optionally restricted to one status
    ///
    /// # Errors
    ///
    /// `NotFound` if the project is missing or owned by someone else.
    pub async fn list_by_project(
        &self,
        owner_id: Uuid,
        project_id: Uuid,
        status: Option<TaskStatus>,
        request: PageRequest,
    ) -> ServiceResult<Page<Task>> {
        self.projects.find_owned(owner_id, project_id).await?;

        let filter = TaskFilter { project_id, status };
        let page = paginate(
            request,
            self.store.count_tasks(filter),
            |skip, limit| self.store.list_tasks(filter, skip, limit),
        )
        .await?;

        debug!(
            %project_id,
            status = status.map(|s| s.as_str()),
            page = page.current_page,
            returned = page.items.len(),
            total = page.total,
            "Listed tasks"
        );
        Ok(page)
    }

    /// Resolves the owner chain of a task
    ///
    /// Returns the parent project when the task exists and its project is
    /// owned by `owner_id`. A missing task, a missing project and a foreign
    /// project all produce the same `NotFound`.
    pub async fn authorize(&self, owner_id: Uuid, task_id: Uuid) -> ServiceResult<Project> {
        self.store
            .resolve_task_project(task_id, owner_id)
            .await?
            .ok_or(ServiceError::NotFound("Task"))
    }

    /// Applies a partial update to a task
    pub async fn update(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        changes: TaskChanges,
    ) -> ServiceResult<Task> {
        let changes = changes.normalized();
        changes.validate()?;

        let project = self.authorize(owner_id, task_id).await?;

        let task = self
            .store
            .update_task(task_id, owner_id, changes)
            .await?
            .ok_or(ServiceError::NotFound("Task"))?;

        info!(%task_id, project_id = %project.id, status = task.status.as_str(), "Task updated");
        Ok(task)
    }

    /// Deletes a task
    pub async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> ServiceResult<()> {
        let project = self.authorize(owner_id, task_id).await?;

        if !self.store.delete_task(task_id, owner_id).await? {
            return Err(ServiceError::NotFound("Task"));
        }

        info!(%task_id, project_id = %project.id, "Task deleted");
        Ok(())
    }
}
