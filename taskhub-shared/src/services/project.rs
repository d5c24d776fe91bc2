/// Project service
///
/// Every operation is scoped to the requesting user. Lookups, updates and
/// deletes match on `(id, owner)` in a single store call, so a project that
/// belongs to someone else is reported exactly like a missing one.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{ServiceError, ServiceResult},
    models::project::{NewProject, Project, ProjectChanges},
    pagination::{paginate, Page, PageRequest},
    store::Store,
};

#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn Store>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a project owned by `owner_id`
    ///
    /// # Errors
    ///
    /// `Validation` if the title is blank or a field is too long.
    pub async fn create(&self, owner_id: Uuid, input: NewProject) -> ServiceResult<Project> {
        let input = input.normalized();
        input.validate()?;

        let project = self.store.insert_project(owner_id, input).await?;
        info!(project_id = %project.id, %owner_id, "Project created");
        Ok(project)
    }

    /// Lists the owner's projects, newest first
    pub async fn list(&self, owner_id: Uuid, request: PageRequest) -> ServiceResult<Page<Project>> {
        let page = paginate(
            request,
            self.store.count_projects(owner_id),
            |skip, limit| self.store.list_projects(owner_id, skip, limit),
        )
        .await?;

        debug!(
            %owner_id,
            page = page.current_page,
            returned = page.items.len(),
            total = page.total,
            "Listed projects"
        );
        Ok(page)
    }

    /// Returns the project if it exists and belongs to `owner_id`
    pub async fn find_owned(&self, owner_id: Uuid, project_id: Uuid) -> ServiceResult<Project> {
        self.store
            .find_project(project_id, owner_id)
            .await?
            .ok_or(ServiceError::NotFound("Project"))
    }

    /// Applies a partial update
    ///
    /// # Errors
    ///
    /// `NotFound` if no project with this id is owned by `owner_id`.
    pub async fn update(
        &self,
        owner_id: Uuid,
        project_id: Uuid,
        changes: ProjectChanges,
    ) -> ServiceResult<Project> {
        let changes = changes.normalized();
        changes.validate()?;

        let project = self
            .store
            .update_project(project_id, owner_id, changes)
            .await?
            .ok_or(ServiceError::NotFound("Project"))?;

        info!(%project_id, %owner_id, status = project.status.as_str(), "Project updated");
        Ok(project)
    }

    /// Deletes a project and its tasks
    pub async fn delete(&self, owner_id: Uuid, project_id: Uuid) -> ServiceResult<()> {
        if !self.store.delete_project(project_id, owner_id).await? {
            return Err(ServiceError::NotFound("Project"));
        }

        info!(%project_id, %owner_id, "Project deleted");
        Ok(())
    }
}
