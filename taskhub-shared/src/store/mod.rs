/// Persistence seam
///
/// [`Store`] is the document-store contract the services are written
/// against: equality filters, creation-time ordering, skip/limit, and
/// counts. Two implementations ship with the crate:
///
/// - [`postgres::PgStore`]: PostgreSQL via sqlx, used in production
/// - [`memory::MemoryStore`]: in-process store for tests and local runs
///
/// # Ownership-conditional operations
///
/// Every mutating operation takes the requester's id and only touches rows
/// whose owner chain matches it. The check and the write happen in one
/// atomic step (a single SQL statement, or one write-lock section), so a
/// project deleted concurrently can never leave a task behind that was
/// created or edited after the ownership check.
///
/// # Ordering
///
/// Listings return newest first. Records with the same creation timestamp
/// are ordered by a stable secondary key so consecutive pages never
/// overlap.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    project::{NewProject, Project, ProjectChanges},
    task::{NewTask, Task, TaskChanges, TaskFilter},
    user::{CreateUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Document store used by all services
///
/// Implementations must be cheap to share: services hold it as
/// `Arc<dyn Store>` for the lifetime of the process.
#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;

    // Users

    /// Inserts a user. Fails with `Conflict` if the email is taken.
    async fn insert_user(&self, user: CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    // Projects

    async fn insert_project(&self, owner_id: Uuid, project: NewProject) -> Result<Project, StoreError>;

    /// Finds a project by `(id, owner)`
    async fn find_project(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Project>, StoreError>;

    async fn count_projects(&self, owner_id: Uuid) -> Result<i64, StoreError>;

    /// Lists an owner's projects, newest first
    async fn list_projects(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Project>, StoreError>;

    /// Applies changes to the project matching `(id, owner)`
    ///
    /// Returns `None` if no such project exists.
    async fn update_project(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: ProjectChanges,
    ) -> Result<Option<Project>, StoreError>;

    /// Deletes the project matching `(id, owner)` together with its tasks
    ///
    /// Returns `false` if no such project exists.
    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError>;

    // Tasks

    /// Inserts a task if its project exists and is owned by `owner_id`
    ///
    /// Returns `None` (and inserts nothing) otherwise.
    async fn insert_task(&self, owner_id: Uuid, task: NewTask) -> Result<Option<Task>, StoreError>;

    /// Resolves the owner chain of a task
    ///
    /// Returns the parent project if the task exists and its project is
    /// owned by `owner_id`.
    async fn resolve_task_project(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Project>, StoreError>;

    async fn count_tasks(&self, filter: TaskFilter) -> Result<i64, StoreError>;

    /// Lists tasks matching the filter, newest first
    async fn list_tasks(
        &self,
        filter: TaskFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Task>, StoreError>;

    /// Applies changes to a task whose owner chain ends at `owner_id`
    async fn update_task(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError>;

    /// Deletes a task whose owner chain ends at `owner_id`
    async fn delete_task(&self, task_id: Uuid, owner_id: Uuid) -> Result<bool, StoreError>;

    /// Removes every record (seeding and tests only)
    async fn clear(&self) -> Result<(), StoreError>;
}
