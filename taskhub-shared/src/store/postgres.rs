/// PostgreSQL implementation of [`Store`]
///
/// All queries are runtime-checked `sqlx::query_as` calls against the
/// schema in `migrations/`. Ownership-conditional writes are single
/// statements: the owner check lives in the `WHERE` clause of the same
/// `INSERT … SELECT`, `UPDATE … FROM` or `DELETE … USING` that performs
/// the write.
///
/// # Example
///
/// ```no_run
/// use taskhub_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskhub_shared::store::{PgStore, Store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgStore::new(pool);
/// store.ping().await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{
    project::{NewProject, Project, ProjectChanges},
    task::{NewTask, Task, TaskChanges, TaskFilter},
    user::{CreateUser, User},
};

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, e.g. for migrations or shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Treats a foreign-key violation as "the parent vanished"
///
/// This happens when a project is deleted between the snapshot an
/// `INSERT … SELECT` reads and the moment its row lock is taken.
fn parent_vanished(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_foreign_key_violation(),
        _ => false,
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, user: CreateUser) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Conflict("Email already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_project(&self, owner_id: Uuid, project: NewProject) -> Result<Project, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (owner_id, title, description, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, status, owner_id, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(project.title)
        .bind(project.description)
        .bind(project.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn find_project(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, status, owner_id, created_at, updated_at
            FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn count_projects(&self, owner_id: Uuid) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list_projects(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Project>, StoreError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, status, owner_id, created_at, updated_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn update_project(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: ProjectChanges,
    ) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, description, status, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        // Tasks go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_task(&self, owner_id: Uuid, task: NewTask) -> Result<Option<Task>, StoreError> {
        let project_id = task.project_id;
        let result = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, description, status, due_date)
            SELECT p.id, $3, $4, $5, $6
            FROM projects p
            WHERE p.id = $1 AND p.owner_id = $2
            RETURNING id, title, description, status, due_date, project_id, created_at, updated_at
            "#,
        )
        .bind(task.project_id)
        .bind(owner_id)
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(task.due_date)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(task) => Ok(task),
            Err(e) if parent_vanished(&e) => {
                warn!(%project_id, "Project deleted while inserting task");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_task_project(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.id, p.title, p.description, p.status, p.owner_id, p.created_at, p.updated_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = $1 AND p.owner_id = $2
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn count_tasks(&self, filter: TaskFilter) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM tasks
            WHERE project_id = $1 AND ($2::task_status IS NULL OR status = $2)
            "#,
        )
        .bind(filter.project_id)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn list_tasks(
        &self,
        filter: TaskFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, due_date, project_id, created_at, updated_at
            FROM tasks
            WHERE project_id = $1 AND ($2::task_status IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.project_id)
        .bind(filter.status)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn update_task(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError> {
        let (set_due_date, due_date) = match changes.due_date {
            Some(due_date) => (true, due_date),
            None => (false, None),
        };

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks t
            SET title = COALESCE($3, t.title),
                description = COALESCE($4, t.description),
                status = COALESCE($5, t.status),
                due_date = CASE WHEN $6 THEN $7 ELSE t.due_date END,
                updated_at = NOW()
            FROM projects p
            WHERE t.id = $1 AND p.id = t.project_id AND p.owner_id = $2
            RETURNING t.id, t.title, t.description, t.status, t.due_date, t.project_id,
                      t.created_at, t.updated_at
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.status)
        .bind(set_due_date)
        .bind(due_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, task_id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks t
            USING projects p
            WHERE t.id = $1 AND p.id = t.project_id AND p.owner_id = $2
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        debug!("Truncating all tables");
        sqlx::query("TRUNCATE tasks, projects, users")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
