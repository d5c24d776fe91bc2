/// In-memory implementation of [`Store`]
///
/// All collections live behind a single `tokio::sync::RwLock`, so every
/// ownership-conditional operation holds the write lock across the check
/// and the write. Each record also gets a monotonically increasing
/// sequence number that breaks ties between equal creation timestamps.
///
/// Selected at runtime with `DATABASE_URL=memory`; also backs the test
/// suites.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{
    project::{NewProject, Project, ProjectChanges},
    task::{NewTask, Task, TaskChanges, TaskFilter},
    user::{CreateUser, User},
};

#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    record: T,
}

#[derive(Debug, Default)]
struct Collections {
    next_seq: u64,
    users: HashMap<Uuid, Stored<User>>,
    projects: HashMap<Uuid, Stored<Project>>,
    tasks: HashMap<Uuid, Stored<Task>>,
}

impl Collections {
    fn stamp<T>(&mut self, record: T) -> Stored<T> {
        self.next_seq += 1;
        Stored {
            seq: self.next_seq,
            record,
        }
    }

    fn owned_project(&self, id: Uuid, owner_id: Uuid) -> Option<&Project> {
        self.projects
            .get(&id)
            .map(|stored| &stored.record)
            .filter(|project| project.owner_id == owner_id)
    }

    /// Follows task → project → owner
    fn owning_project(&self, task_id: Uuid, owner_id: Uuid) -> Option<&Project> {
        let task = self.tasks.get(&task_id)?;
        self.owned_project(task.record.project_id, owner_id)
    }
}

/// Newest first, later insertion wins ties
fn newest_first<T, K: Ord>(items: &mut [&Stored<T>], created_at: impl Fn(&T) -> K) {
    items.sort_by(|a, b| {
        created_at(&b.record)
            .cmp(&created_at(&a.record))
            .then(b.seq.cmp(&a.seq))
    });
}

fn window<T: Clone>(items: Vec<&Stored<T>>, skip: i64, limit: i64) -> Vec<T> {
    let skip = usize::try_from(skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(0);
    items
        .into_iter()
        .skip(skip)
        .take(limit)
        .map(|stored| stored.record.clone())
        .collect()
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_user(&self, user: CreateUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.record.email == user.email) {
            return Err(StoreError::Conflict("Email already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        let stored = inner.stamp(user.clone());
        inner.users.insert(user.id, stored);

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.record.email == email)
            .map(|u| u.record.clone()))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|u| u.record.clone()))
    }

    async fn insert_project(&self, owner_id: Uuid, project: NewProject) -> Result<Project, StoreError> {
        let mut inner = self.inner.write().await;

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            title: project.title,
            description: project.description,
            status: project.status,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        let stored = inner.stamp(project.clone());
        inner.projects.insert(project.id, stored);

        Ok(project)
    }

    async fn find_project(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Project>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.owned_project(id, owner_id).cloned())
    }

    async fn count_projects(&self, owner_id: Uuid) -> Result<i64, StoreError> {
        let inner = self.inner.read().await;
        let count = inner
            .projects
            .values()
            .filter(|p| p.record.owner_id == owner_id)
            .count();
        Ok(count as i64)
    }

    async fn list_projects(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Project>, StoreError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&Stored<Project>> = inner
            .projects
            .values()
            .filter(|p| p.record.owner_id == owner_id)
            .collect();
        newest_first(&mut matching, |p| p.created_at);
        Ok(window(matching, skip, limit))
    }

    async fn update_project(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: ProjectChanges,
    ) -> Result<Option<Project>, StoreError> {
        let mut inner = self.inner.write().await;

        let Some(stored) = inner
            .projects
            .get_mut(&id)
            .filter(|p| p.record.owner_id == owner_id)
        else {
            return Ok(None);
        };

        changes.apply_to(&mut stored.record);
        stored.record.updated_at = Utc::now();
        Ok(Some(stored.record.clone()))
    }

    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.owned_project(id, owner_id).is_none() {
            return Ok(false);
        }

        inner.projects.remove(&id);
        inner.tasks.retain(|_, t| t.record.project_id != id);
        Ok(true)
    }

    async fn insert_task(&self, owner_id: Uuid, task: NewTask) -> Result<Option<Task>, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.owned_project(task.project_id, owner_id).is_none() {
            return Ok(None);
        }

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: task.title,
            description: task.description,
            status: task.status,
            due_date: task.due_date,
            project_id: task.project_id,
            created_at: now,
            updated_at: now,
        };
        let stored = inner.stamp(task.clone());
        inner.tasks.insert(task.id, stored);

        Ok(Some(task))
    }

    async fn resolve_task_project(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Project>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.owning_project(task_id, owner_id).cloned())
    }

    async fn count_tasks(&self, filter: TaskFilter) -> Result<i64, StoreError> {
        let inner = self.inner.read().await;
        let count = inner
            .tasks
            .values()
            .filter(|t| filter.matches(&t.record))
            .count();
        Ok(count as i64)
    }

    async fn list_tasks(
        &self,
        filter: TaskFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&Stored<Task>> = inner
            .tasks
            .values()
            .filter(|t| filter.matches(&t.record))
            .collect();
        newest_first(&mut matching, |t| t.created_at);
        Ok(window(matching, skip, limit))
    }

    async fn update_task(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.owning_project(task_id, owner_id).is_none() {
            return Ok(None);
        }

        let Some(stored) = inner.tasks.get_mut(&task_id) else {
            return Ok(None);
        };
        changes.apply_to(&mut stored.record);
        stored.record.updated_at = Utc::now();
        Ok(Some(stored.record.clone()))
    }

    async fn delete_task(&self, task_id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.owning_project(task_id, owner_id).is_none() {
            return Ok(false);
        }

        Ok(inner.tasks.remove(&task_id).is_some())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        *inner = Collections::default();
        Ok(())
    }
}
