/// Task model
///
/// A task belongs to exactly one project and has no owner column of its
/// own. Its effective owner is always the owner of the parent project, and
/// every store operation on a task joins through `projects` to check it.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in-progress', 'done');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status task_status NOT NULL DEFAULT 'todo',
///     due_date DATE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```
/// use taskhub_shared::models::task::{TaskChanges, TaskStatus};
///
/// // Only the fields present in the payload are changed
/// let changes: TaskChanges = serde_json::from_str(r#"{"status":"done"}"#).unwrap();
/// assert_eq!(changes.status, Some(TaskStatus::Done));
/// assert!(changes.title.is_none());
/// assert!(changes.due_date.is_none());
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Task progress status
///
/// Free enumeration: any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "unknown task status '{other}', expected one of: todo, in-progress, done"
            )),
        }
    }
}

/// A task inside a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,

    pub title: String,

    pub description: String,

    pub status: TaskStatus,

    pub due_date: Option<NaiveDate>,

    /// Parent project
    #[serde(rename = "project")]
    pub project_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub project_id: Uuid,

    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title is required and must be at most 200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default, deserialize_with = "due_date::optional")]
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self
    }
}

/// Partial update for a task
///
/// An absent key keeps the stored value. For `dueDate` an explicit `null`
/// clears the date, which is why it is a double option.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    #[serde(default, deserialize_with = "due_date::present")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskChanges {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self
    }

    /// Applies the changes to an in-memory copy
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

/// Equality filter for task listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: Uuid,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        task.project_id == self.project_id && self.status.map_or(true, |s| task.status == s)
    }
}

/// Lenient `dueDate` parsing
///
/// Form clients send `""` for an unset date and sometimes a full RFC 3339
/// timestamp instead of `YYYY-MM-DD`. An empty string reads as no date and
/// a timestamp keeps the calendar date it was written with.
pub mod due_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Result<Option<NaiveDate>, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }

        DateTime::parse_from_rfc3339(raw)
            .map(|timestamp| Some(timestamp.date_naive()))
            .map_err(|_| format!("invalid dueDate `{}`, expected YYYY-MM-DD", raw))
    }

    /// `null`, `""` and an absent key all mean no date
    pub fn optional<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map_err(D::Error::custom),
            None => Ok(None),
        }
    }

    /// Marks the key as present, so `null` and `""` become `Some(None)`
    pub fn present<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        optional(deserializer).map(Some)
    }
}
