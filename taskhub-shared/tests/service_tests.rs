/// Service-level tests against the in-memory store
///
/// These cover the ownership rules end to end: owner-scoped listings,
/// paging, the task → project → owner chain, and cascade deletes.

use std::sync::Arc;

use chrono::NaiveDate;
use taskhub_shared::{
    error::ServiceError,
    models::{
        project::{NewProject, ProjectChanges, ProjectStatus},
        task::{NewTask, TaskChanges, TaskStatus},
    },
    pagination::PageRequest,
    services::{ProjectService, TaskService},
    store::{MemoryStore, Store},
};
use uuid::Uuid;

struct Harness {
    store: Arc<dyn Store>,
    projects: ProjectService,
    tasks: TaskService,
}

fn harness() -> Harness {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let projects = ProjectService::new(store.clone());
    let tasks = TaskService::new(store.clone(), projects.clone());
    Harness { store, projects, tasks }
}

fn project(title: &str) -> NewProject {
    NewProject {
        title: title.to_string(),
        ..Default::default()
    }
}

fn task(project_id: Uuid, title: &str, status: TaskStatus) -> NewTask {
    NewTask {
        project_id,
        title: title.to_string(),
        description: String::new(),
        status,
        due_date: None,
    }
}

fn page(page: i64, limit: i64) -> PageRequest {
    PageRequest::new(Some(page), Some(limit)).unwrap()
}

#[tokio::test]
async fn test_project_listing_pages_newest_first() {
    let h = harness();
    let owner = Uuid::new_v4();

    for i in 1..=7 {
        h.projects.create(owner, project(&format!("Project {i}"))).await.unwrap();
    }

    let first = h.projects.list(owner, page(1, 6)).await.unwrap();
    assert_eq!(first.items.len(), 6);
    assert_eq!(first.current_page, 1);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.total, 7);
    assert_eq!(first.items[0].title, "Project 7");

    let second = h.projects.list(owner, page(2, 6)).await.unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].title, "Project 1");

    let past_end = h.projects.list(owner, page(3, 6)).await.unwrap();
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.total, 7);
}

#[tokio::test]
async fn test_listing_only_shows_own_projects() {
    let h = harness();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    h.projects.create(alice, project("Alpha")).await.unwrap();
    h.projects.create(bob, project("Beta")).await.unwrap();

    let listed = h.projects.list(alice, PageRequest::default()).await.unwrap();
    assert_eq!(listed.total, 1);
    assert!(listed.items.iter().all(|p| p.owner_id == alice));

    let empty = h.projects.list(Uuid::new_v4(), PageRequest::default()).await.unwrap();
    assert_eq!(empty.total, 0);
    assert_eq!(empty.total_pages, 0);
    assert!(empty.items.is_empty());
}

#[tokio::test]
async fn test_foreign_project_update_and_delete_are_not_found() {
    let h = harness();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let created = h.projects.create(owner, project("Alpha")).await.unwrap();

    let changes = ProjectChanges {
        title: Some("Hijacked".to_string()),
        ..Default::default()
    };
    let err = h.projects.update(intruder, created.id, changes).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Project")));

    let err = h.projects.delete(intruder, created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Project")));

    let unchanged = h.projects.find_owned(owner, created.id).await.unwrap();
    assert_eq!(unchanged.title, "Alpha");
}

#[tokio::test]
async fn test_project_partial_update() {
    let h = harness();
    let owner = Uuid::new_v4();

    let created = h
        .projects
        .create(
            owner,
            NewProject {
                title: "Alpha".to_string(),
                description: "First".to_string(),
                status: ProjectStatus::Active,
            },
        )
        .await
        .unwrap();

    let updated = h
        .projects
        .update(
            owner,
            created.id,
            ProjectChanges {
                status: Some(ProjectStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ProjectStatus::Completed);
    assert_eq!(updated.title, "Alpha");
    assert_eq!(updated.description, "First");
    assert_eq!(updated.owner_id, owner);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_blank_project_title_is_rejected() {
    let h = harness();
    let err = h.projects.create(Uuid::new_v4(), project("   ")).await.unwrap_err();

    match err {
        ServiceError::Validation(details) => assert_eq!(details[0].field, "title"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_task_listing_filters_by_status() {
    let h = harness();
    let owner = Uuid::new_v4();
    let p = h.projects.create(owner, project("Alpha")).await.unwrap();

    h.tasks.create(owner, task(p.id, "one", TaskStatus::Todo)).await.unwrap();
    h.tasks.create(owner, task(p.id, "two", TaskStatus::Done)).await.unwrap();
    h.tasks.create(owner, task(p.id, "three", TaskStatus::Todo)).await.unwrap();

    let todo = h
        .tasks
        .list_by_project(owner, p.id, Some(TaskStatus::Todo), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(todo.total, 2);
    assert_eq!(todo.total_pages, 1);
    let titles: Vec<_> = todo.items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["three", "one"]);

    let all = h
        .tasks
        .list_by_project(owner, p.id, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);
}

#[tokio::test]
async fn test_task_listing_of_foreign_project_is_not_found() {
    let h = harness();
    let owner = Uuid::new_v4();
    let p = h.projects.create(owner, project("Alpha")).await.unwrap();
    h.tasks.create(owner, task(p.id, "one", TaskStatus::Todo)).await.unwrap();

    let err = h
        .tasks
        .list_by_project(Uuid::new_v4(), p.id, None, PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Project")));
}

#[tokio::test]
async fn test_task_in_foreign_project_is_never_created() {
    let h = harness();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let p = h.projects.create(owner, project("Alpha")).await.unwrap();

    let err = h
        .tasks
        .create(intruder, task(p.id, "sneaky", TaskStatus::Todo))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Project")));

    let listed = h
        .tasks
        .list_by_project(owner, p.id, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(listed.total, 0);

    let err = h
        .tasks
        .create(owner, task(Uuid::new_v4(), "orphan", TaskStatus::Todo))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Project")));
}

#[tokio::test]
async fn test_foreign_task_update_leaves_task_unchanged() {
    let h = harness();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let p = h.projects.create(owner, project("Alpha")).await.unwrap();
    let t = h.tasks.create(owner, task(p.id, "mine", TaskStatus::Todo)).await.unwrap();

    let changes = TaskChanges {
        status: Some(TaskStatus::Done),
        ..Default::default()
    };
    let err = h.tasks.update(intruder, t.id, changes).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Task")));

    let err = h.tasks.delete(intruder, t.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Task")));

    let listed = h
        .tasks
        .list_by_project(owner, p.id, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(listed.items, vec![t]);
}

#[tokio::test]
async fn test_authorize_resolves_parent_project() {
    let h = harness();
    let owner = Uuid::new_v4();
    let p = h.projects.create(owner, project("Alpha")).await.unwrap();
    let t = h.tasks.create(owner, task(p.id, "mine", TaskStatus::Todo)).await.unwrap();

    let parent = h.tasks.authorize(owner, t.id).await.unwrap();
    assert_eq!(parent.id, p.id);

    assert!(h.tasks.authorize(Uuid::new_v4(), t.id).await.is_err());
    assert!(h.tasks.authorize(owner, Uuid::new_v4()).await.is_err());
}

#[tokio::test]
async fn test_task_partial_update_and_due_date_clearing() {
    let h = harness();
    let owner = Uuid::new_v4();
    let p = h.projects.create(owner, project("Alpha")).await.unwrap();
    let due = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let mut input = task(p.id, "write docs", TaskStatus::Todo);
    input.due_date = Some(due);
    let t = h.tasks.create(owner, input).await.unwrap();

    let updated = h
        .tasks
        .update(
            owner,
            t.id,
            TaskChanges {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.title, "write docs");
    assert_eq!(updated.due_date, Some(due));
    assert_eq!(updated.project_id, p.id);

    let cleared = h
        .tasks
        .update(
            owner,
            t.id,
            TaskChanges {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.due_date, None);
    assert_eq!(cleared.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn test_project_delete_cascades_to_tasks() {
    let h = harness();
    let owner = Uuid::new_v4();
    let p = h.projects.create(owner, project("Alpha")).await.unwrap();
    let t = h.tasks.create(owner, task(p.id, "one", TaskStatus::Todo)).await.unwrap();

    h.projects.delete(owner, p.id).await.unwrap();

    assert!(h.store.resolve_task_project(t.id, owner).await.unwrap().is_none());
    let err = h.tasks.delete(owner, t.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Task")));

    let err = h.projects.find_owned(owner, p.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Project")));
}

#[tokio::test]
async fn test_task_delete() {
    let h = harness();
    let owner = Uuid::new_v4();
    let p = h.projects.create(owner, project("Alpha")).await.unwrap();
    let t = h.tasks.create(owner, task(p.id, "one", TaskStatus::Todo)).await.unwrap();

    h.tasks.delete(owner, t.id).await.unwrap();

    let err = h.tasks.delete(owner, t.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Task")));
}
