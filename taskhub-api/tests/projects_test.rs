/// Integration tests for the project endpoints

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_create_project() {
    let ctx = TestContext::new();
    let alice = ctx.user("Alice").await;

    let (status, body) = ctx
        .post(
            "/projects",
            &alice.token,
            json!({ "title": "Project Alpha", "description": "First test project", "status": "active" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["title"], "Project Alpha");
    assert_eq!(body["status"], "active");
    assert_eq!(body["owner"], alice.id().to_string());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_project_requires_title() {
    let ctx = TestContext::new();
    let alice = ctx.user("Alice").await;

    let (status, body) = ctx
        .post("/projects", &alice.token, json!({ "description": "no title" }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "title");
}

#[tokio::test]
async fn test_list_projects_pagination() {
    let ctx = TestContext::new();
    let alice = ctx.user("Alice").await;

    for i in 1..=7 {
        ctx.create_project(&alice.token, &format!("Project {i}"), "active").await;
    }

    let (status, body) = ctx.get("/projects?page=1&limit=6", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"].as_array().unwrap().len(), 6);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["totalProjects"], 7);
    assert_eq!(body["projects"][0]["title"], "Project 7");

    let (_, body) = ctx.get("/projects?page=2&limit=6", &alice.token).await;
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);
    assert_eq!(body["projects"][0]["title"], "Project 1");

    // Defaults are page 1, limit 6
    let (_, body) = ctx.get("/projects", &alice.token).await;
    assert_eq!(body["projects"].as_array().unwrap().len(), 6);
    assert_eq!(body["currentPage"], 1);
}

#[tokio::test]
async fn test_list_projects_rejects_bad_paging() {
    let ctx = TestContext::new();
    let alice = ctx.user("Alice").await;

    for query in ["page=0", "limit=0", "limit=-3", "page=abc"] {
        let (status, body) = ctx.get(&format!("/projects?{query}"), &alice.token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}: {body}");
        assert_eq!(body["error"], "bad_request");
    }
}

#[tokio::test]
async fn test_projects_are_scoped_to_owner() {
    let ctx = TestContext::new();
    let alice = ctx.user("Alice").await;
    let bob = ctx.user("Bob").await;

    let alpha = ctx.create_project(&alice.token, "Alpha", "active").await;
    ctx.create_project(&bob.token, "Beta", "active").await;

    let (_, body) = ctx.get("/projects", &alice.token).await;
    assert_eq!(body["totalProjects"], 1);
    assert_eq!(body["projects"][0]["title"], "Alpha");

    // Bob sees Alice's project exactly like a missing one
    let uri = format!("/projects/{alpha}");
    let (status, foreign) = ctx.put(&uri, &bob.token, json!({ "title": "Hijacked" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let missing = format!("/projects/{}", uuid::Uuid::new_v4());
    let (status, absent) = ctx.put(&missing, &bob.token, json!({ "title": "Hijacked" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(foreign, absent);

    let (status, _) = ctx.delete(&uri, &bob.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = ctx.get("/projects", &alice.token).await;
    assert_eq!(body["projects"][0]["title"], "Alpha");
}

#[tokio::test]
async fn test_update_project_is_partial() {
    let ctx = TestContext::new();
    let alice = ctx.user("Alice").await;

    let (_, created) = ctx
        .post(
            "/projects",
            &alice.token,
            json!({ "title": "Alpha", "description": "Keep me", "status": "active" }),
        )
        .await;
    let uri = format!("/projects/{}", created["id"].as_str().unwrap());

    let (status, body) = ctx.put(&uri, &alice.token, json!({ "status": "completed" })).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "completed");
    assert_eq!(body["title"], "Alpha");
    assert_eq!(body["description"], "Keep me");

    let (_, body) = ctx.put(&uri, &alice.token, json!({ "description": "" })).await;
    assert_eq!(body["description"], "");
    assert_eq!(body["status"], "completed");

    let (status, _) = ctx.put(&uri, &alice.token, json!({ "status": "archived" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_project_removes_its_tasks() {
    let ctx = TestContext::new();
    let alice = ctx.user("Alice").await;

    let project = ctx.create_project(&alice.token, "Alpha", "active").await;
    let task = ctx.create_task(&alice.token, &project, "Task 1", "todo").await;

    let (status, body) = ctx.delete(&format!("/projects/{project}"), &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Project deleted successfully");

    let (status, _) = ctx.get(&format!("/tasks/{project}"), &alice.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.delete(&format!("/tasks/{task}"), &alice.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_project_id_is_not_found() {
    let ctx = TestContext::new();
    let alice = ctx.user("Alice").await;

    let (status, body) = ctx.delete("/projects/not-a-uuid", &alice.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project not found");
}
