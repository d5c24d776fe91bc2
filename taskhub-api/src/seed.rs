/// Demo data
///
/// Wipes the store and loads one user with two projects of three tasks
/// each, covering every project and task status.
///
/// | | |
/// |---|---|
/// | email | `test@example.com` |
/// | password | `Test@123` |

use std::sync::Arc;

use chrono::Utc;
use taskhub_shared::{
    error::ServiceResult,
    models::{
        project::{NewProject, ProjectStatus},
        task::{NewTask, TaskStatus},
        user::PublicUser,
    },
    services::{AccountService, NewAccount, ProjectService, TaskService},
    store::Store,
};
use tracing::info;

pub const SEED_EMAIL: &str = "test@example.com";
pub const SEED_PASSWORD: &str = "Test@123";

/// What [`seed`] created
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub user: PublicUser,
    pub projects: usize,
    pub tasks: usize,
}

/// Clears every record and inserts the demo data
pub async fn seed(store: Arc<dyn Store>, jwt_secret: &str) -> ServiceResult<SeedSummary> {
    store.clear().await?;
    info!("Cleared existing data");

    let accounts = AccountService::new(store.clone(), jwt_secret);
    let projects = ProjectService::new(store.clone());
    let tasks = TaskService::new(store, projects.clone());

    let user = accounts
        .register(NewAccount {
            name: "Test User".to_string(),
            email: SEED_EMAIL.to_string(),
            password: SEED_PASSWORD.to_string(),
        })
        .await?;

    let seeded_projects = [
        ("Project Alpha", "First test project", ProjectStatus::Active),
        ("Project Beta", "Second test project", ProjectStatus::Completed),
    ];
    let seeded_tasks = [
        ("Task 1", "First task", TaskStatus::Todo),
        ("Task 2", "Second task", TaskStatus::InProgress),
        ("Task 3", "Third task", TaskStatus::Done),
    ];

    let today = Utc::now().date_naive();
    let mut task_count = 0;

    for (title, description, status) in seeded_projects {
        let project = projects
            .create(
                user.id,
                NewProject {
                    title: title.to_string(),
                    description: description.to_string(),
                    status,
                },
            )
            .await?;

        for (title, description, status) in seeded_tasks {
            tasks
                .create(
                    user.id,
                    NewTask {
                        project_id: project.id,
                        title: title.to_string(),
                        description: description.to_string(),
                        status,
                        due_date: Some(today),
                    },
                )
                .await?;
            task_count += 1;
        }
    }

    info!(user_id = %user.id, projects = seeded_projects.len(), tasks = task_count, "Seeding completed");
    Ok(SeedSummary {
        user,
        projects: seeded_projects.len(),
        tasks: task_count,
    })
}
