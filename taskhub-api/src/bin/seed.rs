//! Loads demo data into the configured store
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskhub JWT_SECRET=... cargo run -p taskhub-api --bin taskhub-seed
//! ```
//!
//! Every existing user, project and task is deleted first.

use std::sync::Arc;

use taskhub_api::{config::Config, seed, telemetry};
use taskhub_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::PgStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.logging.json);

    if config.database.is_memory() {
        anyhow::bail!("Seeding needs a PostgreSQL DATABASE_URL; the in-memory store does not persist");
    }

    ensure_database_exists(&config.database.url).await?;
    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    run_migrations(&pool).await?;

    let summary = seed::seed(Arc::new(PgStore::new(pool.clone())), &config.jwt.secret).await?;
    tracing::info!(
        email = %summary.user.email,
        projects = summary.projects,
        tasks = summary.tasks,
        "Demo data loaded"
    );

    close_pool(pool).await;
    Ok(())
}
