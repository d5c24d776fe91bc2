/// PostgreSQL plumbing
///
/// - [`pool`]: connection pool creation, health check and shutdown
/// - [`migrations`]: schema migrations embedded from `migrations/`
///
/// Queries live in [`crate::store::postgres`].
///
/// # Example
///
/// ```no_run
/// use taskhub_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

pub mod migrations;
pub mod pool;
