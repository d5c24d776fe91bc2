/// Domain models for TaskHub
///
/// # Models
///
/// - `user`: Registered accounts
/// - `project`: Projects, scoped to their owner
/// - `task`: Tasks, scoped to their parent project
///
/// The models are plain data. Persistence goes through
/// [`crate::store::Store`], business rules through [`crate::services`].

pub mod project;
pub mod task;
pub mod user;
