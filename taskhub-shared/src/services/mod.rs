/// Business logic
///
/// Services sit between the HTTP handlers and the [`Store`](crate::store::Store).
/// They validate input, enforce ownership, and translate store results into
/// [`ServiceError`](crate::error::ServiceError)s.
///
/// - [`account`]: registration, login, token refresh
/// - [`project`]: owner-scoped project CRUD and paging
/// - [`task`]: task CRUD authorized through the parent project

pub mod account;
pub mod project;
pub mod task;

pub use account::{AccountService, LoginOutcome, NewAccount};
pub use project::ProjectService;
pub use task::TaskService;
