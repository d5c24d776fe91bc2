//! # TaskHub Shared Library
//!
//! Domain types and business logic behind the TaskHub API: users own
//! projects, projects contain tasks, and every query is scoped to the
//! requesting user.
//!
//! ## Module Organization
//!
//! - `models`: users, projects, tasks and their input/patch types
//! - `pagination`: page/limit parsing and paged results
//! - `store`: persistence trait with PostgreSQL and in-memory backends
//! - `services`: account, project and task operations
//! - `auth`: password hashing, JWTs, request auth context
//! - `db`: connection pool and migrations
//! - `error`: service error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod services;
pub mod store;

/// Current version of the TaskHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
