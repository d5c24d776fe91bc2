//! # TaskHub API Server Library
//!
//! HTTP surface for TaskHub: users register, log in, and manage their own
//! projects and the tasks inside them.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Extractors and path/query parsing helpers
//! - `middleware`: Security headers
//! - `routes`: API route handlers
//! - `seed`: Demo data loader behind the `taskhub-seed` binary
//! - `telemetry`: Tracing subscriber setup

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod telemetry;
