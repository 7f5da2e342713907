//! # ticklist shared library
//!
//! This crate contains the domain core shared between the ticklist API server
//! and its tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models (`User`, `Task`) and their ownership-scoped queries
//! - `auth`: Password hashing, session tokens, and the request auth context
//! - `db`: SQLite connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the ticklist shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
