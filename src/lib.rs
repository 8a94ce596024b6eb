//! Bank Provisioning Services
//!
//! Three small REST services built from one library:
//!
//! - **accounts**: customers and their savings account (`/api`)
//! - **cards**: one credit card per mobile number (`/cards`)
//! - **loans**: one home loan per mobile number (`/loans`)
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, or an in-memory store when no
//!   database is configured
//! - **Format**: JSON requests/responses
//!
//! Each binary in `src/bin` calls [`server::run`] with its [`config::ServiceKind`].

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod server;
pub mod services;
pub mod validation;
