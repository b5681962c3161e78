//! Zavia academy API server library.
//!
//! The binary and the integration tests both build the server through
//! [`app::router`].

pub mod app;
pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
