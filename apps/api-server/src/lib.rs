//! # Blog API Server
//!
//! Library surface of the server binary, split out so the integration
//! tests can assemble the same router against an in-memory repository.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
