//! # lectern-api
//!
//! HTTP API layer for Lectern built on Axum.
//!
//! Provides all REST endpoints, the SSE conversion stream, extractors,
//! DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
