//! # lectern-service
//!
//! Business logic service layer for Lectern. Each service orchestrates
//! repositories, object storage, and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection, with all dependencies provided
//! at construction time via `Arc` references.

pub mod account;
pub mod auth;
pub mod context;
pub mod favorite;
pub mod ingest;
pub mod material;

pub use account::{AcademyService, UserService};
pub use auth::AuthService;
pub use context::RequestContext;
pub use favorite::FavoriteService;
pub use ingest::{AudioService, HtmlLayerService, PdfIngestService};
pub use material::MaterialService;
