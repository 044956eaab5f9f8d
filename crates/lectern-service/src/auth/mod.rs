//! Login and token verification.

pub mod service;

pub use service::AuthService;
