//! Per-user favorites and rebased subtree snapshots.

pub mod service;

pub use service::FavoriteService;
