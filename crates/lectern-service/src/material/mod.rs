//! Material hierarchy: tree building and mutation operations.

pub mod service;
pub mod tree;

pub use service::MaterialService;
pub use tree::build_tree;
