//! Material domain entities: the folder/book hierarchy.

pub mod model;
pub mod tree;

pub use model::{CreateMaterial, Material, MaterialKind};
pub use tree::MaterialNode;
