//! Repository implementations, one per entity.

pub mod academy;
pub mod audio;
pub mod favorite;
pub mod material;
pub mod page;
pub mod user;
