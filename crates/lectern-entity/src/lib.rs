//! # lectern-entity
//!
//! Domain entity models for Lectern: material tree nodes, pages, audio
//! attachments, users, and academies. All persistent entities derive
//! `sqlx::FromRow` and map 1:1 to table rows.

pub mod academy;
pub mod audio;
pub mod material;
pub mod page;
pub mod user;
