//! HTTP request handlers, grouped by domain.

pub mod academy;
pub mod audio;
pub mod auth;
pub mod favorite;
pub mod health;
pub mod html_layer;
pub mod library;
pub mod material;
pub mod upload;
pub mod user;
