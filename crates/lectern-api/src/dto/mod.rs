//! Request/response data transfer objects.

pub mod request;
pub mod response;
