//! Account management: users and affiliated academies.

pub mod academy;
pub mod user;

pub use academy::AcademyService;
pub use user::UserService;
