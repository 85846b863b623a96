//! Sea-ORM entity definitions

pub mod user_museum;

pub use user_museum::Entity as UserMuseum;
