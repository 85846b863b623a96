//! Core domain models
//!
//! Museums come from Wikidata and are never stored; annotations are the only
//! thing a user owns:
//! - [`Museum`] is read-only, one per query result row
//! - [`UserMuseumRecord`] is the persisted annotation, one per (user, museum)
//! - [`UserMuseumData`] is the client-side view of an annotation

pub mod user_museum;

// Re-export commonly used types
pub use mp_wikidata::{is_entity_uri, Museum, MuseumPage};
pub use user_museum::{SaveUserMuseum, UserMuseumData, UserMuseumRecord};
