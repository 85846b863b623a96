//! Terminal rendering

pub mod table;

pub use table::*;
