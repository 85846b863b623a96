//! Infrastructure layer - external interfaces

pub mod db;
