// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod campground_repository;
pub mod review_repository;
pub mod user_repository;

pub use campground_repository::*;
pub use review_repository::*;
pub use user_repository::*;
