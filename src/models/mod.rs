// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod campground;
pub mod review;
pub mod user;

pub use campground::*;
pub use review::*;
pub use user::*;
