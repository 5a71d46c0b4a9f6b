// src/lib.rs
// DOCUMENTATION: Library root shared by the server and the seeder binaries

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod validation;
