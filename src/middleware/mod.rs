// src/middleware/mod.rs

pub mod method_override;

pub use method_override::override_method;
