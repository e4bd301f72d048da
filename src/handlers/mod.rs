// src/handlers/mod.rs
pub mod error;
pub mod instruments;
pub mod simulate;
