// src/services/mod.rs
pub mod downsample;
pub mod simulator;
pub mod store;
