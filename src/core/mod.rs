// src/core/mod.rs
pub mod context;
pub mod declension;
pub mod engine;
pub mod error;
pub mod paradigm;
pub mod text;
pub mod types;
