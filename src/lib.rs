// src/lib.rs

//! linkhound: search-engine link sweeps filed into reviewable categories.

pub mod error;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
