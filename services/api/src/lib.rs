//! services/api/src/lib.rs
//!
//! Library surface of the `api` service: configuration, error types, the
//! concrete adapters, and the web layer. The binaries under `src/bin` wire
//! these together.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;

pub use crate::web::router;
