//! Repository implementations for database access
//!
//! `SchoolStore` is the seam the submission and listing handlers depend on:
//! - `SchoolRepo` talks to Postgres through the shared pool
//! - `MemorySchoolStore` keeps rows in memory for tests and local runs

pub mod schools;

pub use schools::{MemorySchoolStore, SchoolRepo, SchoolStore};
