//! Database layer - pool provider, migrations, and the schools repository

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::PoolProvider;
pub use repos::{MemorySchoolStore, SchoolRepo, SchoolStore};
