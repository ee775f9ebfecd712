//! schoolbook-server: school submission and listing over HTTP
//!
//! Accepts multipart school submissions, stores the image under a public
//! directory, inserts the row into Postgres, and lists schools newest first.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod images;
pub mod submission;

pub use config::DatabaseConfig;
pub use error::StorageError;
pub use images::ImageStore;
