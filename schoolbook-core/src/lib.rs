//! schoolbook-core: school records and their validation
//!
//! Shared by the HTTP server and the CLI. Holds no I/O: the server owns
//! storage, the CLI owns the network.

pub mod error;
pub mod school;
pub mod validation;

pub use error::{FieldErrors, ValidationError};
pub use school::{ImageUpload, NewSchool, School, SchoolForm, ValidSubmission};
pub use validation::{check_presence, validate_form};
