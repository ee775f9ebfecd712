//! Validation error types

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Rejection from the server-side presence check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields (or the image) were absent or blank.
    #[error("Missing required fields")]
    MissingFields { fields: Vec<&'static str> },
}

impl ValidationError {
    /// Names of the fields that failed, in form order.
    pub fn fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields { fields } => fields,
        }
    }
}

/// Field-keyed messages from the client-side form check.
///
/// Keys are form field names (`name`, `email_id`, `image`, ...); each field
/// carries at most one message, the first rule it broke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field` unless one is already present.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
