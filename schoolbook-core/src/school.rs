//! School record types

use serde::{Deserialize, Serialize};

/// A persisted school row.
///
/// Field names match the `schools` table and the JSON returned by
/// `GET /api/schools`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub image: String,
    pub email_id: String,
}

/// Insert payload: a validated submission whose image is already on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    /// Public reference path of the stored image, e.g. `/schoolImages/ab12.png`
    pub image: String,
}

/// Uploaded image bytes plus the filename the client sent, if any.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Raw form input as submitted, before either validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: Option<ImageUpload>,
}

impl SchoolForm {
    /// Form names of the text fields, in form order.
    pub const TEXT_FIELDS: [&'static str; 6] =
        ["name", "address", "city", "state", "contact", "email_id"];

    /// Text fields paired with their form names, in form order.
    pub fn text_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("contact", &self.contact),
            ("email_id", &self.email_id),
        ]
    }

    /// Assign a text field by its form name. Returns false for unknown names.
    pub fn set_text(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "contact" => &mut self.contact,
            "email_id" => &mut self.email_id,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// A submission that passed validation: text trimmed, image non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: ImageUpload,
}

impl ValidSubmission {
    /// Row payload for this submission, pointing at the stored `image_ref`.
    pub fn into_new_school(self, image_ref: String) -> NewSchool {
        NewSchool {
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            contact: self.contact,
            email_id: self.email_id,
            image: image_ref,
        }
    }
}
