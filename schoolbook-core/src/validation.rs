//! The two validation passes for a school submission
//!
//! `validate_form` is the strict pass a form client runs before sending:
//! minimum lengths, digit-only contact, email syntax. `check_presence` is the
//! pass the server runs on receipt: every field non-blank, image non-empty,
//! nothing more. A submission can fail the first and still pass the second;
//! the server stays the authority on presence only.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FieldErrors, ValidationError};
use crate::school::{ImageUpload, SchoolForm, ValidSubmission};

/// Contact number: 7 to 15 ASCII digits, no separators.
static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{7,15}$").expect("invalid contact regex"));

/// Email shape: local part, `@`, dot-separated labels, alphabetic TLD.
/// Leading dots and `..` runs are rejected separately in `is_valid_email`.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("invalid email regex")
});

const MIN_NAME_LEN: usize = 2;
const MIN_ADDRESS_LEN: usize = 5;
const MIN_CITY_LEN: usize = 2;
const MIN_STATE_LEN: usize = 2;
const MIN_CONTACT_LEN: usize = 7;

/// Server-side pass: presence only.
///
/// Trims every text field and fails with `MissingFields` if any is blank or
/// the image is absent or zero bytes. Format rules are not re-checked here.
pub fn check_presence(form: SchoolForm) -> Result<ValidSubmission, ValidationError> {
    let mut missing: Vec<&'static str> = form
        .text_fields()
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

    let image = match form.image {
        Some(image) if !image.is_empty() => Some(image),
        _ => {
            missing.push("image");
            None
        }
    };

    match image {
        Some(image) if missing.is_empty() => Ok(trimmed(
            form.name, form.address, form.city, form.state, form.contact, form.email_id, image,
        )),
        _ => Err(ValidationError::MissingFields { fields: missing }),
    }
}

/// Client-side pass: the full rule set, reporting every failing field.
pub fn validate_form(form: SchoolForm) -> Result<ValidSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    min_len(&mut errors, "name", &form.name, MIN_NAME_LEN, "Name is required");
    min_len(&mut errors, "address", &form.address, MIN_ADDRESS_LEN, "Address is required");
    min_len(&mut errors, "city", &form.city, MIN_CITY_LEN, "City is required");
    min_len(&mut errors, "state", &form.state, MIN_STATE_LEN, "State is required");

    min_len(&mut errors, "contact", &form.contact, MIN_CONTACT_LEN, "Contact is required");
    if !CONTACT_RE.is_match(form.contact.trim()) {
        errors.add("contact", "Contact must be a number with 7-15 digits");
    }

    if !is_valid_email(form.email_id.trim()) {
        errors.add("email_id", "Invalid email");
    }

    let image = match form.image {
        Some(image) if !image.is_empty() => Some(image),
        _ => {
            errors.add("image", "Image is required");
            None
        }
    };

    match image {
        Some(image) if errors.is_empty() => Ok(trimmed(
            form.name, form.address, form.city, form.state, form.contact, form.email_id, image,
        )),
        _ => Err(errors),
    }
}

/// Syntactic email check used by the client pass.
pub fn is_valid_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}

fn min_len(errors: &mut FieldErrors, field: &'static str, value: &str, min: usize, message: &str) {
    if value.trim().chars().count() < min {
        errors.add(field, message);
    }
}

fn trimmed(
    name: String,
    address: String,
    city: String,
    state: String,
    contact: String,
    email_id: String,
    image: ImageUpload,
) -> ValidSubmission {
    ValidSubmission {
        name: name.trim().to_owned(),
        address: address.trim().to_owned(),
        city: city.trim().to_owned(),
        state: state.trim().to_owned(),
        contact: contact.trim().to_owned(),
        email_id: email_id.trim().to_owned(),
        image,
    }
}
