//! Add-school command
//!
//! Runs the same field rules as the submission form before anything is
//! sent, then posts the school as multipart to `POST /api/schools`.
//!
//! ```bash
//! schoolbook add --name "Oak School" --address "12 Oak Ave" --city Springfield \
//!     --state IL --contact 5551234567 --email a@b.com --image logo.png
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use schoolbook_core::{validate_form, FieldErrors, ImageUpload, SchoolForm, ValidSubmission};

use super::{handle_response, schools_url, DEFAULT_ENDPOINT};

/// Arguments for the add command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// API endpoint
    #[arg(long, env = "SCHOOLBOOK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// School name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Street address
    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub state: String,

    /// Contact number, 7-15 digits
    #[arg(long, default_value = "")]
    pub contact: String,

    /// Contact email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Path to the school image
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    success: bool,
}

/// Validate locally, then submit
pub async fn run_add(args: AddArgs) -> Result<()> {
    let endpoint = args.endpoint.clone();
    let form = collect_form(args).await;

    let submission = match validate_form(form) {
        Ok(submission) => submission,
        Err(errors) => {
            report_field_errors(&errors);
            bail!("{} invalid field(s), nothing submitted", errors.len());
        }
    };

    let name = submission.name.clone();
    let created: CreatedResponse = handle_response(
        Client::new()
            .post(schools_url(&endpoint))
            .multipart(multipart_form(submission))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", endpoint))?,
    )
    .await?;

    if !created.success {
        bail!("Server did not accept the school");
    }

    println!("Added {}", name);
    Ok(())
}

async fn collect_form(args: AddArgs) -> SchoolForm {
    let image = match &args.image {
        Some(path) => read_image(path).await,
        None => None,
    };

    SchoolForm {
        name: args.name,
        address: args.address,
        city: args.city,
        state: args.state,
        contact: args.contact,
        email_id: args.email,
        image,
    }
}

/// Unreadable files are treated as no image at all.
async fn read_image(path: &Path) -> Option<ImageUpload> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            Some(ImageUpload::new(file_name, bytes))
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "could not read image");
            None
        }
    }
}

/// One line per invalid field, in form order.
fn report_field_errors(errors: &FieldErrors) {
    let fields = SchoolForm::TEXT_FIELDS.iter().chain(std::iter::once(&"image"));
    for field in fields {
        if let Some(message) = errors.get(field) {
            eprintln!("  {}: {}", field, message);
        }
    }
}

fn multipart_form(submission: ValidSubmission) -> Form {
    let mut image = Part::bytes(submission.image.bytes);
    if let Some(file_name) = submission.image.file_name {
        image = image.file_name(file_name);
    }

    Form::new()
        .text("name", submission.name)
        .text("address", submission.address)
        .text("city", submission.city)
        .text("state", submission.state)
        .text("contact", submission.contact)
        .text("email_id", submission.email_id)
        .part("image", image)
}
