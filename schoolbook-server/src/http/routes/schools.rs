//! School endpoints
//!
//! - `GET /api/schools`: every school, newest first
//! - `POST /api/schools`: multipart submission, image part named `image`

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use schoolbook_core::{ImageUpload, School, SchoolForm};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::submission::{list_schools, submit_school};

/// Form part carrying the image file
const IMAGE_FIELD: &str = "image";

/// Acceptance response
#[derive(Serialize)]
pub struct CreatedResponse {
    pub success: bool,
}

/// GET /api/schools - list all schools
async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<School>>, ApiError> {
    let schools = list_schools(state.store.as_ref()).await?;
    Ok(Json(schools))
}

/// POST /api/schools - submit a new school
async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let form = read_form(multipart?).await?;
    submit_school(state.store.as_ref(), &state.images, form).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { success: true })))
}

/// Collect the known text fields and the image part. Unknown parts are
/// skipped; a repeated part overwrites the earlier one.
async fn read_form(mut multipart: Multipart) -> Result<SchoolForm, MultipartError> {
    let mut form = SchoolForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_owned);
            let bytes = field.bytes().await?;
            form.image = Some(ImageUpload::new(file_name, bytes.to_vec()));
        } else if SchoolForm::TEXT_FIELDS.contains(&name.as_str()) {
            let value = field.text().await?;
            form.set_text(&name, value);
        }
    }

    Ok(form)
}

/// School routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/schools", get(list).post(create))
}
