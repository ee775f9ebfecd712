//! Submission and listing pipelines
//!
//! Submission is strictly linear: presence check, image write, row insert.
//! Each step runs only if the previous one succeeded. Nothing is retried or
//! rolled back; an image written before a failed insert stays on disk.

use schoolbook_core::{check_presence, NewSchool, School, SchoolForm, ValidationError};
use thiserror::Error;

use crate::db::SchoolStore;
use crate::error::StorageError;
use crate::images::ImageStore;

/// Why a submission was not accepted
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Accept one school submission.
///
/// Returns the row that was inserted, with `image` set to the stored file's
/// reference path.
pub async fn submit_school(
    store: &dyn SchoolStore,
    images: &ImageStore,
    form: SchoolForm,
) -> Result<NewSchool, SubmissionError> {
    let submission = check_presence(form)?;

    let image_ref = images
        .store(&submission.image.bytes, submission.image.file_name.as_deref())
        .await?;

    let school = submission.into_new_school(image_ref);
    if let Err(e) = store.insert(&school).await {
        tracing::warn!(image = %school.image, "Insert failed after image write; image left on disk");
        return Err(e.into());
    }

    tracing::info!(name = %school.name, image = %school.image, "School submitted");
    Ok(school)
}

/// All schools, newest first.
pub async fn list_schools(store: &dyn SchoolStore) -> Result<Vec<School>, StorageError> {
    store.list_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemorySchoolStore;
    use crate::images::IMAGE_SUBDIR;
    use schoolbook_core::ImageUpload;
    use tempfile::TempDir;

    fn oak_form() -> SchoolForm {
        SchoolForm {
            name: " Oak School ".into(),
            address: "12 Oak Ave".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            contact: "5551234567".into(),
            email_id: "a@b.com".into(),
            image: Some(ImageUpload::new(Some("logo.png".into()), vec![7; 10])),
        }
    }

    fn stored_images(temp: &TempDir) -> Vec<String> {
        match std::fs::read_dir(temp.path().join(IMAGE_SUBDIR)) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn valid_submission_writes_image_then_row() {
        let temp = TempDir::new().unwrap();
        let images = ImageStore::new(temp.path());
        let store = MemorySchoolStore::new();

        let school = submit_school(&store, &images, oak_form()).await.unwrap();
        assert_eq!(school.name, "Oak School");

        let files = stored_images(&temp);
        assert_eq!(files.len(), 1);
        assert_eq!(school.image, format!("/{}/{}", IMAGE_SUBDIR, files[0]));

        let rows = list_schools(&store).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].image, school.image);
    }

    #[tokio::test]
    async fn missing_field_has_no_side_effects() {
        let temp = TempDir::new().unwrap();
        let images = ImageStore::new(temp.path());
        let store = MemorySchoolStore::new();

        let mut form = oak_form();
        form.email_id = String::new();

        let err = submit_school(&store, &images, form).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert!(!temp.path().join(IMAGE_SUBDIR).exists());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn image_failure_inserts_no_row() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(IMAGE_SUBDIR), b"not a directory").unwrap();
        let images = ImageStore::new(temp.path());
        let store = MemorySchoolStore::new();

        let err = submit_school(&store, &images, oak_form()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Storage(StorageError::Io { .. })));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn insert_failure_leaves_image_orphaned() {
        let temp = TempDir::new().unwrap();
        let images = ImageStore::new(temp.path());
        let store = MemorySchoolStore::new();
        store.set_failing(true);

        let err = submit_school(&store, &images, oak_form()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Storage(_)));
        assert_eq!(stored_images(&temp).len(), 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn lenient_server_pass_accepts_loose_formats() {
        let temp = TempDir::new().unwrap();
        let images = ImageStore::new(temp.path());
        let store = MemorySchoolStore::new();

        let mut form = oak_form();
        form.name = "A".into();
        form.contact = "555-1234 ext 9".into();
        form.email_id = "front desk".into();

        let school = submit_school(&store, &images, form).await.unwrap();
        assert_eq!(school.contact, "555-1234 ext 9");
        assert_eq!(store.len(), 1);
    }
}
