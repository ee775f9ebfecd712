//! School repository
//!
//! Append-only: rows are inserted once and never updated or deleted.
//! - insert: single INSERT, no transaction
//! - list_all: every row, newest (highest id) first

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use schoolbook_core::{NewSchool, School};
use sqlx::FromRow;

use crate::db::pool::PoolProvider;
use crate::error::StorageError;

/// Persistence seam for school rows (testable)
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Append one row.
    async fn insert(&self, school: &NewSchool) -> Result<(), StorageError>;

    /// All rows ordered by descending id. Empty table yields an empty vec.
    async fn list_all(&self) -> Result<Vec<School>, StorageError>;
}

/// School record from database
#[derive(Debug, Clone, FromRow)]
struct SchoolRow {
    id: i64,
    name: String,
    address: String,
    city: String,
    state: String,
    contact: String,
    image: String,
    email_id: String,
}

impl From<SchoolRow> for School {
    fn from(r: SchoolRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            city: r.city,
            state: r.state,
            contact: r.contact,
            image: r.image,
            email_id: r.email_id,
        }
    }
}

/// Postgres-backed school repository
#[derive(Clone)]
pub struct SchoolRepo {
    pools: Arc<PoolProvider>,
}

impl SchoolRepo {
    pub fn new(pools: Arc<PoolProvider>) -> Self {
        Self { pools }
    }
}

#[async_trait]
impl SchoolStore for SchoolRepo {
    async fn insert(&self, school: &NewSchool) -> Result<(), StorageError> {
        let pool = self.pools.pool().await?;

        sqlx::query(
            r#"
            INSERT INTO schools (name, address, city, state, contact, image, email_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(&school.city)
        .bind(&school.state)
        .bind(&school.contact)
        .bind(&school.image)
        .bind(&school.email_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<School>, StorageError> {
        let pool = self.pools.pool().await?;

        let rows: Vec<SchoolRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, city, state, contact, image, email_id
            FROM schools
            ORDER BY id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(School::from).collect())
    }
}

/// In-memory school store for testing
///
/// Assigns ids from 1 upward. `set_failing(true)` makes every call return
/// `StorageError::Unavailable`.
#[derive(Default)]
pub struct MemorySchoolStore {
    rows: Mutex<Vec<School>>,
    failing: AtomicBool,
}

impl MemorySchoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of rows inserted so far.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SchoolStore for MemorySchoolStore {
    async fn insert(&self, school: &NewSchool) -> Result<(), StorageError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let id = rows.last().map(|r| r.id + 1).unwrap_or(1);
        rows.push(School {
            id,
            name: school.name.clone(),
            address: school.address.clone(),
            city: school.city.clone(),
            state: school.state.clone(),
            contact: school.contact.clone(),
            image: school.image.clone(),
            email_id: school.email_id.clone(),
        });
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<School>, StorageError> {
        self.check()?;
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.iter().rev().cloned().collect())
    }
}
