use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::store::{Job, JobStatus, NewJob, NewUser, Store, StoreError, User};

/// Postgres-backed [`Store`].
///
/// Ids and timestamps are assigned here rather than by the database so that
/// the returned record is exactly what was written, with no read-back.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Opens a connection pool sized per the database config.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    full_name: String,
    email: String,
    password_hash: String,
    created_on: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            password_hash: row.password_hash,
            created_on: row.created_on,
        }
    }
}

#[derive(FromRow)]
struct JobRow {
    id: Uuid,
    user_id: Uuid,
    company: String,
    position: String,
    status: String,
    notes: Option<String>,
    applied_on: DateTime<Utc>,
}

impl JobRow {
    /// Status is stored as text; a value outside the known set means the
    /// table was written by something other than this service.
    fn into_domain(self) -> Result<Job, StoreError> {
        let status: JobStatus = self
            .status
            .parse()
            .map_err(|_| StoreError::Decode(format!("unknown job status {:?}", self.status)))?;

        Ok(Job {
            id: self.id,
            user_id: self.user_id,
            company: self.company,
            position: self.position,
            status,
            notes: self.notes,
            applied_on: self.applied_on,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let record = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            created_on: Utc::now(),
        };

        let result = sqlx::query(
            "INSERT INTO users (id, full_name, email, password_hash, created_on) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(&record.full_name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.created_on)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateEmail),
            Err(err) => Err(err.into()),
        }
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, full_name, email, password_hash, created_on \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, full_name, email, password_hash, created_on \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create_job(&self, job: NewJob) -> Result<Job, StoreError> {
        let record = Job {
            id: Uuid::new_v4(),
            user_id: job.user_id,
            company: job.company,
            position: job.position,
            status: job.status,
            notes: job.notes,
            applied_on: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO jobs (id, user_id, company, position, status, notes, applied_on) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.company)
        .bind(&record.position)
        .bind(record.status.as_str())
        .bind(&record.notes)
        .bind(record.applied_on)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn job_by_id(&self, id: Uuid, owner: Uuid) -> Result<Option<Job>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(
            "SELECT id, user_id, company, position, status, notes, applied_on \
             FROM jobs WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.map(JobRow::into_domain).transpose()
    }

    async fn jobs_by_owner(&self, owner: Uuid) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT id, user_id, company, position, status, notes, applied_on \
             FROM jobs WHERE user_id = $1 ORDER BY applied_on",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(JobRow::into_domain).collect()
    }

    async fn update_job(&self, job: &Job) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE jobs SET company = $1, position = $2, status = $3, notes = $4 \
             WHERE id = $5 AND user_id = $6",
        )
        .bind(&job.company)
        .bind(&job.position)
        .bind(job.status.as_str())
        .bind(&job.notes)
        .bind(job.id)
        .bind(job.user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_job(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
