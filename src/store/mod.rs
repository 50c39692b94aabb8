pub mod job;
pub mod memory;
pub mod postgres;
pub mod user;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use job::{Job, JobStatus, NewJob, ParseStatusError};
pub use memory::MemStore;
pub use postgres::PgStore;
pub use user::{NewUser, User};

/// Errors surfaced by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("corrupt record: {0}")]
    Decode(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence port for user and job records.
///
/// Job accessors take the owner id alongside the record id so that an
/// ownership check can never be skipped: there is no way to address another
/// user's record through this interface, only to miss (`None`/`false`).
#[async_trait]
pub trait Store: Send + Sync {
    // User records (credential store)

    /// Inserts a user. Fails with [`StoreError::DuplicateEmail`] when the
    /// email is already registered; uniqueness is enforced by the store, not
    /// just by the caller's pre-check.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    // Job records, always owner-scoped

    async fn create_job(&self, job: NewJob) -> Result<Job, StoreError>;

    /// Fetches a single job by (record id AND owner id). A record that
    /// exists but belongs to someone else is indistinguishable from one that
    /// does not exist.
    async fn job_by_id(&self, id: Uuid, owner: Uuid) -> Result<Option<Job>, StoreError>;

    async fn jobs_by_owner(&self, owner: Uuid) -> Result<Vec<Job>, StoreError>;

    /// Writes back a previously fetched job, keyed by (job.id AND
    /// job.user_id). Returns `false` when no matching record remains, e.g.
    /// it was deleted between the read and the write.
    async fn update_job(&self, job: &Job) -> Result<bool, StoreError>;

    /// Deletes by (record id AND owner id). Returns `false` when nothing
    /// matched, so a repeated delete reports absence instead of success.
    async fn delete_job(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
