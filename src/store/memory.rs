use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{Job, NewJob, NewUser, Store, StoreError, User};

/// In-process [`Store`] holding everything in memory.
///
/// Backs the integration tests, which exercise the full router without a
/// Postgres instance. Records live in plain `Vec`s; job listings are sorted
/// by `applied_on` with insertion order breaking ties, matching the ORDER BY
/// the Postgres store uses.
#[derive(Default)]
pub struct MemStore {
    users: RwLock<Vec<User>>,
    jobs: RwLock<Vec<Job>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            created_on: Utc::now(),
        };
        users.push(record.clone());

        Ok(record)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
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
        self.jobs.write().await.push(record.clone());

        Ok(record)
    }

    async fn job_by_id(&self, id: Uuid, owner: Uuid) -> Result<Option<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        Ok(jobs
            .iter()
            .find(|j| j.id == id && j.user_id == owner)
            .cloned())
    }

    async fn jobs_by_owner(&self, owner: Uuid) -> Result<Vec<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        let mut owned: Vec<Job> = jobs.iter().filter(|j| j.user_id == owner).cloned().collect();
        owned.sort_by_key(|j| j.applied_on);

        Ok(owned)
    }

    async fn update_job(&self, job: &Job) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;

        match jobs
            .iter_mut()
            .find(|j| j.id == job.id && j.user_id == job.user_id)
        {
            Some(slot) => {
                *slot = job.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_job(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| !(j.id == id && j.user_id == owner));

        Ok(jobs.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
