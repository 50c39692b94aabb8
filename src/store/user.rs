use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persisted user record: identity plus the salted one-way hash of the
/// login secret. Deliberately not `Serialize` — anything that goes on the
/// wire uses [`UserSnapshot`](crate::auth::UserSnapshot), which carries no
/// password material.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_on: DateTime<Utc>,
}

/// Fields of a user record about to be created. The hash is produced by
/// `auth::password::hash` before this struct is built; plaintext never
/// reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}
