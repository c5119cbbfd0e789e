//! Storage collaborator for user records.
//!
//! [`UserStore`] is the only seam between the HTTP layer and persistence.
//! Implementations own the records and assign ids; callers hold an
//! `Arc<dyn UserStore>` built once at startup.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{User, UserFields};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id is not in the store's id format.
    #[error("Invalid user id \"{0}\"")]
    InvalidId(String),

    /// The store refused the write (constraint violation and the like).
    #[error("{0}")]
    Rejected(String),

    /// The store could not be reached or failed internally.
    #[error("{0}")]
    Unavailable(String),
}

/// Parse a path id into the store's key type.
pub fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Short backend name, reported by the health check.
    fn backend(&self) -> &'static str;

    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, fields: UserFields) -> Result<User, StoreError>;

    /// Every stored record, in storage order.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Overwrite the supplied fields and return the post-update record,
    /// or `None` if no record has this id.
    async fn update_by_id(&self, id: &str, changes: UserFields) -> Result<Option<User>, StoreError>;

    /// Remove a record, returning it if it existed.
    async fn delete_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuids_only() {
        let id = Uuid::new_v4();

        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("42"), Err(StoreError::InvalidId(raw)) if raw == "42"));
    }
}
