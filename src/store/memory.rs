use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{parse_id, StoreError, UserStore};
use crate::models::{User, UserFields};

/// Process-local store. Records are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, fields: UserFields) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        let mut user = User::new(fields);
        while users.contains_key(&user.id) {
            user.id = Uuid::new_v4();
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let id = parse_id(id)?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update_by_id(&self, id: &str, changes: UserFields) -> Result<Option<User>, StoreError> {
        let id = parse_id(id)?;
        let mut users = self.users.write().await;

        Ok(users.get_mut(&id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let id = parse_id(id)?;
        Ok(self.users.write().await.remove(&id))
    }
}
