use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserStore;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Contents are lost on restart. Identifiers are assigned sequentially from 1.
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

struct Inner {
    users: HashMap<String, User>,
    next_id: i64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user: NewUser) -> Result<User, UserError> {
        // Check and insert under one write guard.
        let mut inner = self.inner.write().await;

        let email = user.email.as_str().to_string();
        if inner.users.contains_key(&email) {
            return Err(UserError::EmailAlreadyExists(email));
        }

        let user = user.into_user(UserId(inner.next_id));
        inner.next_id += 1;
        inner.users.insert(email, user.clone());

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.inner
            .read()
            .await
            .users
            .get(email)
            .cloned()
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn count(&self) -> Result<usize, UserError> {
        Ok(self.inner.read().await.users.len())
    }
}
