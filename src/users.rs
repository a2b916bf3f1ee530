use dashmap::{DashMap, mapref::entry::Entry};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::{AuthorSnapshot, User},
};

/// Registered accounts, indexed by id and by email.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Arc<DashMap<Uuid, User>>,
    email_index: Arc<DashMap<String, Uuid>>, // Quick Lookup by Email
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, user: User) -> Result<(), ApiError> {
        match self.email_index.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(ApiError::UserAlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|user| user.value().clone())
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let id = *self.email_index.get(email)?;
        self.get(id)
    }

    pub fn remove(&self, id: Uuid) -> Option<User> {
        let (_, user) = self.users.remove(&id)?;
        self.email_index.remove(&user.email);
        Some(user)
    }

    /// Current name and avatar of `id`, as copied into new posts.
    pub fn snapshot(&self, id: Uuid) -> Option<AuthorSnapshot> {
        self.users.get(&id).map(|user| user.snapshot())
    }
}
