//! Identity module
//!
//! The group store only needs to know who is signed in. Credential checks,
//! registration and logout flows belong to the authentication layer; this
//! module models the result of those flows.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user identifier
    pub id: String,
    /// Display name, copied onto every message the user sends
    pub username: String,
    /// Contact email
    pub email: String,
    /// Avatar image URL
    pub avatar: String,
}

impl User {
    /// Create a new user
    pub fn new(id: &str, username: &str, email: &str, avatar: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            avatar: avatar.to_string(),
        }
    }
}

/// Source of the current user identity
pub trait IdentityProvider: Send + Sync {
    /// The signed-in user, if any
    fn current_user(&self) -> Option<User>;
}

/// In-memory session holding the signed-in user
///
/// Share it as `Arc<Session>` between the authentication screens (which call
/// [`Session::sign_in`] / [`Session::sign_out`]) and the group store.
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<User>>,
}

impl Session {
    /// Create a signed-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with `user` already signed in
    pub fn with_user(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    /// Record `user` as the signed-in user
    pub fn sign_in(&self, user: User) {
        tracing::info!("User {} signed in", user.id);
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Clear the signed-in user
    pub fn sign_out(&self) {
        let previous = self.user.write().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(user) = previous {
            tracing::info!("User {} signed out", user.id);
        }
    }

    /// Whether a user is signed in
    pub fn is_signed_in(&self) -> bool {
        self.user.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl IdentityProvider for Session {
    fn current_user(&self) -> Option<User> {
        self.user.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for Arc<T> {
    fn current_user(&self) -> Option<User> {
        (**self).current_user()
    }
}
