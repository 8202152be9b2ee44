//! Group store: the single authority over the group collection
//!
//! Reads are synchronous against the in-memory copy. Every mutation clones the
//! collection, applies the change, writes the whole collection back to the
//! key-value store and only then swaps the new collection into memory. A
//! persistence failure therefore leaves memory untouched.
//!
//! Mutations are serialized by an async mutex held across the
//! read-modify-write, so two concurrent callers can never overwrite each
//! other's changes.

use crate::{
    config::Settings,
    groups::{
        ids::IdGenerator,
        model::{Group, Message},
        seed::default_groups,
    },
    identity::IdentityProvider,
    storage::KeyValueStore,
    Error, Result,
};
use chrono::Utc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use tokio::sync::Mutex;

/// Totals across the whole collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overview {
    /// Number of groups
    pub group_count: usize,
    /// Messages across all groups, replies included
    pub total_messages: usize,
    /// Sum of member counts across all groups
    pub total_members: usize,
}

#[derive(Debug)]
struct State {
    groups: Vec<Group>,
    loading: bool,
}

/// Group store over a key-value backend `S` and an identity source `I`
///
/// # Example
/// ```rust,no_run
/// use groops::groups::GroupStore;
/// use groops::identity::{Session, User};
/// use groops::storage::MemoryStore;
///
/// # async fn example() -> groops::Result<()> {
/// let session = Session::with_user(User::new("u1", "ada", "ada@example.com", ""));
/// let store = GroupStore::new(MemoryStore::new(), session);
/// store.load().await;
///
/// let group = store.create_group("Books", "Reading club").await?;
/// let hello = store.send_message(&group.id, "hello", None).await;
/// assert!(hello.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GroupStore<S, I> {
    store: S,
    identity: I,
    collection_key: String,
    seed_defaults: bool,
    ids: IdGenerator,
    state: RwLock<State>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore, I: IdentityProvider> GroupStore<S, I> {
    /// Create a store using default settings
    pub fn new(store: S, identity: I) -> Self {
        Self::with_settings(store, identity, &Settings::default())
    }

    /// Create a store using the collection key and seeding policy from `settings`
    pub fn with_settings(store: S, identity: I, settings: &Settings) -> Self {
        Self {
            store,
            identity,
            collection_key: settings.collection_key.clone(),
            seed_defaults: settings.seed_defaults,
            ids: IdGenerator::new(),
            state: RwLock::new(State {
                groups: Vec::new(),
                loading: true,
            }),
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying key-value store
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Key under which the collection is persisted
    pub fn collection_key(&self) -> &str {
        &self.collection_key
    }

    fn state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, groups: Vec<Group>) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).groups = groups;
    }

    fn finish_loading(&self) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).loading = false;
    }

    async fn persist(&self, groups: &[Group]) -> Result<()> {
        let json = serde_json::to_string(groups)?;
        self.store.set(&self.collection_key, &json).await
    }

    async fn fetch(&self) -> Result<Option<Vec<Group>>> {
        match self.store.get(&self.collection_key).await? {
            // A blank document counts as never written
            Some(data) if !data.trim().is_empty() => Ok(Some(serde_json::from_str(&data)?)),
            _ => Ok(None),
        }
    }

    /// Apply `change` to a copy of the collection, persist it, then swap it in
    async fn mutate<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Group>) -> T,
    {
        let _guard = self.write_lock.lock().await;
        let mut groups = self.state().groups.clone();
        let outcome = change(&mut groups);
        self.persist(&groups).await?;
        self.commit(groups);
        Ok(outcome)
    }

    // ========== Lifecycle ==========

    /// Load the persisted collection, seeding defaults on first launch
    ///
    /// Does nothing until a user is signed in. Failures are logged and leave
    /// the collection empty; either way the store leaves the loading state.
    pub async fn load(&self) {
        let Some(user) = self.identity.current_user() else {
            tracing::debug!("No signed-in user, deferring group load");
            return;
        };

        let _guard = self.write_lock.lock().await;

        match self.fetch().await {
            Ok(Some(groups)) => {
                tracing::info!("Loaded {} groups", groups.len());
                self.commit(groups);
            }
            Ok(None) => {
                let groups = if self.seed_defaults {
                    default_groups(Some(user.id.as_str()), Utc::now().timestamp_millis())
                } else {
                    Vec::new()
                };
                match self.persist(&groups).await {
                    Ok(()) => {
                        tracing::info!("Seeded {} default groups for {}", groups.len(), user.id);
                        self.commit(groups);
                    }
                    Err(e) => tracing::error!("Failed to load groups: {}", e),
                }
            }
            Err(e) => tracing::error!("Failed to load groups: {}", e),
        }

        self.finish_loading();
    }

    /// Re-read the persisted collection into memory without seeding
    ///
    /// # Returns
    /// `false` if the read failed; memory is left unchanged in that case
    pub async fn reload(&self) -> bool {
        let _guard = self.write_lock.lock().await;

        match self.fetch().await {
            Ok(groups) => {
                let groups = groups.unwrap_or_default();
                tracing::debug!("Reloaded {} groups", groups.len());
                self.commit(groups);
                true
            }
            Err(e) => {
                tracing::error!("Failed to reload groups: {}", e);
                false
            }
        }
    }

    /// Whether the initial load is still pending
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    // ========== Mutations ==========

    /// Create a group owned by the signed-in user
    ///
    /// A failed write is logged and the group is still returned, but it is not
    /// added to the collection.
    ///
    /// # Errors
    /// [`Error::NoCurrentUser`] when signed out
    pub async fn create_group(&self, name: &str, description: &str) -> Result<Group> {
        let user = self.identity.current_user().ok_or(Error::NoCurrentUser)?;

        let group = Group::new(
            self.ids.next_id(),
            name.to_string(),
            description.to_string(),
            user.id,
        );

        let created = group.clone();
        match self.mutate(move |groups| groups.push(created)).await {
            Ok(()) => tracing::info!("Created group {} ({})", group.name, group.id),
            Err(e) => tracing::error!("Failed to create group {}: {}", group.name, e),
        }
        Ok(group)
    }

    /// Add the signed-in user to a group's members
    ///
    /// Joining twice is harmless. An unknown `group_id` persists the unchanged
    /// collection and still reports success.
    ///
    /// # Returns
    /// `false` when signed out or the collection could not be written
    pub async fn join_group(&self, group_id: &str) -> bool {
        let Some(user) = self.identity.current_user() else {
            return false;
        };

        let result = self
            .mutate(|groups| {
                groups
                    .iter_mut()
                    .find(|g| g.id == group_id)
                    .is_some_and(|g| g.add_member(&user.id))
            })
            .await;

        match result {
            Ok(added) => {
                if added {
                    tracing::info!("{} joined group {}", user.id, group_id);
                }
                true
            }
            Err(e) => {
                tracing::error!("Failed to join group {}: {}", group_id, e);
                false
            }
        }
    }

    /// Remove the signed-in user from a group's members
    ///
    /// # Returns
    /// `false` when signed out or the collection could not be written
    pub async fn leave_group(&self, group_id: &str) -> bool {
        let Some(user) = self.identity.current_user() else {
            return false;
        };

        let result = self
            .mutate(|groups| {
                groups
                    .iter_mut()
                    .find(|g| g.id == group_id)
                    .is_some_and(|g| g.remove_member(&user.id))
            })
            .await;

        match result {
            Ok(removed) => {
                if removed {
                    tracing::info!("{} left group {}", user.id, group_id);
                }
                true
            }
            Err(e) => {
                tracing::error!("Failed to leave group {}: {}", group_id, e);
                false
            }
        }
    }

    /// Post a message as the signed-in user
    ///
    /// With `parent_id`, the message is a reply and its id is appended to the
    /// parent's replies. A missing parent only drops that link; the message is
    /// still posted. Membership is not checked here.
    ///
    /// # Returns
    /// The new message, or `None` when signed out or the collection could not
    /// be written
    pub async fn send_message(
        &self,
        group_id: &str,
        text: &str,
        parent_id: Option<&str>,
    ) -> Option<Message> {
        let user = self.identity.current_user()?;

        let message = Message::new(
            self.ids.next_id(),
            text.to_string(),
            user.id,
            user.username,
            Utc::now().timestamp_millis(),
            parent_id.filter(|p| !p.is_empty()).map(str::to_string),
        );

        let posted = message.clone();
        let result = self
            .mutate(move |groups| {
                groups
                    .iter_mut()
                    .find(|g| g.id == group_id)
                    .map(|g| g.post(posted))
            })
            .await;

        match result {
            Ok(linked) => {
                if let (Some(parent), Some(false)) = (parent_id, linked) {
                    tracing::warn!("Parent message {} not found in group {}", parent, group_id);
                }
                tracing::debug!("Message {} sent to group {}", message.id, group_id);
                Some(message)
            }
            Err(e) => {
                tracing::error!("Failed to send message to group {}: {}", group_id, e);
                None
            }
        }
    }

    // ========== Reads ==========

    /// Snapshot of the whole collection
    pub fn groups(&self) -> Vec<Group> {
        self.state().groups.clone()
    }

    /// Look up a group by ID
    pub fn group(&self, group_id: &str) -> Option<Group> {
        self.state().groups.iter().find(|g| g.id == group_id).cloned()
    }

    /// Top-level messages of a group in stored order; empty for an unknown group
    pub fn get_group_messages(&self, group_id: &str) -> Vec<Message> {
        self.state()
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .map(Group::top_level_messages)
            .unwrap_or_default()
    }

    /// Replies to `parent_message_id` in stored order
    pub fn get_thread_messages(&self, group_id: &str, parent_message_id: &str) -> Vec<Message> {
        self.state()
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.thread_messages(parent_message_id))
            .unwrap_or_default()
    }

    /// Whether `user_id` is a member of `group_id`
    pub fn is_member(&self, group_id: &str, user_id: &str) -> bool {
        self.state()
            .groups
            .iter()
            .any(|g| g.id == group_id && g.is_member(user_id))
    }

    /// Groups `user_id` belongs to, in stored order
    pub fn member_groups(&self, user_id: &str) -> Vec<Group> {
        self.state()
            .groups
            .iter()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect()
    }

    /// Groups the signed-in user belongs to; empty when signed out
    pub fn joined_groups(&self) -> Vec<Group> {
        match self.identity.current_user() {
            Some(user) => self.member_groups(&user.id),
            None => Vec::new(),
        }
    }

    /// Most recent message of a group, reply or not
    pub fn last_message(&self, group_id: &str) -> Option<Message> {
        self.state()
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .and_then(|g| g.last_message().cloned())
    }

    /// The first `limit` groups in stored order
    pub fn recent_groups(&self, limit: usize) -> Vec<Group> {
        self.state().groups.iter().take(limit).cloned().collect()
    }

    /// Totals across the collection
    pub fn overview(&self) -> Overview {
        let state = self.state();
        Overview {
            group_count: state.groups.len(),
            total_messages: state.groups.iter().map(|g| g.messages.len()).sum(),
            total_members: state.groups.iter().map(|g| g.members.len()).sum(),
        }
    }

    /// Messages authored by `user_id` in the groups they belong to
    pub fn user_message_count(&self, user_id: &str) -> usize {
        self.state()
            .groups
            .iter()
            .filter(|g| g.is_member(user_id))
            .map(|g| g.messages.iter().filter(|m| m.user_id == user_id).count())
            .sum()
    }
}
