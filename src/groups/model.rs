//! Group and message records

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Accent colors assigned to groups
pub const GROUP_COLORS: [&str; 6] = [
    "#6366f1", "#8b5cf6", "#06b6d4", "#10b981", "#f59e0b", "#ef4444",
];

/// Avatar images assigned to groups
pub const GROUP_AVATARS: [&str; 4] = [
    "https://images.pexels.com/photos/3184291/pexels-photo-3184291.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2",
    "https://images.pexels.com/photos/3184292/pexels-photo-3184292.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2",
    "https://images.pexels.com/photos/3184293/pexels-photo-3184293.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2",
    "https://images.pexels.com/photos/3184294/pexels-photo-3184294.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2",
];

/// A message posted to a group
///
/// Replies are ordinary messages carrying the id of their parent in
/// `parent_id`; the parent lists their ids in `replies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID, unique within its group
    pub id: String,
    /// Message body
    pub text: String,
    /// Author's user ID
    pub user_id: String,
    /// Author's display name at send time
    pub username: String,
    /// Send time (Unix milliseconds)
    pub timestamp: i64,
    /// Parent message ID for a threaded reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// IDs of direct replies, in the order they were sent
    #[serde(default)]
    pub replies: Vec<String>,
}

impl Message {
    /// Create a message with no replies
    pub fn new(
        id: String,
        text: String,
        user_id: String,
        username: String,
        timestamp: i64,
        parent_id: Option<String>,
    ) -> Self {
        Self {
            id,
            text,
            user_id,
            username,
            timestamp,
            parent_id,
            replies: Vec::new(),
        }
    }

    /// Whether this message starts a thread (has no parent or an empty one)
    pub fn is_top_level(&self) -> bool {
        self.parent_id.as_deref().is_none_or(str::is_empty)
    }

    /// Whether this message replies to `parent_id`
    pub fn is_reply_to(&self, parent_id: &str) -> bool {
        self.parent_id.as_deref() == Some(parent_id)
    }
}

/// A named conversation space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// User ID of the creator
    pub created_by: String,
    /// Member user IDs, no duplicates
    pub members: Vec<String>,
    /// All messages, top-level and replies interleaved in send order
    pub messages: Vec<Message>,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Accent color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Group {
    /// Create an empty group whose only member is its creator
    ///
    /// Avatar and color are picked uniformly from [`GROUP_AVATARS`] and
    /// [`GROUP_COLORS`].
    pub fn new(id: String, name: String, description: String, created_by: String) -> Self {
        let mut rng = rand::thread_rng();
        let avatar = GROUP_AVATARS.choose(&mut rng).map(|a| a.to_string());
        let color = GROUP_COLORS.choose(&mut rng).map(|c| c.to_string());

        Self {
            id,
            name,
            description,
            members: vec![created_by.clone()],
            created_by,
            messages: Vec::new(),
            avatar,
            color,
        }
    }

    /// Whether `user_id` is a member
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    /// Add `user_id` to the members unless already present
    ///
    /// # Returns
    /// `true` if the member list changed
    pub fn add_member(&mut self, user_id: &str) -> bool {
        if self.is_member(user_id) {
            return false;
        }
        self.members.push(user_id.to_string());
        true
    }

    /// Remove `user_id` from the members
    ///
    /// # Returns
    /// `true` if the member list changed
    pub fn remove_member(&mut self, user_id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != user_id);
        self.members.len() != before
    }

    /// Find a message by ID
    pub fn message(&self, message_id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == message_id)
    }

    /// Append `message`, linking it into its parent's replies when the parent exists
    ///
    /// A reply whose parent is missing is still appended; only the link is skipped.
    ///
    /// # Returns
    /// `true` if a parent was found and linked
    pub fn post(&mut self, message: Message) -> bool {
        let mut linked = false;
        if let Some(parent_id) = message.parent_id.as_deref().filter(|p| !p.is_empty()) {
            if let Some(parent) = self.messages.iter_mut().find(|m| m.id == parent_id) {
                parent.replies.push(message.id.clone());
                linked = true;
            }
        }
        self.messages.push(message);
        linked
    }

    /// Top-level messages in stored order
    pub fn top_level_messages(&self) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.is_top_level())
            .cloned()
            .collect()
    }

    /// Replies to `parent_id` in stored order
    pub fn thread_messages(&self, parent_id: &str) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.is_reply_to(parent_id))
            .cloned()
            .collect()
    }

    /// Most recently appended message, reply or not
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
