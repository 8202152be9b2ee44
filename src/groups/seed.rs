//! Default groups written on first launch

use crate::groups::model::{Group, Message, GROUP_AVATARS, GROUP_COLORS};

/// Author of seeded content
pub const SYSTEM_USER_ID: &str = "system";

const SYSTEM_USERNAME: &str = "System";
const ONE_DAY_MS: i64 = 86_400_000;

/// Build the starter collection for a fresh install
///
/// Both groups list `member_id` (the signed-in user) as their only member.
/// `now` is the load time in Unix milliseconds; the welcome message is dated
/// one day earlier.
pub fn default_groups(member_id: Option<&str>, now: i64) -> Vec<Group> {
    let members: Vec<String> = member_id.map(str::to_string).into_iter().collect();

    let welcome = Message::new(
        "1".to_string(),
        "Welcome to the General Discussion group! 👋".to_string(),
        SYSTEM_USER_ID.to_string(),
        SYSTEM_USERNAME.to_string(),
        now - ONE_DAY_MS,
        None,
    );

    vec![
        Group {
            id: "1".to_string(),
            name: "General Discussion".to_string(),
            description: "A place for general conversations and announcements".to_string(),
            created_by: SYSTEM_USER_ID.to_string(),
            members: members.clone(),
            messages: vec![welcome],
            avatar: Some(GROUP_AVATARS[0].to_string()),
            color: Some(GROUP_COLORS[0].to_string()),
        },
        Group {
            id: "2".to_string(),
            name: "Tech Talk".to_string(),
            description: "Discuss the latest in technology and development".to_string(),
            created_by: SYSTEM_USER_ID.to_string(),
            members,
            messages: Vec::new(),
            avatar: Some(GROUP_AVATARS[1].to_string()),
            color: Some(GROUP_COLORS[1].to_string()),
        },
    ]
}
