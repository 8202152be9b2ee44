// Seed Tests - Testing the default collection

use crate::groups::seed::{default_groups, SYSTEM_USER_ID};
use crate::groups::{GROUP_AVATARS, GROUP_COLORS};

#[test]
fn test_default_groups_with_user() {
    let groups = default_groups(Some("u1"), 1_000_000_000);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].id, "1");
    assert_eq!(groups[0].name, "General Discussion");
    assert_eq!(groups[1].id, "2");
    assert_eq!(groups[1].name, "Tech Talk");

    for group in &groups {
        assert_eq!(group.created_by, SYSTEM_USER_ID);
        assert_eq!(group.members, vec!["u1".to_string()]);
    }

    assert_eq!(groups[0].avatar.as_deref(), Some(GROUP_AVATARS[0]));
    assert_eq!(groups[1].color.as_deref(), Some(GROUP_COLORS[1]));
}

#[test]
fn test_default_welcome_message() {
    let now = 1_000_000_000;
    let groups = default_groups(Some("u1"), now);

    assert_eq!(groups[0].messages.len(), 1);
    let welcome = &groups[0].messages[0];
    assert_eq!(welcome.user_id, SYSTEM_USER_ID);
    assert_eq!(welcome.username, "System");
    assert_eq!(welcome.timestamp, now - 86_400_000);
    assert!(welcome.is_top_level());
    assert!(welcome.replies.is_empty());

    assert!(groups[1].messages.is_empty());
}

#[test]
fn test_default_groups_without_user() {
    let groups = default_groups(None, 0);
    assert!(groups.iter().all(|g| g.members.is_empty()));
}
