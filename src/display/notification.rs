//! Notification display formatting

use tabled::Tabled;

use crate::models::AppNotification;

use super::render_table;

#[derive(Tabled)]
struct NotificationRow {
    #[tabled(rename = "")]
    unread: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format notifications, newest first as given; unread rows are starred
pub fn format_notification_list(notifications: &[AppNotification]) -> String {
    if notifications.is_empty() {
        return "No notifications.".to_string();
    }

    let rows = notifications.iter().map(|n| NotificationRow {
        unread: if n.is_read { "" } else { "*" },
        kind: n.kind.to_string(),
        title: n.title.clone(),
        message: n.message.clone(),
        when: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
        id: n.id.to_string(),
    });

    render_table(rows, &[])
}
