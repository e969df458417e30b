//! Notification service
//!
//! Notifications are persisted so unread counts survive between runs.
//! Bill reminders carry a stable key so each bill is announced once.

use chrono::NaiveDate;

use crate::error::{PesoError, PesoResult};
use crate::models::{
    AppNotification, BudgetCategory, BudgetThreshold, GoalCategory, NotificationId,
    NotificationKind, SavingsGoal,
};
use crate::storage::{delete_entry, update_entry, Storage, Table};

/// Default window for bill reminders, in days
pub const DEFAULT_REMINDER_DAYS: i64 = 3;

/// Notification raised when an expense pushes a budget across a threshold
pub fn budget_threshold_notification(
    budget: &BudgetCategory,
    threshold: BudgetThreshold,
    warning_percent: u8,
) -> AppNotification {
    match threshold {
        BudgetThreshold::Exceeded => AppNotification::new(
            NotificationKind::Alert,
            "Budget Alert",
            format!("You have exceeded your {} budget limit!", budget.category),
        ),
        BudgetThreshold::Warning => AppNotification::new(
            NotificationKind::Warning,
            "Budget Warning",
            format!(
                "You have used {}% of your {} budget.",
                warning_percent, budget.category
            ),
        ),
    }
}

/// Notification raised when a goal reaches its target
pub fn goal_achieved_notification(goal: &SavingsGoal) -> AppNotification {
    let (title, message) = match goal.category {
        GoalCategory::Tech => (
            "New Gadget Day?",
            format!("You saved enough for {}. Enjoy the upgrade!", goal.name),
        ),
        GoalCategory::Travel => (
            "Bon Voyage!",
            format!("You reached your {} goal. Time to pack your bags!", goal.name),
        ),
        GoalCategory::Vehicle => (
            "Vroom Vroom!",
            format!("You reached your {} goal. Time for a test drive!", goal.name),
        ),
        _ => (
            "Goal Crushed!",
            format!("Congratulations! You reached your {} goal.", goal.name),
        ),
    };
    AppNotification::new(NotificationKind::Success, title, message)
}

/// Service for notification management
pub struct NotificationService<'a> {
    storage: &'a Storage,
    reminder_days: i64,
}

impl<'a> NotificationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            reminder_days: DEFAULT_REMINDER_DAYS,
        }
    }

    pub fn with_reminder_days(mut self, days: i64) -> Self {
        self.reminder_days = days;
        self
    }

    /// Store a new notification
    pub fn push(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> PesoResult<AppNotification> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PesoError::Validation(
                "Notification title cannot be empty".into(),
            ));
        }
        let notification = AppNotification::new(kind, title, message.trim());

        self.storage.notifications.upsert(notification.clone())?;
        self.storage.flush(&[Table::Notifications])?;
        self.storage.log_create(&notification)?;

        tracing::info!(id = %notification.id, kind = %kind, "pushed notification");
        Ok(notification)
    }

    /// All notifications, newest first
    pub fn list(&self, unread_only: bool) -> PesoResult<Vec<AppNotification>> {
        if unread_only {
            self.storage.notifications.filter(|n| !n.is_read)
        } else {
            self.storage.notifications.get_all()
        }
    }

    pub fn unread_count(&self) -> PesoResult<usize> {
        self.storage.notifications.unread_count()
    }

    pub fn find(&self, reference: &str) -> PesoResult<Option<AppNotification>> {
        self.storage.notifications.find_by_reference(reference)
    }

    pub fn mark_read(&self, id: NotificationId) -> PesoResult<AppNotification> {
        let before = self
            .storage
            .notifications
            .get(id)?
            .ok_or_else(|| PesoError::notification_not_found(id.to_string()))?;

        if before.is_read {
            return Ok(before);
        }

        let mut after = before.clone();
        after.mark_read();
        self.storage.notifications.upsert(after.clone())?;
        self.storage.flush(&[Table::Notifications])?;
        self.storage.log_update(&before, &after)?;

        Ok(after)
    }

    /// Mark every unread notification as read, returning how many changed
    pub fn mark_all_read(&self) -> PesoResult<usize> {
        let unread = self.storage.notifications.filter(|n| !n.is_read)?;
        if unread.is_empty() {
            return Ok(0);
        }

        let mut entries = Vec::with_capacity(unread.len());
        for notification in &unread {
            let mut read = notification.clone();
            read.mark_read();
            entries.push(update_entry(notification, &read));
            self.storage.notifications.upsert(read)?;
        }
        self.storage.flush(&[Table::Notifications])?;
        self.storage.log_batch(&entries)?;

        tracing::info!(count = unread.len(), "marked notifications read");
        Ok(unread.len())
    }

    pub fn delete(&self, id: NotificationId) -> PesoResult<AppNotification> {
        let removed = self
            .storage
            .notifications
            .delete(id)?
            .ok_or_else(|| PesoError::notification_not_found(id.to_string()))?;
        self.storage.flush(&[Table::Notifications])?;
        self.storage.log_delete(&removed)?;
        Ok(removed)
    }

    /// Remove every notification, returning how many were removed
    pub fn clear(&self) -> PesoResult<usize> {
        let removed = self.storage.notifications.delete_where(|_| true)?;
        if removed.is_empty() {
            return Ok(0);
        }
        self.storage.flush(&[Table::Notifications])?;
        let entries: Vec<_> = removed.iter().map(delete_entry).collect();
        self.storage.log_batch(&entries)?;

        tracing::info!(count = removed.len(), "cleared notifications");
        Ok(removed.len())
    }

    /// Push a reminder for each unpaid bill due within the reminder window
    ///
    /// Bills that already have a reminder are skipped, so running this on
    /// every command is safe.
    pub fn refresh_bill_reminders(&self, today: NaiveDate) -> PesoResult<Vec<AppNotification>> {
        let due = self
            .storage
            .bills
            .filter(|b| b.is_due_within(today, self.reminder_days))?;

        let mut pushed = Vec::new();
        for bill in due {
            let key = format!("bill-{}", bill.id.as_uuid());
            if self.storage.notifications.key_exists(&key)? {
                continue;
            }
            let days = bill.days_until_due(today);
            let when = match days {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                n => format!("in {} days", n),
            };
            let notification = AppNotification::new(
                NotificationKind::Warning,
                "Bill Due Soon",
                format!("{} ({}) is due {}.", bill.name, bill.amount, when),
            )
            .with_key(key);
            self.storage.notifications.upsert(notification.clone())?;
            pushed.push(notification);
        }

        if !pushed.is_empty() {
            self.storage.flush(&[Table::Notifications])?;
            for notification in &pushed {
                self.storage.log_create(notification)?;
            }
            tracing::info!(count = pushed.len(), "pushed bill reminders");
        }

        Ok(pushed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::PesoPaths;
    use crate::models::{Bill, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_budget_messages() {
        let budget = BudgetCategory::new("Food", Money::from_pesos_cents(5000, 0));
        let warning = budget_threshold_notification(&budget, BudgetThreshold::Warning, 80);
        assert_eq!(warning.message, "You have used 80% of your Food budget.");

        let alert = budget_threshold_notification(&budget, BudgetThreshold::Exceeded, 80);
        assert_eq!(alert.title, "Budget Alert");
        assert_eq!(alert.kind, NotificationKind::Alert);
    }

    #[test]
    fn test_goal_titles_follow_category() {
        let mut goal = SavingsGoal::new("Japan", Money::from_cents(100), date(30));
        goal.category = GoalCategory::Travel;
        assert_eq!(goal_achieved_notification(&goal).title, "Bon Voyage!");

        goal.category = GoalCategory::Tech;
        assert_eq!(goal_achieved_notification(&goal).title, "New Gadget Day?");

        goal.category = GoalCategory::Vehicle;
        assert_eq!(goal_achieved_notification(&goal).title, "Vroom Vroom!");

        goal.category = GoalCategory::Emergency;
        let n = goal_achieved_notification(&goal);
        assert_eq!(n.title, "Goal Crushed!");
        assert!(n.message.contains("Japan"));
        assert_eq!(n.kind, NotificationKind::Success);
    }

    #[test]
    fn test_push_and_mark_read() {
        let (_temp, storage) = create_test_storage();
        let service = NotificationService::new(&storage);

        let n = service.push(NotificationKind::Info, "Hello", "World").unwrap();
        assert_eq!(service.unread_count().unwrap(), 1);

        service.mark_read(n.id).unwrap();
        assert_eq!(service.unread_count().unwrap(), 0);
        assert_eq!(service.list(true).unwrap().len(), 0);
        assert_eq!(service.list(false).unwrap().len(), 1);

        assert!(service.push(NotificationKind::Info, "  ", "x").is_err());
    }

    #[test]
    fn test_mark_all_read_and_clear() {
        let (_temp, storage) = create_test_storage();
        let service = NotificationService::new(&storage);
        service.push(NotificationKind::Info, "a", "").unwrap();
        service.push(NotificationKind::Alert, "b", "").unwrap();

        assert_eq!(storage.audit().entry_count().unwrap(), 2);

        assert_eq!(service.mark_all_read().unwrap(), 2);
        assert_eq!(service.mark_all_read().unwrap(), 0);
        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries[2..].iter().all(|e| e.operation == Operation::Update));

        assert_eq!(service.clear().unwrap(), 2);
        assert!(service.list(false).unwrap().is_empty());
        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 6);
        assert!(entries[4..].iter().all(|e| e.operation == Operation::Delete));
    }

    #[test]
    fn test_bill_reminders_are_pushed_once() {
        let (_temp, storage) = create_test_storage();
        storage
            .bills
            .upsert(Bill::new("Meralco", Money::from_cents(250000), date(12), "Utilities"))
            .unwrap();
        storage
            .bills
            .upsert(Bill::new("Rent", Money::from_cents(1500000), date(30), "Housing"))
            .unwrap();
        let mut paid = Bill::new("Water", Money::from_cents(50000), date(11), "Utilities");
        paid.is_paid = true;
        storage.bills.upsert(paid).unwrap();

        let service = NotificationService::new(&storage);
        let pushed = service.refresh_bill_reminders(date(10)).unwrap();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].title, "Bill Due Soon");
        assert!(pushed[0].message.contains("Meralco"));
        assert!(pushed[0].message.contains("in 2 days"));

        assert!(service.refresh_bill_reminders(date(11)).unwrap().is_empty());
        assert_eq!(storage.notifications.count().unwrap(), 1);
    }

    #[test]
    fn test_overdue_bills_get_no_reminder() {
        let (_temp, storage) = create_test_storage();
        storage
            .bills
            .upsert(Bill::new("Late", Money::from_cents(100), date(1), "Other"))
            .unwrap();

        let service = NotificationService::new(&storage).with_reminder_days(7);
        assert!(service.refresh_bill_reminders(date(5)).unwrap().is_empty());
    }
}
