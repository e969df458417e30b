//! Bill, loan, goal, investment and notification tables

use std::cmp::Ordering;

use crate::audit::EntityType;
use crate::error::PesoError;
use crate::models::{
    AppNotification, Bill, BillId, GoalId, Investment, InvestmentId, Loan, LoanId, LoanType,
    NotificationId, SavingsGoal,
};

use super::repository::{Record, Repository};

pub type BillRepository = Repository<Bill>;
pub type LoanRepository = Repository<Loan>;
pub type GoalRepository = Repository<SavingsGoal>;
pub type InvestmentRepository = Repository<Investment>;
pub type NotificationRepository = Repository<AppNotification>;

impl Record for Bill {
    type Id = BillId;
    const ENTITY: EntityType = EntityType::Bill;

    fn id(&self) -> BillId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }

    /// Soonest due first
    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.due_date.cmp(&b.due_date).then(a.name.cmp(&b.name))
    }
}

impl Repository<Bill> {
    pub fn get_unpaid(&self) -> Result<Vec<Bill>, PesoError> {
        self.filter(|b| !b.is_paid)
    }
}

impl Record for Loan {
    type Id = LoanId;
    const ENTITY: EntityType = EntityType::Loan;

    fn id(&self) -> LoanId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.due_date.cmp(&b.due_date).then(a.name.cmp(&b.name))
    }
}

impl Repository<Loan> {
    pub fn get_by_type(&self, loan_type: LoanType) -> Result<Vec<Loan>, PesoError> {
        self.filter(|l| l.loan_type == loan_type)
    }
}

impl Record for SavingsGoal {
    type Id = GoalId;
    const ENTITY: EntityType = EntityType::Goal;

    fn id(&self) -> GoalId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.deadline.cmp(&b.deadline).then(a.name.cmp(&b.name))
    }
}

impl Record for Investment {
    type Id = InvestmentId;
    const ENTITY: EntityType = EntityType::Investment;

    fn id(&self) -> InvestmentId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.name.to_lowercase().cmp(&b.name.to_lowercase())
    }
}

impl Record for AppNotification {
    type Id = NotificationId;
    const ENTITY: EntityType = EntityType::Notification;

    fn id(&self) -> NotificationId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.title.clone())
    }

    /// Newest first
    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

impl Repository<AppNotification> {
    pub fn key_exists(&self, key: &str) -> Result<bool, PesoError> {
        Ok(self
            .read()?
            .values()
            .any(|n| n.key.as_deref() == Some(key)))
    }

    pub fn unread_count(&self) -> Result<usize, PesoError> {
        Ok(self.read()?.values().filter(|n| !n.is_read).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NotificationKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_unpaid_bills_sorted_by_due_date() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BillRepository::new(temp_dir.path().join("bills.json"));
        let day = |d| NaiveDate::from_ymd_opt(2025, 4, d).unwrap();

        let mut paid = Bill::new("Netflix", Money::from_cents(54900), day(1), "Subscriptions");
        paid.is_paid = true;
        repo.upsert(paid).unwrap();
        repo.upsert(Bill::new("Water", Money::from_cents(80000), day(20), "Utilities")).unwrap();
        repo.upsert(Bill::new("Rent", Money::from_cents(1500000), day(5), "Housing")).unwrap();

        let names: Vec<_> = repo.get_unpaid().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Rent", "Water"]);
    }

    #[test]
    fn test_loans_by_type() {
        let temp_dir = TempDir::new().unwrap();
        let repo = LoanRepository::new(temp_dir.path().join("loans.json"));
        let due = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        repo.upsert(Loan::new("Bank", LoanType::Borrow, Money::from_cents(100), due)).unwrap();
        repo.upsert(Loan::new("Pinsan", LoanType::Lent, Money::from_cents(100), due)).unwrap();

        assert_eq!(repo.get_by_type(LoanType::Lent).unwrap().len(), 1);
    }

    #[test]
    fn test_notification_key_and_unread() {
        let temp_dir = TempDir::new().unwrap();
        let repo = NotificationRepository::new(temp_dir.path().join("notifications.json"));
        let mut read = AppNotification::new(NotificationKind::Info, "a", "b");
        read.mark_read();
        repo.upsert(read).unwrap();
        repo.upsert(AppNotification::new(NotificationKind::Warning, "c", "d").with_key("bill-1"))
            .unwrap();

        assert!(repo.key_exists("bill-1").unwrap());
        assert!(!repo.key_exists("bill-2").unwrap());
        assert_eq!(repo.unread_count().unwrap(), 1);
    }
}
