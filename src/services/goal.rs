//! Savings goal service
//!
//! Any save that takes a goal from not achieved to achieved pushes a
//! success notification.

use chrono::NaiveDate;

use crate::error::{PesoError, PesoResult};
use crate::models::budget::DEFAULT_WARNING_PERCENT;
use crate::models::{
    AppNotification, GoalCategory, GoalId, Money, SavingsGoal, TransactionType, WalletId,
};
use crate::storage::{Storage, Table};

use super::notification::goal_achieved_notification;
use super::transaction::{NewTransaction, RecordOutcome, TransactionService};

/// Category used for goal deposits
pub const SAVINGS_CATEGORY: &str = "Savings";

/// Service for savings goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
    warning_percent: u8,
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub deadline: NaiveDate,
    pub category: GoalCategory,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Fields to change on an existing goal; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub current_amount: Option<Money>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<GoalCategory>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// A saved goal plus the celebration it triggered, if any
#[derive(Debug, Clone)]
pub struct GoalSave {
    pub goal: SavingsGoal,
    pub celebration: Option<AppNotification>,
}

/// Result of depositing into a goal
#[derive(Debug, Clone)]
pub struct GoalDeposit {
    pub goal: SavingsGoal,
    pub record: RecordOutcome,
    pub celebration: Option<AppNotification>,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            warning_percent: DEFAULT_WARNING_PERCENT,
        }
    }

    pub fn with_warning_percent(mut self, warning_percent: u8) -> Self {
        self.warning_percent = warning_percent;
        self
    }

    pub fn create(&self, input: NewGoal) -> PesoResult<GoalSave> {
        let mut goal = SavingsGoal::new(input.name.trim(), input.target_amount, input.deadline);
        goal.current_amount = input.current_amount;
        goal.category = input.category;
        if let Some(color) = input.color.filter(|c| !c.trim().is_empty()) {
            goal.color = color.trim().to_string();
        }
        if let Some(icon) = input.icon.filter(|i| !i.trim().is_empty()) {
            goal.icon = icon.trim().to_string();
        }
        goal.validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        let celebration = goal.is_achieved().then(|| goal_achieved_notification(&goal));

        self.storage.goals.upsert(goal.clone())?;
        if let Some(n) = &celebration {
            self.storage.notifications.upsert(n.clone())?;
        }
        self.storage.flush(&[Table::Goals, Table::Notifications])?;

        self.storage.log_create(&goal)?;
        if let Some(n) = &celebration {
            self.storage.log_create(n)?;
        }

        tracing::info!(id = %goal.id, name = %goal.name, "created goal");
        Ok(GoalSave { goal, celebration })
    }

    pub fn update(&self, id: GoalId, update: GoalUpdate) -> PesoResult<GoalSave> {
        let before = self.require(id)?;
        let mut goal = before.clone();

        if let Some(name) = update.name {
            goal.name = name.trim().to_string();
        }
        if let Some(target) = update.target_amount {
            goal.target_amount = target;
        }
        if let Some(current) = update.current_amount {
            goal.current_amount = current;
        }
        if let Some(deadline) = update.deadline {
            goal.deadline = deadline;
        }
        if let Some(category) = update.category {
            goal.category = category;
        }
        if let Some(color) = update.color.filter(|c| !c.trim().is_empty()) {
            goal.color = color.trim().to_string();
        }
        if let Some(icon) = update.icon.filter(|i| !i.trim().is_empty()) {
            goal.icon = icon.trim().to_string();
        }
        goal.validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        let celebration = celebrate(&before, &goal);

        self.storage.goals.upsert(goal.clone())?;
        if let Some(n) = &celebration {
            self.storage.notifications.upsert(n.clone())?;
        }
        self.storage.flush(&[Table::Goals, Table::Notifications])?;

        self.storage.log_update(&before, &goal)?;
        if let Some(n) = &celebration {
            self.storage.log_create(n)?;
        }

        tracing::info!(id = %goal.id, "updated goal");
        Ok(GoalSave { goal, celebration })
    }

    pub fn delete(&self, id: GoalId) -> PesoResult<SavingsGoal> {
        let goal = self
            .storage
            .goals
            .delete(id)?
            .ok_or_else(|| PesoError::goal_not_found(id.to_string()))?;
        self.storage.flush(&[Table::Goals])?;
        self.storage.log_delete(&goal)?;

        tracing::info!(id = %goal.id, "deleted goal");
        Ok(goal)
    }

    pub fn get(&self, id: GoalId) -> PesoResult<Option<SavingsGoal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by name (case-insensitive), then by id
    pub fn find(&self, identifier: &str) -> PesoResult<Option<SavingsGoal>> {
        let name = identifier.trim().to_lowercase();
        let mut by_name = self
            .storage
            .goals
            .filter(|g| g.name.to_lowercase() == name)?;
        if by_name.len() == 1 {
            return Ok(by_name.pop());
        }
        self.storage.goals.find_by_reference(identifier)
    }

    pub fn resolve(&self, identifier: &str) -> PesoResult<SavingsGoal> {
        self.find(identifier)?
            .ok_or_else(|| PesoError::goal_not_found(identifier))
    }

    /// All goals, nearest deadline first
    pub fn list(&self) -> PesoResult<Vec<SavingsGoal>> {
        self.storage.goals.get_all()
    }

    /// Move money from a wallet into a goal
    pub fn deposit(
        &self,
        id: GoalId,
        amount: Money,
        wallet_id: WalletId,
        date: NaiveDate,
    ) -> PesoResult<GoalDeposit> {
        let before = self.require(id)?;

        let transactions =
            TransactionService::new(self.storage).with_warning_percent(self.warning_percent);
        let staged = transactions.stage(NewTransaction {
            wallet_id,
            date,
            transaction_type: TransactionType::Expense,
            amount,
            category: SAVINGS_CATEGORY.to_string(),
            description: format!("Deposit to {}", before.name),
        })?;

        let mut goal = before.clone();
        goal.current_amount += staged.outcome().transaction.amount;
        let celebration = celebrate(&before, &goal);

        self.storage.goals.upsert(goal.clone())?;
        if let Some(n) = &celebration {
            self.storage.notifications.upsert(n.clone())?;
        }

        let record = transactions.commit(staged, &[Table::Goals])?;
        self.storage.log_update(&before, &goal)?;
        if let Some(n) = &celebration {
            self.storage.log_create(n)?;
        }

        tracing::info!(
            id = %goal.id,
            current = goal.current_amount.cents(),
            target = goal.target_amount.cents(),
            "deposited to goal"
        );
        Ok(GoalDeposit {
            goal,
            record,
            celebration,
        })
    }

    fn require(&self, id: GoalId) -> PesoResult<SavingsGoal> {
        self.storage
            .goals
            .get(id)?
            .ok_or_else(|| PesoError::goal_not_found(id.to_string()))
    }
}

fn celebrate(before: &SavingsGoal, after: &SavingsGoal) -> Option<AppNotification> {
    (!before.is_achieved() && after.is_achieved()).then(|| goal_achieved_notification(after))
}
