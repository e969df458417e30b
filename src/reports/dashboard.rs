//! Dashboard overview
//!
//! Everything on the home screen in one pass: balances, upcoming bills,
//! budget and goal progress, recent activity and expense trends.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::error::PesoResult;
use crate::models::{Bill, BudgetCategory, Money, SavingsGoal, Transaction, Wallet};
use crate::storage::Storage;

/// How many upcoming bills the dashboard lists
pub const UPCOMING_BILLS: usize = 2;
/// How many goals the dashboard lists
pub const GOALS_SHOWN: usize = 3;

/// Expenses on one day, aligned with `DashboardReport::categories`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyExpenses {
    pub date: NaiveDate,
    pub amounts: Vec<Money>,
}

/// Dashboard overview
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub total_balance: Money,
    pub wallets: Vec<Wallet>,
    pub unpaid_bill_count: usize,
    /// Next unpaid bills by due date
    pub upcoming_bills: Vec<Bill>,
    pub budgets: Vec<BudgetCategory>,
    pub goals: Vec<SavingsGoal>,
    pub recent: Vec<Transaction>,
    /// Expense categories and budget categories, largest total first
    pub categories: Vec<(String, Money)>,
    /// One entry per date that has any transaction, oldest first
    pub daily: Vec<DailyExpenses>,
    pub unread_notifications: usize,
}

impl DashboardReport {
    pub fn generate(storage: &Storage, recent_count: usize) -> PesoResult<Self> {
        let wallets = storage.wallets.get_all()?;
        let total_balance = wallets.iter().map(|w| w.balance).sum();

        let unpaid = storage.bills.get_unpaid()?;
        let unpaid_bill_count = unpaid.len();
        let upcoming_bills = unpaid.into_iter().take(UPCOMING_BILLS).collect();

        let budgets = storage.budgets.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let categories = category_totals(&transactions, &budgets);
        let daily = daily_expenses(&transactions, &categories);

        let mut goals = storage.goals.get_all()?;
        goals.truncate(GOALS_SHOWN);

        let recent = transactions.into_iter().take(recent_count).collect();

        Ok(Self {
            total_balance,
            wallets,
            unpaid_bill_count,
            upcoming_bills,
            budgets,
            goals,
            recent,
            categories,
            daily,
            unread_notifications: storage.notifications.unread_count()?,
        })
    }

    /// Render the overview as plain text
    pub fn format_terminal(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Total Balance: {}\n", self.total_balance));
        for wallet in &self.wallets {
            out.push_str(&format!("  {:<28} {:>16}\n", wallet.name, wallet.balance));
        }

        out.push_str(&format!("\nBills: {} due\n", self.unpaid_bill_count));
        if self.upcoming_bills.is_empty() {
            out.push_str("  All paid!\n");
        }
        for bill in &self.upcoming_bills {
            out.push_str(&format!(
                "  {:<28} {:>16}  due {}\n",
                bill.name, bill.amount, bill.due_date
            ));
        }

        if !self.budgets.is_empty() {
            out.push_str("\nBudgets\n");
            for budget in &self.budgets {
                out.push_str(&format!(
                    "  {:<20} {} {:>5.0}%  {} / {}\n",
                    budget.category,
                    progress_bar(budget.bar_percent(), 20),
                    budget.usage_percent(),
                    budget.spent,
                    budget.limit
                ));
            }
        }

        if !self.goals.is_empty() {
            out.push_str("\nSavings Goals\n");
            for goal in &self.goals {
                out.push_str(&format!(
                    "  {:<20} {} {:>5.0}%  {} / {}\n",
                    goal.name,
                    progress_bar(goal.progress_percent(), 20),
                    goal.progress_percent(),
                    goal.current_amount,
                    goal.target_amount
                ));
            }
        }

        if !self.categories.is_empty() {
            out.push_str("\nExpenses by Category\n");
            for (category, total) in &self.categories {
                out.push_str(&format!("  {:<28} {:>16}\n", category, total));
            }
        }

        out.push_str("\nRecent Transactions\n");
        if self.recent.is_empty() {
            out.push_str("  No transactions yet.\n");
        }
        for txn in &self.recent {
            let sign = if txn.is_income() { '+' } else { '-' };
            out.push_str(&format!(
                "  {}  {:<24} {:<14} {}{}\n",
                txn.date, txn.description, txn.category, sign, txn.amount
            ));
        }

        if self.unread_notifications > 0 {
            out.push_str(&format!(
                "\n{} unread notification(s). Run `pesowise notify list`.\n",
                self.unread_notifications
            ));
        }

        out
    }
}

/// Totals per category over the union of expense and budget categories
fn category_totals(
    transactions: &[Transaction],
    budgets: &[BudgetCategory],
) -> Vec<(String, Money)> {
    let mut totals: HashMap<String, Money> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    let expense_categories = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.category.as_str());
    let budget_categories = budgets.iter().map(|b| b.category.as_str());

    for category in expense_categories.chain(budget_categories) {
        if !totals.contains_key(category) {
            totals.insert(category.to_string(), Money::zero());
            order.push(category.to_string());
        }
    }
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        if let Some(total) = totals.get_mut(txn.category.as_str()) {
            *total += txn.amount;
        }
    }

    let mut rows: Vec<(String, Money)> = order
        .into_iter()
        .map(|c| {
            let total = totals.get(&c).copied().unwrap_or_default();
            (c, total)
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

fn daily_expenses(transactions: &[Transaction], categories: &[(String, Money)]) -> Vec<DailyExpenses> {
    let dates: BTreeSet<NaiveDate> = transactions.iter().map(|t| t.date).collect();

    dates
        .into_iter()
        .map(|date| DailyExpenses {
            date,
            amounts: categories
                .iter()
                .map(|(category, _)| {
                    transactions
                        .iter()
                        .filter(|t| t.date == date && t.is_expense() && &t.category == category)
                        .map(|t| t.amount)
                        .sum()
                })
                .collect(),
        })
        .collect()
}

fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
