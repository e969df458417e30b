//! Financial statement
//!
//! A printable report for a date range with optional sections: summary,
//! wallet balances, expense breakdown and the transaction list.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::PesoResult;
use crate::models::{DateRange, Money, Transaction, Wallet, WalletId};
use crate::storage::Storage;

use super::spending::{expense_breakdown, CategorySpending};

/// Which sections to include
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementOptions {
    pub summary: bool,
    pub wallets: bool,
    pub breakdown: bool,
    pub transactions: bool,
}

impl Default for StatementOptions {
    fn default() -> Self {
        Self {
            summary: true,
            wallets: true,
            breakdown: true,
            transactions: true,
        }
    }
}

/// Income and expense totals for the period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub net_change: Money,
}

/// A transaction line with its wallet name resolved
#[derive(Debug, Clone)]
pub struct StatementLine {
    pub transaction: Transaction,
    /// "Unknown" when the wallet no longer exists
    pub wallet_name: String,
}

/// Financial statement for a date range
#[derive(Debug, Clone)]
pub struct StatementReport {
    pub range: DateRange,
    pub options: StatementOptions,
    pub generated_at: DateTime<Utc>,
    pub owner: String,
    pub summary: StatementSummary,
    pub wallets: Vec<Wallet>,
    pub breakdown: Vec<CategorySpending>,
    pub lines: Vec<StatementLine>,
}

impl StatementReport {
    /// Generate a statement; both ends of the range are inclusive
    pub fn generate(
        storage: &Storage,
        range: DateRange,
        options: StatementOptions,
    ) -> PesoResult<Self> {
        let wallets = storage.wallets.get_all()?;
        let names: HashMap<WalletId, String> =
            wallets.iter().map(|w| (w.id, w.name.clone())).collect();

        let transactions = storage
            .transactions
            .get_by_date_range(range.start, range.end)?;

        let total_income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expense: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        let breakdown = expense_breakdown(&transactions);
        let lines = transactions
            .into_iter()
            .map(|t| StatementLine {
                wallet_name: names
                    .get(&t.wallet_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                transaction: t,
            })
            .collect();

        Ok(Self {
            range,
            options,
            generated_at: Utc::now(),
            owner: storage.profile.get()?.name,
            summary: StatementSummary {
                total_income,
                total_expense,
                net_change: total_income - total_expense,
            },
            wallets,
            breakdown,
            lines,
        })
    }

    /// Render the statement as plain text
    pub fn format_terminal(&self) -> String {
        let mut out = String::new();

        out.push_str("PesoWise Financial Statement\n");
        out.push_str(&"=".repeat(72));
        out.push('\n');
        out.push_str(&format!("Prepared for: {}\n", self.owner));
        out.push_str(&format!("Period:       {}\n", self.range));
        out.push_str(&format!(
            "Generated:    {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        if self.options.summary {
            out.push_str("\nSUMMARY\n");
            out.push_str(&"-".repeat(72));
            out.push('\n');
            out.push_str(&format!("Total Income:   {:>18}\n", self.summary.total_income));
            out.push_str(&format!("Total Expenses: {:>18}\n", self.summary.total_expense));
            out.push_str(&format!("Net Change:     {:>18}\n", self.summary.net_change));
        }

        if self.options.wallets {
            out.push_str("\nWALLETS\n");
            out.push_str(&"-".repeat(72));
            out.push('\n');
            for wallet in &self.wallets {
                out.push_str(&format!(
                    "{:<30} {:<16} {:>18}\n",
                    wallet.name, wallet.wallet_type, wallet.balance
                ));
            }
        }

        if self.options.breakdown {
            out.push_str("\nEXPENSE BREAKDOWN\n");
            out.push_str(&"-".repeat(72));
            out.push('\n');
            if self.breakdown.is_empty() {
                out.push_str("No expenses in this period.\n");
            }
            for row in &self.breakdown {
                out.push_str(&format!(
                    "{:<30} {:>18} {:>6.1}%\n",
                    row.category, row.total, row.percentage
                ));
            }
        }

        if self.options.transactions {
            out.push_str("\nTRANSACTIONS\n");
            out.push_str(&"-".repeat(72));
            out.push('\n');
            if self.lines.is_empty() {
                out.push_str("No transactions in this period.\n");
            }
            for line in &self.lines {
                let t = &line.transaction;
                let amount = if t.is_income() {
                    format!("+{}", t.amount)
                } else {
                    format!("-{}", t.amount)
                };
                out.push_str(&format!(
                    "{}  {:<24} {:<14} {:<12} {:>14}\n",
                    t.date,
                    truncate(&t.description, 24),
                    truncate(&t.category, 14),
                    truncate(&line.wallet_name, 12),
                    amount
                ));
            }
        }

        out
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
