//! Spending Report
//!
//! Expense totals per category for a date range.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{PesoError, PesoResult};
use crate::models::{DateRange, Money, Transaction};
use crate::storage::Storage;

/// Expense total for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    /// Category name as first seen
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of all expenses in percent
    pub percentage: f64,
}

/// Group expenses by category (case-insensitive), largest first
///
/// Income transactions are ignored.
pub fn expense_breakdown<'t, I>(transactions: I) -> Vec<CategorySpending>
where
    I: IntoIterator<Item = &'t Transaction>,
{
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, CategorySpending> = HashMap::new();

    for txn in transactions.into_iter().filter(|t| t.is_expense()) {
        let key = txn.category.trim().to_lowercase();
        let entry = totals.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            CategorySpending {
                category: txn.category.trim().to_string(),
                total: Money::zero(),
                transaction_count: 0,
                percentage: 0.0,
            }
        });
        entry.total += txn.amount;
        entry.transaction_count += 1;
    }

    let grand_total: Money = totals.values().map(|c| c.total).sum();
    let mut rows: Vec<CategorySpending> = order
        .into_iter()
        .filter_map(|key| totals.remove(&key))
        .map(|mut row| {
            row.percentage = row.total.ratio_of(grand_total).unwrap_or(0.0) * 100.0;
            row
        })
        .collect();

    // stable sort keeps first-seen order among equal totals
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub range: DateRange,
    pub categories: Vec<CategorySpending>,
    pub total_spending: Money,
    pub total_income: Money,
    pub transaction_count: usize,
}

impl SpendingReport {
    /// Generate a spending report for a date range (inclusive)
    pub fn generate(storage: &Storage, range: DateRange) -> PesoResult<Self> {
        let transactions = storage
            .transactions
            .get_by_date_range(range.start, range.end)?;

        let categories = expense_breakdown(&transactions);
        let total_spending = categories.iter().map(|c| c.total).sum();
        let total_income = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();

        Ok(Self {
            range,
            categories,
            total_spending,
            total_income,
            transaction_count: transactions.len(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Report: {}\n", self.range));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>14} {:>6} {:>7}\n",
            "Category", "Amount", "Count", "Share"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>14} {:>6} {:>6.1}%\n",
                row.category,
                row.total.to_string(),
                row.transaction_count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14}\n",
            "Total Spending",
            self.total_spending.to_string()
        ));
        output.push_str(&format!(
            "{:<30} {:>14}\n",
            "Total Income",
            self.total_income.to_string()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> PesoResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Amount", "Count", "Percentage"])
            .map_err(|e| PesoError::Export(e.to_string()))?;

        for row in &self.categories {
            csv.write_record([
                row.category.clone(),
                format!("{:.2}", row.total.as_f64()),
                row.transaction_count.to_string(),
                format!("{:.1}", row.percentage),
            ])
            .map_err(|e| PesoError::Export(e.to_string()))?;
        }

        csv.flush().map_err(|e| PesoError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PesoPaths;
    use crate::models::{TransactionType, WalletId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn txn(day: u32, kind: TransactionType, cents: i64, category: &str) -> Transaction {
        Transaction::new(
            WalletId::new(),
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            kind,
            Money::from_cents(cents),
            category,
            "",
        )
    }

    #[test]
    fn test_breakdown_groups_ignoring_case() {
        let transactions = vec![
            txn(1, TransactionType::Expense, 300, "Food"),
            txn(2, TransactionType::Expense, 100, "food"),
            txn(3, TransactionType::Expense, 600, "Rent"),
            txn(4, TransactionType::Income, 9999, "Food"),
        ];

        let rows = expense_breakdown(&transactions);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Rent");
        assert_eq!(rows[0].percentage, 60.0);
        assert_eq!(rows[1].category, "Food");
        assert_eq!(rows[1].total.cents(), 400);
        assert_eq!(rows[1].transaction_count, 2);
    }

    #[test]
    fn test_generate_respects_range() {
        let (_temp, storage) = create_test_storage();
        for t in [
            txn(1, TransactionType::Expense, 100, "Food"),
            txn(15, TransactionType::Expense, 200, "Food"),
            txn(31, TransactionType::Expense, 400, "Food"),
            txn(15, TransactionType::Income, 1000, "Salary"),
        ] {
            storage.transactions.upsert(t).unwrap();
        }

        let range = DateRange::parse("2025-03-01..2025-03-15").unwrap();
        let report = SpendingReport::generate(&storage, range).unwrap();
        assert_eq!(report.total_spending.cents(), 300);
        assert_eq!(report.total_income.cents(), 1000);
        assert_eq!(report.transaction_count, 3);
        assert!(report.format_terminal().contains("Food"));
    }

    #[test]
    fn test_csv_export() {
        let (_temp, storage) = create_test_storage();
        storage
            .transactions
            .upsert(txn(1, TransactionType::Expense, 12345, "Transport"))
            .unwrap();

        let report =
            SpendingReport::generate(&storage, DateRange::parse("2025-03").unwrap()).unwrap();
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.starts_with("Category,Amount,Count,Percentage"));
        assert!(csv.contains("Transport,123.45,1,100.0"));
    }
}
