//! Backup document
//!
//! The backup is a single camelCase document holding every table. Amounts
//! are written as decimal pesos and ids as plain strings, so backups made
//! by other PesoWise clients import as well. Ids that are not UUIDs get a
//! fresh id on import.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditEntry;
use crate::error::{PesoError, PesoResult};
use crate::models::{
    Bill, BudgetCategory, CardDetails, GoalCategory, Investment, InvestmentType, Loan, LoanType,
    Money, SavingsGoal, Transaction, TransactionType, UserProfile, Wallet, WalletId, WalletType,
};
use crate::storage::{Record, Storage, Table};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub balance: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub wallet_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub id: String,
    pub category: String,
    pub limit: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub due_date: String,
    #[serde(default)]
    pub is_paid: bool,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub id: String,
    pub name: String,
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub due_date: String,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub deadline: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: GoalCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub invested_amount: f64,
    pub current_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub currency: String,
}

/// Full backup of a PesoWise data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default)]
    pub wallets: Vec<WalletRecord>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub budgets: Vec<BudgetRecord>,
    #[serde(default)]
    pub bills: Vec<BillRecord>,
    #[serde(default)]
    pub loans: Vec<LoanRecord>,
    #[serde(default)]
    pub goals: Vec<GoalRecord>,
    #[serde(default)]
    pub investments: Vec<InvestmentRecord>,
    #[serde(default)]
    pub user_profile: Option<ProfileRecord>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// Row counts of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub wallets: usize,
    pub transactions: usize,
    pub budgets: usize,
    pub bills: usize,
    pub loans: usize,
    pub goals: usize,
    pub investments: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.wallets
            + self.transactions
            + self.budgets
            + self.bills
            + self.loans
            + self.goals
            + self.investments
    }
}

fn pesos(amount: Money) -> f64 {
    amount.as_f64()
}

fn to_money(value: f64, what: &str) -> PesoResult<Money> {
    if !value.is_finite() {
        return Err(PesoError::Import(format!("Invalid amount for {}", what)));
    }
    let cents = (value * 100.0).round();
    if cents.abs() > Money::MAX_ABS.cents() as f64 {
        return Err(PesoError::Import(format!("Amount out of range for {}", what)));
    }
    Ok(Money::from_cents(cents as i64))
}

/// Accepts "YYYY-MM-DD" or a full ISO timestamp
fn to_date(value: &str, what: &str) -> PesoResult<NaiveDate> {
    let value = value.trim();
    value
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .ok_or_else(|| PesoError::Import(format!("Invalid date '{}' for {}", value, what)))
}

fn to_id<I: From<Uuid>>(raw: &str) -> I {
    I::from(Uuid::parse_str(raw.trim()).unwrap_or_else(|_| Uuid::new_v4()))
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

fn invalid(what: &str, err: impl std::fmt::Display) -> PesoError {
    PesoError::Import(format!("{}: {}", what, err))
}

impl Backup {
    /// Snapshot every table
    pub fn from_storage(storage: &Storage) -> PesoResult<Self> {
        let profile = storage.profile.get()?;

        Ok(Self {
            wallets: storage
                .wallets
                .get_all()?
                .into_iter()
                .map(|w| WalletRecord {
                    id: w.id.as_uuid().to_string(),
                    name: w.name,
                    wallet_type: w.wallet_type,
                    balance: pesos(w.balance),
                    color: w.color,
                    account_number: w.card.account_number,
                    account_name: w.card.account_name,
                    expiry_date: w.card.expiry_date,
                    cvv: w.card.cvv,
                })
                .collect(),
            transactions: storage
                .transactions
                .get_all()?
                .into_iter()
                .map(|t| TransactionRecord {
                    id: t.id.as_uuid().to_string(),
                    date: t.date.format("%Y-%m-%d").to_string(),
                    description: t.description,
                    amount: pesos(t.amount),
                    transaction_type: t.transaction_type,
                    category: t.category,
                    wallet_id: t.wallet_id.as_uuid().to_string(),
                })
                .collect(),
            budgets: storage
                .budgets
                .get_all()?
                .into_iter()
                .map(|b| BudgetRecord {
                    id: b.id.as_uuid().to_string(),
                    category: b.category,
                    limit: pesos(b.limit),
                    spent: pesos(b.spent),
                    color: b.color,
                })
                .collect(),
            bills: storage
                .bills
                .get_all()?
                .into_iter()
                .map(|b| BillRecord {
                    id: b.id.as_uuid().to_string(),
                    name: b.name,
                    amount: pesos(b.amount),
                    due_date: b.due_date.format("%Y-%m-%d").to_string(),
                    is_paid: b.is_paid,
                    category: b.category,
                })
                .collect(),
            loans: storage
                .loans
                .get_all()?
                .into_iter()
                .map(|l| LoanRecord {
                    id: l.id.as_uuid().to_string(),
                    name: l.name,
                    total_amount: pesos(l.total_amount),
                    paid_amount: pesos(l.paid_amount),
                    due_date: l.due_date.format("%Y-%m-%d").to_string(),
                    interest_rate: l.interest_rate,
                    loan_type: l.loan_type,
                })
                .collect(),
            goals: storage
                .goals
                .get_all()?
                .into_iter()
                .map(|g| GoalRecord {
                    id: g.id.as_uuid().to_string(),
                    name: g.name,
                    target_amount: pesos(g.target_amount),
                    current_amount: pesos(g.current_amount),
                    deadline: g.deadline.format("%Y-%m-%d").to_string(),
                    color: g.color,
                    icon: g.icon,
                    category: g.category,
                })
                .collect(),
            investments: storage
                .investments
                .get_all()?
                .into_iter()
                .map(|i| InvestmentRecord {
                    id: i.id.as_uuid().to_string(),
                    name: i.name,
                    investment_type: i.investment_type,
                    invested_amount: pesos(i.invested_amount),
                    current_value: pesos(i.current_value),
                    symbol: i.symbol,
                    color: i.color,
                })
                .collect(),
            user_profile: Some(ProfileRecord {
                name: profile.name,
                email: profile.email,
                avatar_url: profile.avatar_url,
                currency: profile.currency,
            }),
            timestamp: Utc::now(),
        })
    }

    /// Check referential integrity and uniqueness
    ///
    /// Every transaction's wallet must exist. Wallet names and budget
    /// categories must be unique ignoring case.
    pub fn validate(&self) -> PesoResult<()> {
        let mut wallet_ids = HashSet::new();
        let mut wallet_names = HashSet::new();
        for wallet in &self.wallets {
            if !wallet_ids.insert(wallet.id.trim()) {
                return Err(PesoError::Import(format!(
                    "Duplicate wallet id {}",
                    wallet.id
                )));
            }
            if !wallet_names.insert(wallet.name.trim().to_lowercase()) {
                return Err(PesoError::Import(format!(
                    "Duplicate wallet name {}",
                    wallet.name.trim()
                )));
            }
        }

        let mut categories = HashSet::new();
        for budget in &self.budgets {
            if !categories.insert(budget.category.trim().to_lowercase()) {
                return Err(PesoError::Import(format!(
                    "Duplicate budget category {}",
                    budget.category.trim()
                )));
            }
        }

        for txn in &self.transactions {
            if !wallet_ids.contains(txn.wallet_id.trim()) {
                return Err(PesoError::Import(format!(
                    "Transaction {} references unknown wallet {}",
                    txn.id, txn.wallet_id
                )));
            }
        }

        Ok(())
    }
}

/// Backup contents converted into model rows
struct ImportedTables {
    wallets: Vec<Wallet>,
    transactions: Vec<Transaction>,
    budgets: Vec<BudgetCategory>,
    bills: Vec<Bill>,
    loans: Vec<Loan>,
    goals: Vec<SavingsGoal>,
    investments: Vec<Investment>,
    profile: UserProfile,
}

impl ImportedTables {
    fn convert(backup: Backup) -> PesoResult<Self> {
        let imported_at = Utc::now();

        let mut wallet_ids: HashMap<String, WalletId> = HashMap::new();
        let mut wallets = Vec::with_capacity(backup.wallets.len());
        for (i, record) in backup.wallets.into_iter().enumerate() {
            let id: WalletId = to_id(&record.id);
            wallet_ids.insert(record.id.trim().to_string(), id);

            let balance = to_money(record.balance, &record.name)?;
            let mut wallet = Wallet::with_balance(record.name, record.wallet_type, balance);
            wallet.id = id;
            wallet.color = or_default(record.color, &wallet.color);
            wallet.card = CardDetails {
                account_number: record.account_number,
                account_name: record.account_name,
                expiry_date: record.expiry_date,
                cvv: record.cvv,
            };
            // keep file order when listing
            wallet.created_at = imported_at + Duration::milliseconds(i as i64);
            wallet.updated_at = wallet.created_at;
            wallet
                .validate()
                .map_err(|e| invalid(&format!("Wallet '{}'", wallet.name), e))?;
            wallets.push(wallet);
        }

        let mut transactions = Vec::with_capacity(backup.transactions.len());
        for record in backup.transactions {
            let what = format!("transaction {}", record.id);
            let wallet_id = wallet_ids
                .get(record.wallet_id.trim())
                .copied()
                .ok_or_else(|| {
                    PesoError::Import(format!(
                        "Transaction {} references unknown wallet {}",
                        record.id, record.wallet_id
                    ))
                })?;
            let mut txn = Transaction::new(
                wallet_id,
                to_date(&record.date, &what)?,
                record.transaction_type,
                to_money(record.amount, &what)?,
                record.category,
                record.description,
            );
            txn.id = to_id(&record.id);
            txn.normalize();
            txn.validate().map_err(|e| invalid(&what, e))?;
            transactions.push(txn);
        }

        // opening balance = balance minus everything the transactions did
        for wallet in &mut wallets {
            let applied: Money = transactions
                .iter()
                .filter(|t| t.wallet_id == wallet.id)
                .map(Transaction::signed_amount)
                .sum();
            wallet.opening_balance = wallet.balance - applied;
        }

        let mut budgets = Vec::with_capacity(backup.budgets.len());
        for record in backup.budgets {
            let what = format!("budget '{}'", record.category);
            let mut budget =
                BudgetCategory::new(record.category, to_money(record.limit, &what)?);
            budget.id = to_id(&record.id);
            budget.spent = to_money(record.spent, &what)?;
            budget.color = or_default(record.color, &budget.color);
            budget.validate().map_err(|e| invalid(&what, e))?;
            budgets.push(budget);
        }

        let mut bills = Vec::with_capacity(backup.bills.len());
        for record in backup.bills {
            let what = format!("bill '{}'", record.name);
            let mut bill = Bill::new(
                record.name,
                to_money(record.amount, &what)?,
                to_date(&record.due_date, &what)?,
                record.category,
            );
            bill.id = to_id(&record.id);
            bill.is_paid = record.is_paid;
            bill.validate().map_err(|e| invalid(&what, e))?;
            bills.push(bill);
        }

        let mut loans = Vec::with_capacity(backup.loans.len());
        for record in backup.loans {
            let what = format!("loan '{}'", record.name);
            let mut loan = Loan::new(
                record.name,
                record.loan_type,
                to_money(record.total_amount, &what)?,
                to_date(&record.due_date, &what)?,
            );
            loan.id = to_id(&record.id);
            loan.paid_amount = to_money(record.paid_amount, &what)?;
            loan.interest_rate = record.interest_rate;
            loan.validate().map_err(|e| invalid(&what, e))?;
            loans.push(loan);
        }

        let mut goals = Vec::with_capacity(backup.goals.len());
        for record in backup.goals {
            let what = format!("goal '{}'", record.name);
            let mut goal = SavingsGoal::new(
                record.name,
                to_money(record.target_amount, &what)?,
                to_date(&record.deadline, &what)?,
            );
            goal.id = to_id(&record.id);
            goal.current_amount = to_money(record.current_amount, &what)?;
            goal.color = or_default(record.color, &goal.color);
            goal.icon = or_default(record.icon, &goal.icon);
            goal.category = record.category;
            goal.validate().map_err(|e| invalid(&what, e))?;
            goals.push(goal);
        }

        let mut investments = Vec::with_capacity(backup.investments.len());
        for record in backup.investments {
            let what = format!("investment '{}'", record.name);
            let mut investment = Investment::new(
                record.name,
                record.investment_type,
                to_money(record.invested_amount, &what)?,
                to_money(record.current_value, &what)?,
            );
            investment.id = to_id(&record.id);
            investment.symbol = record.symbol.filter(|s| !s.trim().is_empty());
            investment.color = or_default(record.color, &investment.color);
            investment.validate().map_err(|e| invalid(&what, e))?;
            investments.push(investment);
        }

        let profile = match backup.user_profile {
            Some(record) => {
                let defaults = UserProfile::default();
                let profile = UserProfile {
                    name: or_default(record.name, &defaults.name),
                    email: record.email,
                    avatar_url: record.avatar_url.filter(|u| !u.trim().is_empty()),
                    currency: or_default(record.currency, &defaults.currency),
                };
                profile.validate().map_err(|e| invalid("profile", e))?;
                profile
            }
            None => UserProfile::default(),
        };

        Ok(Self {
            wallets,
            transactions,
            budgets,
            bills,
            loans,
            goals,
            investments,
            profile,
        })
    }
}

fn created<T: Record>(rows: &[T]) -> impl Iterator<Item = AuditEntry> + '_ {
    rows.iter()
        .map(|row| AuditEntry::create(T::ENTITY, row.id().to_string(), row.label(), row))
}

/// Replace all local data with the contents of a backup
///
/// The whole backup is validated and converted before anything is
/// replaced. Notifications are cleared since they describe the old data.
pub fn restore(storage: &Storage, backup: Backup) -> PesoResult<ImportSummary> {
    backup.validate()?;
    let tables = ImportedTables::convert(backup)?;

    let summary = ImportSummary {
        wallets: tables.wallets.len(),
        transactions: tables.transactions.len(),
        budgets: tables.budgets.len(),
        bills: tables.bills.len(),
        loans: tables.loans.len(),
        goals: tables.goals.len(),
        investments: tables.investments.len(),
    };

    let entries: Vec<AuditEntry> = created(&tables.wallets)
        .chain(created(&tables.transactions))
        .chain(created(&tables.budgets))
        .chain(created(&tables.bills))
        .chain(created(&tables.loans))
        .chain(created(&tables.goals))
        .chain(created(&tables.investments))
        .collect();

    storage.wallets.replace_all(tables.wallets)?;
    storage.transactions.replace_all(tables.transactions)?;
    storage.budgets.replace_all(tables.budgets)?;
    storage.bills.replace_all(tables.bills)?;
    storage.loans.replace_all(tables.loans)?;
    storage.goals.replace_all(tables.goals)?;
    storage.investments.replace_all(tables.investments)?;
    storage.notifications.replace_all(Vec::new())?;
    storage.profile.set(tables.profile)?;
    storage.flush(&Table::ALL)?;

    storage.log_batch(&entries)?;

    tracing::info!(rows = summary.total(), "restored backup");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PesoPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    const LEGACY: &str = r#"{
        "wallets": [
            {"id": "w1", "name": "GCash", "type": "GCash", "balance": 1500.5, "color": "bg-blue-500"}
        ],
        "transactions": [
            {"id": "t1", "date": "2025-03-01T08:00:00.000Z", "description": "Lunch",
             "amount": 120.25, "type": "expense", "category": "Food", "walletId": "w1"}
        ],
        "budgets": [{"id": "b1", "category": "Food", "limit": 5000, "spent": 120.25, "color": ""}],
        "bills": [{"id": "x", "name": "Meralco", "amount": 2500, "dueDate": "2025-03-15",
                   "isPaid": false, "category": "Utilities"}],
        "loans": [], "goals": [], "investments": [],
        "userProfile": {"name": "Juan dela Cruz", "email": "juan@example.com", "avatarUrl": null, "currency": "PHP"},
        "timestamp": "2025-03-02T10:00:00.000Z"
    }"#;

    #[test]
    fn test_legacy_backup_restores() {
        let (_temp, storage) = create_test_storage();
        let backup: Backup = serde_json::from_str(LEGACY).unwrap();
        let summary = restore(&storage, backup).unwrap();

        assert_eq!(summary.wallets, 1);
        assert_eq!(summary.total(), 4);

        let wallet = storage.wallets.get_by_name("gcash").unwrap().unwrap();
        assert_eq!(wallet.balance.cents(), 150050);
        // 1500.50 after a 120.25 expense
        assert_eq!(wallet.opening_balance.cents(), 162075);

        let txn = &storage.transactions.get_all().unwrap()[0];
        assert_eq!(txn.wallet_id, wallet.id);
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(txn.amount.cents(), 12025);

        assert_eq!(storage.profile.get().unwrap().initials(), "JD");
        let budget = storage.budgets.get_by_category("food").unwrap().unwrap();
        assert!(!budget.color.is_empty());
    }

    #[test]
    fn test_unknown_wallet_rejected_before_writes() {
        let (_temp, storage) = create_test_storage();
        storage
            .wallets
            .upsert(Wallet::new("Keep me", WalletType::Cash))
            .unwrap();

        let json = LEGACY.replace("\"walletId\": \"w1\"", "\"walletId\": \"w9\"");
        let backup: Backup = serde_json::from_str(&json).unwrap();
        let err = restore(&storage, backup).unwrap_err();

        assert!(matches!(err, PesoError::Import(_)));
        assert!(err.to_string().contains("w9"));
        assert!(storage.wallets.get_by_name("Keep me").unwrap().is_some());
    }

    #[test]
    fn test_duplicate_names_rejected_before_writes() {
        let (_temp, storage) = create_test_storage();
        storage
            .wallets
            .upsert(Wallet::new("Keep me", WalletType::Cash))
            .unwrap();

        let json = LEGACY.replace(
            r#""budgets": [{"id": "b1", "category": "Food", "limit": 5000, "spent": 120.25, "color": ""}]"#,
            r#""budgets": [{"id": "a", "category": "Food", "limit": 5000, "spent": 0, "color": ""},
                          {"id": "b", "category": " food ", "limit": 800, "spent": 0, "color": ""}]"#,
        );
        let err = import_err(&storage, &json);
        assert!(err.to_string().contains("budget category"));

        let json = LEGACY.replace(
            r#"{"id": "w1", "name": "GCash", "type": "GCash", "balance": 1500.5, "color": "bg-blue-500"}"#,
            r#"{"id": "w1", "name": "GCash", "type": "GCash", "balance": 1500.5, "color": ""},
               {"id": "w2", "name": "gcash", "type": "GCash", "balance": 10, "color": ""}"#,
        );
        let err = import_err(&storage, &json);
        assert!(err.to_string().contains("wallet name"));

        assert_eq!(storage.budgets.count().unwrap(), 0);
        assert!(storage.wallets.get_by_name("Keep me").unwrap().is_some());
    }

    #[test]
    fn test_huge_amount_rejected() {
        let (_temp, storage) = create_test_storage();
        let json = LEGACY.replace("\"balance\": 1500.5", "\"balance\": 1e300");
        let err = import_err(&storage, &json);
        assert!(err.to_string().contains("out of range"));
    }

    fn import_err(storage: &Storage, json: &str) -> PesoError {
        let backup: Backup = serde_json::from_str(json).unwrap();
        let err = restore(storage, backup).unwrap_err();
        assert!(matches!(err, PesoError::Import(_)));
        err
    }

    #[test]
    fn test_snapshot_uses_camel_case() {
        let (_temp, storage) = create_test_storage();
        storage
            .bills
            .upsert(Bill::new(
                "Rent",
                Money::from_cents(1_000_000),
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                "Housing",
            ))
            .unwrap();

        let backup = Backup::from_storage(&storage).unwrap();
        let json = serde_json::to_value(&backup).unwrap();
        assert_eq!(json["bills"][0]["dueDate"], "2025-03-01");
        assert_eq!(json["bills"][0]["isPaid"], false);
        assert_eq!(json["bills"][0]["amount"], 10000.0);
        assert!(json.get("userProfile").is_some());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_snapshot_restores_into_fresh_storage() {
        let (_temp, source) = create_test_storage();
        let wallet = Wallet::with_balance("Maya", WalletType::Maya, Money::from_cents(99_999));
        let wallet_id = wallet.id;
        source.wallets.upsert(wallet).unwrap();
        source
            .transactions
            .upsert(Transaction::new(
                wallet_id,
                NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                TransactionType::Income,
                Money::from_cents(1),
                "Gift",
                "",
            ))
            .unwrap();

        let backup = Backup::from_storage(&source).unwrap();

        let (_temp2, target) = create_test_storage();
        restore(&target, backup).unwrap();
        let restored = target.wallets.get(wallet_id).unwrap().unwrap();
        assert_eq!(restored.balance.cents(), 99_999);
        assert_eq!(target.transactions.get_by_wallet(wallet_id).unwrap().len(), 1);
    }
}
