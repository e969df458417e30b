//! Bill service

use chrono::NaiveDate;

use crate::error::{PesoError, PesoResult};
use crate::models::budget::DEFAULT_WARNING_PERCENT;
use crate::models::{Bill, BillId, Money, TransactionType, WalletId};
use crate::storage::{Storage, Table};

use super::transaction::{NewTransaction, RecordOutcome, TransactionService};

/// Service for bill management
pub struct BillService<'a> {
    storage: &'a Storage,
    warning_percent: u8,
}

/// Fields to change on an existing bill; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct BillUpdate {
    pub name: Option<String>,
    pub amount: Option<Money>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
}

/// Result of paying a bill
#[derive(Debug, Clone)]
pub struct BillPayment {
    pub bill: Bill,
    pub record: RecordOutcome,
}

impl<'a> BillService<'a> {
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

    pub fn create(
        &self,
        name: &str,
        amount: Money,
        due_date: NaiveDate,
        category: &str,
    ) -> PesoResult<Bill> {
        let bill = Bill::new(name.trim(), amount, due_date, category.trim());
        bill.validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.flush(&[Table::Bills])?;
        self.storage.log_create(&bill)?;

        tracing::info!(id = %bill.id, name = %bill.name, due = %bill.due_date, "created bill");
        Ok(bill)
    }

    pub fn update(&self, id: BillId, update: BillUpdate) -> PesoResult<Bill> {
        let before = self.require(id)?;
        let mut bill = before.clone();

        if let Some(name) = update.name {
            bill.name = name.trim().to_string();
        }
        if let Some(amount) = update.amount {
            bill.amount = amount;
        }
        if let Some(due_date) = update.due_date {
            bill.due_date = due_date;
        }
        if let Some(category) = update.category {
            bill.category = category.trim().to_string();
        }
        bill.validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.flush(&[Table::Bills])?;
        self.storage.log_update(&before, &bill)?;

        tracing::info!(id = %bill.id, "updated bill");
        Ok(bill)
    }

    pub fn delete(&self, id: BillId) -> PesoResult<Bill> {
        let bill = self
            .storage
            .bills
            .delete(id)?
            .ok_or_else(|| PesoError::bill_not_found(id.to_string()))?;
        self.storage.flush(&[Table::Bills])?;
        self.storage.log_delete(&bill)?;

        tracing::info!(id = %bill.id, "deleted bill");
        Ok(bill)
    }

    pub fn get(&self, id: BillId) -> PesoResult<Option<Bill>> {
        self.storage.bills.get(id)
    }

    /// Find a bill by name (case-insensitive), then by id
    pub fn find(&self, identifier: &str) -> PesoResult<Option<Bill>> {
        let name = identifier.trim().to_lowercase();
        let mut by_name = self
            .storage
            .bills
            .filter(|b| b.name.to_lowercase() == name)?;
        if by_name.len() == 1 {
            return Ok(by_name.pop());
        }
        self.storage.bills.find_by_reference(identifier)
    }

    pub fn resolve(&self, identifier: &str) -> PesoResult<Bill> {
        self.find(identifier)?
            .ok_or_else(|| PesoError::bill_not_found(identifier))
    }

    /// All bills, soonest due first
    pub fn list(&self) -> PesoResult<Vec<Bill>> {
        self.storage.bills.get_all()
    }

    pub fn unpaid(&self) -> PesoResult<Vec<Bill>> {
        self.storage.bills.get_unpaid()
    }

    /// Unpaid bills due between today and `days` from now, inclusive
    pub fn due_soon(&self, today: NaiveDate, days: i64) -> PesoResult<Vec<Bill>> {
        self.storage.bills.filter(|b| b.is_due_within(today, days))
    }

    /// Pay a bill from a wallet
    ///
    /// Records an expense in the bill's category and marks the bill paid.
    pub fn pay(&self, id: BillId, wallet_id: WalletId, date: NaiveDate) -> PesoResult<BillPayment> {
        let before = self.require(id)?;
        if before.is_paid {
            return Err(PesoError::AlreadyPaid(before.name));
        }

        let transactions =
            TransactionService::new(self.storage).with_warning_percent(self.warning_percent);
        let staged = transactions.stage(NewTransaction {
            wallet_id,
            date,
            transaction_type: TransactionType::Expense,
            amount: before.amount,
            category: before.category.clone(),
            description: format!("Paid Bill: {}", before.name),
        })?;

        let mut bill = before.clone();
        bill.is_paid = true;
        self.storage.bills.upsert(bill.clone())?;

        let record = transactions.commit(staged, &[Table::Bills])?;
        self.storage.log_update(&before, &bill)?;

        tracing::info!(id = %bill.id, name = %bill.name, "paid bill");
        Ok(BillPayment { bill, record })
    }

    /// Clear the paid flag, e.g. for the next billing cycle
    pub fn unpay(&self, id: BillId) -> PesoResult<Bill> {
        let before = self.require(id)?;
        if !before.is_paid {
            return Ok(before);
        }

        let mut bill = before.clone();
        bill.is_paid = false;
        self.storage.bills.upsert(bill.clone())?;
        self.storage.flush(&[Table::Bills])?;
        self.storage.log_update(&before, &bill)?;

        tracing::info!(id = %bill.id, "marked bill unpaid");
        Ok(bill)
    }

    fn require(&self, id: BillId) -> PesoResult<Bill> {
        self.storage
            .bills
            .get(id)?
            .ok_or_else(|| PesoError::bill_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PesoPaths;
    use crate::models::{BudgetCategory, Wallet, WalletType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_wallet(storage: &Storage, cents: i64) -> WalletId {
        let wallet = Wallet::with_balance("BDO", WalletType::Bdo, Money::from_cents(cents));
        let id = wallet.id;
        storage.wallets.upsert(wallet).unwrap();
        id
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    #[test]
    fn test_create_validates() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);

        let bill = service
            .create(" Meralco ", Money::from_cents(250000), date(15), "Utilities")
            .unwrap();
        assert_eq!(bill.name, "Meralco");
        assert!(!bill.is_paid);

        assert!(service
            .create("Water", Money::zero(), date(15), "Utilities")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_pay_records_expense_and_marks_paid() {
        let (_temp, storage) = create_test_storage();
        let wallet_id = add_wallet(&storage, 500000);
        let service = BillService::new(&storage);
        let bill = service
            .create("Meralco", Money::from_cents(250000), date(15), "Utilities")
            .unwrap();

        let payment = service.pay(bill.id, wallet_id, date(14)).unwrap();
        assert!(payment.bill.is_paid);
        assert_eq!(payment.record.transaction.description, "Paid Bill: Meralco");
        assert_eq!(payment.record.transaction.category, "Utilities");
        assert_eq!(payment.record.wallet.balance.cents(), 250000);
        assert!(storage.bills.get(bill.id).unwrap().unwrap().is_paid);
    }

    #[test]
    fn test_paying_twice_fails() {
        let (_temp, storage) = create_test_storage();
        let wallet_id = add_wallet(&storage, 500000);
        let service = BillService::new(&storage);
        let bill = service
            .create("Rent", Money::from_cents(100), date(1), "Housing")
            .unwrap();

        service.pay(bill.id, wallet_id, date(1)).unwrap();
        let err = service.pay(bill.id, wallet_id, date(1)).unwrap_err();
        assert!(matches!(err, PesoError::AlreadyPaid(_)));
        assert_eq!(storage.transactions.count().unwrap(), 1);

        service.unpay(bill.id).unwrap();
        service.pay(bill.id, wallet_id, date(2)).unwrap();
        assert_eq!(storage.transactions.count().unwrap(), 2);
    }

    #[test]
    fn test_payment_counts_toward_budget() {
        let (_temp, storage) = create_test_storage();
        let wallet_id = add_wallet(&storage, 500000);
        storage
            .budgets
            .upsert(BudgetCategory::new("utilities", Money::from_cents(300000)))
            .unwrap();
        let service = BillService::new(&storage);
        let bill = service
            .create("Meralco", Money::from_cents(250000), date(15), "Utilities")
            .unwrap();

        let payment = service.pay(bill.id, wallet_id, date(14)).unwrap();
        assert_eq!(payment.record.budget.unwrap().spent.cents(), 250000);
        assert!(payment.record.notification.is_some());
    }

    #[test]
    fn test_pay_from_missing_wallet_leaves_bill_unpaid() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        let bill = service
            .create("Rent", Money::from_cents(100), date(1), "Housing")
            .unwrap();

        assert!(service.pay(bill.id, WalletId::new(), date(1)).unwrap_err().is_not_found());
        assert!(!storage.bills.get(bill.id).unwrap().unwrap().is_paid);
    }

    #[test]
    fn test_due_soon_window() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        service.create("Today", Money::from_cents(1), date(10), "x").unwrap();
        service.create("In3", Money::from_cents(1), date(13), "x").unwrap();
        service.create("In4", Money::from_cents(1), date(14), "x").unwrap();
        service.create("Past", Money::from_cents(1), date(9), "x").unwrap();

        let names: Vec<_> = service
            .due_soon(date(10), 3)
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Today", "In3"]);
    }
}
