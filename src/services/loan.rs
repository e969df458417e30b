//! Loan service
//!
//! Tracks money borrowed from or lent to someone. Payments move money
//! through a wallet as a regular transaction.

use chrono::NaiveDate;

use crate::error::{PesoError, PesoResult};
use crate::models::budget::DEFAULT_WARNING_PERCENT;
use crate::models::{Loan, LoanId, LoanType, Money, TransactionType, WalletId};
use crate::storage::{Storage, Table};

use super::transaction::{NewTransaction, RecordOutcome, TransactionService};

/// Category for repayments of money borrowed
pub const DEBT_REPAYMENT_CATEGORY: &str = "Debt Repayment";
/// Category for money collected on a loan given out
pub const DEBT_COLLECTION_CATEGORY: &str = "Debt Collection";

/// Service for loan management
pub struct LoanService<'a> {
    storage: &'a Storage,
    warning_percent: u8,
}

/// Input for creating a loan
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub name: String,
    pub loan_type: LoanType,
    pub total_amount: Money,
    pub due_date: NaiveDate,
    pub interest_rate: f64,
}

/// Fields to change on an existing loan; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct LoanUpdate {
    pub name: Option<String>,
    pub loan_type: Option<LoanType>,
    pub total_amount: Option<Money>,
    pub paid_amount: Option<Money>,
    pub due_date: Option<NaiveDate>,
    pub interest_rate: Option<f64>,
}

/// Result of a loan payment
#[derive(Debug, Clone)]
pub struct LoanPayment {
    pub loan: Loan,
    pub record: RecordOutcome,
}

/// Loan totals by direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTotals {
    /// Remaining on money borrowed
    pub owed_by_me: Money,
    /// Remaining on money lent
    pub owed_to_me: Money,
}

impl<'a> LoanService<'a> {
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

    pub fn create(&self, input: NewLoan) -> PesoResult<Loan> {
        let mut loan = Loan::new(
            input.name.trim(),
            input.loan_type,
            input.total_amount,
            input.due_date,
        );
        loan.interest_rate = input.interest_rate;
        loan.validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.loans.upsert(loan.clone())?;
        self.storage.flush(&[Table::Loans])?;
        self.storage.log_create(&loan)?;

        tracing::info!(id = %loan.id, name = %loan.name, kind = %loan.loan_type, "created loan");
        Ok(loan)
    }

    pub fn update(&self, id: LoanId, update: LoanUpdate) -> PesoResult<Loan> {
        let before = self.require(id)?;
        let mut loan = before.clone();

        if let Some(name) = update.name {
            loan.name = name.trim().to_string();
        }
        if let Some(loan_type) = update.loan_type {
            loan.loan_type = loan_type;
        }
        if let Some(total) = update.total_amount {
            loan.total_amount = total;
        }
        if let Some(paid) = update.paid_amount {
            loan.paid_amount = paid;
        }
        if let Some(due_date) = update.due_date {
            loan.due_date = due_date;
        }
        if let Some(rate) = update.interest_rate {
            loan.interest_rate = rate;
        }
        loan.validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.loans.upsert(loan.clone())?;
        self.storage.flush(&[Table::Loans])?;
        self.storage.log_update(&before, &loan)?;

        tracing::info!(id = %loan.id, "updated loan");
        Ok(loan)
    }

    pub fn delete(&self, id: LoanId) -> PesoResult<Loan> {
        let loan = self
            .storage
            .loans
            .delete(id)?
            .ok_or_else(|| PesoError::loan_not_found(id.to_string()))?;
        self.storage.flush(&[Table::Loans])?;
        self.storage.log_delete(&loan)?;

        tracing::info!(id = %loan.id, "deleted loan");
        Ok(loan)
    }

    pub fn get(&self, id: LoanId) -> PesoResult<Option<Loan>> {
        self.storage.loans.get(id)
    }

    /// Find a loan by name (case-insensitive), then by id
    pub fn find(&self, identifier: &str) -> PesoResult<Option<Loan>> {
        let name = identifier.trim().to_lowercase();
        let mut by_name = self
            .storage
            .loans
            .filter(|l| l.name.to_lowercase() == name)?;
        if by_name.len() == 1 {
            return Ok(by_name.pop());
        }
        self.storage.loans.find_by_reference(identifier)
    }

    pub fn resolve(&self, identifier: &str) -> PesoResult<Loan> {
        self.find(identifier)?
            .ok_or_else(|| PesoError::loan_not_found(identifier))
    }

    pub fn list(&self, loan_type: Option<LoanType>) -> PesoResult<Vec<Loan>> {
        match loan_type {
            Some(loan_type) => self.storage.loans.get_by_type(loan_type),
            None => self.storage.loans.get_all(),
        }
    }

    pub fn totals(&self) -> PesoResult<LoanTotals> {
        let loans = self.list(None)?;
        let remaining = |kind: LoanType| -> Money {
            loans
                .iter()
                .filter(|l| l.loan_type == kind)
                .map(Loan::remaining)
                .sum()
        };
        Ok(LoanTotals {
            owed_by_me: remaining(LoanType::Borrow),
            owed_to_me: remaining(LoanType::Lent),
        })
    }

    /// Record a payment on a loan through a wallet
    ///
    /// Repaying a borrowed loan is an expense; collecting on a lent loan is
    /// income.
    pub fn record_payment(
        &self,
        id: LoanId,
        amount: Money,
        wallet_id: WalletId,
        date: NaiveDate,
    ) -> PesoResult<LoanPayment> {
        let before = self.require(id)?;

        let (transaction_type, category, description) = match before.loan_type {
            LoanType::Borrow => (
                TransactionType::Expense,
                DEBT_REPAYMENT_CATEGORY,
                format!("Payment for {}", before.name),
            ),
            LoanType::Lent => (
                TransactionType::Income,
                DEBT_COLLECTION_CATEGORY,
                format!("Received from {}", before.name),
            ),
        };

        let transactions =
            TransactionService::new(self.storage).with_warning_percent(self.warning_percent);
        let staged = transactions.stage(NewTransaction {
            wallet_id,
            date,
            transaction_type,
            amount,
            category: category.to_string(),
            description,
        })?;

        let mut loan = before.clone();
        loan.paid_amount += staged.outcome().transaction.amount;
        self.storage.loans.upsert(loan.clone())?;

        let record = transactions.commit(staged, &[Table::Loans])?;
        self.storage.log_update(&before, &loan)?;

        tracing::info!(
            id = %loan.id,
            paid = loan.paid_amount.cents(),
            remaining = loan.remaining().cents(),
            "recorded loan payment"
        );
        Ok(LoanPayment { loan, record })
    }

    fn require(&self, id: LoanId) -> PesoResult<Loan> {
        self.storage
            .loans
            .get(id)?
            .ok_or_else(|| PesoError::loan_not_found(id.to_string()))
    }
}
