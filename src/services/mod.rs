//! Service layer for PesoWise
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-entity operations such
//! as keeping wallet balances and budget totals in step with transactions.

pub mod bill;
pub mod budget;
pub mod goal;
pub mod investment;
pub mod loan;
pub mod notification;
pub mod profile;
pub mod transaction;
pub mod wallet;

pub use bill::BillService;
pub use budget::BudgetService;
pub use goal::GoalService;
pub use investment::InvestmentService;
pub use loan::LoanService;
pub use notification::NotificationService;
pub use profile::ProfileService;
pub use transaction::{NewTransaction, RecordOutcome, TransactionFilter, TransactionService};
pub use wallet::WalletService;
