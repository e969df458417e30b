//! Core data models for PesoWise
//!
//! Plain records for every table: wallets, transactions, budgets, bills,
//! loans, savings goals, investments, notifications and the user profile.

pub mod bill;
pub mod budget;
pub mod goal;
pub mod ids;
pub mod investment;
pub mod loan;
pub mod money;
pub mod notification;
pub mod period;
pub mod profile;
pub mod transaction;
pub mod wallet;

pub use bill::Bill;
pub use budget::{BudgetCategory, BudgetThreshold};
pub use goal::{GoalCategory, SavingsGoal};
pub use ids::{
    BillId, BudgetId, EntityId, GoalId, InvestmentId, LoanId, NotificationId, TransactionId,
    WalletId,
};
pub use investment::{Investment, InvestmentType};
pub use loan::{Loan, LoanType};
pub use money::Money;
pub use notification::{AppNotification, NotificationKind};
pub use period::{DateRange, Month};
pub use profile::UserProfile;
pub use transaction::{Transaction, TransactionType};
pub use wallet::{CardDetails, Wallet, WalletType};
