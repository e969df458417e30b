//! Reports module for PesoWise
//!
//! Provides the dashboard overview, net worth, spending analysis, the
//! printable financial statement and the transaction calendar.

pub mod calendar;
pub mod dashboard;
pub mod net_worth;
pub mod spending;
pub mod statement;

pub use calendar::{transactions_on, CalendarDay, CalendarMonth};
pub use dashboard::{DailyExpenses, DashboardReport};
pub use net_worth::{NetWorthReport, NetWorthSummary, WalletBalance};
pub use spending::{expense_breakdown, CategorySpending, SpendingReport};
pub use statement::{StatementLine, StatementOptions, StatementReport, StatementSummary};
