//! Display formatting for terminal output
//!
//! Entity lists render as tables; detail views are plain aligned text.

pub mod investment;
pub mod notification;
pub mod planning;
pub mod transaction;
pub mod wallet;

pub use investment::{format_investment_list, format_portfolio};
pub use notification::format_notification_list;
pub use planning::{format_bill_list, format_budget_list, format_goal_list, format_loan_list};
pub use transaction::{format_transaction_details, format_transaction_list};
pub use wallet::{format_drift_report, format_wallet_details, format_wallet_list};

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

/// Render rows as a table, right-aligning the given columns
pub(crate) fn render_table<T, I>(rows: I, right_aligned: &[usize]) -> String
where
    T: Tabled,
    I: IntoIterator<Item = T>,
{
    let mut table = Table::new(rows);
    table.with(Style::psql());
    for &column in right_aligned {
        table.modify(Columns::single(column), Alignment::right());
    }
    table.to_string()
}

/// Shorten to `width` characters, ending with an ellipsis when cut
pub(crate) fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Text progress bar, e.g. `[#####-----]`
pub(crate) fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64)
        .round()
        .clamp(0.0, width as f64) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
