//! Transaction calendar
//!
//! A Sunday-first month grid with per-day income, expense and count.

use chrono::{Datelike, NaiveDate};

use crate::error::PesoResult;
use crate::models::{Money, Month, Transaction};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Activity on a single day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub income: Money,
    pub expense: Money,
    pub count: usize,
}

impl CalendarDay {
    pub fn has_activity(&self) -> bool {
        self.count > 0
    }
}

/// One month of calendar cells
#[derive(Debug, Clone)]
pub struct CalendarMonth {
    pub month: Month,
    /// Empty cells before the 1st (0 when the month starts on a Sunday)
    pub leading_blanks: usize,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn generate(storage: &Storage, month: Month) -> PesoResult<Self> {
        let range = month.range();
        let transactions = storage
            .transactions
            .get_by_date_range(range.start, range.end)?;

        let days = range
            .days()
            .map(|date| {
                let on_day: Vec<&Transaction> =
                    transactions.iter().filter(|t| t.date == date).collect();
                CalendarDay {
                    date,
                    income: on_day
                        .iter()
                        .filter(|t| t.is_income())
                        .map(|t| t.amount)
                        .sum(),
                    expense: on_day
                        .iter()
                        .filter(|t| t.is_expense())
                        .map(|t| t.amount)
                        .sum(),
                    count: on_day.len(),
                }
            })
            .collect();

        Ok(Self {
            month,
            leading_blanks: month.first_day().weekday().num_days_from_sunday() as usize,
            days,
        })
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Cells grouped into weeks, `None` for padding
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = vec![None; self.leading_blanks];
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }

    /// Render the grid; days with activity are marked with `*`
    pub fn format_terminal(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{:^35}\n", self.month.label()));
        out.push_str(" Sun  Mon  Tue  Wed  Thu  Fri  Sat\n");

        for week in self.weeks() {
            for cell in week {
                match cell {
                    Some(day) => {
                        let mark = if day.has_activity() { '*' } else { ' ' };
                        out.push_str(&format!(" {:>2}{} ", day.date.day(), mark));
                    }
                    None => out.push_str("     "),
                }
            }
            out.push('\n');
        }

        let active: Vec<&CalendarDay> = self.days.iter().filter(|d| d.has_activity()).collect();
        if !active.is_empty() {
            out.push('\n');
            for day in active {
                out.push_str(&format!(
                    "{}  {:>2} txn  +{:<14} -{}\n",
                    day.date,
                    day.count,
                    day.income.to_string(),
                    day.expense
                ));
            }
        }

        out
    }
}

/// Transactions on a selected calendar day
pub fn transactions_on(storage: &Storage, date: NaiveDate) -> PesoResult<Vec<Transaction>> {
    TransactionService::new(storage).list(&TransactionFilter::new().on(date))
}
