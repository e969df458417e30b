//! Budgets, bills, loans and goals

use chrono::NaiveDate;
use tabled::Tabled;

use crate::models::{Bill, Loan, SavingsGoal};
use crate::services::budget::BudgetUsage;

use super::{progress_bar, render_table};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Usage")]
    usage: String,
}

pub fn format_budget_list(usages: &[BudgetUsage]) -> String {
    if usages.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = usages.iter().map(|u| BudgetRow {
        category: u.budget.category.clone(),
        spent: u.budget.spent.to_string(),
        limit: u.budget.limit.to_string(),
        remaining: u.remaining.to_string(),
        usage: format!(
            "{} {:.0}%{}",
            progress_bar(u.bar_percent, 10),
            u.percent,
            if u.budget.is_over() { " OVER" } else { "" }
        ),
    });

    render_table(rows, &[1, 2, 3])
}

#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn bill_status(bill: &Bill, today: NaiveDate) -> String {
    if bill.is_paid {
        return "Paid".to_string();
    }
    match bill.days_until_due(today) {
        d if d < 0 => format!("Overdue {}d", -d),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d => format!("Due in {}d", d),
    }
}

pub fn format_bill_list(bills: &[Bill], today: NaiveDate) -> String {
    if bills.is_empty() {
        return "No bills found.".to_string();
    }

    let rows = bills.iter().map(|b| BillRow {
        name: b.name.clone(),
        amount: b.amount.to_string(),
        due: b.due_date.to_string(),
        category: b.category.clone(),
        status: bill_status(b, today),
    });

    render_table(rows, &[1])
}

#[derive(Tabled)]
struct LoanRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

pub fn format_loan_list(loans: &[Loan]) -> String {
    if loans.is_empty() {
        return "No loans found.".to_string();
    }

    let rows = loans.iter().map(|l| LoanRow {
        name: l.name.clone(),
        kind: l.loan_type.to_string(),
        total: l.total_amount.to_string(),
        paid: l.paid_amount.to_string(),
        remaining: l.remaining().to_string(),
        due: l.due_date.to_string(),
        progress: if l.is_settled() {
            "Settled".to_string()
        } else {
            format!("{:.0}%", l.progress_percent())
        },
    });

    render_table(rows, &[2, 3, 4])
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
}

pub fn format_goal_list(goals: &[SavingsGoal], today: NaiveDate) -> String {
    if goals.is_empty() {
        return "No savings goals found.".to_string();
    }

    let rows = goals.iter().map(|g| GoalRow {
        name: format!("{} {}", g.icon, g.name).trim().to_string(),
        category: g.category.to_string(),
        saved: g.current_amount.to_string(),
        target: g.target_amount.to_string(),
        progress: if g.is_achieved() {
            "Achieved".to_string()
        } else {
            format!(
                "{} {:.0}%",
                progress_bar(g.progress_percent(), 10),
                g.progress_percent()
            )
        },
        deadline: match g.days_left(today) {
            d if d < 0 => format!("{} (passed)", g.deadline),
            d => format!("{} ({}d left)", g.deadline, d),
        },
    });

    render_table(rows, &[2, 3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, LoanType, Money};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_budget_list_marks_over() {
        let mut budget = BudgetCategory::new("Food", Money::from_cents(10_000));
        budget.spent = Money::from_cents(12_000);
        let usage = BudgetUsage {
            remaining: budget.remaining(),
            percent: budget.usage_percent(),
            bar_percent: budget.bar_percent(),
            budget,
        };

        let output = format_budget_list(&[usage]);
        assert!(output.contains("120%"));
        assert!(output.contains("OVER"));
    }

    #[test]
    fn test_bill_status() {
        let mut bill = Bill::new("Meralco", Money::from_cents(250_000), date(10), "Utilities");
        assert_eq!(bill_status(&bill, date(10)), "Due today");
        assert_eq!(bill_status(&bill, date(9)), "Due tomorrow");
        assert_eq!(bill_status(&bill, date(12)), "Overdue 2d");
        bill.is_paid = true;
        assert_eq!(bill_status(&bill, date(12)), "Paid");
    }

    #[test]
    fn test_loan_and_goal_lists() {
        let mut loan = Loan::new("Tito Ben", LoanType::Lent, Money::from_cents(10_000), date(30));
        loan.paid_amount = Money::from_cents(2_500);
        assert!(format_loan_list(&[loan]).contains("25%"));

        let goal = SavingsGoal::new("Japan Trip", Money::from_cents(100_000), date(20));
        let output = format_goal_list(&[goal], date(10));
        assert!(output.contains("Japan Trip"));
        assert!(output.contains("10d left"));
        assert_eq!(format_goal_list(&[], date(1)), "No savings goals found.");
    }
}
