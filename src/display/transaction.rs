//! Transaction display formatting

use std::collections::HashMap;

use tabled::Tabled;

use crate::models::{Transaction, WalletId};

use super::{render_table, truncate};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn signed(txn: &Transaction) -> String {
    if txn.is_income() {
        format!("+{}", txn.amount)
    } else {
        format!("-{}", txn.amount)
    }
}

/// Format transactions as a table; wallets missing from `wallet_names` show as "Unknown"
pub fn format_transaction_list(
    transactions: &[Transaction],
    wallet_names: &HashMap<WalletId, String>,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow {
        date: t.date.format("%Y-%m-%d").to_string(),
        description: truncate(&t.description, 28),
        category: truncate(&t.category, 16),
        wallet: wallet_names
            .get(&t.wallet_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string()),
        amount: signed(t),
        id: t.id.to_string(),
    });

    render_table(rows, &[4])
}

pub fn format_transaction_details(txn: &Transaction, wallet_name: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Date:        {}\n", txn.date));
    output.push_str(&format!("  Type:        {}\n", txn.transaction_type));
    output.push_str(&format!("  Amount:      {}\n", signed(txn)));
    output.push_str(&format!("  Category:    {}\n", txn.category));
    output.push_str(&format!("  Wallet:      {}\n", wallet_name));
    if !txn.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", txn.description));
    }
    output.push_str(&format!(
        "  Recorded:    {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;

    fn txn(kind: TransactionType, wallet_id: WalletId) -> Transaction {
        Transaction::new(
            wallet_id,
            NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            kind,
            Money::from_cents(75_000),
            "Dining",
            "Valentine's dinner",
        )
    }

    #[test]
    fn test_list_signs_and_wallet_names() {
        let known = WalletId::new();
        let names = HashMap::from([(known, "GCash".to_string())]);
        let list = vec![
            txn(TransactionType::Expense, known),
            txn(TransactionType::Income, WalletId::new()),
        ];

        let output = format_transaction_list(&list, &names);
        assert!(output.contains("-₱750.00"));
        assert!(output.contains("+₱750.00"));
        assert!(output.contains("GCash"));
        assert!(output.contains("Unknown"));
    }

    #[test]
    fn test_details() {
        let t = txn(TransactionType::Expense, WalletId::new());
        let output = format_transaction_details(&t, "Cash");
        assert!(output.contains("Valentine's dinner"));
        assert!(output.contains("Wallet:      Cash"));
    }
}
