//! Wallet display formatting

use tabled::Tabled;

use crate::models::{Money, Wallet};
use crate::services::wallet::BalanceDrift;

use super::render_table;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format wallets as a table with a total line
pub fn format_wallet_list(wallets: &[Wallet]) -> String {
    if wallets.is_empty() {
        return "No wallets found.".to_string();
    }

    let rows = wallets.iter().map(|w| WalletRow {
        name: w.name.clone(),
        kind: w.wallet_type.to_string(),
        account: w.masked_account_number().unwrap_or_default(),
        balance: w.balance.to_string(),
        id: w.id.to_string(),
    });

    let total: Money = wallets.iter().map(|w| w.balance).sum();
    format!("{}\n\nTotal Balance: {}", render_table(rows, &[3]), total)
}

/// Format a single wallet's details
pub fn format_wallet_details(wallet: &Wallet, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Wallet: {}\n", wallet.name));
    output.push_str(&format!("  Type:            {}\n", wallet.wallet_type));
    output.push_str(&format!("  ID:              {}\n", wallet.id));
    output.push_str(&format!("  Balance:         {}\n", wallet.balance));
    output.push_str(&format!("  Opening Balance: {}\n", wallet.opening_balance));
    output.push_str(&format!("  Transactions:    {}\n", transaction_count));

    let card = &wallet.card;
    if let Some(number) = wallet.masked_account_number() {
        output.push('\n');
        output.push_str(&format!("  Account Number:  {}\n", number));
    }
    if let Some(name) = &card.account_name {
        output.push_str(&format!("  Account Name:    {}\n", name));
    }
    if let Some(expiry) = &card.expiry_date {
        output.push_str(&format!("  Expiry:          {}\n", expiry));
    }
    if card.cvv.is_some() {
        output.push_str("  CVV:             •••\n");
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        wallet.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        wallet.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

/// Format the result of a balance check
pub fn format_drift_report(drifts: &[BalanceDrift]) -> String {
    if drifts.is_empty() {
        return "All wallet balances match their transactions.".to_string();
    }

    let mut output = format!("{} wallet(s) out of balance:\n", drifts.len());
    for drift in drifts {
        output.push_str(&format!(
            "  {:<24} stored {:>14}  expected {:>14}  ({})\n",
            drift.name,
            drift.stored.to_string(),
            drift.expected.to_string(),
            drift.difference()
        ));
    }
    output.push_str("\nRun `pesowise wallet repair` to fix.\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WalletType;

    #[test]
    fn test_format_wallet_list() {
        let wallets = vec![
            Wallet::with_balance("Cash", WalletType::Cash, Money::from_cents(150_000)),
            Wallet::with_balance("GCash", WalletType::GCash, Money::from_cents(50_000)),
        ];
        let output = format_wallet_list(&wallets);

        assert!(output.contains("Cash"));
        assert!(output.contains("GCash"));
        assert!(output.contains("Total Balance: ₱2,000.00"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_wallet_list(&[]), "No wallets found.");
    }

    #[test]
    fn test_details_hide_cvv() {
        let mut wallet = Wallet::new("BPI Card", WalletType::Bpi);
        wallet.card.account_number = Some("4111111111111111".into());
        wallet.card.cvv = Some("123".into());

        let output = format_wallet_details(&wallet, 0);
        assert!(output.contains("1111"));
        assert!(!output.contains("4111111111111111"));
        assert!(!output.contains("123\n"));
    }
}
