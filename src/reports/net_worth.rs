//! Net Worth Report
//!
//! Wallet balances and investments are assets, as is money lent out that
//! has not been collected yet. Money borrowed and not yet repaid is the only
//! liability.

use std::io::Write;

use crate::error::{PesoError, PesoResult};
use crate::models::{LoanType, Money, WalletType};
use crate::storage::Storage;

/// One wallet's line in the report
#[derive(Debug, Clone)]
pub struct WalletBalance {
    pub name: String,
    pub wallet_type: WalletType,
    pub balance: Money,
}

/// Net worth totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetWorthSummary {
    pub wallet_total: Money,
    pub investment_value: Money,
    /// Remaining on lent loans
    pub owed_to_me: Money,
    pub total_assets: Money,
    /// Remaining on borrowed loans
    pub total_liabilities: Money,
    pub net_worth: Money,
}

/// Net Worth Report
#[derive(Debug, Clone)]
pub struct NetWorthReport {
    pub wallets: Vec<WalletBalance>,
    pub summary: NetWorthSummary,
}

impl NetWorthReport {
    /// Generate a net worth report
    pub fn generate(storage: &Storage) -> PesoResult<Self> {
        let wallets: Vec<WalletBalance> = storage
            .wallets
            .get_all()?
            .into_iter()
            .map(|w| WalletBalance {
                name: w.name,
                wallet_type: w.wallet_type,
                balance: w.balance,
            })
            .collect();

        let wallet_total: Money = wallets.iter().map(|w| w.balance).sum();
        let investment_value: Money = storage
            .investments
            .get_all()?
            .iter()
            .map(|i| i.current_value)
            .sum();

        let loans = storage.loans.get_all()?;
        let remaining_of = |kind: LoanType| -> Money {
            loans
                .iter()
                .filter(|l| l.loan_type == kind)
                .map(|l| l.remaining())
                .sum()
        };
        let owed_to_me = remaining_of(LoanType::Lent);
        let total_liabilities = remaining_of(LoanType::Borrow);

        let total_assets = wallet_total + investment_value + owed_to_me;

        Ok(Self {
            wallets,
            summary: NetWorthSummary {
                wallet_total,
                investment_value,
                owed_to_me,
                total_assets,
                total_liabilities,
                net_worth: total_assets - total_liabilities,
            },
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Net Worth Report\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');

        for wallet in &self.wallets {
            output.push_str(&format!(
                "  {:<28} {:>18}\n",
                format!("{} ({})", wallet.name, wallet.wallet_type),
                wallet.balance
            ));
        }
        if !self.wallets.is_empty() {
            output.push_str(&"-".repeat(50));
            output.push('\n');
        }

        let s = &self.summary;
        output.push_str(&format!("Wallets:           {:>18}\n", s.wallet_total));
        output.push_str(&format!("Investments:       {:>18}\n", s.investment_value));
        output.push_str(&format!("Owed to me:        {:>18}\n", s.owed_to_me));
        output.push_str(&format!("Total Assets:      {:>18}\n", s.total_assets));
        output.push_str(&format!("Total Liabilities: {:>18}\n", s.total_liabilities));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!("Net Worth:         {:>18}\n", s.net_worth));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> PesoResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PesoError::Export(e.to_string());

        csv.write_record(["Section", "Name", "Amount"])
            .map_err(export_err)?;
        for wallet in &self.wallets {
            csv.write_record([
                "Wallet".to_string(),
                wallet.name.clone(),
                format!("{:.2}", wallet.balance.as_f64()),
            ])
            .map_err(export_err)?;
        }

        let s = &self.summary;
        for (name, amount) in [
            ("Investments", s.investment_value),
            ("Owed to me", s.owed_to_me),
            ("Total Assets", s.total_assets),
            ("Total Liabilities", s.total_liabilities),
            ("Net Worth", s.net_worth),
        ] {
            csv.write_record([
                "Summary".to_string(),
                name.to_string(),
                format!("{:.2}", amount.as_f64()),
            ])
            .map_err(export_err)?;
        }

        csv.flush().map_err(|e| PesoError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PesoPaths;
    use crate::models::{Investment, InvestmentType, Loan, Wallet};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn loan(kind: LoanType, total: i64, paid: i64) -> Loan {
        let mut loan = Loan::new(
            "x",
            kind,
            Money::from_cents(total),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        loan.paid_amount = Money::from_cents(paid);
        loan
    }

    #[test]
    fn test_net_worth_arithmetic() {
        let (_temp, storage) = create_test_storage();
        storage
            .wallets
            .upsert(Wallet::with_balance("Cash", WalletType::Cash, Money::from_cents(50000)))
            .unwrap();
        storage
            .wallets
            .upsert(Wallet::with_balance("BDO", WalletType::Bdo, Money::from_cents(150000)))
            .unwrap();
        storage
            .investments
            .upsert(Investment::new(
                "Fund",
                InvestmentType::Fund,
                Money::from_cents(10000),
                Money::from_cents(30000),
            ))
            .unwrap();
        storage.loans.upsert(loan(LoanType::Lent, 20000, 5000)).unwrap();
        storage.loans.upsert(loan(LoanType::Borrow, 100000, 40000)).unwrap();
        // overpaid loans count as zero, never negative
        storage.loans.upsert(loan(LoanType::Borrow, 1000, 5000)).unwrap();

        let report = NetWorthReport::generate(&storage).unwrap();
        let s = report.summary;
        assert_eq!(s.wallet_total.cents(), 200000);
        assert_eq!(s.investment_value.cents(), 30000);
        assert_eq!(s.owed_to_me.cents(), 15000);
        assert_eq!(s.total_assets.cents(), 245000);
        assert_eq!(s.total_liabilities.cents(), 60000);
        assert_eq!(s.net_worth.cents(), 185000);
    }

    #[test]
    fn test_empty_and_formatting() {
        let (_temp, storage) = create_test_storage();
        let report = NetWorthReport::generate(&storage).unwrap();
        assert_eq!(report.summary.net_worth, Money::zero());
        assert!(report.format_terminal().contains("Net Worth:"));

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.contains("Summary,Net Worth,0.00"));
    }
}
