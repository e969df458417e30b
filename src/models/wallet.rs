//! Wallet model
//!
//! A named money-holding account: cash on hand, an e-wallet, or a bank
//! account. The balance moves with every recorded transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;
use super::money::Money;

/// Kind of wallet, mostly Philippine e-wallets and banks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletType {
    Cash,
    GCash,
    Maya,
    PayPal,
    Wise,
    SeaBank,
    MariBank,
    #[serde(rename = "CIMB")]
    Cimb,
    GoTyme,
    Komo,
    OwnBank,
    Tonik,
    #[serde(rename = "BDO")]
    Bdo,
    #[serde(rename = "BPI")]
    Bpi,
    Metrobank,
    LandBank,
    #[serde(rename = "China Bank")]
    ChinaBank,
    UnionBank,
    #[serde(rename = "RCBC")]
    Rcbc,
    #[serde(rename = "PNB")]
    Pnb,
    #[serde(rename = "Security Bank")]
    SecurityBank,
    EastWest,
    Other,
}

impl WalletType {
    /// Every wallet type in picker order
    pub const ALL: [WalletType; 23] = [
        Self::Cash,
        Self::GCash,
        Self::Maya,
        Self::PayPal,
        Self::Wise,
        Self::SeaBank,
        Self::MariBank,
        Self::Cimb,
        Self::GoTyme,
        Self::Komo,
        Self::OwnBank,
        Self::Tonik,
        Self::Bdo,
        Self::Bpi,
        Self::Metrobank,
        Self::LandBank,
        Self::ChinaBank,
        Self::UnionBank,
        Self::Rcbc,
        Self::Pnb,
        Self::SecurityBank,
        Self::EastWest,
        Self::Other,
    ];

    /// Parse a wallet type, ignoring case, spaces and underscores
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|t| normalize(t.label()) == wanted)
    }

    /// Human-readable label (also the serialized form)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::GCash => "GCash",
            Self::Maya => "Maya",
            Self::PayPal => "PayPal",
            Self::Wise => "Wise",
            Self::SeaBank => "SeaBank",
            Self::MariBank => "MariBank",
            Self::Cimb => "CIMB",
            Self::GoTyme => "GoTyme",
            Self::Komo => "Komo",
            Self::OwnBank => "OwnBank",
            Self::Tonik => "Tonik",
            Self::Bdo => "BDO",
            Self::Bpi => "BPI",
            Self::Metrobank => "Metrobank",
            Self::LandBank => "LandBank",
            Self::ChinaBank => "China Bank",
            Self::UnionBank => "UnionBank",
            Self::Rcbc => "RCBC",
            Self::Pnb => "PNB",
            Self::SecurityBank => "Security Bank",
            Self::EastWest => "EastWest",
            Self::Other => "Other",
        }
    }

    /// Whether this is physical cash rather than an account
    pub fn is_cash(&self) -> bool {
        matches!(self, Self::Cash)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl Default for WalletType {
    fn default() -> Self {
        Self::Cash
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Default accent color for new wallets
pub const DEFAULT_WALLET_COLOR: &str = "#3b82f6";

/// Optional card details shown on the wallet card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
}

/// A wallet holding money
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,

    pub name: String,

    #[serde(rename = "type")]
    pub wallet_type: WalletType,

    /// Current balance
    pub balance: Money,

    /// Balance before any recorded transaction
    ///
    /// `balance == opening_balance + sum(signed transaction amounts)` holds
    /// as long as every change goes through the services.
    #[serde(default)]
    pub opening_balance: Money,

    pub color: String,

    #[serde(flatten)]
    pub card: CardDetails,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new wallet with a zero balance
    pub fn new(name: impl Into<String>, wallet_type: WalletType) -> Self {
        let now = Utc::now();
        Self {
            id: WalletId::new(),
            name: name.into(),
            wallet_type,
            balance: Money::zero(),
            opening_balance: Money::zero(),
            color: DEFAULT_WALLET_COLOR.to_string(),
            card: CardDetails::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new wallet with an opening balance
    pub fn with_balance(
        name: impl Into<String>,
        wallet_type: WalletType,
        balance: Money,
    ) -> Self {
        let mut wallet = Self::new(name, wallet_type);
        wallet.balance = balance;
        wallet.opening_balance = balance;
        wallet
    }

    /// Apply a signed amount to the balance
    pub fn apply(&mut self, signed_amount: Money) {
        self.balance += signed_amount;
        self.updated_at = Utc::now();
    }

    /// Overwrite the balance, shifting the opening balance by the same delta
    pub fn set_balance(&mut self, balance: Money) {
        let delta = balance - self.balance;
        self.opening_balance += delta;
        self.balance = balance;
        self.updated_at = Utc::now();
    }

    /// Last four characters of the account number, if any
    pub fn masked_account_number(&self) -> Option<String> {
        self.card.account_number.as_ref().map(|number| {
            let digits: Vec<char> = number.chars().filter(|c| !c.is_whitespace()).collect();
            let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
            format!("•••• {}", tail)
        })
    }

    pub fn validate(&self) -> Result<(), WalletValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(WalletValidationError::EmptyName);
        }

        if name.chars().count() > 100 {
            return Err(WalletValidationError::NameTooLong(name.chars().count()));
        }

        if let Some(cvv) = &self.card.cvv {
            if cvv.len() > 4 || !cvv.chars().all(|c| c.is_ascii_digit()) {
                return Err(WalletValidationError::InvalidCvv);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.wallet_type)
    }
}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidCvv,
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Wallet name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Wallet name too long ({} chars, max 100)", len)
            }
            Self::InvalidCvv => write!(f, "CVV must be up to 4 digits"),
        }
    }
}

impl std::error::Error for WalletValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_wallet() {
        let wallet = Wallet::new("Pocket", WalletType::Cash);
        assert_eq!(wallet.name, "Pocket");
        assert_eq!(wallet.balance, Money::zero());
        assert_eq!(wallet.color, DEFAULT_WALLET_COLOR);
    }

    #[test]
    fn test_set_balance_shifts_opening() {
        let mut wallet = Wallet::with_balance("GCash", WalletType::GCash, Money::from_cents(10000));
        wallet.apply(Money::from_cents(-2500));
        assert_eq!(wallet.balance.cents(), 7500);

        wallet.set_balance(Money::from_cents(8000));
        assert_eq!(wallet.balance.cents(), 8000);
        assert_eq!(wallet.opening_balance.cents(), 10500);
    }

    #[test]
    fn test_wallet_type_parse() {
        assert_eq!(WalletType::parse("gcash"), Some(WalletType::GCash));
        assert_eq!(WalletType::parse("china_bank"), Some(WalletType::ChinaBank));
        assert_eq!(WalletType::parse("Security Bank"), Some(WalletType::SecurityBank));
        assert_eq!(WalletType::parse("bdo"), Some(WalletType::Bdo));
        assert_eq!(WalletType::parse("piggy"), None);
    }

    #[test]
    fn test_wallet_type_serialization() {
        assert_eq!(serde_json::to_string(&WalletType::ChinaBank).unwrap(), "\"China Bank\"");
        assert_eq!(serde_json::to_string(&WalletType::GCash).unwrap(), "\"GCash\"");
        let parsed: WalletType = serde_json::from_str("\"BPI\"").unwrap();
        assert_eq!(parsed, WalletType::Bpi);
    }

    #[test]
    fn test_validation() {
        let mut wallet = Wallet::new("Valid", WalletType::Maya);
        assert!(wallet.validate().is_ok());

        wallet.name = "   ".into();
        assert_eq!(wallet.validate(), Err(WalletValidationError::EmptyName));

        wallet.name = "x".repeat(101);
        assert!(matches!(
            wallet.validate(),
            Err(WalletValidationError::NameTooLong(101))
        ));

        wallet.name = "Card".into();
        wallet.card.cvv = Some("12a".into());
        assert_eq!(wallet.validate(), Err(WalletValidationError::InvalidCvv));
    }

    #[test]
    fn test_masked_account_number() {
        let mut wallet = Wallet::new("BDO Savings", WalletType::Bdo);
        assert_eq!(wallet.masked_account_number(), None);
        wallet.card.account_number = Some("1234 5678 9012".into());
        assert_eq!(wallet.masked_account_number().as_deref(), Some("•••• 9012"));
    }

    #[test]
    fn test_card_fields_flattened() {
        let mut wallet = Wallet::new("BPI", WalletType::Bpi);
        wallet.card.account_name = Some("Juan Dela Cruz".into());
        let json = serde_json::to_value(&wallet).unwrap();
        assert_eq!(json["account_name"], "Juan Dela Cruz");
        assert!(json.get("cvv").is_none());

        let back: Wallet = serde_json::from_value(json).unwrap();
        assert_eq!(back.card.account_name.as_deref(), Some("Juan Dela Cruz"));
    }
}
