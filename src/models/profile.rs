//! User profile model

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_NAME: &str = "User";
pub const DEFAULT_CURRENCY: &str = "PHP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            email: String::new(),
            avatar_url: None,
            currency: default_currency(),
        }
    }
}

impl UserProfile {
    /// Up to two upper-cased initials, "U" when the name is blank
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(ProfileValidationError::InvalidEmail(self.email.clone()));
        }
        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ProfileValidationError::InvalidCurrency(self.currency.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    InvalidEmail(String),
    InvalidCurrency(String),
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidCurrency(code) => {
                write!(f, "Currency must be a three-letter code, got '{}'", code)
            }
        }
    }
}

impl std::error::Error for ProfileValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let profile = UserProfile::default();
        assert_eq!(profile.name, "User");
        assert_eq!(profile.currency, "PHP");

        let parsed: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn test_initials() {
        assert_eq!(named("juan dela cruz").initials(), "JD");
        assert_eq!(named("Maria").initials(), "M");
        assert_eq!(named("   ").initials(), "U");
        assert_eq!(named("").initials(), "U");
    }

    #[test]
    fn test_validation() {
        let mut profile = UserProfile::default();
        assert!(profile.validate().is_ok());
        profile.email = "nope".into();
        assert!(matches!(
            profile.validate(),
            Err(ProfileValidationError::InvalidEmail(_))
        ));
        profile.email = "a@b.ph".into();
        profile.currency = "PESO".into();
        assert!(matches!(
            profile.validate(),
            Err(ProfileValidationError::InvalidCurrency(_))
        ));
    }
}
