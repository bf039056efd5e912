//! Identity provider
//!
//! Resolves login credentials to a customer profile. The bundled
//! `StaticDirectory` holds a single demo record; a real account-of-record
//! system plugs in behind the same trait.

use crate::models::{Transaction, TransactionType, UserProfile};
use async_trait::async_trait;
use rust_decimal_macros::dec;

/// Trait for credential lookup
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Profile for an exact identifier/secret match, `None` otherwise.
    async fn lookup(&self, identifier: &str, secret: &str) -> Option<UserProfile>;
}

/// One hardcoded credential pair and its profile.
///
/// Plain string equality: no hashing, lockout or rate limiting.
pub struct StaticDirectory {
    identifier: String,
    secret: String,
    profile: UserProfile,
}

impl StaticDirectory {
    pub fn new(
        identifier: impl Into<String>,
        secret: impl Into<String>,
        profile: UserProfile,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            profile,
        }
    }

    /// The demo customer used by the binaries.
    pub fn sample() -> Self {
        Self::new("adam.smith@example.com", "123456", sample_profile())
    }
}

impl Default for StaticDirectory {
    fn default() -> Self {
        Self::sample()
    }
}

#[async_trait]
impl IdentityProvider for StaticDirectory {
    async fn lookup(&self, identifier: &str, secret: &str) -> Option<UserProfile> {
        if identifier == self.identifier && secret == self.secret {
            Some(self.profile.clone())
        } else {
            None
        }
    }
}

pub fn sample_profile() -> UserProfile {
    UserProfile {
        name: "ADAM SMITH".to_string(),
        email: "adam.smith@example.com".to_string(),
        credit_score: 785,
        balance: dec!(245850.50),
        transactions: vec![
            seeded(
                "tx-001",
                "Oct 24, 2024",
                "Carrefour Mall of Emirates",
                dec!(450.25),
                TransactionType::Out,
                "Groceries",
            ),
            seeded(
                "tx-002",
                "Oct 22, 2024",
                "DEWA Bill Payment",
                dec!(1200.00),
                TransactionType::Out,
                "Utilities",
            ),
            seeded(
                "tx-003",
                "Oct 20, 2024",
                "Salary Deposit",
                dec!(35000.00),
                TransactionType::In,
                "Income",
            ),
            seeded(
                "tx-004",
                "Oct 18, 2024",
                "Etisalat Renewal",
                dec!(399.00),
                TransactionType::Out,
                "Bills",
            ),
        ],
    }
}

fn seeded(
    id: &str,
    date: &str,
    merchant: &str,
    amount: rust_decimal::Decimal,
    kind: TransactionType,
    category: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date.to_string(),
        merchant: merchant.to_string(),
        amount,
        kind,
        category: Some(category.to_string()),
    }
}
