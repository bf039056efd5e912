//! Core data models for the banking session

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Lifecycle of a single assistant exchange.
///
/// `Idle -> Sending -> {Success, Failure} -> Idle`; only `Idle` and
/// `Sending` are observable between calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeState {
    #[default]
    Idle,
    Sending,
}

//
// ================= Ledger =================
//

/// One ledger entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    /// Display date (`Oct 24, 2024`), not sortable
    pub date: String,
    pub merchant: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    /// Amount with its direction sign, e.g. `+35,000` or `-450.25`.
    pub fn signed_display(&self) -> String {
        let sign = match self.kind {
            TransactionType::In => '+',
            TransactionType::Out => '-',
        };
        format!("{}{}", sign, crate::format::format_grouped(self.amount, 0))
    }
}

//
// ================= Profile =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub credit_score: u32,
    pub balance: Decimal,
    /// Most recent first
    pub transactions: Vec<Transaction>,
}

impl UserProfile {
    /// First whitespace-separated token of the display name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

//
// ================= Transcript =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub role: MessageRole,
    pub text: String,
}

impl AssistantMessage {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionType::In => "in",
            TransactionType::Out => "out",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_serializes_type_field() {
        let tx = Transaction {
            id: "tx-1".to_string(),
            date: "Oct 24, 2024".to_string(),
            merchant: "Transfer to Jane Doe".to_string(),
            amount: dec!(450.25),
            kind: TransactionType::Out,
            category: Some("Transfer".to_string()),
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "out");
        assert_eq!(json["category"], "Transfer");
    }

    #[test]
    fn test_signed_display() {
        let tx = Transaction {
            id: "tx-003".to_string(),
            date: "Oct 20, 2024".to_string(),
            merchant: "Salary Deposit".to_string(),
            amount: dec!(35000.00),
            kind: TransactionType::In,
            category: None,
        };
        assert_eq!(tx.signed_display(), "+35,000");
    }

    #[test]
    fn test_first_name() {
        let profile = UserProfile {
            name: "ADAM SMITH".to_string(),
            email: "adam.smith@example.com".to_string(),
            credit_score: 785,
            balance: dec!(0),
            transactions: vec![],
        };
        assert_eq!(profile.first_name(), "ADAM");
    }
}
