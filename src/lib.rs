//! Digital Banking Assistant
//!
//! The behavioural core of a demo digital-banking front-end:
//! - Session state: the signed-in customer's profile, ledger and chat transcript
//! - Outbound transfers that debit the balance and prepend a ledger entry
//! - An assistant bridge that asks Gemini about the customer's account and
//!   always degrades to a fixed fallback message instead of failing
//!
//! FLOW:
//! LOGIN → DASHBOARD → TRANSFER / ASK → SIGN OUT

pub mod api;
pub mod assistant;
pub mod banking;
pub mod config;
pub mod directory;
pub mod error;
pub mod format;
pub mod gemini;
pub mod memory;
pub mod models;
pub mod session;

pub use error::{BankingError, Result};

// Re-export common types
pub use models::*;
