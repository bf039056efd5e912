//! Session state holder
//!
//! Single source of truth for the signed-in customer's profile, ledger and
//! assistant transcript. Login replaces everything wholesale, transfers
//! mutate the profile in place, sign-out discards it.
//!
//! Every login starts a new generation. Work that spans an await point
//! (a provider call, an artificial delay) captures the generation up front
//! and writes back only if the same session is still active.

use crate::directory::IdentityProvider;
use crate::error::BankingError;
use crate::memory::Transcript;
use crate::models::{AssistantMessage, Transaction, TransactionType, UserProfile};
use crate::Result;
use chrono::{Local, Utc};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

const TRANSFER_CATEGORY: &str = "Transfer";
const DEFAULT_RECIPIENT: &str = "External Account";

struct ActiveSession {
    generation: u64,
    profile: UserProfile,
    transcript: Transcript,
    /// Last millisecond stamp handed out as a transaction id
    last_tx_stamp: i64,
}

impl ActiveSession {
    fn record_transfer(&mut self, amount: Decimal, recipient_name: Option<&str>) -> Transaction {
        let stamp = Utc::now().timestamp_millis().max(self.last_tx_stamp + 1);
        self.last_tx_stamp = stamp;

        let recipient = recipient_name
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_RECIPIENT);

        let transaction = Transaction {
            id: format!("tx-{}", stamp),
            date: Local::now().format("%b %-d, %Y").to_string(),
            merchant: format!("Transfer to {}", recipient),
            amount,
            kind: TransactionType::Out,
            category: Some(TRANSFER_CATEGORY.to_string()),
        };

        self.profile.balance -= amount;
        self.profile.transactions.insert(0, transaction.clone());

        if self.profile.balance.is_sign_negative() {
            warn!(balance = %self.profile.balance, "Balance went negative after transfer");
        }
        info!(id = %transaction.id, amount = %amount, "Outbound transfer recorded");

        transaction
    }
}

/// Point-in-time copy of the active session
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub profile: UserProfile,
    pub transcript: Transcript,
}

pub struct SessionState {
    directory: Arc<dyn IdentityProvider>,
    active: RwLock<Option<ActiveSession>>,
    generations: AtomicU64,
}

impl SessionState {
    pub fn new(directory: Arc<dyn IdentityProvider>) -> Self {
        Self {
            directory,
            active: RwLock::new(None),
            generations: AtomicU64::new(0),
        }
    }

    /// Sign in with an exact credential match.
    ///
    /// On success the profile and a transcript holding a single welcome
    /// message replace any previous session. On mismatch nothing changes.
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> Result<UserProfile> {
        let Some(profile) = self.directory.lookup(identifier, secret).await else {
            warn!("Login rejected: invalid credentials");
            return Err(BankingError::InvalidCredentials);
        };

        let transcript = Transcript::with_welcome(profile.first_name());

        let mut active = self.active.write().await;
        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        *active = Some(ActiveSession {
            generation,
            profile: profile.clone(),
            transcript,
            last_tx_stamp: 0,
        });

        info!(customer = %profile.name, generation, "Session started");
        Ok(profile)
    }

    /// Debit `amount` from the current session and prepend a `Transfer`
    /// ledger entry.
    ///
    /// There is no balance or sign check: the balance may go negative.
    pub async fn record_outbound_transfer(
        &self,
        amount: Decimal,
        recipient_name: Option<&str>,
    ) -> Result<Transaction> {
        let mut guard = self.active.write().await;
        let session = guard.as_mut().ok_or(BankingError::NotAuthenticated)?;
        Ok(session.record_transfer(amount, recipient_name))
    }

    /// Same as `record_outbound_transfer`, but only into the session that
    /// was active at `generation`.
    pub async fn record_outbound_transfer_in(
        &self,
        generation: u64,
        amount: Decimal,
        recipient_name: Option<&str>,
    ) -> Result<Transaction> {
        let mut guard = self.active.write().await;
        let session = current(&mut guard, generation)?;
        Ok(session.record_transfer(amount, recipient_name))
    }

    /// Drop the profile and transcript.
    pub async fn sign_out(&self) {
        let mut active = self.active.write().await;
        if active.take().is_some() {
            info!("Session ended");
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.active.read().await.is_some()
    }

    pub async fn generation(&self) -> Result<u64> {
        let active = self.active.read().await;
        active
            .as_ref()
            .map(|s| s.generation)
            .ok_or(BankingError::NotAuthenticated)
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let active = self.active.read().await;
        active
            .as_ref()
            .map(|s| SessionSnapshot {
                generation: s.generation,
                profile: s.profile.clone(),
                transcript: s.transcript.clone(),
            })
            .ok_or(BankingError::NotAuthenticated)
    }

    pub async fn profile(&self) -> Result<UserProfile> {
        let active = self.active.read().await;
        active
            .as_ref()
            .map(|s| s.profile.clone())
            .ok_or(BankingError::NotAuthenticated)
    }

    pub async fn transcript(&self) -> Result<Transcript> {
        let active = self.active.read().await;
        active
            .as_ref()
            .map(|s| s.transcript.clone())
            .ok_or(BankingError::NotAuthenticated)
    }

    /// Append to the transcript of the session active at `generation`.
    pub async fn append_message(&self, generation: u64, message: AssistantMessage) -> Result<()> {
        let mut guard = self.active.write().await;
        current(&mut guard, generation)?.transcript.push(message);
        Ok(())
    }
}

fn current(active: &mut Option<ActiveSession>, generation: u64) -> Result<&mut ActiveSession> {
    match active.as_mut() {
        Some(session) if session.generation == generation => Ok(session),
        _ => Err(BankingError::NotAuthenticated),
    }
}
