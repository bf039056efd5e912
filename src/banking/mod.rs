//! Banking service - the handler layer behind every front-end
//!
//! LOGIN → DASHBOARD → TRANSFER / ASK ASSISTANT → SIGN OUT
//!
//! Validates form input, applies the optional artificial latency and
//! routes each action into the session holder or the assistant bridge.

use crate::assistant::AssistantBridge;
use crate::config::AppConfig;
use crate::directory::{IdentityProvider, StaticDirectory};
use crate::error::BankingError;
use crate::format::format_grouped;
use crate::gemini::GeminiClient;
use crate::models::{AssistantMessage, ExchangeState, Transaction, UserProfile};
use crate::session::SessionState;
use crate::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Transfer form as submitted by the customer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferForm {
    pub amount: String,
    pub iban: String,
    #[serde(default)]
    pub recipient_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionLine {
    pub id: String,
    pub date: String,
    pub merchant: String,
    pub category: Option<String>,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub greeting: String,
    pub name: String,
    pub balance: Decimal,
    pub balance_display: String,
    pub credit_score: u32,
    pub transactions: Vec<TransactionLine>,
}

impl DashboardSummary {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            greeting: format!("Marhaba, {}!", profile.first_name()),
            name: profile.name.clone(),
            balance: profile.balance,
            balance_display: format_grouped(profile.balance, 2),
            credit_score: profile.credit_score,
            transactions: profile
                .transactions
                .iter()
                .map(|tx| TransactionLine {
                    id: tx.id.clone(),
                    date: tx.date.clone(),
                    merchant: tx.merchant.clone(),
                    category: tx.category.clone(),
                    amount: tx.signed_display(),
                })
                .collect(),
        }
    }
}

/// One completed question/answer pair
#[derive(Debug, Clone, Serialize)]
pub struct AssistantExchange {
    pub query: AssistantMessage,
    pub reply: AssistantMessage,
}

/// Holds the `Sending` flag for the lifetime of one exchange.
struct SendingGuard<'a>(&'a AtomicBool);

impl<'a> SendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BankingService {
    session: SessionState,
    bridge: AssistantBridge,
    sending: AtomicBool,
    /// Earlier transcript messages sent along with each question
    history_turns: usize,
    login_latency: Duration,
    transfer_latency: Duration,
}

impl BankingService {
    pub fn new(directory: Arc<dyn IdentityProvider>, bridge: AssistantBridge) -> Self {
        Self {
            session: SessionState::new(directory),
            bridge,
            sending: AtomicBool::new(false),
            history_turns: 0,
            login_latency: Duration::ZERO,
            transfer_latency: Duration::ZERO,
        }
    }

    /// Demo directory plus a Gemini-backed assistant.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_base_url.clone(),
            config.assistant_timeout,
        )?;

        let bridge = AssistantBridge::new(Arc::new(client), config.gemini_model.clone());

        Ok(Self::new(Arc::new(StaticDirectory::sample()), bridge)
            .with_history_turns(config.assistant_history_turns)
            .with_latency(config.login_latency, config.transfer_latency))
    }

    /// Send up to `turns` earlier transcript messages with each question.
    /// Zero sends the question alone.
    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.history_turns = turns;
        self
    }

    /// Artificial delays before login and transfer results are revealed.
    pub fn with_latency(mut self, login: Duration, transfer: Duration) -> Self {
        self.login_latency = login;
        self.transfer_latency = transfer;
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let profile = self.session.authenticate(email, password).await?;
        pause(self.login_latency).await;
        Ok(profile)
    }

    pub async fn sign_out(&self) {
        self.session.sign_out().await;
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        let profile = self.session.profile().await?;
        Ok(DashboardSummary::from_profile(&profile))
    }

    /// Submit the transfer form.
    ///
    /// Amount and IBAN must be present and the amount must parse; beyond
    /// that the debit is recorded as entered, including negative balances.
    /// A transfer started before a sign-out never lands in a later session.
    pub async fn execute_transfer(&self, form: &TransferForm) -> Result<Transaction> {
        let amount = form.amount.trim();
        let iban = form.iban.trim();

        if amount.is_empty() || iban.is_empty() {
            return Err(BankingError::InvalidInput(
                "amount and IBAN are required".to_string(),
            ));
        }

        let amount = Decimal::from_str(amount).map_err(|_| {
            BankingError::InvalidInput(format!("'{}' is not a valid amount", form.amount))
        })?;

        let generation = self.session.generation().await?;

        pause(self.transfer_latency).await;

        let recipient = form.recipient_name.as_deref().map(str::trim);
        info!(iban = %iban, "Executing transfer");
        self.session
            .record_outbound_transfer_in(generation, amount, recipient)
            .await
            .inspect_err(|_| warn!("Session changed during transfer; discarding it"))
    }

    pub fn exchange_state(&self) -> ExchangeState {
        if self.sending.load(Ordering::Acquire) {
            ExchangeState::Sending
        } else {
            ExchangeState::Idle
        }
    }

    /// Ask the assistant.
    ///
    /// The question is appended to the transcript before the provider is
    /// called and the answer after; the answer is built from the profile
    /// as it was when the question was sent. Only one question may be in
    /// flight at a time. If the session changes while the provider is
    /// working, the reply is dropped and `NotAuthenticated` is returned.
    pub async fn ask_assistant(&self, input: &str) -> Result<AssistantExchange> {
        let query = input.trim();
        if query.is_empty() {
            return Err(BankingError::InvalidInput("question is empty".to_string()));
        }

        let _guard = SendingGuard::acquire(&self.sending).ok_or(BankingError::AssistantBusy)?;

        let snapshot = self.session.snapshot().await?;
        let history = snapshot.transcript.recent_turns(self.history_turns);

        let query_message = AssistantMessage::user(query);
        self.session
            .append_message(snapshot.generation, query_message.clone())
            .await?;

        let text = self
            .bridge
            .reply_with_history(query, &snapshot.profile, history)
            .await;

        let reply = AssistantMessage::assistant(text);
        if let Err(e) = self
            .session
            .append_message(snapshot.generation, reply.clone())
            .await
        {
            warn!("Session changed before the assistant replied; dropping reply");
            return Err(e);
        }

        Ok(AssistantExchange {
            query: query_message,
            reply,
        })
    }

    pub async fn assistant_messages(&self) -> Result<Vec<AssistantMessage>> {
        Ok(self.session.transcript().await?.messages().to_vec())
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
