//! Assistant bridge
//!
//! Turns a customer question plus a snapshot of their profile into a
//! reply from the text-generation provider. Every failure is absorbed
//! here and replaced by a fixed fallback string, so callers always get
//! something to show.

use crate::error::BankingError;
use crate::format::format_grouped;
use crate::gemini::{GenerationRequest, TextGenerator, Turn};
use crate::models::{AssistantMessage, MessageRole, UserProfile};
use crate::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

pub mod persona;
pub use persona::Persona;

/// Shown when the provider answers without any text.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "I apologize, I'm having trouble connecting to my systems. Please try again shortly.";

/// Shown when the provider call fails outright.
pub const ERROR_FALLBACK: &str = "I'm sorry, I encountered an error. Please try again later.";

pub const TEMPERATURE: f32 = 0.7;

pub struct AssistantBridge {
    generator: Arc<dyn TextGenerator>,
    model: String,
    persona: Persona,
}

impl AssistantBridge {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            persona: Persona::default(),
        }
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    /// Reply to `query` using only the query itself as conversation.
    pub async fn reply(&self, query: &str, profile: &UserProfile) -> String {
        self.reply_with_history(query, profile, &[]).await
    }

    /// Reply to `query` with `history` sent ahead of it as earlier turns.
    /// `history` must not contain `query` itself.
    ///
    /// Never fails: provider errors and empty answers become fallback text.
    pub async fn reply_with_history(
        &self,
        query: &str,
        profile: &UserProfile,
        history: &[AssistantMessage],
    ) -> String {
        let request = self.build_request(query, profile, history);

        match self.try_reply(&request).await {
            Ok(text) => {
                info!(chars = text.len(), "Assistant reply received");
                text
            }
            Err(BankingError::EmptyAssistantResponse) => {
                warn!("Assistant provider returned no text");
                EMPTY_RESPONSE_FALLBACK.to_string()
            }
            Err(e) => {
                error!("Assistant provider error: {}", e);
                ERROR_FALLBACK.to_string()
            }
        }
    }

    async fn try_reply(&self, request: &GenerationRequest) -> Result<String> {
        let response = self.generator.generate(request).await?;

        match response.text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(BankingError::EmptyAssistantResponse),
        }
    }

    pub fn build_request(
        &self,
        query: &str,
        profile: &UserProfile,
        history: &[AssistantMessage],
    ) -> GenerationRequest {
        let mut contents: Vec<Turn> = history
            .iter()
            .map(|m| Turn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect();

        contents.push(Turn {
            role: MessageRole::User,
            text: query.to_string(),
        });

        GenerationRequest {
            model: self.model.clone(),
            contents,
            system_instruction: self.system_instruction(profile),
            temperature: TEMPERATURE,
        }
    }

    /// Persona directive plus the customer context block.
    pub fn system_instruction(&self, profile: &UserProfile) -> String {
        let p = &self.persona;
        format!(
            "You are the {assistant}.\n\
             Your goal is to provide helpful, secure, and accurate banking information to {brand} customers.\n\
             \n\
             User Context:\n\
             - Name: {name}\n\
             - Account Balance: {balance} {currency}\n\
             - Credit Score: {score}\n\
             - Status: {tier}\n\
             \n\
             Guidelines:\n\
             1. Tone: Professional, friendly, and efficient ({brand}'s \"{philosophy}\" philosophy).\n\
             2. Currency: Use {currency} for all financial references.\n\
             3. Products: Reference {brand} products like {products}.\n\
             4. Security: Never ask for passwords or OTPs.\n\
             5. Conciseness: Provide clear, short answers.",
            assistant = p.assistant_name,
            brand = p.brand,
            name = profile.name,
            balance = format_grouped(profile.balance, 0),
            currency = p.currency,
            score = profile.credit_score,
            tier = p.tier,
            philosophy = p.philosophy,
            products = p.product_list(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::sample_profile;
    use crate::gemini::GenerationResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<GenerationResponse> {
            Err(BankingError::AssistantProvider("connection reset".to_string()))
        }
    }

    struct FixedGenerator(Option<String>);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<GenerationResponse> {
            Ok(GenerationResponse {
                text: self.0.clone(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        requests: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(GenerationResponse {
                text: Some("Your balance is 245,850.5 AED.".to_string()),
            })
        }
    }

    fn bridge(generator: Arc<dyn TextGenerator>) -> AssistantBridge {
        AssistantBridge::new(generator, "gemini-3-flash-preview")
    }

    #[tokio::test]
    async fn test_provider_error_becomes_fallback() {
        let reply = bridge(Arc::new(FailingGenerator))
            .reply("What is my balance?", &sample_profile())
            .await;
        assert_eq!(reply, ERROR_FALLBACK);
    }

    #[tokio::test]
    async fn test_missing_text_becomes_empty_fallback() {
        let reply = bridge(Arc::new(FixedGenerator(None)))
            .reply("What is my balance?", &sample_profile())
            .await;
        assert_eq!(reply, EMPTY_RESPONSE_FALLBACK);

        let reply = bridge(Arc::new(FixedGenerator(Some(String::new()))))
            .reply("What is my balance?", &sample_profile())
            .await;
        assert_eq!(reply, EMPTY_RESPONSE_FALLBACK);
        assert_ne!(EMPTY_RESPONSE_FALLBACK, ERROR_FALLBACK);
    }

    #[tokio::test]
    async fn test_success_returns_text_verbatim() {
        let text = "  RAKrewards lets you earn points on every purchase.\n";
        let reply = bridge(Arc::new(FixedGenerator(Some(text.to_string()))))
            .reply("What is RAKrewards?", &sample_profile())
            .await;
        assert_eq!(reply, text);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let recorder = Arc::new(RecordingGenerator::default());
        let bridge = bridge(recorder.clone());

        bridge.reply("What is my balance?", &sample_profile()).await;

        let requests = recorder.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.model, "gemini-3-flash-preview");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, MessageRole::User);
        assert_eq!(request.contents[0].text, "What is my balance?");
    }

    #[test]
    fn test_system_instruction_context_block() {
        let bridge = bridge(Arc::new(FixedGenerator(None)));
        let instruction = bridge.system_instruction(&sample_profile());

        assert!(instruction.contains("- Name: ADAM SMITH"));
        assert!(instruction.contains("- Account Balance: 245,850.5 AED"));
        assert!(instruction.contains("- Credit Score: 785"));
        assert!(instruction.contains("- Status: Elite Client"));
        assert!(instruction.contains("Never ask for passwords or OTPs"));
        assert!(instruction.contains("RAKrewards, Red Account, and Titanium Cards"));
    }

    #[test]
    fn test_without_history_only_query_is_sent() {
        let bridge = bridge(Arc::new(FixedGenerator(None)));
        let request = bridge.build_request("And in USD?", &sample_profile(), &[]);

        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].text, "And in USD?");
    }

    #[test]
    fn test_history_precedes_query() {
        let bridge = bridge(Arc::new(FixedGenerator(None)));
        let history = vec![
            AssistantMessage::user("What is my balance?"),
            AssistantMessage::assistant("245,850.5 AED"),
        ];

        let request = bridge.build_request("And in USD?", &sample_profile(), &history);
        let roles: Vec<_> = request.contents.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(request.contents[0].text, "What is my balance?");
        assert_eq!(request.contents[2].text, "And in USD?");
    }

    #[tokio::test]
    async fn test_whitespace_reply_is_kept() {
        let reply = bridge(Arc::new(FixedGenerator(Some("  ".to_string()))))
            .reply("What is my balance?", &sample_profile())
            .await;
        assert_eq!(reply, "  ");
    }
}
