//! Advisor session
//!
//! One session per app run. It holds the fixed system instruction and the
//! transcript of completed turns, and turns each utterance into a
//! [`CompletionRequest`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::payload::{AdvisorReply, parse_reply};
use crate::config::LlmConfig;
use crate::domain::{ActivePlan, UserProfile};
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};
use crate::prompts::{ContextSummary, PromptLoader, embedded};

/// Stateful conversation with the remote advisor
pub struct AdvisorSession {
    client: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    system_instruction: String,
    /// Completed turns, oldest first
    transcript: Vec<Message>,
    max_tokens: u32,
    web_search: bool,
}

impl AdvisorSession {
    pub fn new(client: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, max_tokens: u32, web_search: bool) -> Self {
        debug!(model = %client.model(), %max_tokens, %web_search, "AdvisorSession::new: called");
        let system_instruction = prompts.system_instruction().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load advisor prompt, using embedded default");
            embedded::ADVISOR.to_string()
        });
        Self {
            client,
            prompts,
            system_instruction,
            transcript: Vec::new(),
            max_tokens,
            web_search,
        }
    }

    /// Session using the request settings from config
    pub fn from_config(client: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, config: &LlmConfig) -> Self {
        Self::new(client, prompts, config.max_tokens, config.web_search)
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Number of completed turns (user + model)
    pub fn turns(&self) -> usize {
        self.transcript.len()
    }

    /// Build the outgoing text: the utterance plus the context block
    pub fn compose(&self, utterance: &str, plan: Option<&ActivePlan>, profile: Option<&UserProfile>) -> String {
        debug!("AdvisorSession::compose: called");
        match self.prompts.render_context(&ContextSummary::new(plan, profile)) {
            Ok(block) => format!("{}{}", utterance, block),
            Err(e) => {
                warn!(error = %e, "Failed to render context block, sending utterance alone");
                utterance.to_string()
            }
        }
    }

    /// Send one utterance and parse the reply
    ///
    /// Transport failures never escape: they are logged and turned into the
    /// apology reply. The transcript only grows on success.
    pub async fn send(
        &mut self,
        utterance: &str,
        plan: Option<&ActivePlan>,
        profile: Option<&UserProfile>,
    ) -> AdvisorReply {
        debug!(len = utterance.len(), turns = self.transcript.len(), "AdvisorSession::send: called");
        let outgoing = Message::user(self.compose(utterance, plan, profile));

        let mut messages = self.transcript.clone();
        messages.push(outgoing.clone());
        let request = CompletionRequest {
            system_prompt: self.system_instruction.clone(),
            messages,
            max_tokens: self.max_tokens,
            web_search: self.web_search,
        };

        match self.client.complete(request).await {
            Ok(response) => {
                let raw = response.content.unwrap_or_default();
                info!(
                    finish_reason = ?response.finish_reason,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "Advisor replied"
                );
                self.transcript.push(outgoing);
                self.transcript.push(Message::model(raw.clone()));
                parse_reply(&raw)
            }
            Err(e) => {
                log_failure(&e);
                AdvisorReply::apology()
            }
        }
    }
}

pub(crate) fn log_failure(e: &LlmError) {
    warn!(error = %e, retryable = e.is_retryable(), "Advisor call failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::APOLOGY;
    use crate::domain::TimeWindow;
    use crate::llm::Role;
    use crate::llm::client::mock::MockLlmClient;

    fn session(client: Arc<MockLlmClient>) -> AdvisorSession {
        AdvisorSession::new(client, Arc::new(PromptLoader::embedded_only()), 1024, true)
    }

    #[tokio::test]
    async fn test_send_appends_context_block() {
        let client = Arc::new(MockLlmClient::replying(&["Hi"]));
        let mut advisor = session(client.clone());

        let plan = ActivePlan {
            selected_gallery_ids: vec!["g1".to_string()],
            time_window: TimeWindow::new("12:00", "18:00"),
            ..Default::default()
        };
        let reply = advisor.send("Chelsea please", Some(&plan), None).await;
        assert_eq!(reply.text, "Hi");
        assert!(reply.payload.is_none());

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0].messages[0].text;
        assert!(sent.starts_with("Chelsea please\n[SYSTEM DATA CONTEXT]"));
        assert!(sent.contains("Current Plan IDs: g1"));
        assert!(!sent.contains("User Home Areas"));
        assert!(requests[0].web_search);
        assert_eq!(requests[0].max_tokens, 1024);
        assert!(requests[0].system_prompt.contains("HALFART"));
    }

    #[tokio::test]
    async fn test_transcript_carries_history() {
        let client = Arc::new(MockLlmClient::replying(&["First", "Second"]));
        let mut advisor = session(client.clone());

        advisor.send("one", None, None).await;
        advisor.send("two", None, None).await;
        assert_eq!(advisor.turns(), 4);

        let requests = client.requests();
        let second = &requests[1].messages;
        assert_eq!(second.len(), 3);
        assert_eq!(second[0].role, Role::User);
        assert_eq!(second[1].role, Role::Model);
        assert_eq!(second[1].text, "First");
        assert!(second[2].text.starts_with("two"));
    }

    #[tokio::test]
    async fn test_failure_returns_apology() {
        let client = Arc::new(MockLlmClient::new(vec![Err(LlmError::ApiError {
            status: 500,
            message: "boom".to_string(),
        })]));
        let mut advisor = session(client.clone());

        let reply = advisor.send("hello", None, None).await;
        assert_eq!(reply.text, APOLOGY);
        assert!(reply.payload.is_none());
        assert_eq!(advisor.turns(), 0);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_reply_payload_is_parsed() {
        let client = Arc::new(MockLlmClient::replying(&[
            "Try these.\n```json\n{\"plan\": {\"area_description\": \"Chelsea Run\"}}\n```",
        ]));
        let mut advisor = session(client);

        let reply = advisor.send("go", None, None).await;
        assert_eq!(reply.text, "Try these.");
        let plan = reply.payload.unwrap().plan.unwrap();
        assert_eq!(plan.area_description.as_deref(), Some("Chelsea Run"));
    }
}
