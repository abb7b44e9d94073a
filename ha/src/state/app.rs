//! Application state and reconciliation
//!
//! `AppState` owns every store the views read from: the conversation, the
//! suggestion set, the active plan and the user profile. It also owns the
//! advisor session, created on first use.

use std::sync::Arc;

use eyre::Result;
use tracing::{debug, info, warn};

use super::persistence::ProfileStore;
use crate::advisor::{AdvisorReply, AdvisorSession, RECONCILE_ERROR, log_failure};
use crate::config::Config;
use crate::domain::{ActivePlan, ChatMessage, Conversation, Gallery, UserProfile};
use crate::llm::{LlmError, create_client};
use crate::prompts::PromptLoader;

/// Message sent when the user asks for a new route
pub const RECALC_PROMPT: &str = "Please analyze my selected galleries and recalculate the optimal route.";

/// Message sent when the user asks to save the plan
pub const SAVE_PROMPT: &str = "Save this plan to my profile.";

/// Builds the advisor session on first use
pub type SessionFactory = Box<dyn Fn() -> Result<AdvisorSession, LlmError> + Send + Sync>;

/// What a reconciliation changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileSummary {
    /// New suggestion count, if the set was replaced
    pub suggestions: Option<usize>,
    pub plan_fields: Vec<&'static str>,
    pub profile_fields: Vec<&'static str>,
    /// Payload sections dropped for having the wrong shape
    pub rejected: Vec<String>,
}

impl ReconcileSummary {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_none() && self.plan_fields.is_empty() && self.profile_fields.is_empty()
    }
}

/// Result of [`AppState::send_message`]
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Empty input, or a call already in flight
    Ignored,
    Applied(ReconcileSummary),
    /// Reconciliation failed; the error message was appended
    Failed,
}

pub struct AppState {
    conversation: Conversation,
    suggestions: Vec<Gallery>,
    plan: ActivePlan,
    profile: UserProfile,
    loading: bool,
    advisor: Option<AdvisorSession>,
    connect: SessionFactory,
    profile_store: Option<ProfileStore>,
}

impl AppState {
    /// Fresh state; the profile is read from `profile_store` once, here
    pub fn new(connect: SessionFactory, profile_store: Option<ProfileStore>) -> Self {
        debug!(has_store = profile_store.is_some(), "AppState::new: called");
        let profile = profile_store.as_ref().map(ProfileStore::load).unwrap_or_default();
        Self {
            conversation: Conversation::with_greeting(),
            suggestions: Vec::new(),
            plan: ActivePlan::default(),
            profile,
            loading: false,
            advisor: None,
            connect,
            profile_store,
        }
    }

    /// State wired to the configured provider and storage
    ///
    /// A store that cannot be opened is logged and the session runs with an
    /// in-memory profile.
    pub fn from_config(config: &Config, prompts: Arc<PromptLoader>) -> Self {
        debug!("AppState::from_config: called");
        let llm = config.llm.clone();
        let connect: SessionFactory = Box::new(move || {
            let client = create_client(&llm)?;
            Ok(AdvisorSession::from_config(client, prompts.clone(), &llm))
        });

        let profile_store = match ProfileStore::open(&config.storage.data_dir, config.storage.profile_key.clone()) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(error = %e, "Profile storage unavailable, profile will not persist");
                None
            }
        };

        Self::new(connect, profile_store)
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn suggestions(&self) -> &[Gallery] {
        &self.suggestions
    }

    pub fn plan(&self) -> &ActivePlan {
        &self.plan
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn profile_store(&self) -> Option<&ProfileStore> {
        self.profile_store.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Run one full round-trip for a user utterance
    ///
    /// The user message is appended before the call and stays even if
    /// reconciliation fails. The loading flag is cleared on every path.
    pub async fn send_message(&mut self, text: &str) -> SendOutcome {
        debug!(len = text.len(), loading = self.loading, "AppState::send_message: called");
        let text = text.trim();
        if text.is_empty() || self.loading {
            debug!("AppState::send_message: ignoring input");
            return SendOutcome::Ignored;
        }

        self.conversation.push(ChatMessage::user(text));
        self.loading = true;

        let reply = self.round_trip(text).await;
        let outcome = match self.reconcile(reply) {
            Ok(summary) => SendOutcome::Applied(summary),
            Err(e) => {
                warn!(error = %e, "Failed to apply advisor reply");
                self.conversation.push(ChatMessage::model(RECONCILE_ERROR));
                SendOutcome::Failed
            }
        };

        self.loading = false;
        outcome
    }

    async fn round_trip(&mut self, text: &str) -> AdvisorReply {
        debug!("AppState::round_trip: called");
        if self.advisor.is_none() {
            match (self.connect)() {
                Ok(session) => {
                    info!("Advisor session created");
                    self.advisor = Some(session);
                }
                Err(e) => log_failure(&e),
            }
        }

        match self.advisor.as_mut() {
            Some(advisor) => advisor.send(text, Some(&self.plan), Some(&self.profile)).await,
            None => AdvisorReply::apology(),
        }
    }

    /// Apply a completed round-trip to the stores
    pub fn reconcile(&mut self, reply: AdvisorReply) -> Result<ReconcileSummary> {
        debug!(has_payload = reply.payload.is_some(), "AppState::reconcile: called");
        self.conversation.push(ChatMessage::model(reply.text));

        let mut summary = ReconcileSummary::default();
        let Some(payload) = reply.payload else {
            return Ok(summary);
        };

        if let Some(galleries) = payload.galleries_to_show {
            info!(count = galleries.len(), "Replacing suggestions");
            summary.suggestions = Some(galleries.len());
            self.suggestions = galleries;
        }
        if let Some(patch) = payload.plan {
            summary.plan_fields = self.plan.apply(patch);
        }
        if let Some(patch) = payload.profile {
            summary.profile_fields = self.profile.apply(patch);
        }
        summary.rejected = payload.rejected;

        self.persist_profile()?;
        Ok(summary)
    }

    /// Flip a gallery in the selection; the route goes stale
    pub fn toggle_selection(&mut self, gallery_id: &str) -> bool {
        debug!(%gallery_id, "AppState::toggle_selection: called");
        self.plan.toggle_selection(gallery_id)
    }

    pub async fn recalculate_route(&mut self) -> SendOutcome {
        debug!("AppState::recalculate_route: called");
        self.send_message(RECALC_PROMPT).await
    }

    pub async fn save_plan(&mut self) -> SendOutcome {
        debug!("AppState::save_plan: called");
        self.send_message(SAVE_PROMPT).await
    }

    /// Back to the default profile, persisted
    pub fn reset_profile(&mut self) -> Result<()> {
        debug!("AppState::reset_profile: called");
        self.profile = UserProfile::default();
        self.persist_profile()
    }

    fn persist_profile(&self) -> Result<()> {
        match &self.profile_store {
            Some(store) => store.save(&self.profile),
            None => {
                debug!("AppState::persist_profile: no store");
                Ok(())
            }
        }
    }
}
