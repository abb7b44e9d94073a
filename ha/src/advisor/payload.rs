//! Structured payload extraction
//!
//! The advisor ends its reply with one fenced ```json block. Everything
//! before it is prose for the user; the block drives state updates.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Gallery, PlanPatch, ProfilePatch};

const JSON_FENCE_PATTERN: &str = r"```json([\s\S]*?)```";

/// First ```json fence, lazily matched up to the next closing fence
static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(JSON_FENCE_PATTERN).expect("JSON_FENCE_PATTERN is a valid regex"));

/// Why a fenced block produced no payload
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Invalid JSON in fenced block: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fenced block is not a JSON object")]
    NotAnObject,
}

/// Structured half of an advisor reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisorPayload {
    /// Replacement suggestion set; `Some(vec![])` still clears suggestions
    pub galleries_to_show: Option<Vec<Gallery>>,
    pub plan: Option<PlanPatch>,
    pub profile: Option<ProfilePatch>,
    /// Sections present but dropped for having the wrong shape
    pub rejected: Vec<String>,
}

/// Text to show plus the optional payload
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorReply {
    pub text: String,
    pub payload: Option<AdvisorPayload>,
}

impl AdvisorReply {
    /// Reply used when the advisor could not be reached
    pub fn apology() -> Self {
        Self {
            text: super::APOLOGY.to_string(),
            payload: None,
        }
    }
}

/// Split a raw model reply into display text and payload
///
/// With a valid block, the text is the reply minus the block, trimmed. A
/// missing or invalid block leaves the reply exactly as received.
pub fn parse_reply(raw: &str) -> AdvisorReply {
    debug!(len = raw.len(), "parse_reply: called");
    let Some(caps) = JSON_FENCE.captures(raw) else {
        debug!("parse_reply: no json block");
        return AdvisorReply {
            text: raw.to_string(),
            payload: None,
        };
    };

    let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
        return AdvisorReply {
            text: raw.to_string(),
            payload: None,
        };
    };

    match decode_payload(body.as_str()) {
        Ok(payload) => {
            let text = raw.replacen(whole.as_str(), "", 1).trim().to_string();
            AdvisorReply {
                text,
                payload: Some(payload),
            }
        }
        Err(e) => {
            warn!(error = %e, "Failed to parse advisor payload, showing raw reply");
            AdvisorReply {
                text: raw.to_string(),
                payload: None,
            }
        }
    }
}

/// Decode the body of a fenced block
///
/// Each top-level section decodes on its own, so one malformed section does
/// not take the others down with it.
pub fn decode_payload(body: &str) -> Result<AdvisorPayload, PayloadError> {
    debug!("decode_payload: called");
    let value: Value = serde_json::from_str(body.trim())?;
    let Value::Object(mut map) = value else {
        return Err(PayloadError::NotAnObject);
    };

    let mut payload = AdvisorPayload::default();
    payload.galleries_to_show = section(&mut map, "galleries_to_show", &mut payload.rejected);
    payload.plan = section(&mut map, "plan", &mut payload.rejected);
    payload.profile = section(&mut map, "profile", &mut payload.rejected);
    Ok(payload)
}

fn section<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str, rejected: &mut Vec<String>) -> Option<T> {
    match map.remove(key) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(section = %key, error = %e, "Dropping malformed payload section");
                rejected.push(key.to_string());
                None
            }
        },
    }
}
