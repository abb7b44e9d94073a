//! Durable user profile

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::SavedPlan;

/// Walking budget between stops for a fresh profile
pub const DEFAULT_MAX_WALK_MINUTES: u32 = 20;

/// Preferences and saved itineraries, persisted across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub home_areas: Vec<String>,
    pub preferred_mediums: Vec<String>,
    pub preferred_vibes: Vec<String>,
    pub default_max_walk_minutes: u32,
    pub museum_memberships: Vec<String>,
    pub program_memberships: Vec<String>,
    pub saved_plans: Vec<SavedPlan>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            home_areas: Vec::new(),
            preferred_mediums: Vec::new(),
            preferred_vibes: Vec::new(),
            default_max_walk_minutes: DEFAULT_MAX_WALK_MINUTES,
            museum_memberships: Vec::new(),
            program_memberships: Vec::new(),
            saved_plans: Vec::new(),
        }
    }
}

impl UserProfile {
    /// Shallow-merge a patch; returns the names of the fields it replaced
    ///
    /// Lists are replaced whole, so a patch carrying `saved_plans` must carry
    /// every saved plan the user should keep.
    pub fn apply(&mut self, patch: ProfilePatch) -> Vec<&'static str> {
        debug!("UserProfile::apply: called");
        let mut applied = Vec::new();

        if let Some(v) = patch.home_areas {
            self.home_areas = v;
            applied.push("home_areas");
        }
        if let Some(v) = patch.preferred_mediums {
            self.preferred_mediums = v;
            applied.push("preferred_mediums");
        }
        if let Some(v) = patch.preferred_vibes {
            self.preferred_vibes = v;
            applied.push("preferred_vibes");
        }
        if let Some(v) = patch.default_max_walk_minutes {
            self.default_max_walk_minutes = v;
            applied.push("default_max_walk_minutes");
        }
        if let Some(v) = patch.museum_memberships {
            self.museum_memberships = v;
            applied.push("museum_memberships");
        }
        if let Some(v) = patch.program_memberships {
            self.program_memberships = v;
            applied.push("program_memberships");
        }
        if let Some(v) = patch.saved_plans {
            self.saved_plans = v;
            applied.push("saved_plans");
        }

        info!(?applied, "Applied profile patch");
        applied
    }
}

/// Partial profile from the advisor; `None` means "leave unchanged"
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_areas: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_mediums: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_vibes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_walk_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub museum_memberships: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_memberships: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_plans: Option<Vec<SavedPlan>>,
}
