//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::domain::{ActivePlan, UserProfile};

/// Plan fields the advisor sees on every turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    /// Comma-separated selected gallery ids
    pub selected_ids: String,
    pub start: String,
    pub end: String,
    pub route_stops: usize,
}

/// Profile fields the advisor sees on every turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub home_areas: String,
    pub mediums: String,
    pub saved_plans: usize,
}

/// Context for rendering the `context` template
///
/// Counts and short lists only; the nested structures stay local.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextSummary {
    pub plan: Option<PlanSummary>,
    pub profile: Option<ProfileSummary>,
}

impl ContextSummary {
    pub fn new(plan: Option<&ActivePlan>, profile: Option<&UserProfile>) -> Self {
        debug!(has_plan = plan.is_some(), has_profile = profile.is_some(), "ContextSummary::new: called");
        Self {
            plan: plan.map(|p| PlanSummary {
                selected_ids: p.selected_gallery_ids.join(", "),
                start: p.time_window.start.clone(),
                end: p.time_window.end.clone(),
                route_stops: p.route.len(),
            }),
            profile: profile.map(|p| ProfileSummary {
                home_areas: p.home_areas.join(", "),
                mediums: p.preferred_mediums.join(", "),
                saved_plans: p.saved_plans.len(),
            }),
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Project override directory (`.halfart/prompts/`)
    project_dir: Option<PathBuf>,
    /// User override directory (`~/.config/halfart/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given working directory
    pub fn new(worktree: impl AsRef<Path>) -> Self {
        let worktree = worktree.as_ref();
        debug!(?worktree, "PromptLoader::new: called");
        let project_dir = worktree.join(".halfart").join("prompts");
        let user_dir = dirs::config_dir().map(|d| d.join("halfart").join("prompts"));

        Self::with_dirs(
            Some(project_dir).filter(|d| d.exists()),
            user_dir.filter(|d| d.exists()),
        )
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self::with_dirs(None, None)
    }

    fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        debug!(?project_dir, ?user_dir, "PromptLoader::with_dirs: called");
        let mut hbs = Handlebars::new();
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(handlebars::no_escape);
        Self {
            hbs,
            project_dir,
            user_dir,
        }
    }

    /// Load a template by name, first override wins
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in [&self.project_dir, &self.user_dir].into_iter().flatten() {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Fixed behavioral instruction for a new advisor session
    pub fn system_instruction(&self) -> Result<String> {
        debug!("PromptLoader::system_instruction: called");
        self.load_template("advisor")
    }

    /// Render the context block appended to a user turn
    ///
    /// The result starts with a newline so it can be concatenated directly
    /// onto the utterance. Blank template lines are dropped.
    pub fn render_context(&self, summary: &ContextSummary) -> Result<String> {
        debug!("PromptLoader::render_context: called");
        let template = self.load_template("context")?;
        let rendered = self
            .hbs
            .render_template(&template, summary)
            .map_err(|e| eyre!("Failed to render template context: {}", e))?;

        let mut block = String::from("\n");
        for line in rendered.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            block.push_str(line);
            block.push('\n');
        }
        Ok(block)
    }
}
