//! Active plan, route stops and saved plans
//!
//! The active plan is mutated two ways: a local toggle of a gallery id in the
//! selection, and a shallow overwrite from a [`PlanPatch`] the advisor sends.
//! A patch never deep-merges: a present field replaces the old value whole.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use super::lenient;

/// Start and end of the outing, free-text times like "12:00"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Kind of stop on a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Gallery,
    #[default]
    Custom,
}

impl StopKind {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "gallery" => StopKind::Gallery,
            _ => StopKind::Custom,
        }
    }
}

impl<'de> Deserialize<'de> for StopKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(StopKind::parse).unwrap_or_default())
    }
}

/// One stop in an itinerary; order is the position in the route
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteStop {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: StopKind,

    /// Linked gallery; expected to be in the selection but never checked
    #[serde(default, deserialize_with = "lenient::opt_id", skip_serializing_if = "Option::is_none")]
    pub gallery_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,

    /// Arrival time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,

    /// Departure time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etd: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_minutes", skip_serializing_if = "Option::is_none")]
    pub walk_minutes_from_previous: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RouteStop {
    /// Label to display, falling back to the linked gallery id
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .or(self.gallery_id.as_deref())
            .unwrap_or("Stop")
    }
}

/// The in-progress itinerary for this session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_location: Option<String>,

    #[serde(default)]
    pub time_window: TimeWindow,

    /// Membership-tested set of gallery ids, kept as a list
    #[serde(default)]
    pub selected_gallery_ids: Vec<String>,

    #[serde(default)]
    pub route: Vec<RouteStop>,

    /// Selection changed since the route was last computed
    #[serde(skip)]
    pub route_stale: bool,
}

impl Default for ActivePlan {
    fn default() -> Self {
        Self {
            date_label: Some("Today".to_string()),
            area_description: Some("My Gallery Tour".to_string()),
            lunch_location: None,
            time_window: TimeWindow::new("12:00", "18:00"),
            selected_gallery_ids: Vec::new(),
            route: Vec::new(),
            route_stale: false,
        }
    }
}

impl ActivePlan {
    pub fn is_selected(&self, gallery_id: &str) -> bool {
        self.selected_gallery_ids.iter().any(|id| id == gallery_id)
    }

    /// Flip a gallery's membership in the selection
    ///
    /// Returns true if the gallery is now selected. The route is left as-is
    /// and flagged stale until the advisor sends a new one.
    pub fn toggle_selection(&mut self, gallery_id: &str) -> bool {
        debug!(%gallery_id, "ActivePlan::toggle_selection: called");
        let selected = if self.is_selected(gallery_id) {
            debug!("ActivePlan::toggle_selection: removing");
            self.selected_gallery_ids.retain(|id| id != gallery_id);
            false
        } else {
            debug!("ActivePlan::toggle_selection: adding");
            self.selected_gallery_ids.push(gallery_id.to_string());
            true
        };
        self.route_stale = true;
        selected
    }

    /// Shallow-merge a patch; returns the names of the fields it replaced
    pub fn apply(&mut self, patch: PlanPatch) -> Vec<&'static str> {
        debug!("ActivePlan::apply: called");
        let mut applied = Vec::new();

        if let Some(date_label) = patch.date_label {
            self.date_label = Some(date_label);
            applied.push("date_label");
        }
        if let Some(area_description) = patch.area_description {
            self.area_description = Some(area_description);
            applied.push("area_description");
        }
        if let Some(lunch_location) = patch.lunch_location {
            self.lunch_location = Some(lunch_location);
            applied.push("lunch_location");
        }
        if let Some(time_window) = patch.time_window {
            self.time_window = time_window;
            applied.push("time_window");
        }
        if let Some(ids) = patch.selected_gallery_ids {
            self.selected_gallery_ids = ids;
            applied.push("selected_gallery_ids");
        }
        if let Some(route) = patch.route {
            self.route = route;
            self.route_stale = false;
            applied.push("route");
        }

        info!(?applied, "Applied plan patch");
        applied
    }
}

/// Partial plan from the advisor; `None` means "leave unchanged"
///
/// A JSON `null` is treated the same as an absent key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,

    #[serde(default, deserialize_with = "lenient::opt_id_list", skip_serializing_if = "Option::is_none")]
    pub selected_gallery_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<RouteStop>>,
}

impl PlanPatch {
    pub fn is_empty(&self) -> bool {
        self == &PlanPatch::default()
    }
}

/// A named snapshot of a past plan, kept in the profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedPlan {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::null_default")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,

    #[serde(default, deserialize_with = "lenient::null_default")]
    pub route: Vec<RouteStop>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stop(id: &str) -> RouteStop {
        RouteStop {
            id: id.to_string(),
            kind: StopKind::Gallery,
            gallery_id: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_plan() {
        let plan = ActivePlan::default();
        assert_eq!(plan.date_label.as_deref(), Some("Today"));
        assert_eq!(plan.area_description.as_deref(), Some("My Gallery Tour"));
        assert_eq!(plan.time_window, TimeWindow::new("12:00", "18:00"));
        assert!(plan.selected_gallery_ids.is_empty());
        assert!(plan.route.is_empty());
        assert!(!plan.route_stale);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut plan = ActivePlan::default();
        plan.route = vec![stop("a")];

        assert!(plan.toggle_selection("g1"));
        assert_eq!(plan.selected_gallery_ids, vec!["g1".to_string()]);
        assert_eq!(plan.route, vec![stop("a")]);
        assert!(plan.route_stale);

        assert!(!plan.toggle_selection("g1"));
        assert!(plan.selected_gallery_ids.is_empty());
        assert_eq!(plan.route, vec![stop("a")]);
    }

    #[test]
    fn test_toggle_appends_at_end() {
        let mut plan = ActivePlan::default();
        plan.toggle_selection("a");
        plan.toggle_selection("b");
        plan.toggle_selection("c");
        plan.toggle_selection("b");
        assert_eq!(plan.selected_gallery_ids, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_patch_preserves_absent_fields() {
        let mut plan = ActivePlan {
            time_window: TimeWindow::new("13:00", "17:30"),
            ..Default::default()
        };

        let patch: PlanPatch = serde_json::from_value(json!({"area_description": "X"})).unwrap();
        let applied = plan.apply(patch);

        assert_eq!(applied, vec!["area_description"]);
        assert_eq!(plan.area_description.as_deref(), Some("X"));
        assert_eq!(plan.time_window, TimeWindow::new("13:00", "17:30"));
        assert_eq!(plan.date_label.as_deref(), Some("Today"));
    }

    #[test]
    fn test_patch_replaces_route_wholesale() {
        let mut plan = ActivePlan::default();
        plan.route = vec![stop("a"), stop("b")];
        plan.toggle_selection("c");
        assert!(plan.route_stale);

        let patch: PlanPatch = serde_json::from_value(json!({
            "route": [{"id": "s1", "type": "custom", "label": "Coffee at Canal St"}]
        }))
        .unwrap();
        plan.apply(patch);

        assert_eq!(plan.route.len(), 1);
        assert_eq!(plan.route[0].kind, StopKind::Custom);
        assert_eq!(plan.route[0].display_label(), "Coffee at Canal St");
        assert!(!plan.route_stale);
    }

    #[test]
    fn test_patch_without_route_keeps_staleness() {
        let mut plan = ActivePlan::default();
        plan.toggle_selection("c");

        plan.apply(PlanPatch {
            lunch_location: Some("Cafe".to_string()),
            ..Default::default()
        });
        assert!(plan.route_stale);
    }

    #[test]
    fn test_null_fields_leave_plan_untouched() {
        let mut plan = ActivePlan::default();
        let patch: PlanPatch = serde_json::from_value(json!({"date_label": null, "route": null})).unwrap();
        assert!(patch.is_empty());
        assert!(plan.apply(patch).is_empty());
        assert_eq!(plan, ActivePlan::default());
    }

    #[test]
    fn test_unknown_stop_type_is_custom() {
        let s: RouteStop = serde_json::from_value(json!({"id": "x", "type": "lunch"})).unwrap();
        assert_eq!(s.kind, StopKind::Custom);
        assert_eq!(s.display_label(), "Stop");
    }
}
