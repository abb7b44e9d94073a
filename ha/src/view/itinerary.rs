//! Itinerary timeline

use colored::Colorize;

use crate::domain::{ActivePlan, RouteStop, StopKind};

const EMPTY_TIME: &str = "--:--";

/// Walk marker between two stops, from the later stop's walk minutes
pub fn walk_marker(next: &RouteStop) -> Option<String> {
    next.walk_minutes_from_previous.map(|m| match m {
        0 => "Walk".to_string(),
        m => format!("{}m walk", m),
    })
}

fn render_stop(stop: &RouteStop) -> Vec<String> {
    let node = match stop.kind {
        StopKind::Gallery => "●".normal(),
        StopKind::Custom => "◆".yellow(),
    };
    let times = format!(
        "{} – {}",
        stop.eta.as_deref().unwrap_or(EMPTY_TIME),
        stop.etd.as_deref().unwrap_or(EMPTY_TIME)
    );

    let mut lines = vec![format!("{} {}  {}", node, stop.display_label().bold(), times.dimmed())];
    if let Some(neighborhood) = &stop.neighborhood {
        lines.push(format!("│   {}", neighborhood.to_uppercase().dimmed()));
    }
    if let Some(description) = &stop.description {
        lines.push(format!("│   {}", description));
    }
    lines
}

/// Render the active plan as a timeline
pub fn render_itinerary(plan: &ActivePlan) -> String {
    if plan.selected_gallery_ids.is_empty() && plan.route.is_empty() {
        return format!(
            "{}\n{}",
            "Your plan is empty".bold(),
            "Use /suggest and /toggle <id> to add galleries, or ask HALFART to \"Add a coffee stop at 2pm\".".dimmed()
        );
    }

    let window = &plan.time_window;
    let header = format!(
        "{} • {} - {}",
        plan.date_label.as_deref().unwrap_or("Today"),
        if window.start.is_empty() { "12:00" } else { window.start.as_str() },
        if window.end.is_empty() { "18:00" } else { window.end.as_str() },
    );
    let mut lines = vec![
        header.dimmed().to_string(),
        plan.area_description
            .as_deref()
            .unwrap_or("Custom Route")
            .bright_cyan()
            .bold()
            .to_string(),
        format!("{} Stops • {} Galleries", plan.route.len(), plan.selected_gallery_ids.len()),
    ];
    if let Some(lunch) = &plan.lunch_location {
        lines.push(format!("Lunch: {}", lunch));
    }
    if plan.route_stale {
        lines.push(
            "Selection changed since this route was built. Use /recalc for a new route."
                .yellow()
                .to_string(),
        );
    }
    lines.push(String::new());

    for (i, stop) in plan.route.iter().enumerate() {
        lines.extend(render_stop(stop));
        if let Some(next) = plan.route.get(i + 1) {
            match walk_marker(next) {
                Some(marker) => lines.push(format!("│ {}", marker.dimmed())),
                None => lines.push("│".to_string()),
            }
        }
    }
    if !plan.route.is_empty() {
        lines.push(format!("○ {}", "End of route".dimmed()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeWindow;

    fn stop(label: &str, walk: Option<u32>) -> RouteStop {
        RouteStop {
            id: label.to_lowercase(),
            kind: StopKind::Gallery,
            label: Some(label.to_string()),
            walk_minutes_from_previous: walk,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_plan() {
        let out = render_itinerary(&ActivePlan::default());
        assert!(out.contains("Your plan is empty"));
        assert!(out.contains("Add a coffee stop at 2pm"));
        assert!(out.contains("/suggest"));
        assert!(!out.contains("mode"));
        assert!(!out.contains("Stops"));
    }

    #[test]
    fn test_header_and_counts() {
        let plan = ActivePlan {
            area_description: Some("Chelsea Run".to_string()),
            time_window: TimeWindow::new("13:00", "17:30"),
            selected_gallery_ids: vec!["g1".to_string(), "g2".to_string()],
            route: vec![stop("One", None), stop("Two", Some(6)), stop("Coffee", None)],
            ..Default::default()
        };

        let out = render_itinerary(&plan);
        assert!(out.contains("Today • 13:00 - 17:30"));
        assert!(out.contains("Chelsea Run"));
        assert!(out.contains("3 Stops • 2 Galleries"));
        assert!(out.contains("--:-- – --:--"));
        assert!(out.contains("End of route"));
        assert!(!out.contains("/recalc"));
    }

    #[test]
    fn test_walk_markers() {
        assert_eq!(walk_marker(&stop("A", Some(8))).as_deref(), Some("8m walk"));
        assert_eq!(walk_marker(&stop("A", Some(0))).as_deref(), Some("Walk"));
        assert!(walk_marker(&stop("A", None)).is_none());

        let plan = ActivePlan {
            route: vec![stop("One", Some(99)), stop("Two", Some(7)), stop("Three", Some(0))],
            ..Default::default()
        };
        let out = render_itinerary(&plan);
        assert!(out.contains("7m walk"));
        assert!(out.contains("Walk"));
        // The first stop's value has no gap to sit in
        assert!(!out.contains("99m walk"));
    }

    #[test]
    fn test_selection_without_route_is_stale() {
        let mut plan = ActivePlan::default();
        plan.toggle_selection("g1");

        let out = render_itinerary(&plan);
        assert!(out.contains("0 Stops • 1 Galleries"));
        assert!(out.contains("/recalc"));
        assert!(!out.contains("End of route"));
    }
}
