//! Profile panel

use colored::Colorize;

use crate::domain::UserProfile;

fn list_line(label: &str, items: &[String]) -> String {
    let value = if items.is_empty() {
        "none saved".italic().dimmed().to_string()
    } else {
        items.join(", ")
    };
    format!("{:20} {}", label.bold(), value)
}

pub fn render_profile(profile: &UserProfile) -> String {
    let mut lines = vec![
        "Your Profile".bright_cyan().bold().to_string(),
        list_line("Home Areas", &profile.home_areas),
        list_line("Preferred Mediums", &profile.preferred_mediums),
        list_line("Vibes", &profile.preferred_vibes),
        list_line("Museum Memberships", &profile.museum_memberships),
        list_line("Program Memberships", &profile.program_memberships),
        format!(
            "{:20} {} minutes between stops",
            "Max Walk".bold(),
            profile.default_max_walk_minutes
        ),
        String::new(),
        "Saved Plans".bright_cyan().bold().to_string(),
    ];

    if profile.saved_plans.is_empty() {
        lines.push(
            "No saved plans yet. Build a route and ask HALFART to save it."
                .italic()
                .dimmed()
                .to_string(),
        );
        return lines.join("\n");
    }

    for plan in &profile.saved_plans {
        let title = if plan.title.is_empty() { "Untitled Plan" } else { plan.title.as_str() };
        lines.push(format!("• {} ({} stops)", title.bold(), plan.route.len()));
        let subtitle: Vec<&str> = [plan.date_label.as_deref(), plan.area_description.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !subtitle.is_empty() {
            lines.push(format!("  {}", subtitle.join(" • ").dimmed()));
        }
        if let Some(notes) = &plan.notes {
            lines.push(format!("  {}", format!("\"{}\"", notes).italic()));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteStop, SavedPlan};

    #[test]
    fn test_default_profile() {
        let out = render_profile(&UserProfile::default());
        assert_eq!(out.matches("none saved").count(), 5);
        assert!(out.contains("20 minutes between stops"));
        assert!(out.contains("No saved plans yet. Build a route and ask HALFART to save it."));
    }

    #[test]
    fn test_filled_profile() {
        let profile = UserProfile {
            home_areas: vec!["Chelsea".to_string(), "LES".to_string()],
            default_max_walk_minutes: 12,
            saved_plans: vec![SavedPlan {
                id: "p1".to_string(),
                title: "Saturday Loop".to_string(),
                date_label: Some("Sat".to_string()),
                area_description: Some("Chelsea".to_string()),
                route: vec![RouteStop::default(), RouteStop::default()],
                notes: Some("Bring water".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let out = render_profile(&profile);
        assert!(out.contains("Chelsea, LES"));
        assert!(out.contains("12 minutes between stops"));
        assert!(out.contains("Saturday Loop"));
        assert!(out.contains("(2 stops)"));
        assert!(out.contains("Sat • Chelsea"));
        assert!(out.contains("Bring water"));
        assert!(!out.contains("No saved plans yet"));
    }
}
