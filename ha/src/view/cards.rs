//! Suggestion cards

use colored::Colorize;

use crate::domain::{ActivePlan, Gallery, GalleryStatus};

/// Label for the placeholder shown when a card has no image
pub fn placeholder_label(category: Option<&str>) -> &'static str {
    match category {
        Some("painting") => "Painting",
        Some("sculpture") => "Sculpture",
        Some("photo") => "Photo",
        Some("installation") => "Installation",
        Some("performance") => "Performance",
        Some("mixed") => "Mixed Media",
        _ => "Art",
    }
}

fn badge(status: GalleryStatus) -> String {
    let text = format!("[{}]", status.badge());
    match status {
        GalleryStatus::Active => text.green().to_string(),
        GalleryStatus::Inactive => text.dimmed().to_string(),
        GalleryStatus::Unknown => text.yellow().to_string(),
    }
}

/// Render one gallery card
pub fn render_card(gallery: &Gallery, selected: bool) -> String {
    let marker = if selected { "[✓]".bright_green() } else { "[+]".normal() };
    let mut lines = vec![format!(
        "{} {} {}  {}",
        marker,
        gallery.name.bold(),
        format!("({})", gallery.id).dimmed(),
        badge(gallery.status)
    )];

    if !gallery.neighborhood.is_empty() {
        lines.push(format!("    {}", gallery.neighborhood));
    }

    match gallery.featured() {
        Some(show) if gallery.shows_exhibition() => {
            lines.push(format!("    {}", show.title.italic()));
            if !show.dates.is_empty() {
                lines.push(format!("    {}", show.dates.dimmed()));
            }
            if !show.description.is_empty() {
                lines.push(format!("    {}", show.description));
            }
        }
        _ => lines.push(format!("    {}", "No confirmed active exhibition.".dimmed())),
    }

    match gallery.display_image() {
        Some(url) => lines.push(format!("    Image: {}", url)),
        None => lines.push(format!(
            "    {}",
            format!("[{}]", placeholder_label(gallery.placeholder_category())).dimmed()
        )),
    }

    let tags: Vec<&str> = gallery
        .vibes
        .iter()
        .chain(gallery.region_tags.iter())
        .map(String::as_str)
        .collect();
    if !tags.is_empty() {
        lines.push(format!("    {}", tags.join(" · ").dimmed()));
    }

    if let Some(reason) = gallery.reason.as_deref().filter(|r| !r.is_empty()) {
        lines.push(format!("    Why: {}", reason));
    }

    if let Some(link) = gallery.display_link() {
        lines.push(format!("    {}: {}", link.label(), link.url.cyan()));
    }

    lines.join("\n")
}

/// Render the suggestion set, or the empty state
pub fn render_suggestions(galleries: &[Gallery], plan: &ActivePlan) -> String {
    if galleries.is_empty() {
        return format!(
            "{}\n{}",
            "Ready to Explore?".bold(),
            "Tell HALFART where you'll be (e.g., \"Afternoon in Chelsea\") and I'll find the current shows for you."
                .dimmed()
        );
    }

    let mut cards = vec![format!("{}", format!("{} Suggestions", galleries.len()).bright_cyan())];
    cards.extend(galleries.iter().map(|g| render_card(g, plan.is_selected(&g.id))));
    cards.join("\n\n")
}
