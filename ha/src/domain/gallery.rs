//! Gallery suggestions and their exhibitions
//!
//! These arrive from the advisor as loosely-shaped JSON, so every field
//! except `id` and `name` falls back to a default when missing.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::lenient;

/// Whether a gallery is currently showing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryStatus {
    Active,
    Inactive,
    #[default]
    Unknown,
}

impl GalleryStatus {
    /// Parse a status string; anything unrecognized is `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => GalleryStatus::Active,
            "inactive" => GalleryStatus::Inactive,
            _ => GalleryStatus::Unknown,
        }
    }

    /// Badge text shown on a suggestion card
    pub fn badge(&self) -> &'static str {
        match self {
            GalleryStatus::Active => "On View",
            GalleryStatus::Inactive => "Closed",
            GalleryStatus::Unknown => "Unknown",
        }
    }
}

impl<'de> Deserialize<'de> for GalleryStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(GalleryStatus::parse).unwrap_or_default())
    }
}

/// What an exhibition's `url` points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Exhibition,
    Gallery,
    Other,
}

impl LinkType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhibition" => LinkType::Exhibition,
            "gallery" => LinkType::Gallery,
            _ => LinkType::Other,
        }
    }
}

impl<'de> Deserialize<'de> for LinkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LinkType::parse(&raw))
    }
}

/// A show at a gallery
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Exhibition {
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub title: String,

    /// Free-text date range, e.g. "Sep 12 – Oct 26"
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub dates: String,

    #[serde(default, deserialize_with = "lenient::null_default")]
    pub description: String,

    /// Exhibition hero image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Where the information came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Link to the exhibition page itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhibition_url: Option<String>,

    /// Generic link, classified by `link_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_category: Option<String>,
}

/// A candidate gallery returned by the advisor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub name: String,

    #[serde(default, deserialize_with = "lenient::null_default")]
    pub neighborhood: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    #[serde(default)]
    pub status: GalleryStatus,

    #[serde(default, deserialize_with = "lenient::null_default")]
    pub has_active_exhibition: bool,

    /// In practice zero or one entries; the first is the featured show
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub exhibitions: Vec<Exhibition>,

    #[serde(default, deserialize_with = "lenient::null_default")]
    pub vibes: Vec<String>,

    #[serde(default, deserialize_with = "lenient::null_default")]
    pub mediums: Vec<String>,

    #[serde(default, deserialize_with = "lenient::null_default")]
    pub region_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Fallback image when the exhibition has none
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_plan: Option<bool>,

    /// Why the advisor picked this gallery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A resolved outbound link for a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryLink {
    pub url: String,
    /// True when the link goes to the specific exhibition page
    pub is_exhibition: bool,
}

impl GalleryLink {
    pub fn label(&self) -> &'static str {
        if self.is_exhibition { "View Exhibition" } else { "Visit Website" }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Gallery {
    /// The featured exhibition, if any
    pub fn featured(&self) -> Option<&Exhibition> {
        self.exhibitions.first()
    }

    /// Image to show: exhibition image first, then the gallery fallback
    pub fn display_image(&self) -> Option<&str> {
        debug!(id = %self.id, "Gallery::display_image: called");
        self.featured()
            .and_then(|e| non_empty(&e.image_url))
            .or_else(|| non_empty(&self.image_url))
    }

    /// Category used for the placeholder graphic when there is no image
    pub fn placeholder_category(&self) -> Option<&str> {
        self.featured()
            .and_then(|e| non_empty(&e.placeholder_category))
            .or_else(|| non_empty(&self.placeholder_category))
    }

    /// Outbound link: exhibition page, then exhibition url, then gallery url
    pub fn display_link(&self) -> Option<GalleryLink> {
        debug!(id = %self.id, "Gallery::display_link: called");
        let featured = self.featured();

        if let Some(url) = featured.and_then(|e| non_empty(&e.exhibition_url)) {
            debug!("Gallery::display_link: exhibition_url");
            return Some(GalleryLink {
                url: url.to_string(),
                is_exhibition: true,
            });
        }

        if let Some(exhibition) = featured
            && let Some(url) = non_empty(&exhibition.url)
        {
            debug!(link_type = ?exhibition.link_type, "Gallery::display_link: exhibition url");
            return Some(GalleryLink {
                url: url.to_string(),
                is_exhibition: exhibition.link_type == Some(LinkType::Exhibition),
            });
        }

        non_empty(&self.url).map(|url| GalleryLink {
            url: url.to_string(),
            is_exhibition: false,
        })
    }

    /// True when the card should show exhibition details
    pub fn shows_exhibition(&self) -> bool {
        self.has_active_exhibition && self.featured().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gallery(value: serde_json::Value) -> Gallery {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_gallery_uses_defaults() {
        let g = gallery(json!({"id": "g1", "name": "Gagosian"}));
        assert_eq!(g.status, GalleryStatus::Unknown);
        assert!(!g.has_active_exhibition);
        assert!(g.exhibitions.is_empty());
        assert!(g.vibes.is_empty());
    }

    #[test]
    fn test_status_parsing_is_lenient() {
        let g = gallery(json!({"id": "g1", "name": "X", "status": "ACTIVE"}));
        assert_eq!(g.status, GalleryStatus::Active);

        let g = gallery(json!({"id": "g1", "name": "X", "status": "temporarily closed"}));
        assert_eq!(g.status, GalleryStatus::Unknown);

        let g = gallery(json!({"id": "g1", "name": "X", "status": null}));
        assert_eq!(g.status, GalleryStatus::Unknown);
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(GalleryStatus::Active.badge(), "On View");
        assert_eq!(GalleryStatus::Inactive.badge(), "Closed");
        assert_eq!(GalleryStatus::Unknown.badge(), "Unknown");
    }

    #[test]
    fn test_image_url_alias() {
        let g = gallery(json!({"id": "g1", "name": "X", "imageUrl": "https://img/g.jpg"}));
        assert_eq!(g.image_url.as_deref(), Some("https://img/g.jpg"));
    }

    #[test]
    fn test_display_image_prefers_exhibition() {
        let g = gallery(json!({
            "id": "g1", "name": "X",
            "image_url": "https://img/gallery.jpg",
            "exhibitions": [{"title": "Show", "image_url": "https://img/show.jpg"}]
        }));
        assert_eq!(g.display_image(), Some("https://img/show.jpg"));

        let g = gallery(json!({
            "id": "g1", "name": "X",
            "image_url": "https://img/gallery.jpg",
            "exhibitions": [{"title": "Show", "image_url": ""}]
        }));
        assert_eq!(g.display_image(), Some("https://img/gallery.jpg"));

        let g = gallery(json!({"id": "g1", "name": "X"}));
        assert_eq!(g.display_image(), None);
    }

    #[test]
    fn test_display_link_priority() {
        let g = gallery(json!({
            "id": "g1", "name": "X", "url": "https://gallery",
            "exhibitions": [{"title": "Show", "exhibition_url": "https://show", "url": "https://other"}]
        }));
        let link = g.display_link().unwrap();
        assert_eq!(link.url, "https://show");
        assert_eq!(link.label(), "View Exhibition");

        let g = gallery(json!({
            "id": "g1", "name": "X", "url": "https://gallery",
            "exhibitions": [{"title": "Show", "url": "https://press", "link_type": "other"}]
        }));
        let link = g.display_link().unwrap();
        assert_eq!(link.url, "https://press");
        assert_eq!(link.label(), "Visit Website");

        let g = gallery(json!({"id": "g1", "name": "X", "url": "https://gallery"}));
        let link = g.display_link().unwrap();
        assert_eq!(link.url, "https://gallery");
        assert!(!link.is_exhibition);

        let g = gallery(json!({"id": "g1", "name": "X"}));
        assert!(g.display_link().is_none());
    }

    #[test]
    fn test_placeholder_category_fallback() {
        let g = gallery(json!({
            "id": "g1", "name": "X", "placeholder_category": "sculpture",
            "exhibitions": [{"title": "Show"}]
        }));
        assert_eq!(g.placeholder_category(), Some("sculpture"));
    }

    #[test]
    fn test_shows_exhibition_needs_flag_and_entry() {
        let g = gallery(json!({"id": "g1", "name": "X", "has_active_exhibition": true}));
        assert!(!g.shows_exhibition());

        let g = gallery(json!({
            "id": "g1", "name": "X", "has_active_exhibition": true,
            "exhibitions": [{"title": "Show"}]
        }));
        assert!(g.shows_exhibition());
    }
}
