//! Terminal renderers
//!
//! Pure functions from state to display strings. Nothing here prints.

mod cards;
mod chat;
mod itinerary;
mod profile;

pub use cards::{placeholder_label, render_card, render_suggestions};
pub use chat::{LOADING, render_history, render_message};
pub use itinerary::{render_itinerary, walk_marker};
pub use profile::render_profile;
