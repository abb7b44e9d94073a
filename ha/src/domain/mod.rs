//! Domain types for HALFART
//!
//! Everything the advisor can send back (galleries, plan patches, profile
//! patches) plus the local conversation log.

mod gallery;
mod lenient;
mod message;
mod plan;
mod profile;

pub use gallery::{Exhibition, Gallery, GalleryLink, GalleryStatus, LinkType};
pub use message::{ChatMessage, ChatRole, Conversation, GREETING};
pub use plan::{ActivePlan, PlanPatch, RouteStop, SavedPlan, StopKind, TimeWindow};
pub use profile::{DEFAULT_MAX_WALK_MINUTES, ProfilePatch, UserProfile};
