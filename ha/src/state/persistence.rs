//! Profile persistence on top of the blob store

use std::path::Path;

use blobstore::BlobStore;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use crate::domain::UserProfile;

/// The user profile, stored as one JSON snapshot under a fixed key
#[derive(Debug, Clone)]
pub struct ProfileStore {
    store: BlobStore,
    key: String,
}

impl ProfileStore {
    pub fn open(dir: impl AsRef<Path>, key: impl Into<String>) -> Result<Self> {
        let dir = dir.as_ref();
        let key = key.into();
        debug!(?dir, %key, "ProfileStore::open: called");
        blobstore::validate_key(&key).context("Invalid profile key")?;
        let store = BlobStore::open(dir).context("Failed to open profile store")?;
        Ok(Self { store, key })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// File the profile lives in
    pub fn path(&self) -> Result<std::path::PathBuf> {
        Ok(self.store.blob_path(&self.key)?)
    }

    /// Load the saved profile
    ///
    /// A missing, unreadable or malformed snapshot means "no saved profile":
    /// the default is returned and the problem is logged.
    pub fn load(&self) -> UserProfile {
        debug!(key = %self.key, "ProfileStore::load: called");
        match self.store.get(&self.key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(profile) => {
                    info!(key = %self.key, "Loaded saved profile");
                    profile
                }
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Saved profile is malformed, using defaults");
                    UserProfile::default()
                }
            },
            Ok(None) => {
                debug!("ProfileStore::load: no saved profile");
                UserProfile::default()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read saved profile, using defaults");
                UserProfile::default()
            }
        }
    }

    /// Overwrite the snapshot
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        debug!(key = %self.key, "ProfileStore::save: called");
        let json = serde_json::to_string(profile).context("Failed to serialize profile")?;
        self.store
            .put(&self.key, &json)
            .with_context(|| format!("Failed to persist profile under '{}'", self.key))
    }

    /// Delete the snapshot; returns true if one existed
    pub fn reset(&self) -> Result<bool> {
        debug!(key = %self.key, "ProfileStore::reset: called");
        Ok(self.store.remove(&self.key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SavedPlan;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_default() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path(), "halfart_profile").unwrap();
        assert_eq!(store.load(), UserProfile::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path(), "halfart_profile").unwrap();

        let profile = UserProfile {
            home_areas: vec!["Chelsea".to_string()],
            default_max_walk_minutes: 15,
            saved_plans: vec![SavedPlan {
                id: "p1".to_string(),
                title: "Saturday".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        store.save(&profile).unwrap();

        let reopened = ProfileStore::open(temp.path(), "halfart_profile").unwrap();
        assert_eq!(reopened.load(), profile);
    }

    #[test]
    fn test_malformed_snapshot_is_default() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path(), "halfart_profile").unwrap();
        std::fs::write(store.path().unwrap(), "{not json").unwrap();
        assert_eq!(store.load(), UserProfile::default());
    }

    #[test]
    fn test_partial_snapshot_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path(), "halfart_profile").unwrap();
        std::fs::write(store.path().unwrap(), r#"{"home_areas": ["Tribeca"]}"#).unwrap();

        let profile = store.load();
        assert_eq!(profile.home_areas, vec!["Tribeca".to_string()]);
        assert_eq!(profile.default_max_walk_minutes, 20);
    }

    #[test]
    fn test_reset() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path(), "halfart_profile").unwrap();
        assert!(!store.reset().unwrap());
        store.save(&UserProfile::default()).unwrap();
        assert!(store.reset().unwrap());
        assert!(!store.path().unwrap().exists());
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        assert!(ProfileStore::open(temp.path(), "../escape").is_err());
    }
}
