//! BlobStore - keyed text blobs in a local directory
//!
//! A tiny key-value store in the spirit of browser local storage: each key
//! holds one opaque text value, usually a serialized JSON snapshot. Values are
//! replaced wholesale on every write.
//!
//! # Layout
//!
//! ```text
//! {store_dir}/
//! ├── .lock                 # exclusive lock held while writing
//! ├── halfart_profile.blob
//! └── ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use blobstore::BlobStore;
//!
//! let store = BlobStore::open("/tmp/blobs")?;
//! store.put("halfart_profile", r#"{"home_areas":["Chelsea"]}"#)?;
//! let value = store.get("halfart_profile")?;
//! ```

pub mod cli;
mod error;
mod store;

pub use error::StoreError;
pub use store::{BlobStore, validate_key};

/// File extension used for stored blobs
pub const BLOB_EXTENSION: &str = "blob";
