//! Asset library sink
//!
//! Finished exports and photos may be handed to the host's media library.
//! The save operation is opaque to the core: it either returns a reference
//! to the created asset or an error. Failures are reported once, never
//! retried.

use std::path::Path;

use chrono::{DateTime, Utc};

/// Geographic coordinate attached to a saved asset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reference to an asset created in the host library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef(pub String);

/// Asset library collaborator contract
pub trait AssetLibrary: Send + Sync {
    fn save(
        &self,
        file: &Path,
        album: &str,
        timestamp: DateTime<Utc>,
        location: Option<GeoLocation>,
    ) -> Result<AssetRef, String>;
}

/// Album names used for saved media
pub const VIDEO_ALBUM: &str = "Videos";
pub const IMAGE_ALBUM: &str = "Images";
