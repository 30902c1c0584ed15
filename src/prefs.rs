//! Persisted preference reads
//!
//! The host application owns preference storage; the core consumes pure
//! reads through this trait. Missing values fall back to the documented
//! defaults: medium export quality, auto-save on, editing off.

use crate::capture::traits::{CaptureQuality, OutputMode};
use crate::export::types::QualityTier;

/// Preference collaborator contract
pub trait Preferences: Send + Sync {
    /// Export quality tier (default: medium)
    fn quality_tier(&self) -> QualityTier {
        QualityTier::Medium
    }

    /// Save finished media to the asset library (default: on)
    fn auto_save(&self) -> bool {
        true
    }

    /// Hand clips to an edit flow instead of exporting immediately
    /// (default: off, which means stop() flows straight into export)
    fn allow_edit(&self) -> bool {
        false
    }

    /// Capture output mode (default: photo)
    fn output_mode(&self) -> OutputMode {
        OutputMode::Photo
    }

    /// Device capture resolution preset (default: high)
    fn capture_quality(&self) -> CaptureQuality {
        CaptureQuality::High
    }
}

/// In-memory preferences with settable values, defaults as documented
#[derive(Debug, Clone)]
pub struct InMemoryPreferences {
    pub quality_tier: QualityTier,
    pub auto_save: bool,
    pub allow_edit: bool,
    pub output_mode: OutputMode,
    pub capture_quality: CaptureQuality,
}

impl Default for InMemoryPreferences {
    fn default() -> Self {
        Self {
            quality_tier: QualityTier::Medium,
            auto_save: true,
            allow_edit: false,
            output_mode: OutputMode::Photo,
            capture_quality: CaptureQuality::High,
        }
    }
}

impl Preferences for InMemoryPreferences {
    fn quality_tier(&self) -> QualityTier {
        self.quality_tier
    }

    fn auto_save(&self) -> bool {
        self.auto_save
    }

    fn allow_edit(&self) -> bool {
        self.allow_edit
    }

    fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    fn capture_quality(&self) -> CaptureQuality {
        self.capture_quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;
    impl Preferences for Empty {}

    #[test]
    fn documented_defaults() {
        let prefs = Empty;
        assert_eq!(prefs.quality_tier(), QualityTier::Medium);
        assert!(prefs.auto_save());
        assert!(!prefs.allow_edit());
    }
}
