//! Recorded segment bookkeeping
//!
//! The clip store owns the ordered list of finalized segments for the
//! recording session in progress. Insertion order is recording order unless
//! the caller explicitly reorders.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::composition::transform::{PixelSize, Transform2D};

/// Errors from clip store mutations
#[derive(Error, Debug, PartialEq)]
pub enum ClipError {
    #[error("clip has no playable duration: {location}")]
    ZeroDuration { location: PathBuf },

    #[error("clip index {index} out of range (count {count})")]
    OutOfRange { index: usize, count: usize },
}

/// One continuously recorded span of video
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Segment media file, owned by the store once appended
    pub location: PathBuf,

    /// Playable duration in seconds
    pub duration: f64,

    /// Encoded frame dimensions, pre-transform
    pub natural_size: PixelSize,

    /// Rotation/mirroring recorded at capture time
    pub preferred_transform: Transform2D,
}

impl Clip {
    pub fn new(
        location: PathBuf,
        duration: f64,
        natural_size: PixelSize,
        preferred_transform: Transform2D,
    ) -> Self {
        Self {
            location,
            duration,
            natural_size,
            preferred_transform,
        }
    }
}

/// Ordered collection of recorded clips
#[derive(Debug, Default)]
pub struct ClipStore {
    clips: Vec<Clip>,
}

impl ClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Sum of clip durations in seconds
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(|c| c.duration).sum()
    }

    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter()
    }

    /// Append a finalized clip. Clips without a positive duration are
    /// rejected so the count the caller sees never includes unplayable
    /// segments.
    pub fn append(&mut self, clip: Clip) -> Result<(), ClipError> {
        if !(clip.duration > 0.0) {
            return Err(ClipError::ZeroDuration {
                location: clip.location,
            });
        }
        self.clips.push(clip);
        Ok(())
    }

    /// Remove and return the clip at `index`. Out-of-range indices fail
    /// loudly rather than clamping.
    pub fn remove(&mut self, index: usize) -> Result<Clip, ClipError> {
        if index >= self.clips.len() {
            return Err(ClipError::OutOfRange {
                index,
                count: self.clips.len(),
            });
        }
        Ok(self.clips.remove(index))
    }

    /// Move the clip at `from` so it ends up at position `to`, shifting the
    /// clips in between.
    pub fn move_clip(&mut self, from: usize, to: usize) -> Result<(), ClipError> {
        let count = self.clips.len();
        if from >= count {
            return Err(ClipError::OutOfRange { index: from, count });
        }
        if to >= count {
            return Err(ClipError::OutOfRange { index: to, count });
        }
        let clip = self.clips.remove(from);
        self.clips.insert(to, clip);
        Ok(())
    }

    /// Ordered copy of the clips, for building a timeline snapshot
    pub fn snapshot(&self) -> Vec<Clip> {
        self.clips.clone()
    }

    /// Drop all clips and return their former contents (for file cleanup)
    pub fn take_all(&mut self) -> Vec<Clip> {
        std::mem::take(&mut self.clips)
    }

    pub fn clear(&mut self) {
        self.clips.clear();
    }
}
