//! Scratch storage for segment and export files
//!
//! Raw segments and rendered exports live in separate areas under one
//! caller-supplied root, so clearing a session never touches finished
//! exports. Deletion failures are logged and reported, never fatal to the
//! recording state machine.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

const SEGMENTS_DIR: &str = "segments";
const EXPORTS_DIR: &str = "exports";

/// Process-owned scratch area layout
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Segment scratch area, created on demand
    pub fn segments_dir(&self) -> io::Result<PathBuf> {
        let dir = self.root.join(SEGMENTS_DIR);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Export output area, created on demand
    pub fn exports_dir(&self) -> io::Result<PathBuf> {
        let dir = self.root.join(EXPORTS_DIR);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Segment area for one session, created on demand. Sessions get
    /// private directories so a new session never reuses paths an export
    /// job from a previous session still holds.
    pub fn session_dir(&self, session: Uuid) -> io::Result<PathBuf> {
        let dir = self.root.join(SEGMENTS_DIR).join(session.to_string());
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Destination path for segment number `index` of `session`
    pub fn segment_path(&self, session: Uuid, index: usize) -> io::Result<PathBuf> {
        Ok(self.session_dir(session)?.join(format!("clip-{index}.mov")))
    }

    /// Remove one session's segment directory and everything in it
    pub fn clear_session(&self, session: Uuid) {
        let dir = self.root.join(SEGMENTS_DIR).join(session.to_string());
        if dir.exists() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                tracing::warn!("failed to clear session area {:?}: {}", dir, e);
            }
        }
    }

    /// Destination path for a photo capture
    pub fn photo_path(&self) -> io::Result<PathBuf> {
        let stamp = chrono::Utc::now().format("%d-%m-%Y_%H-%M-%S%.3f");
        Ok(self.exports_dir()?.join(format!("{stamp}.jpg")))
    }

    /// Timestamped destination for a rendered export. Subsecond precision
    /// keeps back-to-back exports from colliding.
    pub fn export_path(&self) -> io::Result<PathBuf> {
        let stamp = chrono::Utc::now().format("%d-%m-%Y_%H-%M-%S%.3f");
        Ok(self.exports_dir()?.join(format!("{stamp}.mov")))
    }

    /// Best-effort delete. Returns whether the file is gone.
    pub fn delete(&self, path: &Path) -> bool {
        match std::fs::remove_file(path) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => {
                tracing::warn!("failed to delete {:?}: {}", path, e);
                false
            }
        }
    }

    /// Remove the whole segment scratch area
    pub fn clear_segments(&self) {
        let dir = self.root.join(SEGMENTS_DIR);
        if dir.exists() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                tracing::warn!("failed to clear segment area {:?}: {}", dir, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_paths_are_scoped_to_their_session() {
        let tmp = tempfile::tempdir().unwrap();
        let store = MediaStore::new(tmp.path());
        let session = Uuid::new_v4();
        let other = Uuid::new_v4();
        let p0 = store.segment_path(session, 0).unwrap();
        let p1 = store.segment_path(session, 1).unwrap();
        assert!(p0.ends_with(format!("segments/{session}/clip-0.mov")));
        assert_ne!(p0, p1);
        assert!(p0.parent().unwrap().is_dir());
        // Same index in a different session never collides.
        assert_ne!(p0, store.segment_path(other, 0).unwrap());
    }

    #[test]
    fn clear_session_leaves_other_sessions() {
        let tmp = tempfile::tempdir().unwrap();
        let store = MediaStore::new(tmp.path());
        let old = Uuid::new_v4();
        let new = Uuid::new_v4();
        let old_seg = store.segment_path(old, 0).unwrap();
        let new_seg = store.segment_path(new, 0).unwrap();
        std::fs::write(&old_seg, b"clip").unwrap();
        std::fs::write(&new_seg, b"clip").unwrap();

        store.clear_session(old);
        assert!(!old_seg.exists());
        assert!(new_seg.exists());
    }

    #[test]
    fn delete_missing_file_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = MediaStore::new(tmp.path());
        assert!(store.delete(&tmp.path().join("nope.mov")));
    }

    #[test]
    fn clear_segments_leaves_exports() {
        let tmp = tempfile::tempdir().unwrap();
        let store = MediaStore::new(tmp.path());
        let seg = store.segment_path(Uuid::new_v4(), 0).unwrap();
        std::fs::write(&seg, b"clip").unwrap();
        let export = store.exports_dir().unwrap().join("out.mov");
        std::fs::write(&export, b"render").unwrap();

        store.clear_segments();
        assert!(!seg.exists());
        assert!(export.exists());
    }
}
