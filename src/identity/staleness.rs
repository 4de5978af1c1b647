//! Catalog change detection
//!
//! The catalog is externally owned; registrations can land in it while the
//! agent runs. Rather than re-reading catalog content, the detector tracks
//! the database file's modification timestamp — a single metadata read,
//! cheap enough to sit on the hot path of every resolution.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct ChangeDetector {
    path: PathBuf,
    marker: Option<SystemTime>,
}

impl ChangeDetector {
    /// Create a detector observing `path`, recording its current marker.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let marker = read_marker(&path);
        Self { path, marker }
    }

    /// True when the file's modification time differs from the stored
    /// marker. The marker is updated on change, so a single modification
    /// reports true exactly once.
    ///
    /// A failed metadata read is reported as "unchanged": the cache keeps
    /// serving what it has rather than thrashing on a transient stat error.
    pub fn has_changed(&mut self) -> bool {
        let Some(current) = read_marker(&self.path) else {
            return false;
        };
        if self.marker != Some(current) {
            debug!(path = %self.path.display(), "catalog modification marker changed");
            self.marker = Some(current);
            return true;
        }
        false
    }
}

fn read_marker(path: &std::path::Path) -> Option<SystemTime> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => Some(mtime),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read catalog modification time");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_unchanged_file_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.sqlite");
        fs::write(&path, b"x").unwrap();

        let mut detector = ChangeDetector::new(&path);
        assert!(!detector.has_changed());
        assert!(!detector.has_changed());
    }

    #[test]
    fn test_modification_reports_true_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.sqlite");
        fs::write(&path, b"x").unwrap();

        let mut detector = ChangeDetector::new(&path);

        let file = OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(5))
            .unwrap();

        assert!(detector.has_changed());
        assert!(!detector.has_changed(), "marker must update after a hit");
    }

    #[test]
    fn test_missing_file_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sqlite");
        let mut detector = ChangeDetector::new(&path);
        assert!(!detector.has_changed());
    }

    #[test]
    fn test_file_appearing_later_reports_true() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.sqlite");
        let mut detector = ChangeDetector::new(&path);

        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"x").unwrap();

        assert!(detector.has_changed());
    }
}
