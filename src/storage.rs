//! Persistence bridge – load and save the résumé snapshot.
//!
//! The snapshot is a single serialized envelope `{currentStep, totalSteps,
//! selectedTheme, formData}`; the wizard-position fields travel alongside
//! the document but only `selectedTheme` and `formData` matter to
//! rendering. "No snapshot yet" (`Ok(None)`) is distinguished from a
//! corrupt snapshot (`Err`); both mean "start from defaults", but only the
//! latter is worth warning the user about.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{Document, ThemeId};

/// The persisted envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub current_step: u32,
    pub total_steps: u32,
    pub selected_theme: ThemeId,
    pub form_data: Document,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            current_step: 1,
            total_steps: 7,
            selected_theme: ThemeId::Corporate,
            form_data: Document::default(),
        }
    }
}

impl Snapshot {
    /// The contained document with the envelope's theme threaded in.
    pub fn document(&self) -> Document {
        let mut doc = self.form_data.clone();
        doc.selected_theme = self.selected_theme;
        doc
    }

    /// Replace the contained document, lifting its theme into the envelope.
    pub fn set_document(&mut self, doc: Document) {
        self.selected_theme = doc.selected_theme;
        self.form_data = doc;
    }
}

/// Narrow store interface the application depends on.
pub trait SnapshotStore {
    /// `Ok(None)` when no snapshot exists; `Err` when one exists but cannot
    /// be read or parsed.
    fn load(&self) -> Result<Option<Snapshot>, String>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), String>;
    /// Discard the snapshot ("new résumé"). Missing snapshots are fine.
    fn clear(&self) -> Result<(), String>;
}

/// Persist a snapshot, downgrading failure to a warning. Saving is
/// non-fatal by contract: on failure the changes simply live only in
/// memory for this session.
pub fn save_or_warn(store: &dyn SnapshotStore, snapshot: &Snapshot) {
    if let Err(e) = store.save(snapshot) {
        log::warn!("saving resume snapshot failed (changes kept in memory): {e}");
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// Stores the snapshot as pretty-printed JSON at a fixed path.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<Snapshot>, String> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("reading '{}': {e}", self.path.display())),
        };
        let snapshot: Snapshot = serde_json::from_str(&text)
            .map_err(|e| format!("corrupt snapshot '{}': {e}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), String> {
        let json = serde_json::to_string_pretty(snapshot).map_err(|e| e.to_string())?;
        fs::write(&self.path, json).map_err(|e| format!("writing '{}': {e}", self.path.display()))
    }

    fn clear(&self) -> Result<(), String> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("removing '{}': {e}", self.path.display())),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Store backed by a cell, for tests and throwaway sessions. The snapshot
/// round-trips through JSON so serialization bugs surface here too.
#[derive(Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw text (for corrupt-snapshot tests).
    pub fn with_raw(text: &str) -> Self {
        Self {
            slot: RefCell::new(Some(text.to_string())),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, String> {
        match self.slot.borrow().as_deref() {
            None => Ok(None),
            Some(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|e| format!("corrupt snapshot: {e}")),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), String> {
        let json = serde_json::to_string(snapshot).map_err(|e| e.to_string())?;
        *self.slot.borrow_mut() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        let mut snapshot = Snapshot::default();
        snapshot.set_document(crate::samples::sample_document());
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, snapshot);

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupt_snapshot_is_an_error_not_none() {
        let store = MemoryStore::with_raw("{not json");
        assert!(store.load().is_err());
    }

    #[test]
    fn unknown_theme_in_snapshot_falls_back() {
        let store = MemoryStore::with_raw(
            r#"{"currentStep": 3, "totalSteps": 7, "selectedTheme": "vaporwave",
                "formData": {"personal": {"fullName": "Sam"}}}"#,
        );
        let snapshot = store.load().unwrap().unwrap();
        assert_eq!(snapshot.selected_theme, ThemeId::Corporate);
        assert_eq!(snapshot.current_step, 3);
        assert_eq!(snapshot.form_data.personal.full_name, "Sam");
    }

    #[test]
    fn envelope_threads_theme_into_document() {
        let mut snapshot = Snapshot::default();
        snapshot.selected_theme = ThemeId::Modern;
        assert_eq!(snapshot.document().selected_theme, ThemeId::Modern);
    }

    #[test]
    fn file_store_distinguishes_missing_from_corrupt() {
        let dir = std::env::temp_dir().join("resume_forge_store_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snapshot.json");
        let store = FileStore::new(&path);
        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), None);

        store.save(&Snapshot::default()).unwrap();
        assert!(store.load().unwrap().is_some());

        std::fs::write(&path, "garbage").unwrap();
        assert!(store.load().is_err());

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
