use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// How a running transcript is combined with the target text buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationMode {
    /// The running transcript becomes the buffer's full value, overwriting any
    /// manual edits made before capture started (new-note forms).
    #[default]
    Replace,
    /// The running transcript is appended, space-separated, onto the buffer
    /// content as it existed when capture started (edit form).
    Append,
}

// =============================================================================
// Newtype Wrappers - Identity
// =============================================================================

/// Unique identifier for a note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Entity Structs
// =============================================================================

/// A text note.
///
/// Created by the host on save, mutated by the host on edit-save, deleted by
/// the host on delete request. The dictation core never touches a `Note`
/// directly; it only produces buffer updates the host later commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Absent for notes created through the content-only (onboarding) form.
    pub title: Option<String>,
    pub content: String,
    /// Creation timestamp. Not updated on edit.
    pub date: DateTime<Utc>,
}

impl Note {
    /// Create a new note stamped with the current time.
    pub fn new(title: Option<String>, content: impl Into<String>) -> Self {
        Self {
            id: NoteId::new(),
            title,
            content: content.into(),
            date: Utc::now(),
        }
    }

    /// Short content preview for log lines.
    pub fn preview(&self) -> String {
        self.content.chars().take(50).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulation_mode_default() {
        assert_eq!(AccumulationMode::default(), AccumulationMode::Replace);
    }

    #[test]
    fn test_accumulation_mode_serialization() {
        let json = serde_json::to_string(&AccumulationMode::Append).unwrap();
        assert_eq!(json, "\"append\"");

        let deserialized: AccumulationMode = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, AccumulationMode::Append);
    }

    #[test]
    fn test_note_id_unique() {
        let a = NoteId::new();
        let b = NoteId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_note_creation() {
        let note = Note::new(Some("Lista".to_string()), "comprar café");
        assert_eq!(note.title.as_deref(), Some("Lista"));
        assert_eq!(note.content, "comprar café");
    }

    #[test]
    fn test_note_without_title() {
        let note = Note::new(None, "apenas conteúdo");
        assert!(note.title.is_none());
    }

    #[test]
    fn test_note_preview_truncation() {
        let note = Note::new(None, "a".repeat(100));
        assert_eq!(note.preview().len(), 50);
    }

    #[test]
    fn test_note_preview_multibyte() {
        // Must truncate on char boundaries, not bytes.
        let note = Note::new(None, "á".repeat(60));
        assert_eq!(note.preview().chars().count(), 50);
    }

    #[test]
    fn test_note_json_round_trip() {
        let note = Note::new(Some("Titulo".to_string()), "Conteúdo da nota");
        let json = serde_json::to_string(&note).unwrap();
        let deserialized: Note = serde_json::from_str(&json).unwrap();

        assert_eq!(note.id, deserialized.id);
        assert_eq!(note.title, deserialized.title);
        assert_eq!(note.content, deserialized.content);
        assert_eq!(note.date, deserialized.date);
    }
}
