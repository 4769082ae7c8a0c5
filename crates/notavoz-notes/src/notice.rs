//! User-visible notices raised by the note forms.

use std::fmt;

use notavoz_core::error::NotavozError;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A message surfaced to the user by the host forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Save attempted with an empty required field. No state change.
    EmptyTitleOrContent,
    NoteCreated,
    NoteEdited,
    NoteDeleted,
    /// The runtime has no speech-recognition engine. Surfaced once per
    /// attempt; non-retryable without a different environment.
    SpeechUnsupported,
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::EmptyTitleOrContent => NoticeLevel::Info,
            Notice::NoteCreated | Notice::NoteEdited | Notice::NoteDeleted => NoticeLevel::Success,
            Notice::SpeechUnsupported => NoticeLevel::Error,
        }
    }

    /// Map a dictation failure to the notice the user should see, if any.
    pub fn for_error(err: &NotavozError) -> Option<Notice> {
        match err {
            NotavozError::Capability(_) => Some(Notice::SpeechUnsupported),
            _ => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notice::EmptyTitleOrContent => "Título ou Conteúdo Vazio!",
            Notice::NoteCreated => "Nota criada com sucesso!",
            Notice::NoteEdited => "Nota editada com sucesso!",
            Notice::NoteDeleted => "Nota apagada com sucesso!",
            Notice::SpeechUnsupported => {
                "Infelizmente seu ambiente não suporta a API de gravação!"
            }
        };
        f.write_str(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            Notice::EmptyTitleOrContent.to_string(),
            "Título ou Conteúdo Vazio!"
        );
        assert_eq!(Notice::NoteCreated.to_string(), "Nota criada com sucesso!");
        assert_eq!(Notice::NoteEdited.to_string(), "Nota editada com sucesso!");
    }

    #[test]
    fn test_notice_levels() {
        assert_eq!(Notice::EmptyTitleOrContent.level(), NoticeLevel::Info);
        assert_eq!(Notice::NoteCreated.level(), NoticeLevel::Success);
        assert_eq!(Notice::NoteDeleted.level(), NoticeLevel::Success);
        assert_eq!(Notice::SpeechUnsupported.level(), NoticeLevel::Error);
    }

    #[test]
    fn test_capability_error_maps_to_unsupported_notice() {
        let err = NotavozError::Capability("no engine".to_string());
        assert_eq!(Notice::for_error(&err), Some(Notice::SpeechUnsupported));
    }

    #[test]
    fn test_engine_error_has_no_notice() {
        let err = NotavozError::Engine("network".to_string());
        assert_eq!(Notice::for_error(&err), None);
    }
}
