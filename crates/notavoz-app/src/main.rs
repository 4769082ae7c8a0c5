//! Notavoz application binary - composition root.
//!
//! Ties the Notavoz crates together into a single executable:
//! 1. Initialize tracing
//! 2. Load configuration from TOML
//! 3. Build the note store and the dictation-backed forms
//! 4. Run a scripted capture demo against the mock recognizer
//!
//! A real deployment would inject the host environment's speech engine as
//! the `RecognizerFactory`; this binary uses the scriptable mock so the full
//! create/dictate/edit flow can be exercised anywhere.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::Utc;

use notavoz_core::config::NotavozConfig;
use notavoz_dictation::DictationController;
use notavoz_notes::{format_distance_pt, EditNoteForm, NewNoteForm, Notice, NoteStore};
use notavoz_speech::{MockRecognizerFactory, RecognizerConfig};

/// Resolve the config file path (NOTAVOZ_CONFIG env, or ~/.notavoz/config.toml).
fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("NOTAVOZ_CONFIG") {
        return PathBuf::from(p);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".notavoz").join("config.toml");
    }
    PathBuf::from("config.toml")
}

/// Feed one scripted transcript event per tick and pump it into the form's
/// buffer, the way a host event loop would interleave engine callbacks.
async fn run_capture<F>(feeder: &MockRecognizerFactory, script: &[&[&str]], mut pump: F)
where
    F: FnMut() -> usize,
{
    let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(50));
    for transcripts in script {
        interval.tick().await;
        feeder.push_transcripts(transcripts);
        pump();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Notavoz v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = config_path();
    let config = NotavozConfig::load_or_default(&config_file);
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let recognizer_config = RecognizerConfig::from(&config.dictation);
    let factory = MockRecognizerFactory::new();

    // Note store shared between the forms' commit callbacks and the listing.
    let store = Rc::new(RefCell::new(NoteStore::new()));

    // === Create flow: titled form, Replace-mode dictation ===

    let store_sink = Rc::clone(&store);
    let mut new_note = NewNoteForm::new(
        DictationController::with_config(factory.clone(), recognizer_config.clone()),
        Box::new(move |title, content| {
            store_sink
                .borrow_mut()
                .create(Some(title.to_string()), content);
        }),
    );

    new_note.set_title("Lista de compras");
    match new_note.start_recording() {
        Ok(()) => tracing::info!("Recording started"),
        Err(e) => {
            if let Some(notice) = Notice::for_error(&e) {
                tracing::error!(notice = %notice, "Recording unavailable");
            }
            return Err(e.into());
        }
    }

    run_capture(
        &factory,
        &[
            &["comprar"],
            &["comprar", " pão"],
            &["comprar", " pão", " e café"],
        ],
        || new_note.pump(),
    )
    .await;
    new_note.stop_recording();
    tracing::info!(content = %new_note.content(), "Dictation finished");

    let notice = new_note.save();
    tracing::info!(notice = %notice, "Create flow done");

    // === Edit flow: append dictation onto the saved note ===

    let saved = store.borrow().notes()[0].clone();
    let store_sink = Rc::clone(&store);
    let mut edit_note = EditNoteForm::new(
        DictationController::with_config(factory.clone(), recognizer_config),
        &saved,
        Box::new(move |id, title, content| {
            if let Err(e) = store_sink
                .borrow_mut()
                .edit(id, Some(title.to_string()), content)
            {
                tracing::warn!(error = %e, "Edit failed");
            }
        }),
    );

    edit_note.start_recording()?;
    run_capture(
        &factory,
        &[&["e leite"], &["e leite", " amanhã"]],
        || edit_note.pump(),
    )
    .await;
    edit_note.stop_recording();

    let notice = edit_note.save();
    tracing::info!(notice = %notice, "Edit flow done");

    // === Listing ===

    let now = Utc::now();
    for note in store.borrow().notes() {
        tracing::info!(
            title = note.title.as_deref().unwrap_or("(sem título)"),
            when = %format_distance_pt(note.date, now),
            content = %note.content,
            "Note"
        );
    }

    Ok(())
}
