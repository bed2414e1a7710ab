//! # Memento: document editor with undo/redo
//!
//! The [`Document`] (originator) snapshots itself into opaque [`Memento`]s.
//! [`History`] (caretaker) stores them and drives undo/redo without ever
//! reading the saved text; it only sees the label and timestamp.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

const LABEL_PREVIEW_CHARS: usize = 20;

mod snapshot {
    use super::*;

    /// Saved document state. The content is readable only by [`super::Document`].
    #[derive(Debug, Clone)]
    pub struct Memento {
        state: String,
        label: String,
        created_at: DateTime<Local>,
    }

    impl Memento {
        pub(in crate::behavioral::memento) fn new(state: String) -> Self {
            let mut label: String = state.chars().take(LABEL_PREVIEW_CHARS).collect();
            if state.chars().count() > LABEL_PREVIEW_CHARS {
                label.push_str("...");
            }
            Self {
                state,
                label,
                created_at: Local::now(),
            }
        }

        pub(in crate::behavioral::memento) fn state(&self) -> &str {
            &self.state
        }

        pub fn label(&self) -> &str {
            &self.label
        }

        pub fn created_at(&self) -> DateTime<Local> {
            self.created_at
        }
    }
}

pub use snapshot::Memento;

// =============================================================================
// Originator
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Document {
    content: String,
}

impl Document {
    pub fn new(initial_content: impl Into<String>) -> Self {
        let content = initial_content.into();
        debug!(%content, "document initialized");
        Self { content }
    }

    pub fn write(&mut self, text: &str) {
        self.content.push_str(text);
        debug!(text, content = %self.content, "wrote text");
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn save(&self) -> Memento {
        Memento::new(self.content.clone())
    }

    pub fn restore(&mut self, memento: &Memento) {
        self.content = memento.state().to_string();
        debug!(content = %self.content, "restored state");
    }
}

// =============================================================================
// Caretaker
// =============================================================================

/// Undo/redo stacks for one document. The last entry of the undo stack is
/// always the state currently shown in the document.
#[derive(Debug)]
pub struct History {
    document: Document,
    undo_stack: Vec<Memento>,
    redo_stack: Vec<Memento>,
}

impl History {
    /// Takes ownership of the document and records its initial state.
    pub fn new(document: Document) -> Self {
        let mut history = Self {
            document,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        };
        history.save();
        history
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Snapshots the document. Any pending redo states are discarded.
    pub fn save(&mut self) {
        let memento = self.document.save();
        info!(label = memento.label(), "history: state saved");
        self.undo_stack.push(memento);
        self.redo_stack.clear();
    }

    /// Returns `false` when only the initial state remains.
    pub fn undo(&mut self) -> bool {
        if self.undo_stack.len() <= 1 {
            warn!("history: cannot undo further");
            return false;
        }
        if let Some(current) = self.undo_stack.pop() {
            self.redo_stack.push(current);
        }
        if let Some(previous) = self.undo_stack.last() {
            self.document.restore(previous);
        }
        info!("history: undo complete");
        true
    }

    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(memento) = self.redo_stack.pop() else {
            warn!("history: cannot redo");
            return false;
        };
        self.document.restore(&memento);
        self.undo_stack.push(memento);
        info!("history: redo complete");
        true
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Human-readable listing of both stacks.
    pub fn log(&self) -> Vec<String> {
        let mut lines = vec!["History Log:".to_string()];
        lines.extend(
            self.undo_stack
                .iter()
                .enumerate()
                .map(|(i, m)| format!("  {i}: '{}'", m.label())),
        );
        lines.push("Redo Stack Log:".to_string());
        lines.extend(
            self.redo_stack
                .iter()
                .enumerate()
                .map(|(i, m)| format!("  {i}: '{}'", m.label())),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edited_history() -> History {
        let mut history = History::new(Document::new("Hello"));
        history.document_mut().write(" World");
        history.save();
        history.document_mut().write("!");
        history.save();
        history
    }

    #[test]
    fn test_document_save_and_restore() {
        let mut doc = Document::new("draft");
        let memento = doc.save();
        doc.write(" v2");
        assert_eq!(doc.content(), "draft v2");

        doc.restore(&memento);
        assert_eq!(doc.content(), "draft");
    }

    #[test]
    fn test_initial_state_is_saved() {
        let history = History::new(Document::new("start"));
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_undo_and_redo() {
        let mut history = edited_history();
        assert_eq!(history.document().content(), "Hello World!");

        assert!(history.undo());
        assert_eq!(history.document().content(), "Hello World");
        assert!(history.undo());
        assert_eq!(history.document().content(), "Hello");
        assert!(!history.undo());
        assert_eq!(history.document().content(), "Hello");

        assert!(history.redo());
        assert_eq!(history.document().content(), "Hello World");
        assert!(history.redo());
        assert_eq!(history.document().content(), "Hello World!");
        assert!(!history.redo());
    }

    #[test]
    fn test_save_clears_redo_stack() {
        let mut history = edited_history();
        history.undo();
        assert_eq!(history.redo_depth(), 1);

        history.document_mut().write(" again");
        history.save();
        assert_eq!(history.redo_depth(), 0);
        assert!(!history.redo());
        assert_eq!(history.document().content(), "Hello World again");
    }

    #[test]
    fn test_memento_label_is_truncated_preview() {
        let doc = Document::new("a".repeat(30));
        let memento = doc.save();
        assert_eq!(memento.label(), format!("{}...", "a".repeat(20)));
        assert!(memento.created_at() <= Local::now());
    }

    #[test]
    fn test_log_lists_both_stacks() {
        let mut history = edited_history();
        history.undo();
        assert_eq!(
            history.log(),
            vec![
                "History Log:",
                "  0: 'Hello'",
                "  1: 'Hello World'",
                "Redo Stack Log:",
                "  0: 'Hello World!'",
            ]
        );
    }
}
