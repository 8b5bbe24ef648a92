//! Text editing session.
//!
//! While a label is being edited its content lives in a draft owned by the
//! session. The store only sees the text when the session commits.

use crate::element::{ElementId, ElementPatch};
use crate::error::{CanvasError, CanvasResult};
use crate::selection::SelectionController;
use crate::shapes::TextLabel;
use crate::store::ElementStore;
use crate::style::StyleConfig;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Content written when a session commits an empty draft.
pub const PLACEHOLDER_TEXT: &str = "Double click to edit";

/// How an edit session was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditExit {
    /// Escape key.
    Escape,
    /// Pointer down on empty canvas.
    CanvasClick,
    /// The text input lost focus.
    FocusLost,
    /// Explicit save (Ctrl+Enter).
    SaveGesture,
}

impl EditExit {
    /// Whether leaving this way keeps the draft.
    pub fn commits(&self) -> bool {
        !matches!(self, EditExit::Escape)
    }
}

/// The label being edited and its uncommitted content.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    id: ElementId,
    draft: String,
}

impl EditSession {
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }
}

/// Owner of the (at most one) open edit session.
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    session: Option<EditSession>,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Id of the label being edited.
    pub fn editing_id(&self) -> Option<&ElementId> {
        self.session.as_ref().map(EditSession::id)
    }

    pub fn is_editing(&self, id: &ElementId) -> bool {
        self.editing_id() == Some(id)
    }

    /// Create an empty label at `position`, select it and start editing it.
    pub fn start_new(
        &mut self,
        store: &mut ElementStore,
        selection: &mut SelectionController,
        position: Point,
        style: &StyleConfig,
    ) -> CanvasResult<ElementId> {
        self.close_previous(store);

        let label = TextLabel::new(
            ElementId::generate("text"),
            position,
            style.font_size,
            style.font_family.clone(),
            style.text_color,
        );
        let id = store.insert(label)?;
        selection.set_selected(Some(id.clone()));
        self.session = Some(EditSession {
            id: id.clone(),
            draft: String::new(),
        });
        log::debug!("Editing new text label {id}");
        Ok(id)
    }

    /// Open a session on an existing label, seeded with its content.
    pub fn start_editing_existing(
        &mut self,
        id: &ElementId,
        store: &mut ElementStore,
        selection: &mut SelectionController,
    ) -> CanvasResult<()> {
        if self.is_editing(id) {
            selection.set_selected(Some(id.clone()));
            return Ok(());
        }

        let content = store
            .get(id)
            .ok_or_else(|| CanvasError::NotFound(id.clone()))?
            .as_text()
            .ok_or_else(|| CanvasError::NotText(id.clone()))?
            .content
            .clone();

        self.close_previous(store);
        selection.set_selected(Some(id.clone()));
        self.session = Some(EditSession {
            id: id.clone(),
            draft: content,
        });
        Ok(())
    }

    /// Replace the draft. Returns false when no session is open.
    pub fn update_draft(&mut self, content: impl Into<String>) -> bool {
        match &mut self.session {
            Some(session) => {
                session.draft = content.into();
                true
            }
            None => false,
        }
    }

    /// Write the draft (or the placeholder when empty) and close the session.
    pub fn commit(&mut self, store: &mut ElementStore) -> CanvasResult<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let content = if session.draft.is_empty() {
            PLACEHOLDER_TEXT.to_string()
        } else {
            session.draft
        };
        store.update(&session.id, &ElementPatch::content(content))
    }

    /// Close the session without touching the store.
    pub fn discard_and_close(&mut self) {
        self.session = None;
    }

    /// Close the session the way `exit` demands.
    pub fn finish(&mut self, exit: EditExit, store: &mut ElementStore) -> CanvasResult<()> {
        if exit.commits() {
            self.commit(store)
        } else {
            self.discard_and_close();
            Ok(())
        }
    }

    /// Close the session if it targets a deleted label.
    pub fn forget(&mut self, id: &ElementId) {
        if self.is_editing(id) {
            self.session = None;
        }
    }

    fn close_previous(&mut self, store: &mut ElementStore) {
        if let Err(err) = self.commit(store) {
            log::debug!("Previous edit session not committed: {err}");
        }
    }
}
