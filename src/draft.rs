//! Edit Draft
//!
//! Uncommitted text of a todo in edit mode.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    editing: bool,
    text: String,
}

impl EditDraft {
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Enter edit mode starting from the current text
    pub fn begin(&mut self, current: &str) {
        self.editing = true;
        self.text = current.to_string();
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn can_save(&self) -> bool {
        self.editing && !self.text.trim().is_empty()
    }

    /// Leave edit mode, returning the trimmed text to save
    pub fn commit(&mut self) -> Option<String> {
        if !self.can_save() {
            return None;
        }
        let text = self.text.trim().to_string();
        self.cancel();
        Some(text)
    }

    pub fn cancel(&mut self) {
        self.editing = false;
        self.text.clear();
    }
}

/// Text the create form would submit, if any
pub fn submittable(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
