// Unicodify Edit Host
// Edit primitives supplied by whatever owns the text field
//
// The matcher never touches text directly. It reads the caret and the field
// contents and asks the host to delete and insert, so a browser bridge, an
// editor plugin or the in-memory `TextField` below can all drive it.

use unicode_segmentation::UnicodeSegmentation;

use super::event::FieldId;

/// Errors reported by a host while editing a field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Unknown field: {0}")]
    UnknownField(FieldId),

    #[error("Nothing selected in {0}")]
    NothingSelected(FieldId),
}

/// Access to an editable field
///
/// Positions are character indices. All operations are synchronous and
/// atomic from the matcher's point of view.
pub trait EditHost {
    /// Caret position, or `None` unless the selection is a collapsed caret
    fn caret_position(&self, field: FieldId) -> Option<usize>;

    /// Full text of the field
    fn field_text(&self, field: FieldId) -> Result<String, HostError>;

    /// Delete `text`, which ends at the caret
    fn delete_before(&mut self, field: FieldId, text: &str) -> Result<(), HostError>;

    /// Insert `text` at the caret and move the caret after it
    fn insert_at_caret(&mut self, field: FieldId, text: &str) -> Result<(), HostError>;
}

/// User-perceived characters in `text`, ignoring zero width joiners
///
/// Hosts whose delete primitive removes one cluster at a time issue this
/// many deletes.
pub fn grapheme_count(text: &str) -> usize {
    text.replace('\u{200D}', "").graphemes(true).count()
}

/// In-memory single-line or multi-line text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    id: FieldId,
    text: String,
    /// Selection as (anchor, caret) character indices; equal when collapsed
    selection: (usize, usize),
}

impl TextField {
    /// Field holding `text` with the caret at its end
    pub fn new(id: FieldId, text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            id,
            text,
            selection: (end, end),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Caret position when the selection is collapsed
    pub fn caret(&self) -> Option<usize> {
        let (anchor, caret) = self.selection;
        (anchor == caret).then_some(caret)
    }

    pub fn set_caret(&mut self, position: usize) {
        let position = position.min(self.len());
        self.selection = (position, position);
    }

    pub fn select(&mut self, anchor: usize, caret: usize) {
        let len = self.len();
        self.selection = (anchor.min(len), caret.min(len));
    }

    fn byte_offset(&self, position: usize) -> usize {
        self.text
            .char_indices()
            .nth(position)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn selected_range(&self) -> (usize, usize) {
        let (anchor, caret) = self.selection;
        (anchor.min(caret), anchor.max(caret))
    }

    /// Replace the selection (or insert at the caret) with `text`
    pub fn insert(&mut self, text: &str) {
        let (start, end) = self.selected_range();
        let (from, to) = (self.byte_offset(start), self.byte_offset(end));
        self.text.replace_range(from..to, text);
        self.set_caret(start + text.chars().count());
    }

    /// Default backspace: delete the selection, or one grapheme cluster
    pub fn backspace(&mut self) {
        let (start, end) = self.selected_range();
        if start != end {
            let (from, to) = (self.byte_offset(start), self.byte_offset(end));
            self.text.replace_range(from..to, "");
            self.set_caret(start);
            return;
        }
        self.delete_clusters_before(1);
    }

    fn delete_clusters_before(&mut self, count: usize) {
        let Some(caret) = self.caret() else {
            return;
        };
        let to = self.byte_offset(caret);
        let from = self.text[..to]
            .grapheme_indices(true)
            .rev()
            .take(count)
            .last()
            .map_or(to, |(offset, _)| offset);
        let removed = self.text[from..to].chars().count();
        self.text.replace_range(from..to, "");
        self.set_caret(caret - removed);
    }

    fn check(&self, field: FieldId) -> Result<(), HostError> {
        if field == self.id {
            Ok(())
        } else {
            Err(HostError::UnknownField(field))
        }
    }
}

impl EditHost for TextField {
    fn caret_position(&self, field: FieldId) -> Option<usize> {
        self.check(field).ok()?;
        self.caret()
    }

    fn field_text(&self, field: FieldId) -> Result<String, HostError> {
        self.check(field)?;
        Ok(self.text.clone())
    }

    fn delete_before(&mut self, field: FieldId, text: &str) -> Result<(), HostError> {
        self.check(field)?;
        let caret = self.caret().ok_or(HostError::NothingSelected(field))?;
        let to = self.byte_offset(caret);
        if self.text[..to].ends_with(text) {
            self.text.replace_range(to - text.len()..to, "");
            self.set_caret(caret - text.chars().count());
        } else {
            self.delete_clusters_before(grapheme_count(text));
        }
        Ok(())
    }

    fn insert_at_caret(&mut self, field: FieldId, text: &str) -> Result<(), HostError> {
        self.check(field)?;
        self.insert(text);
        Ok(())
    }
}
