// Unicodify Input Events
// Editing events delivered by the host, one per keystroke or composition

use std::borrow::Cow;
use std::fmt;

/// Identity of an editable field, assigned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Plain text typed at the caret
    InsertText,
    /// Text committed by an input method
    InsertComposition,
    /// Enter in a multi-line field
    InsertParagraph,
    /// Shift+Enter style soft break
    InsertLineBreak,
    /// Backspace
    DeleteBackward,
    /// Anything else (forward delete, paste, drag and drop, ...)
    Other,
}

impl InputKind {
    /// Events that may trigger a substitution
    pub fn is_insertion(self) -> bool {
        matches!(
            self,
            InputKind::InsertText
                | InputKind::InsertComposition
                | InputKind::InsertParagraph
                | InputKind::InsertLineBreak
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub data: Option<String>,
    pub target: FieldId,
}

impl InputEvent {
    pub fn new(kind: InputKind, data: Option<String>, target: FieldId) -> Self {
        Self { kind, data, target }
    }

    pub fn insert_text(target: FieldId, text: impl Into<String>) -> Self {
        Self::new(InputKind::InsertText, Some(text.into()), target)
    }

    pub fn insert_paragraph(target: FieldId) -> Self {
        Self::new(InputKind::InsertParagraph, None, target)
    }

    pub fn delete_backward(target: FieldId) -> Self {
        Self::new(InputKind::DeleteBackward, None, target)
    }

    /// Text this event inserts. Paragraph and line breaks insert `\n`.
    pub fn inserted_text(&self) -> Option<Cow<'_, str>> {
        match self.kind {
            InputKind::InsertParagraph | InputKind::InsertLineBreak => Some(Cow::Borrowed("\n")),
            InputKind::InsertText | InputKind::InsertComposition => {
                self.data.as_deref().filter(|d| !d.is_empty()).map(Cow::Borrowed)
            }
            InputKind::DeleteBackward | InputKind::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_text() {
        let field = FieldId(1);
        assert_eq!(InputEvent::insert_text(field, "a").inserted_text().as_deref(), Some("a"));
        assert_eq!(InputEvent::insert_paragraph(field).inserted_text().as_deref(), Some("\n"));
        let line_break = InputEvent::new(InputKind::InsertLineBreak, Some("ignored".into()), field);
        assert_eq!(line_break.inserted_text().as_deref(), Some("\n"));
        assert_eq!(InputEvent::delete_backward(field).inserted_text(), None);
        assert_eq!(InputEvent::insert_text(field, "").inserted_text(), None);
    }

    #[test]
    fn test_insertion_kinds() {
        assert!(InputKind::InsertComposition.is_insertion());
        assert!(!InputKind::DeleteBackward.is_insertion());
        assert!(!InputKind::Other.is_insertion());
    }
}
