// Unicodify Edit Session
// One-level undo record of the last substitution

use super::event::FieldId;

/// A committed substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub target: FieldId,
    /// Text now in the field, ending at `caret`
    pub inserted: String,
    /// Text it replaced, including the keystroke that triggered it
    pub deleted: String,
    /// Caret position (in characters) right after the substitution
    pub caret: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    last: Option<Substitution>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, substitution: Substitution) {
        self.last = Some(substitution);
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&Substitution> {
        self.last.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.last.is_some()
    }

    /// Take the record if it was made in `target` with the caret still
    /// right after it. The record is cleared either way.
    pub fn take_matching(&mut self, target: FieldId, caret: usize) -> Option<Substitution> {
        self.last
            .take()
            .filter(|last| last.target == target && last.caret == caret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substitution() -> Substitution {
        Substitution {
            target: FieldId(7),
            inserted: "🙂 ".to_string(),
            deleted: ":) ".to_string(),
            caret: 8,
        }
    }

    #[test]
    fn test_take_matching() {
        let mut session = EditSession::new();
        session.record(substitution());
        assert!(session.is_armed());
        assert_eq!(session.take_matching(FieldId(7), 8), Some(substitution()));
        assert!(!session.is_armed());
    }

    #[test]
    fn test_mismatch_clears() {
        let mut session = EditSession::new();
        session.record(substitution());
        assert_eq!(session.take_matching(FieldId(7), 5), None);
        assert!(session.last().is_none());

        session.record(substitution());
        assert_eq!(session.take_matching(FieldId(8), 8), None);
        assert!(!session.is_armed());
    }
}
