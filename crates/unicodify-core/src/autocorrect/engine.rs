// Unicodify Autocorrect Engine
// Caret-relative matching on every keystroke, with one-level undo
//
// The engine holds an immutable `MatcherContext` snapshot, swapped whole when
// settings change, and the undo record of the last substitution. Events are
// handled one at a time: an event arriving while another is being evaluated
// (a host re-firing events from inside its own edit primitives) is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, InputKind};
use super::host::{EditHost, HostError, TextField};
use super::numbers::{convert_fraction, convert_number};
use super::quotes::smart_quote;
use super::session::{EditSession, Substitution};
use crate::automaton::{CompiledMatcher, SymbolDictionary};

/// How to break ties between the trigger found before a keystroke and the
/// one the keystroke would create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Commit only if the new trigger would start strictly later
    #[default]
    Absolute,
    /// As `Absolute`, except that with the caret exactly `longest`
    /// characters into the field the new trigger must start at least two
    /// characters later (the lookback windows are offset by one there)
    Legacy,
}

impl BoundaryPolicy {
    /// Whether the trigger starting at `current` is committed although the
    /// keystroke makes another trigger start at `next`. Positions are
    /// absolute character indices.
    pub fn commits(self, current: usize, next: usize, caret: usize, longest: usize) -> bool {
        match self {
            BoundaryPolicy::Legacy if caret == longest => current + 1 < next,
            _ => current < next,
        }
    }
}

/// Settings consumed by the matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocorrectConfig {
    pub enabled: bool,
    /// Smart quotes
    pub quotes: bool,
    /// `N/D` literals to fraction characters
    pub fractions: bool,
    /// Decimals to fractions and multiples of constants
    pub numbers: bool,
    pub boundary: BoundaryPolicy,
    pub dictionary: SymbolDictionary,
}

impl Default for AutocorrectConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            quotes: true,
            fractions: true,
            numbers: true,
            boundary: BoundaryPolicy::default(),
            dictionary: SymbolDictionary::builtin(),
        }
    }
}

/// Text edit at the caret: delete `delete` characters before it, then
/// insert `insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub delete: usize,
    pub insert: String,
}

/// Outcome of handling one input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionResult {
    /// Nothing done; the host performs its default action
    Passthrough,
    /// `deleted` (trigger plus keystroke) became `inserted`
    Replaced { deleted: String, inserted: String },
    /// The last substitution was reverted
    Undone { removed: String, restored: String },
}

impl CorrectionResult {
    /// Whether the host must suppress its default handling of the event
    pub fn prevents_default(&self) -> bool {
        !matches!(self, CorrectionResult::Passthrough)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AutocorrectError {
    #[error("Autocorrect settings have not been received")]
    NotConfigured,

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Compiled settings snapshot, immutable between rebuilds
#[derive(Debug, Clone)]
pub struct MatcherContext {
    enabled: bool,
    quotes: bool,
    fractions: bool,
    numbers: bool,
    boundary: BoundaryPolicy,
    matcher: CompiledMatcher,
}

impl MatcherContext {
    pub fn compile(config: AutocorrectConfig) -> Self {
        Self {
            enabled: config.enabled,
            quotes: config.quotes,
            fractions: config.fractions,
            numbers: config.numbers,
            boundary: config.boundary,
            matcher: CompiledMatcher::compile(config.dictionary),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }

    /// Decide what typing `inserted` at `caret` in `value` should produce
    /// instead, if anything. The returned edit already contains `inserted`.
    pub fn evaluate(&self, value: &str, caret: usize, inserted: &str) -> Option<Edit> {
        let chars: Vec<char> = value.chars().collect();
        let caret = caret.min(chars.len());
        let window = |from: usize| chars[from..caret].iter().collect::<String>();

        let mut insert = inserted.to_string();
        let mut delete = 0;
        let mut output = false;

        let longest = self.matcher.longest();
        let current_from = caret.saturating_sub(longest);
        let current_window = window(current_from);
        let next_from = caret.saturating_sub(longest.saturating_sub(1));
        let next_window = window(next_from) + inserted;

        if self.quotes {
            let previous = caret.checked_sub(1).map(|i| chars[i]);
            if let Some(quote) = smart_quote(inserted, previous) {
                // A straight quote inside a trigger such as ":'(" stays straight
                if self.matcher.continues_trigger(&next_window) {
                    log::trace!("Keeping {:?} straight: {:?} starts a trigger", inserted, next_window);
                } else {
                    insert = quote.to_string();
                    output = true;
                }
            }
        }

        if let Some(current) = self.matcher.symbols().find_suffix(&current_window) {
            if self.matcher.antipatterns().is_match(&next_window) {
                log::trace!("Holding back {:?}: {:?} may become a longer trigger", current.text, next_window);
            } else {
                let commit = match self.matcher.symbols().find_suffix(&next_window) {
                    Some(next) => self.boundary.commits(
                        current_from + current.start,
                        next_from + next.start,
                        caret,
                        longest,
                    ),
                    None => true,
                };
                if let Some(replacement) = self.matcher.replacement(current.text).filter(|_| commit) {
                    insert = format!("{}{}", replacement, inserted);
                    delete = current.len();
                    output = true;
                }
            }
        } else {
            let before = window(0);
            if !output && self.fractions {
                if let Some(edit) = convert_fraction(&before, inserted) {
                    return Some(edit);
                }
            }
            if !output && self.numbers {
                if let Some(edit) = convert_number(&before, inserted) {
                    return Some(edit);
                }
            }
        }

        output.then_some(Edit { delete, insert })
    }
}

/// Clears the in-flight flag when evaluation ends, however it ends
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub struct AutocorrectEngine {
    context: RwLock<Option<Arc<MatcherContext>>>,
    session: Mutex<EditSession>,
    running: AtomicBool,
}

impl AutocorrectEngine {
    /// Engine without settings; insertion events fail until `configure`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AutocorrectConfig) -> Self {
        let engine = Self::new();
        engine.configure(config);
        engine
    }

    /// Compile and install new settings. An evaluation in flight keeps the
    /// snapshot it started with.
    pub fn configure(&self, config: AutocorrectConfig) {
        let context = Arc::new(MatcherContext::compile(config));
        log::info!(
            "Autocorrect {}",
            if context.is_enabled() { "enabled" } else { "disabled" }
        );
        *self.context.write() = Some(context);
    }

    pub fn context(&self) -> Option<Arc<MatcherContext>> {
        self.context.read().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.context().is_some_and(|c| c.is_enabled())
    }

    /// The substitution a backspace would currently revert
    pub fn last_substitution(&self) -> Option<Substitution> {
        self.session.lock().last().cloned()
    }

    /// Route an event to `apply` or `undo`
    pub fn handle<H: EditHost + ?Sized>(
        &self,
        host: &mut H,
        event: &InputEvent,
    ) -> Result<CorrectionResult, AutocorrectError> {
        match event.kind {
            InputKind::DeleteBackward => self.undo(host, event),
            kind if kind.is_insertion() => self.apply(host, event),
            _ => Ok(CorrectionResult::Passthrough),
        }
    }

    /// Substitute a trigger, smart quote, fraction or number completed by an
    /// insertion event
    pub fn apply<H: EditHost + ?Sized>(
        &self,
        host: &mut H,
        event: &InputEvent,
    ) -> Result<CorrectionResult, AutocorrectError> {
        if !event.kind.is_insertion() {
            return Ok(CorrectionResult::Passthrough);
        }
        let context = self.context().ok_or(AutocorrectError::NotConfigured)?;
        if !context.is_enabled() {
            return Ok(CorrectionResult::Passthrough);
        }
        let Some(_guard) = RunningGuard::acquire(&self.running) else {
            log::trace!("Dropping re-entrant {:?} event for {}", event.kind, event.target);
            return Ok(CorrectionResult::Passthrough);
        };
        let Some(inserted) = event.inserted_text() else {
            return Ok(CorrectionResult::Passthrough);
        };
        let Some(caret) = host.caret_position(event.target) else {
            log::trace!("No collapsed caret in {}, skipping", event.target);
            return Ok(CorrectionResult::Passthrough);
        };

        let value = host.field_text(event.target)?;
        let caret = caret.min(value.chars().count());
        let Some(edit) = context.evaluate(&value, caret, &inserted) else {
            return Ok(CorrectionResult::Passthrough);
        };

        let start = caret - edit.delete;
        let removed: String = value.chars().skip(start).take(edit.delete).collect();
        if !removed.is_empty() {
            self.session.lock().clear();
            host.delete_before(event.target, &removed)?;
        }
        host.insert_at_caret(event.target, &edit.insert)?;

        let substitution = Substitution {
            target: event.target,
            caret: start + edit.insert.chars().count(),
            deleted: removed + &inserted,
            inserted: edit.insert,
        };
        log::debug!(
            "Autocorrect: {:?} was replaced with {:?}",
            substitution.deleted,
            substitution.inserted
        );
        let result = CorrectionResult::Replaced {
            deleted: substitution.deleted.clone(),
            inserted: substitution.inserted.clone(),
        };
        self.session.lock().record(substitution);
        Ok(result)
    }

    /// Revert the last substitution on a backspace right after it
    pub fn undo<H: EditHost + ?Sized>(
        &self,
        host: &mut H,
        event: &InputEvent,
    ) -> Result<CorrectionResult, AutocorrectError> {
        if event.kind != InputKind::DeleteBackward {
            return Ok(CorrectionResult::Passthrough);
        }
        if !self.is_enabled() {
            return Ok(CorrectionResult::Passthrough);
        }
        let Some(_guard) = RunningGuard::acquire(&self.running) else {
            return Ok(CorrectionResult::Passthrough);
        };
        let Some(caret) = host.caret_position(event.target) else {
            return Ok(CorrectionResult::Passthrough);
        };

        let Some(last) = self.session.lock().take_matching(event.target, caret) else {
            return Ok(CorrectionResult::Passthrough);
        };
        if !last.inserted.is_empty() {
            host.delete_before(event.target, &last.inserted)?;
        }
        if !last.deleted.is_empty() {
            host.insert_at_caret(event.target, &last.deleted)?;
        }
        log::debug!("Undo autocorrect: {:?} was replaced with {:?}", last.inserted, last.deleted);

        Ok(CorrectionResult::Undone {
            removed: last.inserted,
            restored: last.deleted,
        })
    }

    /// Type `keys` into `field` one character at a time, performing the
    /// default action for every event the engine passes through. A `\u{8}`
    /// is a backspace and `\n` a paragraph break.
    pub fn replay(&self, field: &mut TextField, keys: &str) -> Result<Vec<CorrectionResult>, AutocorrectError> {
        let mut results = Vec::with_capacity(keys.len());
        for key in keys.chars() {
            let event = match key {
                '\u{8}' => InputEvent::delete_backward(field.id()),
                '\n' => InputEvent::insert_paragraph(field.id()),
                _ => InputEvent::insert_text(field.id(), key.to_string()),
            };
            let result = self.handle(field, &event)?;
            if !result.prevents_default() {
                match event.inserted_text() {
                    Some(text) => field.insert(&text),
                    None => field.backspace(),
                }
            }
            results.push(result);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocorrect::event::FieldId;

    const FIELD: FieldId = FieldId(1);

    fn config(entries: &[(&str, &str)]) -> AutocorrectConfig {
        AutocorrectConfig {
            enabled: true,
            dictionary: entries.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn context(entries: &[(&str, &str)]) -> MatcherContext {
        MatcherContext::compile(config(entries))
    }

    fn typed(engine: &AutocorrectEngine, start: &str, keys: &str) -> String {
        let mut field = TextField::new(FIELD, start);
        engine.replay(&mut field, keys).unwrap();
        field.text().to_string()
    }

    fn edit(delete: usize, insert: &str) -> Option<Edit> {
        Some(Edit {
            delete,
            insert: insert.to_string(),
        })
    }

    #[test]
    fn test_boundary_policy_rules() {
        assert!(BoundaryPolicy::Absolute.commits(1, 2, 3, 3));
        assert!(!BoundaryPolicy::Absolute.commits(2, 2, 5, 3));
        assert!(!BoundaryPolicy::Legacy.commits(1, 2, 3, 3));
        assert!(BoundaryPolicy::Legacy.commits(1, 2, 4, 3));
        assert!(BoundaryPolicy::Legacy.commits(1, 3, 3, 3));
    }

    #[test]
    fn test_evaluate_commits_on_next_keystroke() {
        let ctx = context(&[(":)", "🙂"), ("(c)", "©")]);
        assert_eq!(ctx.evaluate("Hello :", 7, ")"), None);
        assert_eq!(ctx.evaluate("Hello :)", 8, " "), edit(2, "🙂 "));
        assert_eq!(ctx.evaluate("(c)", 3, "x"), edit(3, "©x"));
    }

    #[test]
    fn test_evaluate_mid_text_caret() {
        let ctx = context(&[(":)", "🙂")]);
        assert_eq!(ctx.evaluate("a :) b", 4, " "), edit(2, "🙂 "));
    }

    #[test]
    fn test_antipattern_holds_back() {
        let ctx = context(&[(":)", "🙂"), (":)))", "😂")]);
        // ":)" + ")" could still become ":)))"
        assert_eq!(ctx.evaluate("a:)", 3, ")"), None);
        assert_eq!(ctx.evaluate("a:)))", 5, " "), edit(4, "😂 "));
    }

    #[test]
    fn test_longer_overlapping_trigger_waits() {
        let ctx = context(&[("<-", "←"), ("<->", "↔")]);
        // Typing '>' turns "<-" into "<->", which starts at the same place
        assert_eq!(ctx.evaluate("x <-", 4, ">"), None);
        assert_eq!(ctx.evaluate("x <->", 5, " "), edit(3, "↔ "));
    }

    #[test]
    fn test_absolute_boundary_at_window_edge() {
        let ctx = context(&[("<-", "←"), ("-x", "Y"), ("abc", "Z")]);
        assert_eq!(ctx.evaluate("q<-", 3, "x"), edit(2, "←x"));
    }

    #[test]
    fn test_legacy_boundary_at_window_edge() {
        let mut cfg = config(&[("<-", "←"), ("-x", "Y"), ("abc", "Z")]);
        cfg.boundary = BoundaryPolicy::Legacy;
        let ctx = MatcherContext::compile(cfg);
        assert_eq!(ctx.evaluate("q<-", 3, "x"), None);
        assert_eq!(ctx.evaluate("q<-x", 4, " "), edit(2, "Y "));
        // Away from the edge both policies agree
        assert_eq!(ctx.evaluate("qq<-", 4, "x"), edit(2, "←x"));
    }

    #[test]
    fn test_smart_quotes() {
        let ctx = context(&[]);
        assert_eq!(ctx.evaluate("", 0, "\""), edit(0, "“"));
        assert_eq!(ctx.evaluate("say ", 4, "\""), edit(0, "“"));
        assert_eq!(ctx.evaluate("say \"hi", 7, "\""), edit(0, "”"));
        assert_eq!(ctx.evaluate("don", 3, "'"), edit(0, "’"));
    }

    #[test]
    fn test_symbol_supersedes_quote() {
        let ctx = context(&[(":)", "🙂")]);
        assert_eq!(ctx.evaluate(":)", 2, "\""), edit(2, "🙂\""));
    }

    #[test]
    fn test_quote_inside_trigger_stays_straight() {
        let ctx = context(&[(":'(", "😢")]);
        assert_eq!(ctx.evaluate("sad :", 5, "'"), None);
        assert_eq!(ctx.evaluate("sad :'(", 7, " "), edit(3, "😢 "));
        // Not a trigger prefix, so the quote still curls
        assert_eq!(ctx.evaluate("sad ", 4, "'"), edit(0, "‘"));
    }

    #[test]
    fn test_symbol_match_skips_numbers() {
        let ctx = context(&[("1/2", "HALF")]);
        assert_eq!(ctx.evaluate("1/2", 3, " "), edit(3, "HALF "));
    }

    #[test]
    fn test_feature_flags() {
        let mut cfg = config(&[]);
        cfg.quotes = false;
        cfg.fractions = false;
        let ctx = MatcherContext::compile(cfg.clone());
        assert_eq!(ctx.evaluate("", 0, "\""), None);
        assert_eq!(ctx.evaluate("1/2", 3, " "), None);
        assert_eq!(ctx.evaluate("0.5", 3, " "), edit(3, "½ "));

        cfg.numbers = false;
        let ctx = MatcherContext::compile(cfg);
        assert_eq!(ctx.evaluate("0.5", 3, " "), None);
    }

    #[test]
    fn test_not_configured() {
        let engine = AutocorrectEngine::new();
        let mut field = TextField::new(FIELD, "");
        let result = engine.handle(&mut field, &InputEvent::insert_text(FIELD, "a"));
        assert!(matches!(result, Err(AutocorrectError::NotConfigured)));
        // Non-insertion events never fail
        let result = engine.handle(&mut field, &InputEvent::delete_backward(FIELD));
        assert_eq!(result.unwrap(), CorrectionResult::Passthrough);
    }

    #[test]
    fn test_disabled_engine_passes_through() {
        let mut cfg = config(&[(":)", "🙂")]);
        cfg.enabled = false;
        let engine = AutocorrectEngine::with_config(cfg);
        assert_eq!(typed(&engine, "", ":) \""), ":) \"");
    }

    #[test]
    fn test_replace_then_undo() {
        let engine = AutocorrectEngine::with_config(config(&[("(c)", "©"), (":)", "🙂")]));
        let mut field = TextField::new(FIELD, "Hello :)");

        let result = engine.handle(&mut field, &InputEvent::insert_text(FIELD, " ")).unwrap();
        assert_eq!(
            result,
            CorrectionResult::Replaced {
                deleted: ":) ".to_string(),
                inserted: "🙂 ".to_string()
            }
        );
        assert_eq!(field.text(), "Hello 🙂 ");
        assert_eq!(engine.last_substitution().unwrap().caret, 8);

        let result = engine.handle(&mut field, &InputEvent::delete_backward(FIELD)).unwrap();
        assert!(result.prevents_default());
        assert_eq!(field.text(), "Hello :) ");
        assert!(engine.last_substitution().is_none());
    }

    #[test]
    fn test_backspace_elsewhere_disarms_undo() {
        let engine = AutocorrectEngine::with_config(config(&[(":)", "🙂")]));
        let mut field = TextField::new(FIELD, ":)");
        engine.replay(&mut field, " ").unwrap();
        field.set_caret(0);
        let result = engine.handle(&mut field, &InputEvent::delete_backward(FIELD)).unwrap();
        assert_eq!(result, CorrectionResult::Passthrough);
        assert!(engine.last_substitution().is_none());
    }

    #[test]
    fn test_selection_skips_autocorrect() {
        let engine = AutocorrectEngine::with_config(config(&[(":)", "🙂")]));
        let mut field = TextField::new(FIELD, "a:)bc");
        field.select(3, 5);
        let result = engine.handle(&mut field, &InputEvent::insert_text(FIELD, " ")).unwrap();
        assert_eq!(result, CorrectionResult::Passthrough);
        assert_eq!(field.text(), "a:)bc");
    }

    #[test]
    fn test_paragraph_break_completes_trigger() {
        let engine = AutocorrectEngine::with_config(config(&[("->", "→")]));
        assert_eq!(typed(&engine, "a ->", "\n"), "a →\n");
    }

    /// Host whose insert primitive fires another event into the engine
    struct ReentrantHost {
        field: TextField,
        engine: Arc<AutocorrectEngine>,
        nested: Vec<CorrectionResult>,
    }

    impl EditHost for ReentrantHost {
        fn caret_position(&self, field: FieldId) -> Option<usize> {
            self.field.caret_position(field)
        }

        fn field_text(&self, field: FieldId) -> Result<String, HostError> {
            self.field.field_text(field)
        }

        fn delete_before(&mut self, field: FieldId, text: &str) -> Result<(), HostError> {
            self.field.delete_before(field, text)
        }

        fn insert_at_caret(&mut self, field: FieldId, text: &str) -> Result<(), HostError> {
            let other = FieldId(99);
            let mut sibling = TextField::new(other, "x :)");
            let nested = self
                .engine
                .handle(&mut sibling, &InputEvent::insert_text(other, " "))
                .unwrap();
            self.nested.push(nested);
            self.field.insert_at_caret(field, text)
        }
    }

    #[test]
    fn test_reentrant_event_is_dropped() {
        let engine = Arc::new(AutocorrectEngine::with_config(config(&[(":)", "🙂")])));
        let mut host = ReentrantHost {
            field: TextField::new(FIELD, "Hi :)"),
            engine: Arc::clone(&engine),
            nested: Vec::new(),
        };
        let result = engine.handle(&mut host, &InputEvent::insert_text(FIELD, " ")).unwrap();
        assert!(result.prevents_default());
        assert_eq!(host.field.text(), "Hi 🙂 ");
        assert_eq!(host.nested, vec![CorrectionResult::Passthrough]);

        // The guard is released afterwards
        let mut field = TextField::new(FieldId(2), "ok :)");
        let result = engine.handle(&mut field, &InputEvent::insert_text(FieldId(2), "!")).unwrap();
        assert!(result.prevents_default());
    }

    #[test]
    fn test_reconfigure_swaps_snapshot() {
        let engine = AutocorrectEngine::with_config(config(&[(":)", "🙂")]));
        let before = engine.context().unwrap();
        engine.configure(config(&[(":)", "☺")]));
        assert_eq!(before.matcher().replacement(":)"), Some("🙂"));
        assert_eq!(typed(&engine, ":)", " "), "☺ ");
    }
}
