// Unicodify Automaton Module
// Symbol dictionary and the matchers compiled from it

pub mod antipattern;
pub mod trie;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use antipattern::derive_antipatterns;
pub use trie::{Automaton, SuffixMatch};

use crate::data::BUILTIN_SYMBOLS;

/// Trigger to replacement mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolDictionary {
    entries: IndexMap<String, String>,
}

impl SymbolDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in arrows, operators, typography marks and emoticons
    pub fn builtin() -> Self {
        BUILTIN_SYMBOLS.iter().copied().collect()
    }

    /// Add or replace a trigger, returning the previous replacement
    pub fn insert(&mut self, trigger: impl Into<String>, replacement: impl Into<String>) -> Option<String> {
        self.entries.insert(trigger.into(), replacement.into())
    }

    pub fn get(&self, trigger: &str) -> Option<&str> {
        self.entries.get(trigger).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SymbolDictionary {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Read-only matching artifact built from a dictionary
///
/// Rebuilt from scratch whenever the dictionary changes; never edited.
#[derive(Debug, Clone, Default)]
pub struct CompiledMatcher {
    dictionary: SymbolDictionary,
    symbols: Automaton,
    antipatterns: Automaton,
    antipattern_list: Vec<String>,
    /// Every leading part of every trigger, the trigger itself included
    prefixes: Automaton,
    longest: usize,
}

impl CompiledMatcher {
    pub fn compile(dictionary: SymbolDictionary) -> Self {
        let triggers: Vec<&str> = dictionary.triggers().collect();
        let longest = triggers.iter().map(|t| t.chars().count()).max().unwrap_or(0);
        let symbols = Automaton::compile(&triggers);
        let antipattern_list = derive_antipatterns(&triggers);
        let antipatterns = Automaton::compile(&antipattern_list);
        let prefixes = Automaton::compile(triggers.iter().flat_map(|&t| {
            t.char_indices().map(move |(i, c)| &t[..i + c.len_utf8()])
        }));

        log::info!(
            "Compiled {} autocorrections, longest trigger {} characters",
            dictionary.len(),
            longest
        );
        log::debug!("Do not autocorrect for these patterns: {:?}", antipattern_list);

        Self {
            dictionary,
            symbols,
            antipatterns,
            antipattern_list,
            prefixes,
            longest,
        }
    }

    pub fn dictionary(&self) -> &SymbolDictionary {
        &self.dictionary
    }

    /// Matches any trigger ending the examined text
    pub fn symbols(&self) -> &Automaton {
        &self.symbols
    }

    /// Matches text that is still on its way to a longer trigger
    pub fn antipatterns(&self) -> &Automaton {
        &self.antipatterns
    }

    /// Derived antipatterns, in derivation order
    pub fn antipattern_list(&self) -> &[String] {
        &self.antipattern_list
    }

    /// Whether `text` ends partway through (or at the end of) some trigger
    pub fn continues_trigger(&self, text: &str) -> bool {
        self.prefixes.is_match(text)
    }

    /// Longest trigger in characters; the lookback window size
    pub fn longest(&self) -> usize {
        self.longest
    }

    pub fn replacement(&self, trigger: &str) -> Option<&str> {
        self.dictionary.get(trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_keys_unique() {
        let mut dictionary = SymbolDictionary::new();
        assert_eq!(dictionary.insert(":)", "🙂"), None);
        assert_eq!(dictionary.insert(":)", "☺"), Some("🙂".to_string()));
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.get(":)"), Some("☺"));
    }

    #[test]
    fn test_builtin_dictionary() {
        let dictionary = SymbolDictionary::builtin();
        assert_eq!(dictionary.len(), BUILTIN_SYMBOLS.len());
        assert_eq!(dictionary.get("(c)"), Some("©"));
        assert_eq!(dictionary.get("->"), Some("→"));
    }

    #[test]
    fn test_compile_matcher() {
        let dictionary: SymbolDictionary = [(":)", "🙂"), (":)))", "😂"), ("(c)", "©")].into_iter().collect();
        let matcher = CompiledMatcher::compile(dictionary);
        assert_eq!(matcher.longest(), 4);
        assert_eq!(matcher.antipattern_list(), &[":))".to_string()]);
        assert!(matcher.antipatterns().is_match("a:))"));
        assert_eq!(matcher.symbols().find_suffix("x (c)").unwrap().text, "(c)");
        assert_eq!(matcher.replacement(":)"), Some("🙂"));
    }

    #[test]
    fn test_continues_trigger() {
        let dictionary: SymbolDictionary = [(":'(", "😢"), ("->", "→")].into_iter().collect();
        let matcher = CompiledMatcher::compile(dictionary);
        assert!(matcher.continues_trigger("sad :'"));
        assert!(matcher.continues_trigger("a -"));
        assert!(matcher.continues_trigger("x->"));
        assert!(!matcher.continues_trigger("it'"));
        assert!(!matcher.continues_trigger(""));
    }

    #[test]
    fn test_longest_counts_characters_of_symbols_only() {
        let dictionary: SymbolDictionary = [("é->", "x"), ("ab", "y")].into_iter().collect();
        let matcher = CompiledMatcher::compile(dictionary);
        assert_eq!(matcher.longest(), 3);
    }

    #[test]
    fn test_empty_dictionary() {
        let matcher = CompiledMatcher::compile(SymbolDictionary::new());
        assert_eq!(matcher.longest(), 0);
        assert!(matcher.symbols().is_empty());
        assert!(matcher.antipatterns().is_empty());
        assert!(!matcher.symbols().is_match(":)"));
    }

    #[test]
    fn test_dictionary_from_toml_table() {
        let dictionary: SymbolDictionary = toml::from_str("\"->\" = \"→\"\n\":)\" = \"🙂\"\n").unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("->"), Some("→"));
    }
}
