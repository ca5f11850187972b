// Unicodify Casing
// Lowercase, uppercase, word/sentence capitalisation and case toggling

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::id::Casing;

/// Characters whose uppercase mapping differs from themselves
static CHANGES_WHEN_UPPERCASED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Changes_When_Uppercased}$").expect("valid property regex"));

/// Characters whose lowercase mapping differs from themselves
static CHANGES_WHEN_LOWERCASED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Changes_When_Lowercased}$").expect("valid property regex"));

pub fn apply(text: &str, casing: Casing) -> String {
    match casing {
        Casing::Lowercase => text.to_lowercase(),
        Casing::Uppercase => text.to_uppercase(),
        Casing::CapitalizeEachWord => capitalize_each_word(text),
        Casing::SentenceCase => sentence_case(text),
        Casing::ToggleCase => toggle_case(text),
    }
}

/// Lowercase everything, then uppercase the first code point of every word
/// segment. Segments follow UAX #29, so "don't" stays one word.
fn capitalize_each_word(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut output = String::with_capacity(lowered.len());
    for segment in lowered.split_word_bounds() {
        upper_first(segment, &mut output);
    }
    output
}

/// Uppercase the first letter of every sentence and lowercase the rest.
/// Sentences are found on the original text, since UAX #29 treats a period
/// followed by a lowercase word as an abbreviation rather than a boundary.
fn sentence_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for sentence in text.split_sentence_bounds() {
        let lowered = sentence.to_lowercase();
        match lowered.char_indices().find(|(_, c)| c.is_alphanumeric()) {
            Some((index, c)) if c.is_alphabetic() => {
                output.push_str(&lowered[..index]);
                upper_first(&lowered[index..], &mut output);
            }
            _ => output.push_str(&lowered),
        }
    }
    output
}

fn upper_first(segment: &str, output: &mut String) {
    let mut chars = segment.chars();
    if let Some(first) = chars.next() {
        output.extend(first.to_uppercase());
        output.push_str(chars.as_str());
    }
}

/// Flip each character individually. Characters without a case mapping in
/// either direction (digits, symbols, most CJK) pass through.
fn toggle_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let encoded = c.encode_utf8(&mut buf);
        if CHANGES_WHEN_UPPERCASED.is_match(encoded) {
            output.extend(c.to_uppercase());
        } else if CHANGES_WHEN_LOWERCASED.is_match(encoded) {
            output.extend(c.to_lowercase());
        } else {
            output.push(c);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_and_upper() {
        assert_eq!(apply("Hello World", Casing::Lowercase), "hello world");
        assert_eq!(apply("Hello World", Casing::Uppercase), "HELLO WORLD");
        assert_eq!(apply("straße", Casing::Uppercase), "STRASSE");
    }

    #[test]
    fn test_uppercase_is_idempotent() {
        let once = apply("Grüße, ǆemal ΣΊΣΥΦΟΣ", Casing::Uppercase);
        assert_eq!(apply(&once, Casing::Uppercase), once);
    }

    #[test]
    fn test_capitalize_each_word() {
        assert_eq!(apply("hELLO wORLD", Casing::CapitalizeEachWord), "Hello World");
        assert_eq!(apply("don't stop", Casing::CapitalizeEachWord), "Don't Stop");
        assert_eq!(apply("(quoted) well-known", Casing::CapitalizeEachWord), "(Quoted) Well-Known");
        assert_eq!(apply("3rd place", Casing::CapitalizeEachWord), "3rd Place");
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(
            apply("THIS IS ONE. AND THIS IS TWO! \"QUOTED\" THREE?", Casing::SentenceCase),
            "This is one. And this is two! \"Quoted\" three?"
        );
        assert_eq!(apply("42 is the answer.", Casing::SentenceCase), "42 is the answer.");
    }

    #[test]
    fn test_toggle_case() {
        assert_eq!(apply("Hello World 123!", Casing::ToggleCase), "hELLO wORLD 123!");
        assert_eq!(apply("ÀéÎ", Casing::ToggleCase), "àÉî");
        assert_eq!(apply("日本語 + ∑", Casing::ToggleCase), "日本語 + ∑");
    }
}
