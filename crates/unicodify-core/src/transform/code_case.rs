// Unicodify Code Casing
// Identifier casings: camelCase, snake_case, kebab-case and friends

use std::sync::LazyLock;

use regex::Regex;
use smallvec::SmallVec;

use super::id::CodeCasing;

/// Words of an identifier; most identifiers have only a few
pub type Words<'a> = SmallVec<[&'a str; 8]>;

/// A word-splitting strategy refines the words found so far
type SplitStrategy = for<'a> fn(&[&'a str]) -> Words<'a>;

/// Strategies tried in order until one yields more than one word
const STRATEGIES: &[SplitStrategy] = &[split_on_delimiters, split_on_case_boundaries];

static DELIMITER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").expect("valid delimiter regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordCase {
    Lower,
    Upper,
    Capitalized,
}

pub fn apply(text: &str, casing: CodeCasing) -> String {
    let words = tokenize(text);
    let (first, rest, separator) = match casing {
        CodeCasing::CamelCase => (WordCase::Lower, WordCase::Capitalized, ""),
        CodeCasing::UpperCamelCase => (WordCase::Capitalized, WordCase::Capitalized, ""),
        CodeCasing::SnakeCase => (WordCase::Lower, WordCase::Lower, "_"),
        CodeCasing::ConstantCase => (WordCase::Upper, WordCase::Upper, "_"),
        CodeCasing::AdaCase => (WordCase::Capitalized, WordCase::Capitalized, "_"),
        CodeCasing::KebabCase => (WordCase::Lower, WordCase::Lower, "-"),
        CodeCasing::TrainCase => (WordCase::Capitalized, WordCase::Capitalized, "-"),
    };

    let mut output = String::with_capacity(text.len() + words.len());
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            output.push_str(separator);
        }
        let case = if index == 0 { first } else { rest };
        push_word(&mut output, word, case);
    }
    output
}

/// Split text into identifier words.
///
/// Delimited phrases ("hello world", "hello_world") split on their delimiters;
/// a single identifier ("helloWorld", "XMLHttpRequest") splits on case changes.
pub fn tokenize(text: &str) -> Words<'_> {
    let mut words: Words<'_> = SmallVec::new();
    words.push(text);
    for strategy in STRATEGIES {
        words = strategy(&words);
        if words.len() > 1 {
            break;
        }
    }
    words
}

fn split_on_delimiters<'a>(words: &[&'a str]) -> Words<'a> {
    words
        .iter()
        .copied()
        .flat_map(|word| DELIMITER_RUN.split(word))
        .filter(|word| !word.is_empty())
        .collect()
}

fn split_on_case_boundaries<'a>(words: &[&'a str]) -> Words<'a> {
    let mut out = SmallVec::new();
    for &word in words {
        let chars: SmallVec<[(usize, char); 32]> = word.char_indices().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let (index, current) = chars[i];
            let previous = chars[i - 1].1;
            let next_is_lower = chars.get(i + 1).is_some_and(|(_, c)| c.is_lowercase());
            let boundary = current.is_uppercase()
                && (previous.is_lowercase()
                    || previous.is_numeric()
                    || (previous.is_uppercase() && next_is_lower));
            if boundary {
                out.push(&word[start..index]);
                start = index;
            }
        }
        if start < word.len() {
            out.push(&word[start..]);
        }
    }
    out
}

fn push_word(output: &mut String, word: &str, case: WordCase) {
    match case {
        WordCase::Lower => output.push_str(&word.to_lowercase()),
        WordCase::Upper => output.push_str(&word.to_uppercase()),
        WordCase::Capitalized => {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                output.extend(first.to_uppercase());
                output.push_str(&chars.as_str().to_lowercase());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_delimited_phrase() {
        assert_eq!(tokenize("hello world").as_slice(), &["hello", "world"]);
        assert_eq!(tokenize("  hello--big_World ").as_slice(), &["hello", "big", "World"]);
    }

    #[test]
    fn test_tokenize_single_identifier() {
        assert_eq!(tokenize("helloWorld").as_slice(), &["hello", "World"]);
        assert_eq!(tokenize("XMLHttpRequest").as_slice(), &["XML", "Http", "Request"]);
        assert_eq!(tokenize("version2Beta").as_slice(), &["version2", "Beta"]);
        assert_eq!(tokenize("_privateField_").as_slice(), &["private", "Field"]);
    }

    #[test]
    fn test_tokenize_delimiters_win_over_case() {
        // Once delimiters split the text, camelCase inside words is kept.
        assert_eq!(tokenize("hello worldWide").as_slice(), &["hello", "worldWide"]);
    }

    #[test]
    fn test_tokenize_degenerate_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" - ").is_empty());
        assert_eq!(tokenize("word").as_slice(), &["word"]);
    }

    #[test]
    fn test_all_code_casings() {
        let text = "hello big world";
        assert_eq!(apply(text, CodeCasing::CamelCase), "helloBigWorld");
        assert_eq!(apply(text, CodeCasing::UpperCamelCase), "HelloBigWorld");
        assert_eq!(apply(text, CodeCasing::SnakeCase), "hello_big_world");
        assert_eq!(apply(text, CodeCasing::ConstantCase), "HELLO_BIG_WORLD");
        assert_eq!(apply(text, CodeCasing::AdaCase), "Hello_Big_World");
        assert_eq!(apply(text, CodeCasing::KebabCase), "hello-big-world");
        assert_eq!(apply(text, CodeCasing::TrainCase), "Hello-Big-World");
    }

    #[test]
    fn test_convert_between_identifier_styles() {
        assert_eq!(apply("parseHTTPResponse", CodeCasing::SnakeCase), "parse_http_response");
        assert_eq!(apply("MAX_BUFFER_SIZE", CodeCasing::CamelCase), "maxBufferSize");
        assert_eq!(apply("user-id", CodeCasing::UpperCamelCase), "UserId");
        assert_eq!(apply("Größe ändern", CodeCasing::ConstantCase), "GRÖSSE_ÄNDERN");
    }
}
