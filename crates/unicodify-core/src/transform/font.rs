// Unicodify Fonts
// Printable-ASCII substitution through Unicode letterform tables

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::id::Font;
use crate::data::fonts;

const UPPER_LETTERS: usize = 26;
const LETTERS: usize = 26 + 26;
/// Full printable ASCII, U+0020 through U+007E
const PRINTABLE: usize = 95;

/// Whether U+0020 SPACE goes through 95-entry tables
///
/// `Preserve` leaves spaces alone and substitutes U+0021..=U+007E only;
/// `Substitute` also maps the space (fullwidth turns it into U+3000).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceHandling {
    #[default]
    Preserve,
    Substitute,
}

impl SpaceHandling {
    fn first_substituted(self) -> u32 {
        match self {
            SpaceHandling::Preserve => 0x21,
            SpaceHandling::Substitute => 0x20,
        }
    }
}

/// Replacement characters of one font
///
/// The table length decides which classes are covered:
/// 26 = A-Z (lowercase folds onto it), 36 = A-Z + 0-9, 52 = A-Z + a-z,
/// 62 = A-Z + a-z + 0-9, 95 = every printable ASCII character from space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontTable {
    chars: Vec<char>,
}

impl FontTable {
    /// Build a table, rejecting lengths that cover no known layout
    pub fn new(letters: &str) -> Option<Self> {
        let chars: Vec<char> = letters.chars().collect();
        match chars.len() {
            UPPER_LETTERS | 36 | LETTERS | 62 | PRINTABLE => Some(Self { chars }),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Substitute a single character, or return it unchanged
    pub fn substitute(&self, c: char, space: SpaceHandling) -> char {
        let code = c as u32;
        if !(space.first_substituted()..=0x7E).contains(&code) {
            return c;
        }

        let index = if self.chars.len() == PRINTABLE {
            Some((code - 0x20) as usize)
        } else {
            match c {
                'A'..='Z' => Some(offset(c, 'A')),
                'a'..='z' => match self.chars.len() {
                    UPPER_LETTERS | 36 => Some(offset(c, 'a')),
                    LETTERS | 62 => Some(offset(c, 'a') + UPPER_LETTERS),
                    _ => None,
                },
                '0'..='9' => match self.chars.len() {
                    36 => Some(offset(c, '0') + UPPER_LETTERS),
                    62 => Some(offset(c, '0') + LETTERS),
                    _ => None,
                },
                _ => None,
            }
        };

        index.and_then(|i| self.chars.get(i).copied()).unwrap_or(c)
    }

    pub fn apply(&self, text: &str, space: SpaceHandling) -> String {
        text.chars().map(|c| self.substitute(c, space)).collect()
    }
}

fn offset(c: char, base: char) -> usize {
    (c as u32 - base as u32) as usize
}

static TABLES: LazyLock<HashMap<Font, FontTable>> = LazyLock::new(|| {
    Font::iter()
        .filter_map(|font| FontTable::new(letters(font)).map(|table| (font, table)))
        .collect()
});

fn letters(font: Font) -> &'static str {
    match font {
        Font::Superscript => fonts::SUPERSCRIPT,
        Font::SmallCaps => fonts::SMALL_CAPS,
        Font::AllSmallCaps => fonts::ALL_SMALL_CAPS,
        Font::Unicase => fonts::UNICASE,
        Font::SerifBold => fonts::SERIF_BOLD,
        Font::SerifItalic => fonts::SERIF_ITALIC,
        Font::SerifBoldItalic => fonts::SERIF_BOLD_ITALIC,
        Font::SansSerif => fonts::SANS_SERIF,
        Font::SansSerifBold => fonts::SANS_SERIF_BOLD,
        Font::SansSerifItalic => fonts::SANS_SERIF_ITALIC,
        Font::SansSerifBoldItalic => fonts::SANS_SERIF_BOLD_ITALIC,
        Font::Script => fonts::SCRIPT,
        Font::ScriptBold => fonts::SCRIPT_BOLD,
        Font::Fraktur => fonts::FRAKTUR,
        Font::FrakturBold => fonts::FRAKTUR_BOLD,
        Font::Monospace => fonts::MONOSPACE,
        Font::DoubleStruck => fonts::DOUBLE_STRUCK,
        Font::Circled => fonts::CIRCLED,
        Font::CircledBlack => fonts::CIRCLED_BLACK,
        Font::Squared => fonts::SQUARED,
        Font::SquaredBlack => fonts::SQUARED_BLACK,
        Font::Fullwidth => fonts::FULLWIDTH,
    }
}

/// Table for a font, if its data has a valid layout
pub fn table(font: Font) -> Option<&'static FontTable> {
    TABLES.get(&font)
}

pub fn apply(text: &str, font: Font, space: SpaceHandling) -> String {
    match table(font) {
        Some(table) => table.apply(text, space),
        None => {
            log::warn!("Font {} has no usable table, leaving text unchanged", font);
            text.to_string()
        }
    }
}
