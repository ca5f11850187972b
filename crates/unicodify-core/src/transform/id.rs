// Unicodify Transformation Identifiers
// Typed ids for every transformation, resolved once from their textual form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::TransformError;

/// Separator between the family namespace and the key in a textual id,
/// e.g. `font:serif-bold`.
pub const NAMESPACE_SEPARATOR: char = ':';

/// The four transformation families
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TransformationType {
    Casing,
    CodeCasing,
    Font,
    Format,
}

impl TransformationType {
    /// Derive the family of a textual transformation id from its namespace
    pub fn of(id: &str) -> Result<Self, TransformError> {
        let (namespace, _) = id
            .split_once(NAMESPACE_SEPARATOR)
            .ok_or_else(|| TransformError::UnknownTransformation(id.to_string()))?;
        namespace
            .parse()
            .map_err(|_| TransformError::UnknownTransformation(id.to_string()))
    }
}

/// Natural-language casing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Casing {
    Lowercase,
    Uppercase,
    CapitalizeEachWord,
    SentenceCase,
    ToggleCase,
}

impl Casing {
    pub fn label(self) -> &'static str {
        match self {
            Casing::Lowercase => "Lowercase",
            Casing::Uppercase => "Uppercase",
            Casing::CapitalizeEachWord => "Capitalize Each Word",
            Casing::SentenceCase => "Sentence case",
            Casing::ToggleCase => "Toggle Case",
        }
    }
}

/// Programming identifier casing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CodeCasing {
    CamelCase,
    UpperCamelCase,
    SnakeCase,
    ConstantCase,
    AdaCase,
    KebabCase,
    TrainCase,
}

impl CodeCasing {
    /// Menu label, written in the casing it produces
    pub fn label(self) -> &'static str {
        match self {
            CodeCasing::CamelCase => "camel case",
            CodeCasing::UpperCamelCase => "upper camel case",
            CodeCasing::SnakeCase => "snake case",
            CodeCasing::ConstantCase => "constant case",
            CodeCasing::AdaCase => "ada case",
            CodeCasing::KebabCase => "kebab case",
            CodeCasing::TrainCase => "train case",
        }
    }
}

/// Unicode letterform fonts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Font {
    Superscript,
    SmallCaps,
    AllSmallCaps,
    Unicase,
    SerifBold,
    SerifItalic,
    SerifBoldItalic,
    SansSerif,
    SansSerifBold,
    SansSerifItalic,
    SansSerifBoldItalic,
    Script,
    ScriptBold,
    Fraktur,
    FrakturBold,
    Monospace,
    DoubleStruck,
    Circled,
    CircledBlack,
    Squared,
    SquaredBlack,
    Fullwidth,
}

impl Font {
    pub fn label(self) -> &'static str {
        match self {
            Font::Superscript => "Superscript",
            Font::SmallCaps => "Small Caps",
            Font::AllSmallCaps => "All Small Caps",
            Font::Unicase => "Unicase",
            Font::SerifBold => "Serif bold",
            Font::SerifItalic => "Serif italic",
            Font::SerifBoldItalic => "Serif bold italic",
            Font::SansSerif => "Sans-serif",
            Font::SansSerifBold => "Sans-serif bold",
            Font::SansSerifItalic => "Sans-serif italic",
            Font::SansSerifBoldItalic => "Sans-serif bold italic",
            Font::Script => "Script",
            Font::ScriptBold => "Script bold",
            Font::Fraktur => "Fraktur",
            Font::FrakturBold => "Fraktur bold",
            Font::Monospace => "Monospace",
            Font::DoubleStruck => "Double-struck",
            Font::Circled => "Circled",
            Font::CircledBlack => "Circled (black)",
            Font::Squared => "Squared",
            Font::SquaredBlack => "Squared (black)",
            Font::Fullwidth => "Fullwidth",
        }
    }
}

/// Combining-mark formats
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    Strikethrough,
    ShortStrikethrough,
    Underline,
    DoubleUnderline,
    Overline,
    DoubleOverline,
    Slash,
}

impl Format {
    /// The combining character appended after each grapheme cluster
    pub fn combining_mark(self) -> char {
        match self {
            Format::Strikethrough => '\u{0336}',
            Format::ShortStrikethrough => '\u{0335}',
            Format::Underline => '\u{0332}',
            Format::DoubleUnderline => '\u{0333}',
            Format::Overline => '\u{0305}',
            Format::DoubleOverline => '\u{033F}',
            Format::Slash => '\u{0338}',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Format::Strikethrough => "Strikethrough",
            Format::ShortStrikethrough => "Short strikethrough",
            Format::Underline => "Underline",
            Format::DoubleUnderline => "Double underline",
            Format::Overline => "Overline",
            Format::DoubleOverline => "Double overline",
            Format::Slash => "Slash",
        }
    }
}

/// A transformation, tagged with its family
///
/// Textual ids have the form `<family>:<key>`, for example `casing:uppercase`,
/// `code-casing:snake-case`, `font:double-struck` or `format:underline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformationId {
    Casing(Casing),
    CodeCasing(CodeCasing),
    Font(Font),
    Format(Format),
}

impl TransformationId {
    pub fn kind(self) -> TransformationType {
        match self {
            TransformationId::Casing(_) => TransformationType::Casing,
            TransformationId::CodeCasing(_) => TransformationType::CodeCasing,
            TransformationId::Font(_) => TransformationType::Font,
            TransformationId::Format(_) => TransformationType::Format,
        }
    }

    /// Key part of the textual id (without namespace)
    pub fn key(self) -> &'static str {
        match self {
            TransformationId::Casing(c) => c.into(),
            TransformationId::CodeCasing(c) => c.into(),
            TransformationId::Font(f) => f.into(),
            TransformationId::Format(f) => f.into(),
        }
    }

    /// Human readable name, before the transformation is applied to it
    pub fn label(self) -> &'static str {
        match self {
            TransformationId::Casing(c) => c.label(),
            TransformationId::CodeCasing(c) => c.label(),
            TransformationId::Font(f) => f.label(),
            TransformationId::Format(f) => f.label(),
        }
    }

    /// Every known transformation, family by family
    pub fn all() -> impl Iterator<Item = TransformationId> {
        Casing::iter()
            .map(TransformationId::Casing)
            .chain(CodeCasing::iter().map(TransformationId::CodeCasing))
            .chain(Font::iter().map(TransformationId::Font))
            .chain(Format::iter().map(TransformationId::Format))
    }
}

impl fmt::Display for TransformationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind(), NAMESPACE_SEPARATOR, self.key())
    }
}

impl FromStr for TransformationId {
    type Err = TransformError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let kind = TransformationType::of(id)?;
        let key = id
            .split_once(NAMESPACE_SEPARATOR)
            .map(|(_, key)| key)
            .unwrap_or_default();
        let unknown = || TransformError::UnknownTransformation(id.to_string());

        match kind {
            TransformationType::Casing => key.parse().map(TransformationId::Casing).map_err(|_| unknown()),
            TransformationType::CodeCasing => key
                .parse()
                .map(TransformationId::CodeCasing)
                .map_err(|_| unknown()),
            TransformationType::Font => key
                .parse()
                .map(TransformationId::Font)
                .map_err(|_| TransformError::UnknownFont(key.to_string())),
            TransformationType::Format => key
                .parse()
                .map(TransformationId::Format)
                .map_err(|_| TransformError::UnknownFormat(key.to_string())),
        }
    }
}

impl From<Casing> for TransformationId {
    fn from(value: Casing) -> Self {
        TransformationId::Casing(value)
    }
}

impl From<CodeCasing> for TransformationId {
    fn from(value: CodeCasing) -> Self {
        TransformationId::CodeCasing(value)
    }
}

impl From<Font> for TransformationId {
    fn from(value: Font) -> Self {
        TransformationId::Font(value)
    }
}

impl From<Format> for TransformationId {
    fn from(value: Format) -> Self {
        TransformationId::Format(value)
    }
}
