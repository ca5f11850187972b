// Unicodify Menu
// Ordered transformation menu with live-preview labels

use super::engine::TransformEngine;
use super::id::{Casing, CodeCasing, Font, Format, TransformationId, TransformationType};

/// A slot in the menu structure; `None` marks a separator
pub type MenuSlot = Option<TransformationId>;

const fn casing(c: Casing) -> MenuSlot {
    Some(TransformationId::Casing(c))
}

const fn code(c: CodeCasing) -> MenuSlot {
    Some(TransformationId::CodeCasing(c))
}

const fn font(f: Font) -> MenuSlot {
    Some(TransformationId::Font(f))
}

const fn format(f: Format) -> MenuSlot {
    Some(TransformationId::Format(f))
}

/// Menu order, groups separated by `None`
pub const MENU_STRUCTURE: &[MenuSlot] = &[
    casing(Casing::Lowercase),
    casing(Casing::Uppercase),
    casing(Casing::CapitalizeEachWord),
    casing(Casing::SentenceCase),
    casing(Casing::ToggleCase),
    None,
    code(CodeCasing::CamelCase),
    code(CodeCasing::UpperCamelCase),
    code(CodeCasing::SnakeCase),
    code(CodeCasing::ConstantCase),
    code(CodeCasing::AdaCase),
    code(CodeCasing::KebabCase),
    code(CodeCasing::TrainCase),
    None,
    font(Font::Superscript),
    font(Font::SmallCaps),
    font(Font::AllSmallCaps),
    font(Font::Unicase),
    None,
    font(Font::SerifBold),
    font(Font::SerifItalic),
    font(Font::SerifBoldItalic),
    font(Font::SansSerif),
    font(Font::SansSerifBold),
    font(Font::SansSerifItalic),
    font(Font::SansSerifBoldItalic),
    font(Font::Script),
    font(Font::ScriptBold),
    font(Font::Fraktur),
    font(Font::FrakturBold),
    font(Font::Monospace),
    font(Font::DoubleStruck),
    None,
    font(Font::Circled),
    font(Font::CircledBlack),
    font(Font::Squared),
    font(Font::SquaredBlack),
    font(Font::Fullwidth),
    None,
    format(Format::Strikethrough),
    format(Format::ShortStrikethrough),
    format(Format::Underline),
    format(Format::DoubleUnderline),
    format(Format::Overline),
    format(Format::DoubleOverline),
    format(Format::Slash),
];

/// Which families appear in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuFlags {
    pub casing: bool,
    pub code_casing: bool,
    pub font: bool,
    pub format: bool,
}

impl Default for MenuFlags {
    fn default() -> Self {
        Self {
            casing: true,
            code_casing: true,
            font: true,
            format: false,
        }
    }
}

impl MenuFlags {
    pub fn allows(&self, kind: TransformationType) -> bool {
        match kind {
            TransformationType::Casing => self.casing,
            TransformationType::CodeCasing => self.code_casing,
            TransformationType::Font => self.font,
            TransformationType::Format => self.format,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Separator,
    Item {
        id: TransformationId,
        /// Display name rendered through the transformation itself
        label: String,
    },
}

/// Build the menu for the enabled families.
///
/// Separators only appear between two visible groups, never at either end
/// or twice in a row.
pub fn build_menu(engine: &TransformEngine, flags: MenuFlags) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    let mut pending_separator = false;

    for slot in MENU_STRUCTURE {
        let Some(id) = *slot else {
            pending_separator = !entries.is_empty();
            continue;
        };
        if !flags.allows(id.kind()) {
            continue;
        }
        if pending_separator {
            entries.push(MenuEntry::Separator);
            pending_separator = false;
        }
        entries.push(MenuEntry::Item {
            id,
            label: engine.transform(id.label(), id),
        });
    }

    entries
}
