// Unicodify Core Library
// Unicode text transformations and keystroke autocorrect

pub mod autocorrect;
pub mod automaton;
pub mod data;
pub mod settings;
pub mod transform;

pub use autocorrect::{
    grapheme_count, AutocorrectConfig, AutocorrectEngine, AutocorrectError, BoundaryPolicy,
    CorrectionResult, EditHost, FieldId, HostError, InputEvent, InputKind, TextField,
};
pub use automaton::{Automaton, CompiledMatcher, SymbolDictionary};
pub use settings::{Settings, SettingsError};
pub use transform::{
    build_menu, transform, transform_selection, transform_str, MenuEntry, MenuFlags,
    SpaceHandling, TransformConfig, TransformEngine, TransformError, TransformationId,
    TransformationType,
};
