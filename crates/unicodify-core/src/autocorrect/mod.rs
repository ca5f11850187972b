// Unicodify Autocorrect Module
// Keystroke-driven substitution of symbols, quotes, fractions and numbers

pub mod engine;
pub mod event;
pub mod host;
pub mod numbers;
pub mod quotes;
pub mod session;

pub use engine::{
    AutocorrectConfig, AutocorrectEngine, AutocorrectError, BoundaryPolicy, CorrectionResult, Edit,
    MatcherContext,
};
pub use event::{FieldId, InputEvent, InputKind};
pub use host::{grapheme_count, EditHost, HostError, TextField};
pub use session::{EditSession, Substitution};
