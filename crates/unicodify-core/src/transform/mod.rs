// Unicodify Transform Module
// Pure text transformations: casing, code casing, Unicode fonts and formats

pub mod casing;
pub mod code_case;
pub mod engine;
pub mod font;
pub mod format;
pub mod id;
pub mod menu;

pub use engine::{transform, transform_selection, transform_str, TransformConfig, TransformEngine};
pub use font::{FontTable, SpaceHandling};
pub use id::{Casing, CodeCasing, Font, Format, TransformationId, TransformationType};
pub use menu::{build_menu, MenuEntry, MenuFlags, MENU_STRUCTURE};

/// Errors raised while resolving a textual transformation id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("Unknown transformation: {0}")]
    UnknownTransformation(String),

    #[error("Unknown font: {0}")]
    UnknownFont(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),
}
