// Unicodify Static Data
// Lookup tables shared by the transformation engine and the autocorrect matcher

pub mod fonts;
pub mod symbols;

pub use symbols::BUILTIN_SYMBOLS;
