// Unicodify Smart Quotes

/// Curly replacement for a straight quote typed after `previous`.
///
/// Opening after whitespace or at the start of the field, closing otherwise.
pub fn smart_quote(typed: &str, previous: Option<char>) -> Option<&'static str> {
    let opening = previous.map_or(true, char::is_whitespace);
    match (typed, opening) {
        ("'", true) => Some("\u{2018}"),
        ("'", false) => Some("\u{2019}"),
        ("\"", true) => Some("\u{201C}"),
        ("\"", false) => Some("\u{201D}"),
        _ => None,
    }
}
