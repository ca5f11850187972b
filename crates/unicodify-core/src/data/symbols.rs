// Unicodify Built-in Symbols
// Trigger -> replacement pairs compiled into the autocorrect matcher

/// Built-in autocorrections: (typed trigger, replacement)
///
/// A trigger is replaced once the character following it has been typed, so
/// overlapping triggers ("<-", "<->", "<-->") resolve to the longest one.
pub const BUILTIN_SYMBOLS: &[(&str, &str)] = &[
    // Arrows
    ("->", "→"),
    ("<-", "←"),
    ("<->", "↔"),
    ("=>", "⇒"),
    ("<=>", "⇔"),
    ("-->", "⟶"),
    ("<--", "⟵"),
    ("<-->", "⟷"),
    ("==>", "⟹"),
    ("<==", "⟸"),
    ("<==>", "⟺"),
    // Comparison and math
    ("<=", "≤"),
    (">=", "≥"),
    ("!=", "≠"),
    ("~=", "≈"),
    ("+-", "±"),
    ("-+", "∓"),
    ("<<", "«"),
    (">>", "»"),
    // Typography
    ("...", "…"),
    ("--", "–"),
    ("---", "—"),
    ("(c)", "©"),
    ("(C)", "©"),
    ("(r)", "®"),
    ("(R)", "®"),
    ("(tm)", "™"),
    ("(TM)", "™"),
    ("(p)", "℗"),
    ("(P)", "℗"),
    ("c/o", "℅"),
    // Emoticons
    (":)", "🙂"),
    (":-)", "🙂"),
    (":(", "🙁"),
    (":-(", "🙁"),
    (";)", "😉"),
    (";-)", "😉"),
    (":D", "😀"),
    (":-D", "😀"),
    (":P", "😛"),
    (":-P", "😛"),
    (":'(", "😢"),
    (":O", "😮"),
    (":-O", "😮"),
    (":|", "😐"),
    (":-|", "😐"),
    (":*", "😘"),
    ("<3", "❤"),
    ("</3", "💔"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_triggers_are_unique() {
        let mut seen = HashSet::new();
        for (trigger, _) in BUILTIN_SYMBOLS {
            assert!(seen.insert(*trigger), "duplicate trigger {:?}", trigger);
        }
    }

    #[test]
    fn test_builtin_triggers_are_ascii() {
        for (trigger, replacement) in BUILTIN_SYMBOLS {
            assert!(trigger.is_ascii());
            assert!(!replacement.is_empty());
        }
    }
}
