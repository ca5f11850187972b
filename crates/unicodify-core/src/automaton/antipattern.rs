// Unicodify Antipatterns
// Prefixes of longer triggers that must not be corrected on their own

use indexmap::IndexSet;

/// Derive the exception set for a list of triggers.
///
/// For each trigger `x`, find the other trigger `y` occurring earliest in
/// `x` (longest `y` on ties). When more than one character of `x` follows
/// that occurrence, `x` minus all but one of those characters is an
/// antipattern: seeing it means the user is still typing `x`.
///
/// With triggers `:)` and `:)))`, typing `:))` must not turn into `🙂)`,
/// so `:))` is derived.
pub fn derive_antipatterns<S: AsRef<str>>(triggers: &[S]) -> Vec<String> {
    let mut antipatterns = IndexSet::new();

    for x in triggers {
        let x = x.as_ref();
        let x_len = x.chars().count();
        let mut earliest: Option<(usize, usize)> = None;

        for y in triggers {
            let y = y.as_ref();
            if x == y || y.is_empty() {
                continue;
            }
            let Some(byte_index) = x.find(y) else {
                continue;
            };
            let index = x[..byte_index].chars().count();
            let length = y.chars().count();
            earliest = match earliest {
                Some((best, best_len)) if best < index || (best == index && best_len >= length) => {
                    Some((best, best_len))
                }
                _ => Some((index, length)),
            };
        }

        if let Some((index, length)) = earliest {
            let remaining = x_len - (index + length);
            if remaining > 1 {
                let keep = x_len - (remaining - 1);
                antipatterns.insert(x.chars().take(keep).collect::<String>());
            }
        }
    }

    antipatterns.into_iter().collect()
}
