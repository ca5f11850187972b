// Unicodify Number Conversion
// Vulgar fractions, fraction slashes and multiples of mathematical constants

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::engine::Edit;

/// Precomposed fractions, in lookup order
pub const VULGAR_FRACTIONS: &[(&str, u64, u64)] = &[
    ("¼", 1, 4),
    ("½", 1, 2),
    ("¾", 3, 4),
    ("⅐", 1, 7),
    ("⅑", 1, 9),
    ("⅒", 1, 10),
    ("⅓", 1, 3),
    ("⅔", 2, 3),
    ("⅕", 1, 5),
    ("⅖", 2, 5),
    ("⅗", 3, 5),
    ("⅘", 4, 5),
    ("⅙", 1, 6),
    ("⅚", 5, 6),
    ("⅛", 1, 8),
    ("⅜", 3, 8),
    ("⅝", 5, 8),
    ("⅞", 7, 8),
];

/// Constants a decimal may be a multiple of
pub const CONSTANTS: &[(&str, f64)] = &[("π", std::f64::consts::PI), ("e", std::f64::consts::E)];

pub const FRACTION_SLASH: char = '\u{2044}';

/// 2^53 - 1, the largest integer every f64 below it represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)/([0-9]+)$").expect("valid fraction regex"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(\.[0-9]+)?$").expect("valid number regex"));

/// Regex match at the end of `text`, rejected when the literal continues a
/// longer one to its left (`1/2/3`, `10.5.2`)
fn trailing<'t>(regex: &Regex, text: &'t str, continuation: char) -> Option<Captures<'t>> {
    let captures = regex.captures(text)?;
    let start = captures.get(0)?.start();
    if text[..start].ends_with(continuation) {
        return None;
    }
    Some(captures)
}

/// Convert an `N/D` literal ending `before` once `inserted` finishes it
pub fn convert_fraction(before: &str, inserted: &str) -> Option<Edit> {
    if inserted == "/" {
        return None;
    }
    let captures = trailing(&FRACTION, before, '/')?;
    let extended = format!("{}{}", before, inserted);
    if trailing(&FRACTION, &extended, '/').is_some() {
        return None;
    }

    let fraction = captures.get(0)?.as_str();
    let label = fraction_label(captures.get(1)?.as_str(), captures.get(2)?.as_str());
    diff_edit(fraction, &label, inserted)
}

/// Precomposed glyph for `numerator/denominator`, or the pair joined by
/// U+2044 FRACTION SLASH
pub fn fraction_label(numerator: &str, denominator: &str) -> String {
    match (numerator.parse::<u64>(), denominator.parse::<u64>()) {
        (Ok(n), Ok(d)) => VULGAR_FRACTIONS
            .iter()
            .find(|&&(_, vn, vd)| vn == n && vd == d)
            .map(|&(glyph, _, _)| glyph.to_string())
            .unwrap_or_else(|| format!("{}{}{}", n, FRACTION_SLASH, d)),
        _ => format!("{}{}{}", numerator, FRACTION_SLASH, denominator),
    }
}

/// Convert a decimal literal ending `before` once `inserted` finishes it
pub fn convert_number(before: &str, inserted: &str) -> Option<Edit> {
    if inserted == "." {
        return None;
    }
    let captures = trailing(&NUMBER, before, '.')?;
    let extended = format!("{}{}", before, inserted);
    if trailing(&NUMBER, &extended, '.').is_some() {
        return None;
    }

    let number = captures.get(0)?.as_str();
    let label = output_label(number, captures.get(1).map(|m| m.as_str()));
    diff_edit(number, &label, inserted)
}

/// Render a decimal literal with a vulgar fraction or constant, or return it
/// unchanged. `fraction_part` is the literal's `.digits` suffix, if any.
pub fn output_label(number: &str, fraction_part: Option<&str>) -> String {
    render_number(number, fraction_part).unwrap_or_else(|| number.to_string())
}

fn render_number(literal: &str, fraction_part: Option<&str>) -> Option<String> {
    let number: f64 = literal.parse().ok()?;
    let n = number.abs();
    if n > MAX_SAFE_INTEGER {
        return None;
    }

    let intpart = number.trunc();
    let fraction = match fraction_part {
        Some(part) => format!("0{}", part).parse::<f64>().ok()?,
        None => (number % 1.0).abs(),
    };
    let tolerance = f64::EPSILON * n;

    for &(glyph, numerator, denominator) in VULGAR_FRACTIONS {
        let value = numerator as f64 / denominator as f64;
        if (fraction - value).abs() <= tolerance {
            let prefix = if intpart == 0.0 && number < 0.0 {
                "-".to_string()
            } else if intpart != 0.0 {
                intpart.to_string()
            } else {
                String::new()
            };
            return Some(format!("{}{}", prefix, glyph));
        }
    }

    if n > f64::EPSILON {
        for &(symbol, value) in CONSTANTS {
            if number % value <= tolerance {
                let multiple = number / value;
                let prefix = if multiple == -1.0 {
                    "-".to_string()
                } else if multiple != 1.0 {
                    multiple.to_string()
                } else {
                    String::new()
                };
                return Some(format!("{}{}", prefix, symbol));
            }
        }
    }

    None
}

/// Replace only what changed: the label from its first character differing
/// from `old`, followed by the keystroke that completed the literal
fn diff_edit(old: &str, label: &str, inserted: &str) -> Option<Edit> {
    if old == label {
        return None;
    }
    let index = old.chars().zip(label.chars()).take_while(|(a, b)| a == b).count();
    Some(Edit {
        delete: old.chars().count() - index,
        insert: label.chars().skip(index).chain(inserted.chars()).collect(),
    })
}
