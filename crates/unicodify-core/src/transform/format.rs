// Unicodify Formats
// Combining-mark formatting applied per grapheme cluster

use unicode_segmentation::UnicodeSegmentation;

use super::id::Format;

/// Append the format's combining mark after every grapheme cluster, so
/// emoji sequences and already-combined letters are never split apart.
pub fn apply(text: &str, format: Format) -> String {
    let mark = format.combining_mark();
    let mut output = String::with_capacity(text.len() * 2);
    for cluster in text.graphemes(true) {
        output.push_str(cluster);
        output.push(mark);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_after_each_letter() {
        assert_eq!(apply("abc", Format::Strikethrough), "a\u{336}b\u{336}c\u{336}");
        assert_eq!(apply("", Format::Underline), "");
    }

    #[test]
    fn test_clusters_stay_whole() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(apply(family, Format::Underline), format!("{}\u{332}", family));
        assert_eq!(apply("e\u{301}x", Format::Overline), "e\u{301}\u{305}x\u{305}");
    }

    #[test]
    fn test_cluster_count_preserved() {
        let text = "🇩🇪 naïve";
        let formatted = apply(text, Format::Slash);
        assert_eq!(formatted.graphemes(true).count(), text.graphemes(true).count());
    }
}
