// Unicodify Suffix Automaton
// Reversed trie answering "which key ends here?" for text before a caret

use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
    /// Children keyed by the preceding character of a key
    children: IndexMap<char, Node>,
    /// A key ends at this node
    leaf: bool,
}

impl Node {
    fn insert(&mut self, key: &str) {
        let mut node = self;
        for c in key.chars().rev() {
            node = node.children.entry(c).or_default();
        }
        node.leaf = true;
    }

    /// Render the alternation matching every key in this subtree, written
    /// front to back. Sibling leaves collapse into one character class;
    /// a leaf that also has children makes its prefix optional.
    fn render(&self) -> String {
        let mut branches = Vec::new();
        let mut singles = Vec::new();

        for (&c, child) in &self.children {
            if child.children.is_empty() {
                singles.push(c);
                continue;
            }
            let optional = if child.leaf { "?" } else { "" };
            branches.push(format!("(?:{}){}{}", child.render(), optional, escape(c)));
        }

        match singles.as_slice() {
            [] => {}
            [c] => branches.push(escape(*c)),
            _ => {
                let class: String = singles.iter().map(|&c| escape(c)).collect();
                branches.push(format!("[{}]", class));
            }
        }

        branches.join("|")
    }
}

fn escape(c: char) -> String {
    let mut buf = [0u8; 4];
    regex::escape(c.encode_utf8(&mut buf))
}

/// A key found at the end of the examined text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixMatch<'a> {
    /// Character index where the key starts
    pub start: usize,
    /// The matched key
    pub text: &'a str,
}

impl SuffixMatch<'_> {
    /// Length of the match in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Compiled set of keys, matched against the end of a text
///
/// Keys are stored reversed, so a lookup walks backward from the last
/// character and stops at the first character no key continues with.
/// When several keys end the text, the longest one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    root: Node,
    keys: usize,
    longest: usize,
}

impl Automaton {
    /// Compile keys into an automaton. Empty and repeated keys are ignored,
    /// and an empty key set compiles to an automaton that never matches.
    pub fn compile<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owned: Vec<S> = keys.into_iter().collect();
        let mut keys: Vec<&str> = owned
            .iter()
            .map(|k| k.as_ref())
            .filter(|k| !k.is_empty())
            .collect::<IndexSet<&str>>()
            .into_iter()
            .collect();
        // Longest first, so the rendered alternation lists longer keys first
        keys.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));

        let mut automaton = Self::default();
        for key in &keys {
            automaton.root.insert(key);
            automaton.longest = automaton.longest.max(key.chars().count());
        }
        automaton.keys = keys.len();
        automaton
    }

    /// Find the longest key that is a suffix of `text`
    pub fn find_suffix<'a>(&self, text: &'a str) -> Option<SuffixMatch<'a>> {
        let mut node = &self.root;
        let mut best = None;

        for (offset, c) in text.char_indices().rev() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => break,
            }
            if node.leaf {
                best = Some(offset);
            }
        }

        best.map(|offset| SuffixMatch {
            start: text[..offset].chars().count(),
            text: &text[offset..],
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find_suffix(text).is_some()
    }

    /// Number of distinct keys compiled in
    pub fn len(&self) -> usize {
        self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys == 0
    }

    /// Length in characters of the longest key
    pub fn longest(&self) -> usize {
        self.longest
    }

    /// End-anchored regular expression equivalent to this automaton, or
    /// `None` when there are no keys (no expression matches nothing).
    pub fn pattern(&self) -> Option<String> {
        if self.root.children.is_empty() {
            return None;
        }
        Some(format!("(?:{})$", self.root.render()))
    }
}
