//! Bionic-reading word emphasis.
//!
//! The leading `ceil(len * 0.6)` characters of every word longer than one
//! character are emphasized. Lengths are counted in `char`s so multi-byte
//! words split on character boundaries.

use crate::page::Inline;

/// A word split into its emphasized prefix and plain remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BionicWord {
    /// The word as it appeared in the input.
    pub original: String,
    /// Leading part rendered bold. Empty for words of length <= 1.
    pub emphasized_prefix: String,
    /// Trailing part rendered normally.
    pub remainder: String,
}

/// Number of leading characters to emphasize in a word of `char_count`
/// characters.
#[must_use]
pub const fn emphasized_len(char_count: usize) -> usize {
    if char_count <= 1 {
        0
    } else {
        // ceil(n * 0.6) == ceil(3n / 5), kept in integers
        (char_count * 3).div_ceil(5)
    }
}

/// Splits a single word.
#[must_use]
pub fn emphasize(word: &str) -> BionicWord {
    let split_at = emphasized_len(word.chars().count());
    let byte_index = word
        .char_indices()
        .nth(split_at)
        .map_or(word.len(), |(index, _)| index);
    let (prefix, remainder) = word.split_at(byte_index);

    BionicWord {
        original: word.to_string(),
        emphasized_prefix: prefix.to_string(),
        remainder: remainder.to_string(),
    }
}

/// Transformed text, grouped by paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BionicText {
    /// Words of each paragraph. Blank lines are kept as empty paragraphs.
    pub paragraphs: Vec<Vec<BionicWord>>,
}

/// Transforms a block of text.
///
/// Paragraphs are split on `\n` first, then words on any whitespace.
#[must_use]
pub fn transform(text: &str) -> BionicText {
    BionicText {
        paragraphs: text
            .split('\n')
            .map(|paragraph| paragraph.split_whitespace().map(emphasize).collect())
            .collect(),
    }
}

impl BionicText {
    /// Total number of words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.paragraphs.iter().map(Vec::len).sum()
    }

    /// Renders as inline runs: single spaces between words, a break between
    /// paragraphs.
    #[must_use]
    pub fn to_inlines(&self) -> Vec<Inline> {
        let mut runs = Vec::new();
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            if index > 0 {
                runs.push(Inline::Break);
            }
            for (position, word) in paragraph.iter().enumerate() {
                if position > 0 {
                    push_text(&mut runs, " ");
                }
                if !word.emphasized_prefix.is_empty() {
                    runs.push(Inline::Strong(word.emphasized_prefix.clone()));
                }
                if !word.remainder.is_empty() {
                    push_text(&mut runs, &word.remainder);
                }
            }
        }
        runs
    }

    /// Renders as HTML with `<b>` prefixes and `<br><br>` paragraph breaks.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for run in self.to_inlines() {
            match run {
                Inline::Text(text) => html.push_str(&escape_html(&text)),
                Inline::Strong(text) => {
                    html.push_str("<b>");
                    html.push_str(&escape_html(&text));
                    html.push_str("</b>");
                }
                Inline::Break => html.push_str("<br><br>"),
            }
        }
        html
    }

    /// The text with whitespace normalized as rendered.
    #[must_use]
    pub fn plain(&self) -> String {
        self.paragraphs
            .iter()
            .map(|paragraph| {
                paragraph
                    .iter()
                    .map(|word| word.original.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn push_text(runs: &mut Vec<Inline>, text: &str) {
    if let Some(Inline::Text(last)) = runs.last_mut() {
        last.push_str(text);
    } else {
        runs.push(Inline::Text(text.to_string()));
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
