/*!
# [`Separator`]
Boundary markers used to divide text, and the separator-preserving split.
*/

use std::iter::once;

use auto_enums::auto_enum;
use regex::Regex;

/// A boundary marker used to divide text.
///
/// An ordered list of separators forms a priority list, from the most to the
/// least preferred split point.
#[derive(Clone, Debug)]
pub enum Separator {
    /// Split at every occurrence of the string, consuming it. The empty
    /// string splits the text into individual characters, which always makes
    /// progress.
    Literal(String),
    /// Split at every match, keeping the match (minus one leading newline)
    /// attached to the start of the following segment, so headings and
    /// similar markers stay with their section.
    Pattern(Regex),
}

impl Separator {
    /// Compile a pattern separator.
    ///
    /// ```
    /// use text_chunker::Separator;
    ///
    /// let heading = Separator::pattern(r"\n## ").unwrap();
    /// assert_eq!(heading.split("intro\n## Usage").collect::<Vec<_>>(), vec!["intro", "## Usage"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Will return an error if the pattern is not a valid regular expression.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Whether this is the empty literal, splitting into characters.
    #[must_use]
    pub fn is_char_fallback(&self) -> bool {
        matches!(self, Self::Literal(literal) if literal.is_empty())
    }

    /// Whether the separator matches anywhere in the text. The empty literal
    /// always matches.
    #[must_use]
    pub fn occurs_in(&self, text: &str) -> bool {
        match self {
            Self::Literal(literal) => text.contains(literal.as_str()),
            Self::Pattern(regex) => regex.is_match(text),
        }
    }

    /// String used to join segments produced by this separator back together.
    /// Patterns have no single literal form, so they join with a newline.
    #[must_use]
    pub fn join_token(&self) -> &str {
        match self {
            Self::Literal(literal) => literal,
            Self::Pattern(_) => "\n",
        }
    }

    /// Split the text into segments.
    ///
    /// - The empty literal yields every character.
    /// - Other literals split at every occurrence; the separator is dropped
    ///   and empty segments are kept, so joining with [`Self::join_token`]
    ///   restores the text.
    /// - Patterns split at every match and prefix the following segment with
    ///   the match, minus a single leading newline. Empty segments are
    ///   dropped.
    ///
    /// A separator that doesn't match returns the text as its only segment.
    ///
    /// ```
    /// use text_chunker::Separator;
    ///
    /// let paragraphs = Separator::from("\n\n");
    /// assert_eq!(paragraphs.split("a\n\nb").collect::<Vec<_>>(), vec!["a", "b"]);
    /// ```
    pub fn split<'separator, 'text: 'separator>(
        &'separator self,
        text: &'text str,
    ) -> impl Iterator<Item = &'text str> + 'separator {
        self.split_indices(text).map(|(_, segment)| segment)
    }

    /// Same segments as [`Self::split`], along with the byte offset of each
    /// segment in the text.
    #[auto_enum(Iterator)]
    pub(crate) fn split_indices<'separator, 'text: 'separator>(
        &'separator self,
        text: &'text str,
    ) -> impl Iterator<Item = (usize, &'text str)> + 'separator {
        match self {
            Self::Literal(literal) if literal.is_empty() => text.char_indices().map(move |(i, c)| {
                (
                    i,
                    text.get(i..i + c.len_utf8())
                        .expect("char should be valid"),
                )
            }),
            Self::Literal(literal) => text.split(literal.as_str()).scan(0, move |offset, segment| {
                let start = *offset;
                *offset += segment.len() + literal.len();
                Some((start, segment))
            }),
            Self::Pattern(regex) => {
                // Each segment starts where its match starts, skipping the match's leading newline
                let starts = once(0).chain(
                    regex
                        .find_iter(text)
                        .map(|m| m.start() + usize::from(m.as_str().starts_with('\n'))),
                );
                let ends = regex
                    .find_iter(text)
                    .map(|m| m.start())
                    .chain(once(text.len()));

                starts
                    .zip(ends)
                    .filter_map(move |(start, end)| text.get(start..end).map(|segment| (start, segment)))
                    .filter(|(_, segment)| !segment.is_empty())
            }
        }
    }
}

impl PartialEq for Separator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Separator {}

impl From<&str> for Separator {
    fn from(literal: &str) -> Self {
        Self::Literal(literal.to_owned())
    }
}

impl From<String> for Separator {
    fn from(literal: String) -> Self {
        Self::Literal(literal)
    }
}

impl From<Regex> for Separator {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split<'text>(separator: &Separator, text: &'text str) -> Vec<&'text str> {
        separator.split(text).collect()
    }

    #[test]
    fn empty_literal_splits_chars() {
        let separator = Separator::from("");
        assert_eq!(split(&separator, "aé b"), vec!["a", "é", " ", "b"]);
        assert!(separator.is_char_fallback());
    }

    #[test]
    fn literal_drops_separator() {
        let separator = Separator::from(" ");
        assert_eq!(split(&separator, "text one"), vec!["text", "one"]);
        assert!(!separator.is_char_fallback());
    }

    #[test]
    fn literal_keeps_empty_segments() {
        let separator = Separator::from("\n\n");
        let text = "a\n\n\n\nb\n\n";
        let segments = split(&separator, text);

        assert_eq!(segments, vec!["a", "", "b", ""]);
        assert_eq!(segments.join(separator.join_token()), text);
    }

    #[test]
    fn pattern_reattaches_match_without_leading_newline() {
        let separator = Separator::pattern(r"\n## ").unwrap();
        let text = "# Title\nintro\n## One\nbody one\n## Two\nbody two";

        assert_eq!(
            split(&separator, text),
            vec!["# Title\nintro", "## One\nbody one", "## Two\nbody two"]
        );
    }

    #[test]
    fn pattern_drops_empty_first_segment() {
        let separator = Separator::pattern(r"== Page \d+ ==").unwrap();
        let text = "== Page 1 ==\nHello\n== Page 2 ==\nWorld";

        assert_eq!(
            split(&separator, text),
            vec!["== Page 1 ==\nHello\n", "== Page 2 ==\nWorld"]
        );
    }

    #[test]
    fn pattern_keeps_trailing_match() {
        let separator = Separator::pattern(r"\n# ").unwrap();
        assert_eq!(split(&separator, "body\n# "), vec!["body", "# "]);
    }

    #[test]
    fn no_match_returns_whole_text() {
        let text = "nothing to see";
        assert_eq!(split(&Separator::from("UNKNOWN"), text), vec![text]);
        assert_eq!(
            split(&Separator::pattern(r"\n# ").unwrap(), text),
            vec![text]
        );
    }

    #[test]
    fn match_at_start_makes_no_progress() {
        let separator = Separator::pattern("## ").unwrap();
        assert_eq!(split(&separator, "## Heading"), vec!["## Heading"]);
    }

    #[test]
    fn offsets_point_into_text() {
        let text = "# Title\nintro\n\n## One\nbody é\n\n";
        for separator in [
            Separator::from(""),
            Separator::from("\n"),
            Separator::from("\n\n"),
            Separator::pattern(r"\n## ").unwrap(),
        ] {
            let segments = separator.split_indices(text).collect::<Vec<_>>();
            assert_eq!(
                segments.iter().map(|(_, segment)| *segment).collect::<Vec<_>>(),
                separator.split(text).collect::<Vec<_>>()
            );
            for (offset, segment) in segments {
                assert_eq!(&text[offset..offset + segment.len()], segment);
            }
        }
    }

    #[test]
    fn literal_offsets_skip_separator() {
        let separator = Separator::from(", ");
        assert_eq!(
            separator.split_indices("a, bc, , d").collect::<Vec<_>>(),
            vec![(0, "a"), (3, "bc"), (7, ""), (9, "d")]
        );
    }

    #[test]
    fn occurs_in_text() {
        assert!(Separator::from("").occurs_in("anything"));
        assert!(Separator::from("\n").occurs_in("a\nb"));
        assert!(!Separator::from("\n").occurs_in("a b"));
        assert!(Separator::pattern(r"\d").unwrap().occurs_in("a1"));
        assert!(!Separator::pattern(r"\d").unwrap().occurs_in("ab"));
    }

    #[test]
    fn join_tokens() {
        assert_eq!(Separator::from(" ").join_token(), " ");
        assert_eq!(Separator::pattern("x").unwrap().join_token(), "\n");
    }

    #[test]
    fn separators_compare_by_source() {
        assert_eq!(Separator::from("\n"), Separator::from("\n".to_owned()));
        assert_eq!(
            Separator::pattern(r"\n# ").unwrap(),
            Separator::pattern(r"\n# ").unwrap()
        );
        assert_ne!(Separator::from(r"\n# "), Separator::pattern(r"\n# ").unwrap());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(Separator::pattern("(unclosed").is_err());
    }
}
