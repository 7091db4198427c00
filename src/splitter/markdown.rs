/*!
# [`MarkdownSplitter`]
Recursive splitting along markdown structure.
*/

use once_cell::sync::Lazy;
use strum::{EnumIter, IntoEnumIterator};

use crate::{
    chunk_size::MemoizedChunkSizer,
    splitter::{recursive::split_recursive, Splitter},
    Characters, ChunkConfig, ChunkSizer, Separator,
};

/// Markdown boundaries, from the most to the least preferred split point.
#[derive(Clone, Copy, Debug, EnumIter, Eq, PartialEq, Hash)]
#[allow(clippy::module_name_repetitions)]
pub enum MarkdownElement {
    /// `# `
    Heading1,
    /// `## `
    Heading2,
    /// `### `
    Heading3,
    /// `#### `
    Heading4,
    /// `##### `
    Heading5,
    /// `###### `
    Heading6,
    /// Closing fence of a code block followed by a blank line
    CodeBlockEnd,
    /// `***`, or more stars, between blank lines
    StarRule,
    /// `---`, or more dashes, between blank lines
    DashRule,
    /// `___`, or more underscores, between blank lines
    UnderscoreRule,
    /// Blank line
    Paragraph,
    /// Line break
    Line,
    /// Space between words
    Word,
    /// Individual characters, so splitting always makes progress
    Character,
}

// Lazy so that we don't have to compile them more than once
static MARKDOWN_SEPARATORS: Lazy<Vec<Separator>> = Lazy::new(|| {
    MarkdownElement::iter()
        .map(MarkdownElement::build_separator)
        .collect()
});

impl MarkdownElement {
    /// The separator that splits text at this element. Headings, code blocks
    /// and rules are patterns, so they stay attached to the section that
    /// follows them.
    #[must_use]
    pub fn separator(self) -> &'static Separator {
        &MARKDOWN_SEPARATORS[self as usize]
    }

    fn build_separator(self) -> Separator {
        let pattern = match self {
            Self::Heading1 => r"\n# ",
            Self::Heading2 => r"\n## ",
            Self::Heading3 => r"\n### ",
            Self::Heading4 => r"\n#### ",
            Self::Heading5 => r"\n##### ",
            Self::Heading6 => r"\n###### ",
            Self::CodeBlockEnd => "```\n\n",
            Self::StarRule => r"\n\n\*{3,}\n\n",
            Self::DashRule => r"\n\n-{3,}\n\n",
            Self::UnderscoreRule => r"\n\n_{3,}\n\n",
            Self::Paragraph => return "\n\n".into(),
            Self::Line => return "\n".into(),
            Self::Word => return " ".into(),
            Self::Character => return "".into(),
        };
        Separator::pattern(pattern).expect("markdown pattern should be valid")
    }
}

/// Splits markdown along headings, code blocks, horizontal rules and
/// paragraphs, in that order, before falling back to lines, words and
/// finally characters. Pipe tables are kept whole.
///
/// ```
/// use text_chunker::{ChunkConfig, MarkdownSplitter, Splitter};
///
/// let splitter = MarkdownSplitter::new(ChunkConfig::new(30)?);
/// let chunks = splitter.chunks("# Title\nIntro text.\n## Usage\nCall the splitter.");
///
/// assert_eq!(chunks[0].text, "# Title\nIntro text.");
/// assert_eq!(chunks[1].text, "## Usage\nCall the splitter.");
/// # Ok::<(), text_chunker::ChunkConfigError>(())
/// ```
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MarkdownSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Method of determining chunk sizes.
    chunk_config: ChunkConfig<Sizer>,
}

impl<Sizer> MarkdownSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Creates a new [`MarkdownSplitter`].
    #[must_use]
    pub fn new(chunk_config: impl Into<ChunkConfig<Sizer>>) -> Self {
        Self {
            chunk_config: chunk_config.into(),
        }
    }

    /// Separators in priority order, one per [`MarkdownElement`].
    #[must_use]
    pub fn separators(&self) -> &'static [Separator] {
        &MARKDOWN_SEPARATORS
    }
}

impl Default for MarkdownSplitter<Characters> {
    fn default() -> Self {
        Self::new(ChunkConfig::default())
    }
}

impl<Sizer> Splitter<Sizer> for MarkdownSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    fn chunk_config(&self) -> &ChunkConfig<Sizer> {
        &self.chunk_config
    }

    fn split_into(&self, text: &str) -> Vec<String> {
        let mut sizer = MemoizedChunkSizer::new(&self.chunk_config);
        split_recursive(text, &MARKDOWN_SEPARATORS, &mut sizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_separator_per_element() {
        assert_eq!(MARKDOWN_SEPARATORS.len(), MarkdownElement::iter().count());
        for element in MarkdownElement::iter() {
            assert_eq!(element.separator(), &element.build_separator());
        }
    }

    #[test]
    fn headings_come_first_and_characters_last() {
        let separators = MarkdownSplitter::default().separators();

        assert_eq!(separators[0], Separator::pattern(r"\n# ").unwrap());
        assert_eq!(separators[5], Separator::pattern(r"\n###### ").unwrap());
        assert!(separators.last().unwrap().is_char_fallback());
        assert_eq!(
            MarkdownElement::Paragraph.separator(),
            &Separator::from("\n\n")
        );
    }

    #[test]
    fn rules_need_three_marks() {
        let dash = MarkdownElement::DashRule.separator();
        assert!(dash.occurs_in("a\n\n---\n\nb"));
        assert!(dash.occurs_in("a\n\n-----\n\nb"));
        assert!(!dash.occurs_in("a\n\n--\n\nb"));
        assert!(MarkdownElement::StarRule.separator().occurs_in("a\n\n***\n\nb"));
        assert!(MarkdownElement::UnderscoreRule.separator().occurs_in("a\n\n___\n\nb"));
    }

    #[test]
    fn splits_at_headings() {
        let splitter = MarkdownSplitter::new(ChunkConfig::new(30).unwrap());
        assert_eq!(
            splitter.split_into("# Title\nIntro text.\n## Usage\nCall the splitter."),
            vec!["# Title\nIntro text.", "## Usage\nCall the splitter."]
        );
    }

    #[test]
    fn code_block_end_marker_moves_to_next_section() {
        let splitter = MarkdownSplitter::new(ChunkConfig::new(20).unwrap());
        assert_eq!(
            splitter.split_into("```\nlet x;\n```\n\nAfter the code"),
            vec!["```\nlet x;", "```\n\nAfter the code"]
        );
    }

    #[test]
    fn falls_back_to_characters() {
        let splitter = MarkdownSplitter::new(ChunkConfig::new(4).unwrap());
        assert_eq!(splitter.split_into("abcdefgh"), vec!["abc", "def", "gh"]);
    }
}
