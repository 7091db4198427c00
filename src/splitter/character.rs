/*!
# [`CharacterSplitter`]
Splitting by a single separator.
*/

use crate::{
    chunk_size::MemoizedChunkSizer,
    splitter::{merge::merge_segments, Splitter},
    table::keep_tables_whole,
    Characters, ChunkConfig, ChunkSizer, Separator,
};

/// Splits text at every occurrence of one separator and merges neighboring
/// segments into chunks. Segments are never split further, so a segment
/// larger than the chunk size becomes an oversized chunk. Segments holding
/// parts of the same pipe table are put back together first.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CharacterSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Method of determining chunk sizes.
    chunk_config: ChunkConfig<Sizer>,
    separator: Separator,
}

impl<Sizer> CharacterSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Creates a new [`CharacterSplitter`] splitting by paragraphs (`"\n\n"`).
    #[must_use]
    pub fn new(chunk_config: impl Into<ChunkConfig<Sizer>>) -> Self {
        Self {
            chunk_config: chunk_config.into(),
            separator: "\n\n".into(),
        }
    }

    /// Split by another separator.
    ///
    /// A pattern keeps every match at the start of the segment that follows
    /// it:
    ///
    /// ```
    /// use regex::Regex;
    /// use text_chunker::{CharacterSplitter, ChunkConfig, Splitter};
    ///
    /// let splitter = CharacterSplitter::new(ChunkConfig::new(10)?)
    ///     .with_separator(Regex::new(r"== (?:Page )?\d+ ==").unwrap());
    /// let chunks = splitter.chunks("== Page 1 ==\nHello\n== Page 2 ==\nWorld");
    ///
    /// assert_eq!(chunks[0].text, "== Page 1 ==\nHello");
    /// assert_eq!(chunks[1].text, "== Page 2 ==\nWorld");
    /// # Ok::<(), text_chunker::ChunkConfigError>(())
    /// ```
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<Separator>) -> Self {
        self.separator = separator.into();
        self
    }

    /// The separator this splitter splits by.
    #[must_use]
    pub fn separator(&self) -> &Separator {
        &self.separator
    }
}

impl Default for CharacterSplitter<Characters> {
    fn default() -> Self {
        Self::new(ChunkConfig::default())
    }
}

impl<Sizer> Splitter<Sizer> for CharacterSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    fn chunk_config(&self) -> &ChunkConfig<Sizer> {
        &self.chunk_config
    }

    fn split_into(&self, text: &str) -> Vec<String> {
        let mut sizer = MemoizedChunkSizer::new(&self.chunk_config);
        let segments = keep_tables_whole(text, self.separator.split_indices(text));
        merge_segments(&segments, &self.separator, &mut sizer)
    }
}
