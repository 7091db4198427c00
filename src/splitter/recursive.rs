/*!
# [`RecursiveSplitter`]
Splitting by an ordered list of separators, falling back to lower-priority
separators only for the segments that are still too large.
*/

use tracing::{debug, trace};

use crate::{
    chunk_size::MemoizedChunkSizer,
    splitter::{merge::merge_segments, Splitter},
    table::{find_tables, TableSpan},
    Characters, ChunkConfig, ChunkSizer, Separator,
};

/// Recursively splits text by the first separator that occurs in it, then
/// splits every segment that is still too large by the remaining separators.
/// Neighboring segments that fit are merged into chunks.
///
/// Pipe-delimited tables are never divided: when the text holds a table and
/// doesn't fit in a chunk, every table becomes a chunk of its own and only
/// the text around it is split further.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RecursiveSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Method of determining chunk sizes.
    chunk_config: ChunkConfig<Sizer>,
    /// Separators in priority order
    separators: Vec<Separator>,
}

impl<Sizer> RecursiveSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Creates a new [`RecursiveSplitter`] that splits by paragraphs, then
    /// lines, then words.
    ///
    /// ```
    /// use text_chunker::{ChunkConfig, RecursiveSplitter, Splitter};
    ///
    /// let splitter = RecursiveSplitter::new(ChunkConfig::new(10)?);
    /// let chunks = splitter.chunks("Some text\n\nfrom a\ndocument");
    ///
    /// assert_eq!(
    ///     chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>(),
    ///     vec!["Some text", "from a", "document"]
    /// );
    /// assert_eq!(
    ///     chunks.iter().map(|c| c.cursor).collect::<Vec<_>>(),
    ///     vec![0, 9, 15]
    /// );
    /// # Ok::<(), text_chunker::ChunkConfigError>(())
    /// ```
    #[must_use]
    pub fn new(chunk_config: impl Into<ChunkConfig<Sizer>>) -> Self {
        Self {
            chunk_config: chunk_config.into(),
            separators: vec!["\n\n".into(), "\n".into(), " ".into()],
        }
    }

    /// Replace the separators, highest priority first.
    ///
    /// Without the empty separator at the end of the list, text that none of
    /// the separators can divide is returned whole, even if it is larger
    /// than the chunk size.
    ///
    /// ```
    /// use regex::Regex;
    /// use text_chunker::{ChunkConfig, RecursiveSplitter, Separator};
    ///
    /// let splitter = RecursiveSplitter::new(ChunkConfig::new(256)?).with_separators([
    ///     Separator::from(Regex::new(r"\n## ").unwrap()),
    ///     Separator::from("\n\n"),
    ///     Separator::from(""),
    /// ]);
    /// # Ok::<(), text_chunker::ChunkConfigError>(())
    /// ```
    #[must_use]
    pub fn with_separators<S>(mut self, separators: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<Separator>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Separators in priority order.
    #[must_use]
    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }
}

impl Default for RecursiveSplitter<Characters> {
    fn default() -> Self {
        Self::new(ChunkConfig::default())
    }
}

impl<Sizer> Splitter<Sizer> for RecursiveSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    fn chunk_config(&self) -> &ChunkConfig<Sizer> {
        &self.chunk_config
    }

    fn split_into(&self, text: &str) -> Vec<String> {
        let mut sizer = MemoizedChunkSizer::new(&self.chunk_config);
        split_recursive(text, &self.separators, &mut sizer)
    }
}

/// Split `text` with the given separators, in priority order.
///
/// Every recursive call receives a strictly shorter separator list, so the
/// recursion depth is bounded by the number of separators.
pub(crate) fn split_recursive<'text, Sizer>(
    text: &'text str,
    separators: &[Separator],
    sizer: &mut MemoizedChunkSizer<'_, 'text, Sizer>,
) -> Vec<String>
where
    Sizer: ChunkSizer,
{
    let tables = find_tables(text);
    if !tables.is_empty() && sizer.size(text) >= sizer.chunk_size() {
        return split_around_tables(text, &tables, separators, sizer);
    }

    let mut remaining = separators;
    loop {
        let Some(index) = remaining.iter().position(|s| s.occurs_in(text)) else {
            trace!(separators = remaining.len(), "no separator occurs in text");
            return vec![text.to_owned()];
        };
        let separator = &remaining[index];
        let lower = &remaining[index + 1..];
        trace!(?separator, "splitting");

        let segments = separator.split(text).collect::<Vec<_>>();
        if matches!(segments.as_slice(), [only] if *only == text) {
            trace!(?separator, "separator made no progress");
            remaining = lower;
            continue;
        }

        return split_segments(&segments, separator, lower, sizer);
    }
}

/// Merge the segments that fit, and split the oversized ones with the
/// lower-priority separators.
fn split_segments<'text, Sizer>(
    segments: &[&'text str],
    separator: &Separator,
    lower: &[Separator],
    sizer: &mut MemoizedChunkSizer<'_, 'text, Sizer>,
) -> Vec<String>
where
    Sizer: ChunkSizer,
{
    let mut chunks = Vec::new();
    let mut fitting = Vec::new();

    for &segment in segments {
        if sizer.fits(segment) {
            fitting.push(segment);
            continue;
        }

        // Keep document order
        if !fitting.is_empty() {
            chunks.extend(merge_segments(&fitting, separator, sizer));
            fitting.clear();
        }

        if lower.is_empty() {
            chunks.push(segment.to_owned());
        } else {
            chunks.extend(split_recursive(segment, lower, sizer));
        }
    }

    if !fitting.is_empty() {
        chunks.extend(merge_segments(&fitting, separator, sizer));
    }

    chunks
}

/// Emit each table verbatim as its own chunk, splitting the text between
/// them as usual.
fn split_around_tables<'text, Sizer>(
    text: &'text str,
    tables: &[TableSpan<'text>],
    separators: &[Separator],
    sizer: &mut MemoizedChunkSizer<'_, 'text, Sizer>,
) -> Vec<String>
where
    Sizer: ChunkSizer,
{
    debug!(tables = tables.len(), "isolating tables");

    let mut chunks = Vec::new();
    let mut offset = 0;
    for table in tables {
        chunks.extend(split_recursive(&text[offset..table.start], separators, sizer));
        chunks.push(table.text.to_owned());
        offset = table.end;
    }
    chunks.extend(split_recursive(&text[offset..], separators, sizer));

    chunks
}
