/*!
# [`SentenceSplitter`]
Splitting prose into sentences.
*/

use std::iter::once;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    chunk_size::MemoizedChunkSizer,
    splitter::{merge::merge_segments, Splitter},
    table::keep_tables_whole,
    Characters, ChunkConfig, ChunkSizer, Separator,
};

// Lazy so that we don't have to compile them more than once
/// Text up to one or more terminal punctuation marks, followed by whitespace
/// or the end of the text
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+(?:\s+|\z)").unwrap());

/// Splits text into sentences, then merges neighboring sentences into
/// chunks, joined by a single space. Sentences that cut through a pipe
/// table are put back together with it.
///
/// ```
/// use text_chunker::{ChunkConfig, SentenceSplitter, Splitter};
///
/// let splitter = SentenceSplitter::new(ChunkConfig::new(30)?);
/// let chunks = splitter.chunks("Is it short? Yes. Then keep it together.");
///
/// assert_eq!(chunks[0].text, "Is it short? Yes.");
/// assert_eq!(chunks[1].text, "Then keep it together.");
/// # Ok::<(), text_chunker::ChunkConfigError>(())
/// ```
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SentenceSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Method of determining chunk sizes.
    chunk_config: ChunkConfig<Sizer>,
}

impl<Sizer> SentenceSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Creates a new [`SentenceSplitter`].
    #[must_use]
    pub fn new(chunk_config: impl Into<ChunkConfig<Sizer>>) -> Self {
        Self {
            chunk_config: chunk_config.into(),
        }
    }
}

impl Default for SentenceSplitter<Characters> {
    fn default() -> Self {
        Self::new(ChunkConfig::default())
    }
}

impl<Sizer> Splitter<Sizer> for SentenceSplitter<Sizer>
where
    Sizer: ChunkSizer,
{
    fn chunk_config(&self) -> &ChunkConfig<Sizer> {
        &self.chunk_config
    }

    fn split_into(&self, text: &str) -> Vec<String> {
        let mut sizer = MemoizedChunkSizer::new(&self.chunk_config);
        let segments = keep_tables_whole(text, sentences(text));
        merge_segments(&segments, &Separator::from(" "), &mut sizer)
    }
}

/// Trimmed sentences, in order, with their byte offset in the text. Text
/// between matches belongs to the following sentence, and a trailing
/// fragment without terminal punctuation is a sentence of its own.
fn sentences(text: &str) -> Vec<(usize, &str)> {
    let ends = SENTENCE_END
        .find_iter(text)
        .map(|m| m.end())
        .chain(once(text.len()));

    ends.scan(0, |offset, end| {
        let start = *offset;
        *offset = end;
        let sentence = &text[start..end];
        let leading = sentence.len() - sentence.trim_start().len();
        Some((start + leading, sentence.trim()))
    })
    .filter(|(_, sentence)| !sentence.is_empty())
    .collect()
}
