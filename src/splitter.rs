use tracing::debug;

use crate::{ChunkConfig, ChunkSizer};

mod character;
mod markdown;
mod merge;
mod recursive;
mod sentence;

pub use character::CharacterSplitter;
pub use markdown::{MarkdownElement, MarkdownSplitter};
pub use recursive::RecursiveSplitter;
pub use sentence::SentenceSplitter;

/// One emitted unit of output text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk<M = ()> {
    /// The chunk content. Never empty.
    pub text: String,
    /// Character offset of the chunk, computed as the sum of the character
    /// lengths of all previously emitted chunks. This is an approximation of
    /// the position in the source: trimmed whitespace, dropped separators and
    /// overlap make it drift from the true offset.
    pub cursor: usize,
    /// Caller-supplied metadata, attached to every chunk of a call.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub metadata: Option<M>,
}

/// Reported for every chunk larger than the configured chunk size. This
/// happens when no separator can divide a unit any further, such as a table
/// or a single long token. The chunk is still returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeDiagnostic {
    /// Index of the oversized chunk in [`ChunkOutput::chunks`]
    pub chunk_index: usize,
    /// Cursor of the oversized chunk
    pub cursor: usize,
    /// Size of the chunk, in units of the sizer
    pub size: usize,
    /// The configured chunk size it exceeds
    pub chunk_size: usize,
}

/// Chunks of a single call, along with size diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkOutput<M = ()> {
    /// Chunks in document order
    pub chunks: Vec<Chunk<M>>,
    /// One entry per chunk that exceeds the chunk size
    pub diagnostics: Vec<SizeDiagnostic>,
}

/// Shared interface for all splitting strategies.
///
/// A strategy only decides how text is divided into candidate chunk texts.
/// Producing [`Chunk`]s with cursors, metadata and diagnostics is shared.
pub trait Splitter<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Retrieve the splitter chunk configuration
    fn chunk_config(&self) -> &ChunkConfig<Sizer>;

    /// Divide the text into an ordered list of chunk texts.
    fn split_into(&self, text: &str) -> Vec<String>;

    /// Generate chunks from a given text, attaching `metadata` to each one
    /// if provided, and report chunks that exceed the chunk size.
    ///
    /// ```
    /// use text_chunker::{ChunkConfig, RecursiveSplitter, Splitter};
    ///
    /// let splitter = RecursiveSplitter::new(ChunkConfig::new(5)?);
    /// let output = splitter.produce("tiny enormous", Some("doc-1"));
    ///
    /// assert_eq!(output.chunks[1].text, "enormous");
    /// assert_eq!(output.chunks[1].metadata, Some("doc-1"));
    /// assert_eq!(output.diagnostics[0].chunk_index, 1);
    /// # Ok::<(), text_chunker::ChunkConfigError>(())
    /// ```
    fn produce<M>(&self, text: &str, metadata: Option<M>) -> ChunkOutput<M>
    where
        M: Clone,
    {
        let chunk_config = self.chunk_config();
        let mut chunks = Vec::new();
        let mut diagnostics = Vec::new();
        let mut cursor = 0;

        for text in self
            .split_into(text)
            .into_iter()
            .filter(|chunk| !chunk.trim().is_empty())
        {
            let size = chunk_config.sizer().size(&text);
            if size > chunk_config.chunk_size() {
                debug!(
                    chunk_index = chunks.len(),
                    size,
                    chunk_size = chunk_config.chunk_size(),
                    "chunk exceeds chunk size"
                );
                diagnostics.push(SizeDiagnostic {
                    chunk_index: chunks.len(),
                    cursor,
                    size,
                    chunk_size: chunk_config.chunk_size(),
                });
            }

            let length = text.chars().count();
            chunks.push(Chunk {
                text,
                cursor,
                metadata: metadata.clone(),
            });
            cursor += length;
        }

        ChunkOutput {
            chunks,
            diagnostics,
        }
    }

    /// Generate chunks from a given text.
    ///
    /// ```
    /// use text_chunker::{CharacterSplitter, ChunkConfig, Splitter};
    ///
    /// let splitter = CharacterSplitter::new(ChunkConfig::new(10)?.with_overlap(5)?);
    /// let chunks = splitter.chunks("Hello, world!\n\nHello, world!");
    ///
    /// assert_eq!(chunks[0].text, "Hello, world!");
    /// assert_eq!(chunks[1].cursor, 13);
    /// # Ok::<(), text_chunker::ChunkConfigError>(())
    /// ```
    fn chunks(&self, text: &str) -> Vec<Chunk> {
        self.produce(text, None).chunks
    }

    /// Generate chunks from a given text, attaching a copy of `metadata` to
    /// every chunk.
    fn chunks_with_metadata<M>(&self, text: &str, metadata: M) -> Vec<Chunk<M>>
    where
        M: Clone,
    {
        self.produce(text, Some(metadata)).chunks
    }
}
