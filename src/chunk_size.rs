use std::fmt;

use ahash::AHashMap;
use thiserror::Error;

mod characters;
#[cfg(feature = "tokenizers")]
mod huggingface;
#[cfg(feature = "tiktoken-rs")]
mod tiktoken;

pub use characters::Characters;

/// Determines the size of a given chunk.
///
/// The size is an abstract unit (characters, tokens, words...). Splitters only
/// ever compare sizes against the configured chunk size and overlap, so no
/// linear relationship to the number of characters is assumed.
pub trait ChunkSizer {
    /// Determine the size of a given chunk to use for validation
    fn size(&self, chunk: &str) -> usize;
}

/// Wraps any closure as a [`ChunkSizer`], for callers that bring their own
/// token counting function.
///
/// ```
/// use text_chunker::{ChunkConfig, TokenCounter};
///
/// let words = TokenCounter::new(|text: &str| text.split_whitespace().count());
/// let config = ChunkConfig::new(128).unwrap().with_sizer(words);
/// ```
#[derive(Clone, Copy)]
pub struct TokenCounter<F>(F);

impl<F> TokenCounter<F>
where
    F: Fn(&str) -> usize,
{
    /// Use `count` to measure every chunk.
    #[must_use]
    pub fn new(count: F) -> Self {
        Self(count)
    }
}

impl<F> ChunkSizer for TokenCounter<F>
where
    F: Fn(&str) -> usize,
{
    fn size(&self, chunk: &str) -> usize {
        (self.0)(chunk)
    }
}

impl<F> fmt::Debug for TokenCounter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCounter").finish_non_exhaustive()
    }
}

/// Indicates there was an error with the chunk configuration.
/// The `Display` implementation will provide a human-readable error message to
/// help debug the issue that caused the error.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ChunkConfigError(#[from] ChunkConfigErrorRepr);

/// Private error and free to change across minor version of the crate.
#[derive(Error, Debug)]
enum ChunkConfigErrorRepr {
    #[error("The chunk size must be greater than zero")]
    ZeroChunkSize,
    #[error("The overlap is larger than or equal to the chunk size")]
    OverlapLargerThanCapacity,
}

/// Configuration for how chunks should be created.
///
/// Immutable once built: splitters hold on to it for their whole lifetime.
#[derive(Debug)]
pub struct ChunkConfig<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Segments smaller than this size fit into a chunk
    chunk_size: usize,
    /// The amount of overlap between consecutive chunks. Defaults to 0.
    overlap: usize,
    /// The chunk sizer to use for determining the size of each chunk
    sizer: Sizer,
}

impl ChunkConfig<Characters> {
    /// Create a basic configuration with only the required value, a chunk size.
    ///
    /// By default, chunk sizes will be calculated based on the number of characters in each chunk.
    /// You can set a custom chunk sizer by calling [`Self::with_sizer`].
    ///
    /// # Errors
    ///
    /// Will return an error if the chunk size is zero.
    pub fn new(chunk_size: usize) -> Result<Self, ChunkConfigError> {
        if chunk_size == 0 {
            return Err(ChunkConfigError(ChunkConfigErrorRepr::ZeroChunkSize));
        }

        Ok(Self {
            chunk_size,
            overlap: 0,
            sizer: Characters,
        })
    }
}

impl Default for ChunkConfig<Characters> {
    /// 1024 characters per chunk with 64 characters of overlap.
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            overlap: 64,
            sizer: Characters,
        }
    }
}

impl<Sizer> ChunkConfig<Sizer>
where
    Sizer: ChunkSizer,
{
    /// Retrieve the chunk size for this configuration.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Retrieve the amount of overlap between chunks.
    #[must_use]
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Set the amount of overlap between chunks.
    ///
    /// Overlap is measured with the same sizer as the chunks, so with a
    /// custom sizer the overlap width in characters is approximate.
    ///
    /// # Errors
    ///
    /// Will return an error if the overlap is larger than or equal to the chunk size.
    pub fn with_overlap(mut self, overlap: usize) -> Result<Self, ChunkConfigError> {
        if overlap >= self.chunk_size {
            Err(ChunkConfigError(
                ChunkConfigErrorRepr::OverlapLargerThanCapacity,
            ))
        } else {
            self.overlap = overlap;
            Ok(self)
        }
    }

    /// Retrieve a reference to the chunk sizer for this configuration.
    pub fn sizer(&self) -> &Sizer {
        &self.sizer
    }

    /// Set a custom chunk sizer to use for determining the size of each chunk
    ///
    /// ```
    /// use text_chunker::{Characters, ChunkConfig};
    ///
    /// let config = ChunkConfig::new(512).unwrap().with_sizer(Characters);
    /// ```
    #[must_use]
    pub fn with_sizer<S: ChunkSizer>(self, sizer: S) -> ChunkConfig<S> {
        ChunkConfig {
            chunk_size: self.chunk_size,
            overlap: self.overlap,
            sizer,
        }
    }
}

/// A memoized chunk sizer that caches the size of segments.
/// Very helpful when the same segment is measured multiple times, which
/// happens often while recursing and merging, and can be expensive to
/// compute, such as with tokenizers.
///
/// Only lives for a single splitting call.
#[derive(Debug)]
pub(crate) struct MemoizedChunkSizer<'config, 'text, Sizer>
where
    Sizer: ChunkSizer,
{
    /// Cache of sizes per segment text
    cache: AHashMap<&'text str, usize>,
    /// The configuration for the chunk sizer
    chunk_config: &'config ChunkConfig<Sizer>,
}

impl<'config, 'text, Sizer> MemoizedChunkSizer<'config, 'text, Sizer>
where
    Sizer: ChunkSizer,
{
    /// Wrap any chunk sizer for memoization
    pub(crate) fn new(chunk_config: &'config ChunkConfig<Sizer>) -> Self {
        Self {
            cache: AHashMap::new(),
            chunk_config,
        }
    }

    /// Determine the size of a given segment, returning a cached value if it
    /// exists, and storing the result if not.
    pub(crate) fn size(&mut self, segment: &'text str) -> usize {
        *self
            .cache
            .entry(segment)
            .or_insert_with(|| self.chunk_config.sizer.size(segment))
    }

    /// Size of text that doesn't come from the split text, such as the
    /// separator put back between segments. Not cached.
    pub(crate) fn size_uncached(&self, text: &str) -> usize {
        self.chunk_config.sizer.size(text)
    }

    /// Whether the segment is below the chunk size.
    pub(crate) fn fits(&mut self, segment: &'text str) -> bool {
        self.size(segment) < self.chunk_config.chunk_size
    }

    pub(crate) fn chunk_size(&self) -> usize {
        self.chunk_config.chunk_size
    }

    pub(crate) fn overlap(&self) -> usize {
        self.chunk_config.overlap
    }
}
