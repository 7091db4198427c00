/*!
# text-chunker

Documents are often larger than what an embedding model or LLM context can
take in at once. This crate splits text into chunks that stay below a
configured size, preferring the most meaningful boundary available:
headings before paragraphs, paragraphs before lines, lines before words.
Consecutive chunks can share some overlapping content to keep context
across boundaries.

## Get Started

### By Number of Characters

```rust
use text_chunker::{ChunkConfig, RecursiveSplitter, Splitter};

// Chunks stay below 1000 characters, and share up to 100 characters
let config = ChunkConfig::new(1000)?.with_overlap(100)?;
let splitter = RecursiveSplitter::new(config);

let chunks = splitter.chunks("your document text");
# Ok::<(), text_chunker::ChunkConfigError>(())
```

### With a Custom Token Counter

Any function that counts tokens can be used as the size of a chunk.

```rust
use text_chunker::{ChunkConfig, MarkdownSplitter, Splitter, TokenCounter};

let words = TokenCounter::new(|text: &str| text.split_whitespace().count());
let splitter = MarkdownSplitter::new(ChunkConfig::new(200)?.with_sizer(words));

let chunks = splitter.chunks("# Title\n\nyour document text");
# Ok::<(), text_chunker::ChunkConfigError>(())
```

### With Tiktoken Tokenizer

Requires the `tiktoken-rs` feature to be activated.

```rust
# #[cfg(feature = "tiktoken-rs")]
# {
use text_chunker::{ChunkConfig, RecursiveSplitter, Splitter};
use tiktoken_rs::cl100k_base;

let tokenizer = cl100k_base().unwrap();
let splitter = RecursiveSplitter::new(ChunkConfig::new(1000).unwrap().with_sizer(tokenizer));

let chunks = splitter.chunks("your document text");
# }
```

Huggingface tokenizers are supported the same way with the `tokenizers`
feature.

### Metadata and Diagnostics

```rust
use text_chunker::{ChunkConfig, RecursiveSplitter, Splitter};

let splitter = RecursiveSplitter::new(ChunkConfig::new(10)?);
let output = splitter.produce("Some text\n\nfrom a\ndocument", Some("notes.md"));

assert!(output.chunks.iter().all(|c| c.metadata == Some("notes.md")));
assert!(output.diagnostics.is_empty());
# Ok::<(), text_chunker::ChunkConfigError>(())
```

## Method

The [`RecursiveSplitter`] and [`MarkdownSplitter`] work with an ordered list
of [`Separator`]s:

1. Pick the first separator that occurs in the text and split by it.
2. Segments below the chunk size are merged with their neighbors into
   chunks, as many as fit.
3. Segments that are still too large are split again, with only the
   separators after the one just used.

A segment that no separator can divide is returned as is, even if it is
larger than the chunk size. Such chunks are reported as [`SizeDiagnostic`]s.

Pipe-delimited tables are never split. If the text holding a table is too
large, the table becomes a chunk of its own.

Simpler strategies are available as well: the [`CharacterSplitter`] splits by
a single separator, the [`SentenceSplitter`] by sentences.
*/

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

mod chunk_size;
mod separator;
mod splitter;
mod table;

pub use chunk_size::{Characters, ChunkConfig, ChunkConfigError, ChunkSizer, TokenCounter};
pub use separator::Separator;
pub use splitter::{
    CharacterSplitter, Chunk, ChunkOutput, MarkdownElement, MarkdownSplitter, RecursiveSplitter,
    SentenceSplitter, SizeDiagnostic, Splitter,
};
pub use table::{find_tables, TableSpan};
