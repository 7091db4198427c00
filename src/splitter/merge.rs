use std::collections::VecDeque;

use itertools::Itertools;

use crate::{chunk_size::MemoizedChunkSizer, table::contains_table, ChunkSizer, Separator};

/// A segment sitting in the merge window
#[derive(Debug)]
struct Piece<'text> {
    text: &'text str,
    size: usize,
    /// Holds a table, so it must end up whole in exactly one chunk
    atomic: bool,
}

/// Greedily pack segments into chunks below the chunk size, re-emitting
/// trailing segments at the start of the next chunk up to the overlap.
///
/// The size of a window counts its segments and the separators that join
/// them. Overlap is measured in sizer units. Segments holding a table that
/// would overflow the window are emitted on their own, and a table is never
/// carried over as overlap.
pub(crate) fn merge_segments<'text, Sizer>(
    segments: &[&'text str],
    separator: &Separator,
    sizer: &mut MemoizedChunkSizer<'_, 'text, Sizer>,
) -> Vec<String>
where
    Sizer: ChunkSizer,
{
    let chunk_size = sizer.chunk_size();
    let overlap = sizer.overlap();
    let join = separator.join_token();
    let join_size = sizer.size_uncached(join);

    let mut merged = Vec::new();
    let mut window: VecDeque<Piece<'text>> = VecDeque::new();
    // Size of the joined window
    let mut total = 0;

    for &segment in segments {
        let size = sizer.size(segment);
        let atomic = contains_table(segment);
        // What appending the segment adds to the window
        let added = |window: &VecDeque<Piece<'text>>| {
            if window.is_empty() {
                size
            } else {
                join_size + size
            }
        };

        if atomic && total + added(&window) >= chunk_size {
            merged.extend(joined(window.drain(..).map(|p| p.text), join));
            total = 0;
            merged.extend(joined([segment].into_iter(), join));
            continue;
        }

        if !window.is_empty() && total + added(&window) >= chunk_size {
            merged.extend(joined(window.iter().map(|p| p.text), join));

            // Keep the tail as overlap, and make room for the next segment
            while let Some(front_size) = window.front().map(|p| p.size) {
                if total > overlap || (total + added(&window) >= chunk_size && total > 0) {
                    window.pop_front();
                    total -= if window.is_empty() {
                        front_size
                    } else {
                        front_size + join_size
                    };
                } else {
                    break;
                }
            }
            if let Some(last_table) = window.iter().rposition(|p| p.atomic) {
                window.drain(..=last_table);
                total = window_size(&window, join_size);
            }
        }

        total += added(&window);
        window.push_back(Piece {
            text: segment,
            size,
            atomic,
        });
    }

    merged.extend(joined(window.iter().map(|p| p.text), join));
    merged
}

fn window_size(window: &VecDeque<Piece<'_>>, join_size: usize) -> usize {
    window.iter().map(|p| p.size).sum::<usize>() + join_size * window.len().saturating_sub(1)
}

/// Join segments, trimming the result. Whitespace-only results are dropped.
fn joined<'text>(segments: impl Iterator<Item = &'text str>, join: &str) -> Option<String> {
    let text = segments.format(join).to_string();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
