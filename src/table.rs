/*!
# [`find_tables`]
Heuristic detection of pipe-delimited tables, so they can be kept out of
chunk boundaries. This is not a markdown parser: a table is a row-shaped
header line, immediately followed by an alignment row, followed by any number
of row-shaped lines.
*/

use once_cell::sync::Lazy;
use regex::Regex;

// Lazy so that we don't have to compile them more than once
/// Starts or ends with a pipe, or has a pipe between two cells
static ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\||\|\s*$|[^|\s]\s*\|\s*[^|\s]").unwrap());
static ALIGNMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s|:-]+$").unwrap());

/// A contiguous pipe-delimited table block.
///
/// Offsets are byte offsets into the text that was scanned, which is not
/// necessarily the whole document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSpan<'text> {
    /// Byte offset of the start of the header row
    pub start: usize,
    /// Byte offset of the end of the last row, excluding its line break
    pub end: usize,
    /// The table text, `text[start..end]`
    pub text: &'text str,
}

/// Find all tables in the text, in document order. Tables never overlap.
///
/// Never fails: ambiguous pipe usage simply doesn't pass the header and
/// alignment test and is treated as ordinary text.
///
/// ```
/// use text_chunker::find_tables;
///
/// let text = "Intro\n| a | b |\n|---|---|\n| 1 | 2 |\nOutro";
/// let tables = find_tables(text);
///
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].text, "| a | b |\n|---|---|\n| 1 | 2 |");
/// assert_eq!(&text[tables[0].start..tables[0].end], tables[0].text);
/// ```
#[must_use]
pub fn find_tables(text: &str) -> Vec<TableSpan<'_>> {
    let mut lines = text
        .split_inclusive('\n')
        .scan(0, |offset, line| {
            let start = *offset;
            *offset += line.len();
            Some((start, line.trim_end_matches(['\n', '\r'])))
        })
        .peekable();
    let mut tables = Vec::new();

    while let Some((start, header)) = lines.next() {
        if !is_row(header) {
            continue;
        }
        // Only a header followed by an alignment row confirms a table
        let Some(&(alignment_start, alignment)) = lines.peek() else {
            break;
        };
        if !is_alignment(alignment) {
            continue;
        }
        lines.next();

        let mut end = alignment_start + alignment.len();
        while let Some((row_start, row)) = lines.next_if(|(_, line)| is_row(line)) {
            end = row_start + row.len();
        }

        tables.push(TableSpan {
            start,
            end,
            text: &text[start..end],
        });
    }

    tables
}

/// Whether the text holds at least one table.
#[must_use]
pub(crate) fn contains_table(text: &str) -> bool {
    !find_tables(text).is_empty()
}

/// Regroup segments so no table is divided between them. Consecutive
/// segments that overlap the same table become one segment spanning them,
/// including whatever separated them. Other segments pass through.
///
/// Offsets are byte offsets of each segment in `text`, in order.
pub(crate) fn keep_tables_whole<'text>(
    text: &'text str,
    segments: impl IntoIterator<Item = (usize, &'text str)>,
) -> Vec<&'text str> {
    let tables = find_tables(text);
    if tables.is_empty() {
        return segments.into_iter().map(|(_, segment)| segment).collect();
    }

    let mut grouped = Vec::new();
    // Start, end and last table of the segments grouped so far
    let mut group: Option<(usize, usize, usize)> = None;

    for (start, segment) in segments {
        let end = start + segment.len();
        let overlapping = tables
            .iter()
            .enumerate()
            .filter(|(_, table)| start < table.end && end > table.start)
            .map(|(i, _)| i);
        let Some((first, last)) = overlapping.clone().next().zip(overlapping.last()) else {
            grouped.extend(group.take().map(|(from, to, _)| &text[from..to]));
            grouped.push(segment);
            continue;
        };

        match group {
            Some((from, _, table)) if first <= table => {
                group = Some((from, end, table.max(last)));
            }
            _ => {
                grouped.extend(group.take().map(|(from, to, _)| &text[from..to]));
                group = Some((start, end, last));
            }
        }
    }
    grouped.extend(group.map(|(from, to, _)| &text[from..to]));

    grouped
}

fn is_row(line: &str) -> bool {
    ROW.is_match(line)
}

fn is_alignment(line: &str) -> bool {
    line.contains('|') && line.contains('-') && ALIGNMENT.is_match(line)
}
