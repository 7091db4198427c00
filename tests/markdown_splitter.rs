use fake::{faker::lorem::en::Paragraphs, Fake};
use more_asserts::assert_le;
use text_chunker::{find_tables, ChunkConfig, MarkdownSplitter, Splitter, TokenCounter};

const REPORT: &str = "# Quarterly report

Revenue grew in every quarter of the year.

| Quarter | Revenue | Growth |
|---------|--------:|-------:|
| Q1      | 100     | 5%     |
| Q2      | 120     | 20%    |
| Q3      | 150     | 25%    |
| Q4      | 180     | 20%    |
| Total   | 550     |        |

## Outlook

Next year should look much the same.
";

fn texts(splitter: &MarkdownSplitter<text_chunker::Characters>, text: &str) -> Vec<String> {
    splitter
        .chunks(text)
        .into_iter()
        .map(|chunk| chunk.text)
        .collect()
}

#[test]
fn fallsback_to_normal_text_split_if_no_markdown_content() {
    let splitter = MarkdownSplitter::new(ChunkConfig::new(10).unwrap());
    let text = "Some text\n\nfrom a\ndocument";

    assert_eq!(texts(&splitter, text), vec!["Some text", "from a", "document"]);
}

#[test]
fn headings_sections_and_rules() {
    let splitter = MarkdownSplitter::new(ChunkConfig::new(50).unwrap().with_overlap(5).unwrap());
    let text = "# Main Heading\nContent for main heading.\n\n## Section 2\nContent for section 2.\n\n### Subsection\nContent for subsection.\n---\nFinal content.\n";

    assert_eq!(
        texts(&splitter, text),
        vec![
            "# Main Heading\nContent for main heading.",
            "## Section 2\nContent for section 2.",
            "### Subsection\nContent for subsection.\n---",
            "---\nFinal content.",
        ]
    );
}

#[test]
fn small_chunks_fall_back_to_words() {
    let splitter = MarkdownSplitter::new(ChunkConfig::new(10).unwrap().with_overlap(1).unwrap());
    let chunks = texts(
        &splitter,
        "## Heading\n\nThis is a sample text\n---\n\nAnother section\"\n",
    );

    insta::assert_debug_snapshot!(chunks, @r###"
    [
        "##",
        "Heading",
        "This is a",
        "a sample",
        "text",
        "---",
        "Another",
        "section\"",
    ]
    "###);
}

#[test]
fn headings() {
    for heading in ["#", "##", "###", "####", "#####", "######"] {
        // Fits one section, but not the next heading
        let splitter =
            MarkdownSplitter::new(ChunkConfig::new(22 + heading.chars().count()).unwrap());
        let text = format!("Intro\n{heading} Heading\nParagraph\n{heading} Heading\nParagraph");

        assert_eq!(
            texts(&splitter, &text),
            vec![
                "Intro".to_owned(),
                format!("{heading} Heading\nParagraph"),
                format!("{heading} Heading\nParagraph"),
            ]
        );
    }
}

#[test]
fn table_is_kept_in_one_chunk() {
    let splitter = MarkdownSplitter::new(ChunkConfig::new(32).unwrap().with_overlap(4).unwrap());
    let table = find_tables(REPORT)[0];
    let output = splitter.produce::<()>(REPORT, None);

    let with_table = output
        .chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| chunk.text.contains(table.text))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    assert_eq!(with_table.len(), 1);
    assert_eq!(output.chunks[with_table[0]].text, table.text);

    // No partial rows anywhere else
    assert!(output
        .chunks
        .iter()
        .filter(|chunk| chunk.text != table.text)
        .all(|chunk| !chunk.text.contains('|')));

    // Only the table is allowed over the chunk size
    assert_eq!(
        output
            .diagnostics
            .iter()
            .map(|diagnostic| diagnostic.chunk_index)
            .collect::<Vec<_>>(),
        with_table
    );
}

#[test]
fn table_smaller_than_chunk_size_stays_in_context() {
    let splitter = MarkdownSplitter::new(ChunkConfig::new(1000).unwrap());
    let chunks = texts(&splitter, REPORT);

    assert_eq!(chunks, vec![REPORT.trim()]);
}

#[test]
fn random_markdown_respects_token_counts() {
    let words = |text: &str| text.split_whitespace().count();
    let paragraphs = Paragraphs(4..8).fake::<Vec<String>>();
    let text = paragraphs
        .iter()
        .enumerate()
        .map(|(index, paragraph)| format!("## Section {index}\n\n{paragraph}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    for chunk_size in [4, 16, 64] {
        let config = ChunkConfig::new(chunk_size)
            .unwrap()
            .with_overlap(1)
            .unwrap()
            .with_sizer(TokenCounter::new(words));
        let chunks = MarkdownSplitter::new(config).chunks(&text);

        for chunk in &chunks {
            assert_le!(words(&chunk.text), chunk_size);
        }
        // Headings are never split
        for index in 0..paragraphs.len() {
            let heading = format!("## Section {index}");
            assert!(chunks.iter().any(|chunk| chunk.text.contains(&heading)));
        }
    }
}
