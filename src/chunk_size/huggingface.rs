use tokenizers::Tokenizer;

use crate::ChunkSizer;

impl ChunkSizer for &Tokenizer {
    /// Returns the number of tokens in a given text after tokenization.
    /// Padding tokens at the beginning and end don't count towards the size.
    ///
    /// # Panics
    ///
    /// Will panic if you don't have a byte-level tokenizer and the splitter
    /// encounters text it can't tokenize.
    fn size(&self, chunk: &str) -> usize {
        let encoding = self
            .encode(chunk, false)
            .expect("Unable to tokenize the following string {chunk}");

        let pad_id = self.get_padding().map(|params| params.pad_id);

        encoding
            .get_ids()
            .iter()
            .skip_while(|&id| pad_id.map_or(false, |pad_id| id == &pad_id))
            .take_while(|&id| pad_id.map_or(true, |pad_id| id != &pad_id))
            .count()
    }
}

impl ChunkSizer for Tokenizer {
    /// Returns the number of tokens in a given text after tokenization.
    ///
    /// # Panics
    ///
    /// Will panic if you don't have a byte-level tokenizer and the splitter
    /// encounters text it can't tokenize.
    fn size(&self, chunk: &str) -> usize {
        (&self).size(chunk)
    }
}
