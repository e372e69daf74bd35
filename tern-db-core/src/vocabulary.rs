//! Sorted term dictionary mapping RDF terms to dense ids.
//!
//! The vocabulary is built once at index time and read-only afterwards. Words
//! are kept sorted under the configured [`TermComparator`], so a word's id is
//! its lexical rank; all range lookups rely on that correspondence.
//!
//! Storage is either plain strings or prefix-compressed: each compressed word
//! is one codeword byte (an index into a codebook of up to
//! [`NUM_COMPRESSION_PREFIXES`] declared prefixes) followed by the raw
//! suffix. Rarely-referenced literals can be routed to an
//! [`ExternalVocabulary`] whose ids follow after all internal ids.

use crate::comparator::TermComparator;
use crate::error::{Error, Result};
use crate::external::ExternalVocabulary;
use crate::ids::{Id, IdRange, ID_NO_VALUE, PREFIX_CHAR};
use crate::records;
use crate::term;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Maximum number of entries in the prefix-compression codebook. Codeword 0
/// is reserved for "no prefix", so one byte addresses the whole book.
pub const NUM_COMPRESSION_PREFIXES: usize = 127;

/// Construction-time settings of a [`Vocabulary`].
///
/// Collation must match between the build side and the lookup side, otherwise
/// ids are meaningless. Compression and externalization lists survive
/// [`Vocabulary::clear`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyOptions {
    /// Use the case-insensitive, literal-aware collation.
    pub ignore_case: bool,
    /// Prefixes for the compression codebook; empty disables compression.
    pub compression_prefixes: Vec<String>,
    /// Words starting with one of these prefixes are routed to the external
    /// store.
    pub externalized_prefixes: Vec<String>,
    /// Language tags whose literals stay in the internal store.
    pub internalized_langs: Vec<String>,
}

impl Default for VocabularyOptions {
    fn default() -> Self {
        Self {
            ignore_case: false,
            compression_prefixes: Vec::new(),
            externalized_prefixes: Vec::new(),
            internalized_langs: vec!["en".to_string()],
        }
    }
}

/// Prefix-compression codebook.
#[derive(Clone, Debug)]
struct PrefixCodebook {
    /// Codeword byte to prefix text; entry 0 is the empty prefix.
    by_code: Vec<String>,
    /// `(codeword, prefix)` sorted by descending prefix length, so encoding
    /// always picks the longest declared match.
    by_length: Vec<(u8, String)>,
}

impl PrefixCodebook {
    fn new(prefixes: &[String]) -> Result<Self> {
        if prefixes.len() > NUM_COMPRESSION_PREFIXES {
            return Err(Error::check(format!(
                "at most {NUM_COMPRESSION_PREFIXES} compression prefixes are supported, got {}",
                prefixes.len()
            )));
        }
        let mut by_code = Vec::with_capacity(prefixes.len() + 1);
        by_code.push(String::new());
        by_code.extend(prefixes.iter().cloned());
        let mut by_length: Vec<(u8, String)> = prefixes
            .iter()
            .enumerate()
            .map(|(i, p)| ((i + 1) as u8, p.clone()))
            .collect();
        by_length.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        Ok(Self { by_code, by_length })
    }

    fn compress(&self, word: &str) -> Vec<u8> {
        for (code, prefix) in &self.by_length {
            if let Some(suffix) = word.strip_prefix(prefix.as_str()) {
                let mut bytes = Vec::with_capacity(1 + suffix.len());
                bytes.push(*code);
                bytes.extend_from_slice(suffix.as_bytes());
                return bytes;
            }
        }
        let mut bytes = Vec::with_capacity(1 + word.len());
        bytes.push(0);
        bytes.extend_from_slice(word.as_bytes());
        bytes
    }

    fn expand(&self, bytes: &[u8]) -> String {
        let (code, suffix) = match bytes.split_first() {
            Some(split) => split,
            None => return String::new(),
        };
        let prefix = self
            .by_code
            .get(*code as usize)
            .map(String::as_str)
            .unwrap_or("");
        let mut word = String::with_capacity(prefix.len() + suffix.len());
        word.push_str(prefix);
        word.push_str(&String::from_utf8_lossy(suffix));
        word
    }
}

#[derive(Clone, Debug)]
enum WordStore {
    Plain(Vec<String>),
    Compressed {
        codebook: PrefixCodebook,
        words: Vec<Vec<u8>>,
    },
}

/// The sorted term dictionary.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    store: WordStore,
    external: ExternalVocabulary,
    externalized_prefixes: Vec<String>,
    internalized_langs: Vec<String>,
    comparator: TermComparator,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            store: WordStore::Plain(Vec::new()),
            external: ExternalVocabulary::new(),
            externalized_prefixes: Vec::new(),
            internalized_langs: vec!["en".to_string()],
            comparator: TermComparator::default(),
        }
    }
}

impl Vocabulary {
    /// Create an empty vocabulary with the given settings.
    pub fn new(options: VocabularyOptions) -> Result<Self> {
        let store = if options.compression_prefixes.is_empty() {
            WordStore::Plain(Vec::new())
        } else {
            WordStore::Compressed {
                codebook: PrefixCodebook::new(&options.compression_prefixes)?,
                words: Vec::new(),
            }
        };
        Ok(Self {
            store,
            external: ExternalVocabulary::new(),
            externalized_prefixes: options.externalized_prefixes,
            internalized_langs: options.internalized_langs,
            comparator: TermComparator::new(options.ignore_case),
        })
    }

    /// Build a vocabulary from an unordered word set. Words are sorted under
    /// the configured comparator and deduplicated, establishing the
    /// order-equals-id invariant.
    pub fn from_words(
        words: impl IntoIterator<Item = String>,
        options: VocabularyOptions,
    ) -> Result<Self> {
        let mut vocab = Self::new(options)?;
        let mut words: Vec<String> = words.into_iter().collect();
        let comparator = vocab.comparator;
        words.sort_by(|a, b| comparator.cmp(a, b));
        words.dedup();
        for word in &words {
            vocab.push(word);
        }
        Ok(vocab)
    }

    /// Number of words in the internal store.
    pub fn len(&self) -> usize {
        match &self.store {
            WordStore::Plain(words) => words.len(),
            WordStore::Compressed { words, .. } => words.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of externalized words.
    pub fn external_len(&self) -> usize {
        self.external.len()
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self.store, WordStore::Compressed { .. })
    }

    pub fn comparator(&self) -> &TermComparator {
        &self.comparator
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.comparator.is_ignore_case()
    }

    /// Switch the collation. Only meaningful on an empty vocabulary; words
    /// already stored keep their old order.
    pub fn set_ignore_case(&mut self, ignore_case: bool) {
        self.comparator = TermComparator::new(ignore_case);
    }

    pub fn reserve(&mut self, additional: usize) {
        match &mut self.store {
            WordStore::Plain(words) => words.reserve(additional),
            WordStore::Compressed { words, .. } => words.reserve(additional),
        }
    }

    /// Drop all contents but keep compression, externalization, and collation
    /// settings.
    pub fn clear(&mut self) {
        match &mut self.store {
            WordStore::Plain(words) => words.clear(),
            WordStore::Compressed { words, .. } => words.clear(),
        }
        self.external.clear();
    }

    /// Append a word. The caller is responsible for collation order; use
    /// [`Vocabulary::from_words`] when the input is unordered.
    pub fn push(&mut self, word: &str) {
        match &mut self.store {
            WordStore::Plain(words) => words.push(word.to_string()),
            WordStore::Compressed { codebook, words } => words.push(codebook.compress(word)),
        }
    }

    /// Materialize the word with the given id, decompressing or routing to
    /// the external store as needed. `ID_NO_VALUE` and out-of-range ids map
    /// to `None`.
    pub fn at(&self, id: Id) -> Option<String> {
        if id == ID_NO_VALUE {
            return None;
        }
        let internal = self.len() as Id;
        if id < internal {
            Some(self.stored(id as usize))
        } else {
            self.external.at(id - internal).map(str::to_string)
        }
    }

    /// Id of `word`, honoring the externalization policy: internal words are
    /// found by rank, externalized words by the external store with the
    /// internal size added.
    pub fn get_id(&self, word: &str) -> Option<Id> {
        if !self.should_be_externalized(word) {
            let idx = self.lower_bound(word);
            // Exact-match check works under the case-insensitive collation
            // too because the ordering is strict.
            return (idx < self.len() && self.stored(idx) == word).then_some(idx as Id);
        }
        self.external
            .get_id(word, &self.comparator)
            .map(|id| id + self.len() as Id)
    }

    /// Boundary id for a `term < word` scan: the rank of the first word not
    /// below `word`.
    pub fn value_id_for_lt(&self, word: &str) -> Id {
        self.lower_bound(word) as Id
    }

    /// Boundary id for a `term <= word` scan. On a miss the lower bound
    /// points one past the last qualifying word, so step back (except at rank
    /// zero, where the returned id is only meaningful together with the op).
    pub fn value_id_for_le(&self, word: &str) -> Id {
        let mut idx = self.lower_bound(word);
        if idx < self.len() && idx > 0 && self.stored(idx) != word {
            idx -= 1;
        }
        idx as Id
    }

    /// Boundary id for a `term > word` scan. Mirrors
    /// [`Vocabulary::value_id_for_le`]: on a miss there is nothing between
    /// the lower bound and its predecessor, so the predecessor is safe.
    pub fn value_id_for_gt(&self, word: &str) -> Id {
        let mut idx = self.lower_bound(word);
        if idx < self.len() && idx > 0 && self.stored(idx) != word {
            idx -= 1;
        }
        idx as Id
    }

    /// Boundary id for a `term >= word` scan.
    pub fn value_id_for_ge(&self, word: &str) -> Id {
        self.lower_bound(word) as Id
    }

    /// Id range of all words starting with the stem of `word`, which must end
    /// with [`PREFIX_CHAR`]. Returns `None` when no stored word carries the
    /// stem.
    pub fn id_range_for_full_text_prefix(&self, word: &str) -> Result<Option<IdRange>> {
        if !word.ends_with(PREFIX_CHAR) {
            return Err(Error::check(format!(
                "full-text prefix query must end with '{PREFIX_CHAR}': {word}"
            )));
        }
        let stem = &word[..word.len() - PREFIX_CHAR.len_utf8()];
        let first = self.lower_bound(stem);
        let stem_chars = stem.chars().count();
        // First rank whose word, truncated to the stem length, sorts above
        // the stem.
        let upper = self.partition_point_from(first, |w| {
            self.comparator.cmp(stem, truncate_chars(w, stem_chars)) != Ordering::Less
        });
        let Some(last) = upper.checked_sub(1) else {
            return Ok(None);
        };
        let success = first < self.len()
            && first <= last
            && last < self.len()
            && self.stored(first).starts_with(stem)
            && self.stored(last).starts_with(stem);
        Ok(success.then(|| IdRange::new(first as Id, last as Id)))
    }

    /// Whether `word` belongs in the external store.
    pub fn should_be_externalized(&self, word: &str) -> bool {
        self.should_entity_be_externalized(word) || self.should_literal_be_externalized(word)
    }

    fn should_entity_be_externalized(&self, word: &str) -> bool {
        self.externalized_prefixes
            .iter()
            .any(|prefix| word.starts_with(prefix.as_str()))
    }

    fn should_literal_be_externalized(&self, word: &str) -> bool {
        if !term::is_literal(word) {
            return false;
        }
        let lang = term::language_of_literal(word);
        if lang.is_empty() {
            // Untagged literals stay internal.
            return false;
        }
        !self.internalized_langs.iter().any(|l| l == lang)
    }

    /// Write the internal store to `path` in record format, expanded and in
    /// collation order.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for idx in 0..self.len() {
            records::write_record(&mut writer, &self.stored(idx))?;
        }
        writer.flush()?;
        info!(words = self.len(), file = %path.display(), "wrote vocabulary");
        Ok(())
    }

    /// Load the vocabulary (and optionally the external literals companion)
    /// from record files. Contents are replaced; settings are kept. The files
    /// are trusted to be in collation order; compression, if configured, is
    /// applied while loading.
    pub fn read_from_file(&mut self, path: &Path, external: Option<&Path>) -> Result<()> {
        self.clear();
        let mut reader = BufReader::new(File::open(path)?);
        while let Some(word) = records::read_record(&mut reader)? {
            self.push(&word);
        }
        if let Some(external_path) = external {
            self.external.read_from_file(external_path)?;
        }
        info!(
            words = self.len(),
            external = self.external_len(),
            file = %path.display(),
            "loaded vocabulary"
        );
        Ok(())
    }

    /// Build the external literal store from a plain text file (one literal
    /// per line) and write its record-format companion file.
    pub fn externalize_literals_from_text_file(
        &mut self,
        text_file: &Path,
        out_file: &Path,
    ) -> Result<()> {
        self.external
            .build_from_text_file(text_file, out_file, &self.comparator)
    }

    /// Index-build utility: compress `infile` (one word per line) to
    /// `outfile` (one codeword-prefixed word per line, raw bytes) using the
    /// given prefixes.
    pub fn prefix_compress_file(infile: &Path, outfile: &Path, prefixes: &[String]) -> Result<()> {
        let codebook = PrefixCodebook::new(prefixes)?;
        let reader = BufReader::new(File::open(infile)?);
        let mut writer = BufWriter::new(File::create(outfile)?);
        let mut count = 0usize;
        for line in reader.lines() {
            writer.write_all(&codebook.compress(&line?))?;
            writer.write_all(b"\n")?;
            count += 1;
        }
        writer.flush()?;
        info!(words = count, out = %outfile.display(), "prefix-compressed vocabulary file");
        Ok(())
    }

    /// All internal words as a lookup map. Only needed while building the
    /// index, where ids are resolved in bulk; query-time lookups use
    /// [`Vocabulary::get_id`].
    pub fn as_map(&self) -> HashMap<String, Id> {
        (0..self.len())
            .map(|idx| (self.stored(idx), idx as Id))
            .collect()
    }

    /// Materialize the internal word at rank `idx`. Callers check bounds.
    fn stored(&self, idx: usize) -> String {
        match &self.store {
            WordStore::Plain(words) => words[idx].clone(),
            WordStore::Compressed { codebook, words } => codebook.expand(&words[idx]),
        }
    }

    /// Rank of the first word not below `word` under the active collation.
    fn lower_bound(&self, word: &str) -> usize {
        self.partition_point_from(0, |stored| self.comparator.less(stored, word))
    }

    /// Binary search over ranks `from..len()` for the first word failing
    /// `pred`; the store is partitioned with respect to `pred` by the sorted
    /// build order.
    fn partition_point_from(&self, from: usize, pred: impl Fn(&str) -> bool) -> usize {
        let mut lo = from;
        let mut hi = self.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(&self.stored(mid)) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

/// Truncate to at most `n` characters (not bytes).
fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(words: &[&str]) -> Vocabulary {
        Vocabulary::from_words(
            words.iter().map(|w| w.to_string()),
            VocabularyOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn ids_follow_collation_order() {
        let vocab = plain(&["dog", "ant", "cat", "bee"]);
        assert_eq!(vocab.get_id("ant"), Some(0));
        assert_eq!(vocab.get_id("bee"), Some(1));
        assert_eq!(vocab.get_id("cat"), Some(2));
        assert_eq!(vocab.get_id("dog"), Some(3));
        assert_eq!(vocab.at(2), Some("cat".to_string()));
        assert_eq!(vocab.get_id("cow"), None);

        // Order-id correspondence: id(a) < id(b) iff a < b.
        let words = ["ant", "bee", "cat", "dog"];
        for a in &words {
            for b in &words {
                let less_by_id = vocab.get_id(a).unwrap() < vocab.get_id(b).unwrap();
                assert_eq!(less_by_id, vocab.comparator().less(a, b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn range_boundaries_for_present_word() {
        let vocab = plain(&["ant", "bee", "cat", "dog"]);
        assert_eq!(vocab.value_id_for_lt("cat"), 2);
        assert_eq!(vocab.value_id_for_le("cat"), 2);
        assert_eq!(vocab.value_id_for_gt("cat"), 2);
        assert_eq!(vocab.value_id_for_ge("cat"), 2);
    }

    #[test]
    fn range_boundaries_for_absent_word() {
        let vocab = plain(&["ant", "bee", "cat", "dog"]);
        assert_eq!(vocab.value_id_for_lt("bat"), 1);
        assert_eq!(vocab.value_id_for_le("bat"), 0);
        assert_eq!(vocab.value_id_for_gt("bat"), 0);
        assert_eq!(vocab.value_id_for_ge("bat"), 1);
    }

    #[test]
    fn range_boundaries_select_exactly_the_matching_terms() {
        let vocab = plain(&["ant", "bee", "cat", "dog"]);
        let all: Vec<String> = (0..vocab.len()).map(|i| vocab.at(i as Id).unwrap()).collect();
        // Probes at or above the first word; below it the LE/GT boundary id
        // is only meaningful together with the op (position-zero caveat).
        for probe in ["ant", "bat", "cat", "dog", "emu"] {
            let lt = vocab.value_id_for_lt(probe);
            let le = vocab.value_id_for_le(probe);
            let gt = vocab.value_id_for_gt(probe);
            let ge = vocab.value_id_for_ge(probe);
            for (i, word) in all.iter().enumerate() {
                let i = i as Id;
                assert_eq!(i < lt, word.as_str() < probe, "LT {probe} at {word}");
                assert_eq!(i <= le, word.as_str() <= probe, "LE {probe} at {word}");
                assert_eq!(i > gt, word.as_str() > probe, "GT {probe} at {word}");
                assert_eq!(i >= ge, word.as_str() >= probe, "GE {probe} at {word}");
            }
        }
    }

    #[test]
    fn case_insensitive_build_keeps_lookup_consistent() {
        let mut options = VocabularyOptions::default();
        options.ignore_case = true;
        let vocab = Vocabulary::from_words(
            [
                "\"banana\"@en",
                "\"Apple\"",
                "<http://a>",
                "\"apple\"@de",
                "\"apple\"@en",
            ]
            .iter()
            .map(|w| w.to_string()),
            options,
        )
        .unwrap();
        assert_eq!(vocab.at(0), Some("<http://a>".to_string()));
        assert_eq!(vocab.at(1), Some("\"Apple\"".to_string()));
        assert_eq!(vocab.at(2), Some("\"apple\"@de".to_string()));
        assert_eq!(vocab.at(4), Some("\"banana\"@en".to_string()));
        assert_eq!(vocab.get_id("\"apple\"@en"), Some(3));
    }

    #[test]
    fn id_no_value_is_absent() {
        let vocab = plain(&["ant"]);
        assert_eq!(vocab.at(ID_NO_VALUE), None);
        assert_eq!(vocab.get_id("ant"), Some(0));
    }

    #[test]
    fn full_text_prefix_range() {
        let vocab = plain(&["ant", "anteater", "antelope", "bee"]);
        let range = vocab.id_range_for_full_text_prefix("ant*").unwrap().unwrap();
        assert_eq!(range, IdRange::new(0, 2));
        assert_eq!(vocab.id_range_for_full_text_prefix("cow*").unwrap(), None);
        assert!(vocab.id_range_for_full_text_prefix("ant").is_err());
    }

    #[test]
    fn prefix_compression_round_trips() {
        let prefixes = vec![
            "<http://example.org/".to_string(),
            "<http://example.org/sub/".to_string(),
            "\"".to_string(),
        ];
        let mut options = VocabularyOptions::default();
        options.compression_prefixes = prefixes;
        let words = [
            "<http://example.org/a>",
            "<http://example.org/sub/b>",
            "\"plain literal\"",
            "no declared prefix",
        ];
        let vocab =
            Vocabulary::from_words(words.iter().map(|w| w.to_string()), options).unwrap();
        assert!(vocab.is_compressed());
        for word in &words {
            let id = vocab.get_id(word).unwrap();
            assert_eq!(vocab.at(id).as_deref(), Some(*word), "{word}");
        }
    }

    #[test]
    fn codebook_rejects_too_many_prefixes() {
        let prefixes: Vec<String> = (0..NUM_COMPRESSION_PREFIXES + 1)
            .map(|i| format!("p{i}"))
            .collect();
        let mut options = VocabularyOptions::default();
        options.compression_prefixes = prefixes;
        assert!(Vocabulary::new(options).is_err());
    }

    #[test]
    fn externalization_policy() {
        let mut options = VocabularyOptions::default();
        options.externalized_prefixes = vec!["<http://statements.example/".to_string()];
        let vocab = Vocabulary::new(options).unwrap();
        assert!(vocab.should_be_externalized("<http://statements.example/s1>"));
        assert!(vocab.should_be_externalized("\"maison\"@fr"));
        assert!(!vocab.should_be_externalized("\"house\"@en"));
        assert!(!vocab.should_be_externalized("\"untagged\""));
        assert!(!vocab.should_be_externalized("<http://example.org/a>"));
    }

    #[test]
    fn external_ids_follow_internal_ids() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("lits.txt");
        let out = dir.path().join("lits.vocab");
        std::fs::write(&text, "\"maison\"@fr\n\"casa\"@es\n").unwrap();

        let mut vocab = plain(&["ant", "bee"]);
        vocab
            .externalize_literals_from_text_file(&text, &out)
            .unwrap();
        assert_eq!(vocab.external_len(), 2);
        // "casa"@es sorts before "maison"@fr; both are offset by the
        // internal size.
        assert_eq!(vocab.get_id("\"casa\"@es"), Some(2));
        assert_eq!(vocab.get_id("\"maison\"@fr"), Some(3));
        assert_eq!(vocab.at(3), Some("\"maison\"@fr".to_string()));
        assert_eq!(vocab.at(4), None);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.vocab");
        let vocab = plain(&["ant", "bee", "cat"]);
        vocab.write_to_file(&path).unwrap();

        let mut reloaded = Vocabulary::default();
        reloaded.read_from_file(&path, None).unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.get_id("bee"), Some(1));
        assert_eq!(reloaded.at(2), Some("cat".to_string()));
    }

    #[test]
    fn compressed_vocabulary_reads_uncompressed_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.vocab");
        plain(&["<http://example.org/a>", "<http://example.org/b>"])
            .write_to_file(&path)
            .unwrap();

        let mut options = VocabularyOptions::default();
        options.compression_prefixes = vec!["<http://example.org/".to_string()];
        let mut compressed = Vocabulary::new(options).unwrap();
        compressed.read_from_file(&path, None).unwrap();
        assert!(compressed.is_compressed());
        assert_eq!(compressed.get_id("<http://example.org/b>"), Some(1));
        assert_eq!(
            compressed.at(0),
            Some("<http://example.org/a>".to_string())
        );
    }

    #[test]
    fn as_map_covers_the_internal_store() {
        let vocab = plain(&["ant", "bee"]);
        let map = vocab.as_map();
        assert_eq!(map.get("ant"), Some(&0));
        assert_eq!(map.get("bee"), Some(&1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn clear_preserves_settings() {
        let mut options = VocabularyOptions::default();
        options.ignore_case = true;
        options.compression_prefixes = vec!["<http://example.org/".to_string()];
        let mut vocab = Vocabulary::new(options).unwrap();
        vocab.push("<http://example.org/a>");
        vocab.clear();
        assert!(vocab.is_empty());
        assert_eq!(vocab.external_len(), 0);
        assert!(vocab.is_compressed());
        assert!(vocab.is_case_insensitive());
    }
}
