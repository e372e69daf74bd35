//! Externalized literal store.
//!
//! A secondary sorted dictionary for rarely-referenced literals (entity
//! descriptions, statements in non-internalized languages). Its ids are
//! allocated *after* all internal ids; the owning [`Vocabulary`] applies the
//! offset, this store only knows local ranks.
//!
//! [`Vocabulary`]: crate::vocabulary::Vocabulary

use crate::comparator::TermComparator;
use crate::ids::Id;
use crate::records;
use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Sorted store of externalized literals.
#[derive(Clone, Debug, Default)]
pub struct ExternalVocabulary {
    words: Vec<String>,
}

impl ExternalVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// The word at local rank `id`.
    pub fn at(&self, id: Id) -> Option<&str> {
        self.words.get(id as usize).map(String::as_str)
    }

    /// Local rank of `word`, if present. The comparator must be the one the
    /// store was built with.
    pub fn get_id(&self, word: &str, comparator: &TermComparator) -> Option<Id> {
        let pos = self.words.partition_point(|w| comparator.less(w, word));
        (pos < self.words.len() && self.words[pos] == word).then_some(pos as Id)
    }

    /// Build the store from a plain text file (one literal per line), sort it
    /// under `comparator`, and write the record-format companion file.
    pub fn build_from_text_file(
        &mut self,
        text_file: &Path,
        out_file: &Path,
        comparator: &TermComparator,
    ) -> Result<()> {
        let reader = BufReader::new(File::open(text_file)?);
        let mut words = Vec::new();
        for line in reader.lines() {
            words.push(line?);
        }
        words.sort_by(|a, b| comparator.cmp(a, b));
        words.dedup();
        info!(
            words = words.len(),
            out = %out_file.display(),
            "writing external literals file"
        );
        let mut writer = BufWriter::new(File::create(out_file)?);
        for word in &words {
            records::write_record(&mut writer, word)?;
        }
        self.words = words;
        Ok(())
    }

    /// Load a previously written record file. The file is trusted to be in
    /// collation order.
    pub fn read_from_file(&mut self, file: &Path) -> Result<()> {
        let mut reader = BufReader::new(File::open(file)?);
        self.words.clear();
        while let Some(word) = records::read_record(&mut reader)? {
            self.words.push(word);
        }
        info!(
            words = self.words.len(),
            file = %file.display(),
            "loaded external literals"
        );
        Ok(())
    }

    pub(crate) fn push(&mut self, word: String) {
        self.words.push(word);
    }
}
