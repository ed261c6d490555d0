use std::cmp::Ordering;
use std::collections::HashMap;

/// Ordering applied to counted words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Least frequent first.
    #[default]
    Ascending,
    /// Most frequent first.
    Descending,
    /// By word, ignoring counts.
    Alphabetical,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Word occurrence counts. Every stored count is at least one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more occurrence of `word`.
    pub fn record(&mut self, word: &str) {
        match self.counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(word.to_owned(), 1);
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counted occurrences.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Entries ordered by `direction`. Equal counts fall back to word order so
    /// the output is deterministic.
    pub fn sorted(&self, direction: SortDirection) -> Vec<WordCount> {
        let mut entries: Vec<WordCount> = self
            .counts
            .iter()
            .map(|(word, count)| WordCount::new(word.clone(), *count))
            .collect();
        entries.sort_unstable_by(|a, b| compare(a, b, direction));
        entries
    }
}

impl<'a> Extend<&'a str> for FrequencyTable {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        for word in words {
            self.record(word);
        }
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(words: I) -> Self {
        let mut table = FrequencyTable::new();
        table.extend(words);
        table
    }
}

fn compare(a: &WordCount, b: &WordCount, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => a.count.cmp(&b.count).then_with(|| a.word.cmp(&b.word)),
        SortDirection::Descending => b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)),
        SortDirection::Alphabetical => a.word.cmp(&b.word),
    }
}
