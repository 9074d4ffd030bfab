//! Symmetric-delete lexicon index.
//!
//! At build time the index stores, for every lexicon entry, all strings
//! obtainable by deleting up to `max_edit_distance` characters from the
//! entry's normalized form. At lookup time the same deletions are applied
//! to the query; shared delete keys identify candidates, which are then
//! verified with a true Damerau-Levenshtein computation.

use hashbrown::{HashMap, HashSet};
use serde::Serialize;
use smol_str::SmolStr;

use crate::normalizer::normalized_key;

pub mod candidate;

pub use candidate::Candidate;

/// Tallies of rows rejected or merged while building an index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// rows whose structure did not parse or whose term normalized to empty
    pub skipped_malformed: u64,
    /// rows rejected for containing multiple words; whitespace elision
    /// indexes multi-word terms instead, so this stays zero
    pub skipped_multiword: u64,
    /// rows whose frequency field was not a decimal unsigned integer
    pub skipped_invalid_freq: u64,
    /// rows merged into an existing entry with the same normalized key
    pub skipped_duplicates: u64,
}

#[derive(Debug)]
struct Entry {
    canonical: SmolStr,
    normalized: SmolStr,
    frequency: u64,
}

struct PendingEntry {
    canonical: SmolStr,
    normalized: SmolStr,
    frequency: u64,
    // highest single pre-merge row frequency; decides which canonical wins
    best_row_frequency: u64,
}

/// Accumulates `(canonical, frequency)` rows, merging duplicates by
/// normalized key, then seals them into a [`LexiconIndex`].
pub struct LexiconIndexBuilder {
    max_edit_distance: usize,
    pending: Vec<PendingEntry>,
    by_key: HashMap<SmolStr, u32>,
    stats: BuildStats,
}

impl LexiconIndexBuilder {
    /// creates a builder for the given maximum edit distance
    pub fn new(max_edit_distance: usize) -> LexiconIndexBuilder {
        LexiconIndexBuilder {
            max_edit_distance,
            pending: Vec::new(),
            by_key: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Adds one lexicon row. Rows normalizing to an empty key are tallied
    /// as malformed. A row whose normalized key is already present merges
    /// into the existing entry: frequencies are summed and the canonical of
    /// the row with the highest individual frequency is retained, first
    /// seen winning ties.
    pub fn push(&mut self, canonical: &str, frequency: u64) {
        let normalized = normalized_key(canonical);
        if normalized.is_empty() {
            self.stats.skipped_malformed += 1;
            return;
        }

        if let Some(&id) = self.by_key.get(&normalized) {
            let entry = &mut self.pending[id as usize];
            entry.frequency += frequency;
            if frequency > entry.best_row_frequency {
                entry.best_row_frequency = frequency;
                entry.canonical = SmolStr::new(canonical);
            }
            self.stats.skipped_duplicates += 1;
            return;
        }

        let id = self.pending.len() as u32;
        self.by_key.insert(normalized.clone(), id);
        self.pending.push(PendingEntry {
            canonical: SmolStr::new(canonical),
            normalized,
            frequency,
            best_row_frequency: frequency,
        });
    }

    /// tallies a structurally unparseable row
    pub fn note_malformed(&mut self) {
        self.stats.skipped_malformed += 1;
    }

    /// tallies a row with an unparseable frequency field
    pub fn note_invalid_frequency(&mut self) {
        self.stats.skipped_invalid_freq += 1;
    }

    /// Seals the accumulated entries: every entry is expanded into its
    /// delete keys (the zero-deletion key included) and bucketed.
    pub fn build(self) -> LexiconIndex {
        let LexiconIndexBuilder {
            max_edit_distance,
            pending,
            by_key,
            stats,
        } = self;

        let entries: Vec<Entry> = pending
            .into_iter()
            .map(|p| Entry {
                canonical: p.canonical,
                normalized: p.normalized,
                frequency: p.frequency,
            })
            .collect();

        let mut deletes: HashMap<SmolStr, Vec<u32>> = HashMap::new();
        for (id, entry) in entries.iter().enumerate() {
            for variant in delete_variants(&entry.normalized, max_edit_distance) {
                deletes.entry(variant).or_default().push(id as u32);
            }
        }

        log::debug!(
            "sealed lexicon index: {} entries, {} delete keys, edit distance {}",
            entries.len(),
            deletes.len(),
            max_edit_distance
        );

        LexiconIndex {
            entries,
            by_key,
            deletes,
            max_edit_distance,
            stats,
        }
    }
}

/// Immutable fuzzy-match index over a frequency-weighted lexicon.
///
/// Answers "which entries lie within edit distance `max_edit_distance` of
/// this word". Never mutated after [`LexiconIndexBuilder::build`]; shared
/// freely between threads.
#[derive(Debug)]
pub struct LexiconIndex {
    entries: Vec<Entry>,
    by_key: HashMap<SmolStr, u32>,
    deletes: HashMap<SmolStr, Vec<u32>>,
    max_edit_distance: usize,
    stats: BuildStats,
}

impl LexiconIndex {
    /// Builds an index straight from `(canonical, frequency)` pairs.
    pub fn from_pairs<I, S>(pairs: I, max_edit_distance: usize) -> LexiconIndex
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut builder = LexiconIndexBuilder::new(max_edit_distance);
        for (canonical, frequency) in pairs {
            builder.push(canonical.as_ref(), frequency);
        }
        builder.build()
    }

    /// true iff the word's normalized form equals some entry's normalized form
    pub fn contains(&self, word: &str) -> bool {
        self.by_key.contains_key(normalized_key(word).as_str())
    }

    /// merged frequency of the entry matching the word's normalized form
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.by_key
            .get(normalized_key(word).as_str())
            .map(|&id| self.entries[id as usize].frequency)
    }

    /// Returns up to `max_results` candidates within `max_edit_distance`
    /// of the normalized query, ordered by distance ascending, frequency
    /// descending, canonical ascending.
    ///
    /// An exact match short-circuits: the distance-0 candidate is returned
    /// alone without generating query deletions. An empty normalized query
    /// returns no candidates.
    pub fn lookup(&self, word: &str, max_results: usize) -> Vec<Candidate> {
        let query = normalized_key(word);
        if query.is_empty() || max_results == 0 {
            return Vec::new();
        }

        if let Some(&id) = self.by_key.get(query.as_str()) {
            let entry = &self.entries[id as usize];
            return vec![Candidate::new(entry.canonical.clone(), 0, entry.frequency)];
        }

        let mut seen: HashSet<u32> = HashSet::new();
        let mut candidates: Vec<Candidate> = Vec::new();
        for variant in delete_variants(&query, self.max_edit_distance) {
            let Some(bucket) = self.deletes.get(variant.as_str()) else {
                continue;
            };
            for &id in bucket {
                if !seen.insert(id) {
                    continue;
                }
                let entry = &self.entries[id as usize];
                let distance = strsim::damerau_levenshtein(&query, &entry.normalized);
                if distance <= self.max_edit_distance {
                    candidates.push(Candidate::new(
                        entry.canonical.clone(),
                        distance,
                        entry.frequency,
                    ));
                }
            }
        }

        candidates.sort();
        candidates.truncate(max_results);
        candidates
    }

    /// number of merged entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// true if the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// row tallies recorded while the index was built
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// the configured maximum edit distance
    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }
}

/// Every distinct string obtainable by deleting between zero and
/// `max_deletes` characters, the input itself included. The empty string
/// appears once the whole input is deleted; it is never expanded further.
fn delete_variants(word: &str, max_deletes: usize) -> HashSet<SmolStr> {
    let mut variants = HashSet::new();
    variants.insert(SmolStr::new(word));

    let mut frontier: Vec<SmolStr> = vec![SmolStr::new(word)];
    for _ in 0..max_deletes {
        let mut next = Vec::new();
        for item in &frontier {
            let chars: Vec<char> = item.chars().collect();
            for skip in 0..chars.len() {
                let shorter: SmolStr = chars
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, c)| *c)
                    .collect();
                let is_new = variants.insert(shorter.clone());
                if is_new && !shorter.is_empty() {
                    next.push(shorter);
                }
            }
        }
        frontier = next;
    }

    variants
}
