//! Candidate for a spelling correction.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;

/// A ranked correction candidate returned by a lookup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    /// the display form as it appears in the lexicon
    pub canonical: SmolStr,
    /// Damerau-Levenshtein distance between the normalized query and the
    /// entry's normalized form
    pub distance: usize,
    /// merged frequency of the lexicon entry
    pub frequency: u64,
}

impl Candidate {
    /// creates a candidate
    pub fn new(canonical: SmolStr, distance: usize, frequency: u64) -> Candidate {
        Candidate {
            canonical,
            distance,
            frequency,
        }
    }

    /// gets the display form
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    /// distance ascending, then frequency descending, then canonical
    /// ascending as the stable tiebreak
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.canonical.cmp(&other.canonical))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
            && self.distance == other.distance
            && self.frequency == other.frequency
    }
}

impl Eq for Candidate {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(canonical: &str, distance: usize, frequency: u64) -> Candidate {
        Candidate::new(SmolStr::new(canonical), distance, frequency)
    }

    #[test]
    fn orders_by_distance_then_frequency_then_canonical() {
        let mut v = vec![
            cand("rare", 1, 3),
            cand("close", 0, 1),
            cand("common", 1, 900),
            cand("beta", 1, 3),
        ];
        v.sort();
        let order: Vec<&str> = v.iter().map(|c| c.canonical()).collect();
        assert_eq!(order, ["close", "common", "beta", "rare"]);
    }
}
