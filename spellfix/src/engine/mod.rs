//! Correction engine.
//!
//! Composes the lexicon index and the guard behind one immutable snapshot,
//! exposes the public correction operations, and holds the snapshot in an
//! atomically swappable container so a reload never disturbs in-flight
//! readers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::dictionary;
use crate::error::SpellfixError;
use crate::guard::{Guard, PatternConfig};
use crate::index::{BuildStats, Candidate, LexiconIndex};

/// conventional suggestion fan-out when a caller has no better limit
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Build-time configuration of a correction engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    /// path of the frequency dictionary file
    pub dictionary_path: PathBuf,
    /// optional path of the protected-terms file
    #[serde(default)]
    pub protected_path: Option<PathBuf>,
    /// caller-supplied protected patterns, evaluated before the built-in
    /// skip patterns
    #[serde(default)]
    pub protected_patterns: Vec<PatternConfig>,
    /// maximum edit distance for lookups, 1 or 2
    #[serde(default = "default_edit_distance")]
    pub edit_distance: usize,
    /// minimum frequency an inexact top candidate needs before a rewrite
    /// is accepted
    #[serde(default = "default_frequency_threshold")]
    pub frequency_threshold: f64,
    /// skip URL-shaped tokens
    #[serde(default)]
    pub skip_urls: bool,
    /// skip email addresses
    #[serde(default)]
    pub skip_emails: bool,
    /// skip dotted hostnames
    #[serde(default)]
    pub skip_hostnames: bool,
    /// skip code identifiers: camelCase, snake_case, dotted paths and kin
    #[serde(default)]
    pub skip_code_patterns: bool,
    /// skip versions, hash ids, measurements and other leading-digit tokens
    #[serde(default)]
    pub skip_numbers: bool,
}

const fn default_edit_distance() -> usize {
    1
}

const fn default_frequency_threshold() -> f64 {
    10.0
}

impl EngineConfig {
    /// creates a configuration with defaults for everything but the
    /// dictionary path
    pub fn new(dictionary_path: impl Into<PathBuf>) -> EngineConfig {
        EngineConfig {
            dictionary_path: dictionary_path.into(),
            protected_path: None,
            protected_patterns: Vec::new(),
            edit_distance: default_edit_distance(),
            frequency_threshold: default_frequency_threshold(),
            skip_urls: false,
            skip_emails: false,
            skip_hostnames: false,
            skip_code_patterns: false,
            skip_numbers: false,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SpellfixError> {
        if !(1..=2).contains(&self.edit_distance) {
            return Err(SpellfixError::invalid(format!(
                "edit-distance must be 1 or 2, got {}",
                self.edit_distance
            )));
        }
        if !self.frequency_threshold.is_finite() || self.frequency_threshold < 0.0 {
            return Err(SpellfixError::invalid(format!(
                "frequency-threshold must be a finite non-negative number, got {}",
                self.frequency_threshold
            )));
        }
        Ok(())
    }
}

/// Observability counters for the current snapshot.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct EngineStats {
    /// whether a snapshot has been published
    pub loaded: bool,
    /// number of merged entries in the lexicon
    pub dictionary_size: usize,
    /// configured maximum edit distance
    pub edit_distance: usize,
    /// unix seconds of the last successful publish
    pub loaded_at: u64,
    /// row tallies from the last build
    #[serde(flatten)]
    pub build: BuildStats,
}

// One immutable generation of engine state. Never mutated after publish;
// replaced wholesale on reload.
struct Snapshot {
    index: LexiconIndex,
    guard: Guard,
    frequency_threshold: f64,
    loaded_at: u64,
}

impl Snapshot {
    fn correct_one(&self, word: &str, use_guard: bool) -> String {
        if use_guard && self.guard.is_protected(word) {
            log::trace!("token {:?} is protected, passing through", word);
            return word.to_string();
        }

        let candidates = self.index.lookup(word, 1);
        let Some(top) = candidates.first() else {
            return word.to_string();
        };
        if top.distance == 0 {
            // projects the canonical display form, e.g. "nasa" to "NASA"
            return top.canonical.to_string();
        }
        if (top.frequency as f64) >= self.frequency_threshold {
            top.canonical.to_string()
        } else {
            word.to_string()
        }
    }
}

/// A correction engine holding at most one published snapshot.
///
/// Readers acquire the snapshot through a constant-time atomic load and
/// keep it for the duration of one operation; a publisher swaps in a whole
/// replacement without blocking them. Independent engines may coexist, and
/// [`default_engine`] provides a process-wide instance.
pub struct Engine {
    snapshot: ArcSwapOption<Snapshot>,
    // serializes publishers; readers never take it
    publish_lock: Mutex<()>,
}

impl Engine {
    /// creates an engine with no snapshot published
    pub const fn new() -> Engine {
        Engine {
            snapshot: ArcSwapOption::const_empty(),
            publish_lock: Mutex::new(()),
        }
    }

    /// Builds a snapshot from the configured inputs and publishes it.
    ///
    /// Concurrent loads are serialized. On any error the previously
    /// published snapshot, if one exists, stays current.
    pub fn load(&self, config: &EngineConfig) -> Result<(), SpellfixError> {
        config.validate()?;

        let _publishing = self.publish_lock.lock();
        let started = Instant::now();

        let index = dictionary::load_dictionary(&config.dictionary_path, config.edit_distance)?;
        let terms = match &config.protected_path {
            Some(path) => dictionary::load_protected_terms(path)?,
            None => Vec::new(),
        };
        let guard = Guard::build(&terms, config)?;

        let snapshot = Snapshot {
            frequency_threshold: config.frequency_threshold,
            loaded_at: unix_now(),
            index,
            guard,
        };

        log::info!(
            "published snapshot: {} entries, edit distance {}, {} protected forms, {} patterns, took {:?}",
            snapshot.index.len(),
            snapshot.index.max_edit_distance(),
            snapshot.guard.term_count(),
            snapshot.guard.pattern_count(),
            started.elapsed()
        );

        self.snapshot.store(Some(Arc::new(snapshot)));
        Ok(())
    }

    fn acquire(&self) -> Result<Arc<Snapshot>, SpellfixError> {
        self.snapshot.load_full().ok_or(SpellfixError::NotLoaded)
    }

    /// fails unless a snapshot is loaded
    pub fn healthcheck(&self) -> Result<(), SpellfixError> {
        self.acquire().map(|_| ())
    }

    /// true iff the word's normalized form is a lexicon entry; the guard
    /// is not consulted
    pub fn correct_exact(&self, word: &str) -> Result<bool, SpellfixError> {
        let snapshot = self.acquire()?;
        Ok(snapshot.index.contains(word))
    }

    /// merged frequency of the matching lexicon entry, if any
    pub fn frequency(&self, word: &str) -> Result<Option<u64>, SpellfixError> {
        let snapshot = self.acquire()?;
        Ok(snapshot.index.frequency(word))
    }

    /// true if the guard would pass the raw token through unchanged
    pub fn is_protected(&self, word: &str) -> Result<bool, SpellfixError> {
        let snapshot = self.acquire()?;
        Ok(snapshot.guard.is_protected(word))
    }

    /// Ranked candidates for a word, without guard filtering: callers
    /// asking for suggestions want the raw list.
    pub fn suggestions(
        &self,
        word: &str,
        max_results: usize,
    ) -> Result<Vec<Candidate>, SpellfixError> {
        let snapshot = self.acquire()?;
        require_word(word)?;
        Ok(snapshot.index.lookup(word, max_results))
    }

    /// Rewrites a single token, or returns it verbatim.
    ///
    /// A protected token (when `use_guard` is set), a token with no
    /// candidate in range, and a token whose only close candidate falls
    /// under the frequency threshold all come back unchanged. An exact
    /// match returns the lexicon's canonical form.
    pub fn correct(&self, word: &str, use_guard: bool) -> Result<String, SpellfixError> {
        let snapshot = self.acquire()?;
        require_word(word)?;
        Ok(snapshot.correct_one(word, use_guard))
    }

    /// Batch form of [`correct`](Engine::correct): acquires the snapshot
    /// once and applies the single-token policy to each token in order.
    pub fn correct_tokens(
        &self,
        tokens: &[String],
        use_guard: bool,
    ) -> Result<Vec<String>, SpellfixError> {
        let snapshot = self.acquire()?;
        tokens
            .iter()
            .map(|token| {
                require_word(token)?;
                Ok(snapshot.correct_one(token, use_guard))
            })
            .collect()
    }

    /// Counters describing the current snapshot. Callable in every state;
    /// an unloaded engine reports `loaded: false` and zeroes.
    pub fn stats(&self) -> EngineStats {
        match self.snapshot.load_full() {
            Some(snapshot) => EngineStats {
                loaded: true,
                dictionary_size: snapshot.index.len(),
                edit_distance: snapshot.index.max_edit_distance(),
                loaded_at: snapshot.loaded_at,
                build: snapshot.index.stats(),
            },
            None => EngineStats {
                loaded: false,
                dictionary_size: 0,
                edit_distance: 0,
                loaded_at: 0,
                build: BuildStats::default(),
            },
        }
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("loaded", &self.snapshot.load().is_some())
            .finish()
    }
}

static DEFAULT_ENGINE: Engine = Engine::new();

/// The process-wide default engine. Starts unloaded.
pub fn default_engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

fn require_word(word: &str) -> Result<(), SpellfixError> {
    if word.is_empty() {
        return Err(SpellfixError::invalid("word must be non-empty"));
    }
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
