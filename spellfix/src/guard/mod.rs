//! Domain-protection predicate.
//!
//! Decides whether a raw token is domain-protected and must pass through
//! correction unchanged. Patterns run against the raw token because URLs,
//! code identifiers and measurements depend on preserved case and
//! punctuation; the term set is consulted under both the normalized and the
//! plain-lowercased form.

use hashbrown::HashSet;
use regex::Regex;
use smol_str::SmolStr;

use crate::engine::EngineConfig;
use crate::error::SpellfixError;
use crate::normalizer::{lower_case, normalized_key};

pub mod patterns;

pub use patterns::PatternConfig;

/// Evaluates whether a token is protected from rewriting.
#[derive(Debug)]
pub struct Guard {
    patterns: Vec<Regex>,
    protected: HashSet<SmolStr>,
}

impl Guard {
    /// Compiles the caller's patterns, then the enabled built-in skip
    /// patterns, and indexes the protected terms.
    ///
    /// Each term is inserted under its lowercased and its normalized form;
    /// a term containing `-` additionally protects its hyphen-stripped
    /// lowercase form, so `IL-6` covers `il-6` and `il6` alike.
    pub(crate) fn build(terms: &[String], config: &EngineConfig) -> Result<Guard, SpellfixError> {
        let mut compiled = Vec::new();
        for pattern in &config.protected_patterns {
            compiled.push(patterns::compile(pattern)?);
        }
        for pattern in patterns::skip_patterns(config) {
            compiled.push(patterns::compile(&pattern)?);
        }

        let mut protected = HashSet::new();
        for term in terms {
            let lowered = lower_case(term);
            if lowered.contains('-') {
                protected.insert(SmolStr::from(lowered.replace('-', "")));
            }
            let key = normalized_key(term);
            if !key.is_empty() {
                protected.insert(key);
            }
            protected.insert(lowered);
        }

        log::debug!(
            "guard built: {} patterns, {} protected forms",
            compiled.len(),
            protected.len()
        );

        Ok(Guard {
            patterns: compiled,
            protected,
        })
    }

    /// true if the raw token must be passed through unchanged
    pub fn is_protected(&self, raw: &str) -> bool {
        if self.patterns.iter().any(|p| p.is_match(raw)) {
            return true;
        }
        self.protected.contains(normalized_key(raw).as_str())
            || self.protected.contains(lower_case(raw).as_str())
    }

    /// number of compiled patterns
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// number of distinct protected forms
    pub fn term_count(&self) -> usize {
        self.protected.len()
    }
}
