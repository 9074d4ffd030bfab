//! Protected-pattern configuration and the built-in skip-pattern tables.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::error::SpellfixError;

/// A caller-supplied protected pattern with explicit regex flags.
///
/// A plain source string defaults to case-sensitive, single-line,
/// non-extended matching.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatternConfig {
    /// the regex source text
    pub source: String,
    /// match letters without regard to case
    #[serde(default)]
    pub case_insensitive: bool,
    /// let `^` and `$` match at line boundaries
    #[serde(default)]
    pub multiline: bool,
    /// ignore whitespace and allow `#` comments inside the pattern
    #[serde(default)]
    pub extended: bool,
}

impl PatternConfig {
    /// creates a pattern with all flags off
    pub fn new(source: impl Into<String>) -> PatternConfig {
        PatternConfig {
            source: source.into(),
            case_insensitive: false,
            multiline: false,
            extended: false,
        }
    }

    /// flips on case-insensitive matching
    pub fn case_insensitive(mut self) -> PatternConfig {
        self.case_insensitive = true;
        self
    }
}

/// Compiles a pattern, carrying its flags into the regex engine. A compile
/// failure names the offending source.
pub(crate) fn compile(config: &PatternConfig) -> Result<Regex, SpellfixError> {
    RegexBuilder::new(&config.source)
        .case_insensitive(config.case_insensitive)
        .multi_line(config.multiline)
        .ignore_whitespace(config.extended)
        .build()
        .map_err(|source| SpellfixError::MalformedPattern {
            pattern: config.source.clone(),
            source,
        })
}

// Built-in tables: (source, case_insensitive). All anchored to the full
// token; evaluated against the raw input, never the normalized form.

const URL_PATTERNS: &[(&str, bool)] = &[(r"^https?://\S+$", true), (r"^www\.\S+$", true)];

const EMAIL_PATTERNS: &[(&str, bool)] = &[(r"^[\w.+-]+@[\w.-]+\.\w+$", true)];

const HOSTNAME_PATTERNS: &[(&str, bool)] = &[(
    r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+$",
    true,
)];

const CODE_PATTERNS: &[(&str, bool)] = &[
    // camelCase
    (r"^[a-z]+[A-Z][a-zA-Z0-9]*$", false),
    // PascalCase
    (r"^[A-Z][a-z]+[A-Z][a-zA-Z0-9]*$", false),
    // snake_case
    (r"^[a-z]+_[a-z0-9_]+$", true),
    // SCREAMING_SNAKE
    (r"^[A-Z]+_[A-Z0-9_]+$", false),
    // dotted path
    (r"^[a-zA-Z_][a-zA-Z0-9_]*\.[a-zA-Z_][a-zA-Z0-9_.]*$", false),
];

const NUMBER_PATTERNS: &[(&str, bool)] = &[
    // version
    (r"^\d+\.\d+(\.\d+)?(\.\d+)?$", false),
    // hash id
    (r"^#\d+$", false),
    // measurement
    (
        r"^\d+(\.\d+)?(kg|g|mg|lb|oz|km|m|cm|mm|mi|ft|in|gb|mb|kb|tb|pb|px|pt|em|rem)$",
        true,
    ),
    // leading-digit catch-all
    (r"^\d", false),
];

/// The built-in skip patterns enabled by the config's toggles, in table
/// order, ready to be appended after the caller's own patterns.
pub(crate) fn skip_patterns(config: &EngineConfig) -> Vec<PatternConfig> {
    let tables: &[(bool, &[(&str, bool)])] = &[
        (config.skip_urls, URL_PATTERNS),
        (config.skip_emails, EMAIL_PATTERNS),
        (config.skip_hostnames, HOSTNAME_PATTERNS),
        (config.skip_code_patterns, CODE_PATTERNS),
        (config.skip_numbers, NUMBER_PATTERNS),
    ];

    let mut out = Vec::new();
    for &(enabled, table) in tables {
        if !enabled {
            continue;
        }
        for &(source, case_insensitive) in table {
            let mut pattern = PatternConfig::new(source);
            pattern.case_insensitive = case_insensitive;
            out.push(pattern);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(table: &[(&str, bool)], token: &str) -> bool {
        table.iter().any(|&(source, ci)| {
            let mut pattern = PatternConfig::new(source);
            pattern.case_insensitive = ci;
            compile(&pattern).unwrap().is_match(token)
        })
    }

    #[test]
    fn url_patterns() {
        assert!(matches(URL_PATTERNS, "https://example.com/a?b=c"));
        assert!(matches(URL_PATTERNS, "HTTP://EXAMPLE.COM"));
        assert!(matches(URL_PATTERNS, "www.example.com"));
        assert!(!matches(URL_PATTERNS, "example"));
    }

    #[test]
    fn email_patterns() {
        assert!(matches(EMAIL_PATTERNS, "dev+spam@example.co.uk"));
        assert!(!matches(EMAIL_PATTERNS, "not-an-email"));
    }

    #[test]
    fn hostname_patterns() {
        assert!(matches(HOSTNAME_PATTERNS, "api.internal.example.com"));
        assert!(matches(HOSTNAME_PATTERNS, "EXAMPLE.COM"));
        assert!(!matches(HOSTNAME_PATTERNS, "-leading.example.com"));
        assert!(!matches(HOSTNAME_PATTERNS, "plainword"));
    }

    #[test]
    fn code_patterns() {
        assert!(matches(CODE_PATTERNS, "camelCase"));
        assert!(matches(CODE_PATTERNS, "PascalCaseName"));
        assert!(matches(CODE_PATTERNS, "snake_case_name"));
        assert!(matches(CODE_PATTERNS, "SCREAMING_SNAKE"));
        assert!(matches(CODE_PATTERNS, "module.submodule.attr"));
        assert!(!matches(CODE_PATTERNS, "plainword"));
    }

    #[test]
    fn number_patterns() {
        assert!(matches(NUMBER_PATTERNS, "1.2.3"));
        assert!(matches(NUMBER_PATTERNS, "#1234"));
        assert!(matches(NUMBER_PATTERNS, "10kg"));
        assert!(matches(NUMBER_PATTERNS, "10.5GB"));
        assert!(matches(NUMBER_PATTERNS, "42nd"));
        assert!(!matches(NUMBER_PATTERNS, "word"));
    }

    #[test]
    fn extended_flag_ignores_pattern_whitespace() {
        let mut pattern = PatternConfig::new(r"^ab # trailing comment");
        pattern.extended = true;
        assert!(compile(&pattern).unwrap().is_match("abc"));
    }

    #[test]
    fn bad_pattern_names_its_source() {
        let err = compile(&PatternConfig::new("[unclosed")).unwrap_err();
        match err {
            SpellfixError::MalformedPattern { pattern, .. } => {
                assert_eq!(pattern, "[unclosed")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
