//! Line-oriented dictionary and protected-terms file parsing.
//!
//! Dictionary files carry one `term<TAB>frequency` entry per line; a space
//! run is accepted as the delimiter when the line has no tab, so plain
//! space-separated word lists load too. Multi-word canonicals are therefore
//! tab-separated. Lines starting with `#` and blank lines are ignored.
//! Malformed rows never fail a load; they are tallied and skipped.

use std::fs;
use std::path::Path;

use crate::error::SpellfixError;
use crate::index::{LexiconIndex, LexiconIndexBuilder};

pub(crate) enum DictLine<'a> {
    /// blank line or comment
    Skip,
    /// a parsed `(canonical, frequency)` row
    Entry { canonical: &'a str, frequency: u64 },
    /// wrong shape: no delimiter, empty term, or extra fields
    Malformed,
    /// the frequency field was not a decimal unsigned integer
    InvalidFrequency,
}

pub(crate) fn parse_dictionary_line(line: &str) -> DictLine<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return DictLine::Skip;
    }

    // First tab wins so tab-delimited terms may contain spaces; otherwise
    // the first space run splits the line.
    let (term, frequency) = match line.split_once('\t') {
        Some(fields) => fields,
        None => match line.split_once(' ') {
            Some(fields) => fields,
            None => return DictLine::Malformed,
        },
    };

    let term = term.trim();
    let frequency = frequency.trim();
    if term.is_empty() || frequency.is_empty() {
        return DictLine::Malformed;
    }
    // whitespace inside the second field means more than two fields
    if frequency.split_whitespace().count() != 1 {
        return DictLine::Malformed;
    }

    match frequency.parse::<u64>() {
        Ok(frequency) => DictLine::Entry {
            canonical: term,
            frequency,
        },
        Err(_) => DictLine::InvalidFrequency,
    }
}

/// Reads a dictionary file and builds a sealed index from it.
///
/// Fails only when the file itself cannot be read; every per-row problem
/// is skipped and recorded in the index's [`BuildStats`].
///
/// [`BuildStats`]: crate::index::BuildStats
pub fn load_dictionary(
    path: &Path,
    max_edit_distance: usize,
) -> Result<LexiconIndex, SpellfixError> {
    let content = fs::read_to_string(path).map_err(|e| SpellfixError::io(path, e))?;

    let mut builder = LexiconIndexBuilder::new(max_edit_distance);
    for line in content.lines() {
        match parse_dictionary_line(line) {
            DictLine::Skip => {}
            DictLine::Entry {
                canonical,
                frequency,
            } => builder.push(canonical, frequency),
            DictLine::Malformed => builder.note_malformed(),
            DictLine::InvalidFrequency => builder.note_invalid_frequency(),
        }
    }

    Ok(builder.build())
}

/// Reads a protected-terms file: one term per line, trimmed, with blank
/// lines and `#` comments ignored.
pub fn load_protected_terms(path: &Path) -> Result<Vec<String>, SpellfixError> {
    let content = fs::read_to_string(path).map_err(|e| SpellfixError::io(path, e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(line: &str) -> Option<(&str, u64)> {
        match parse_dictionary_line(line) {
            DictLine::Entry {
                canonical,
                frequency,
            } => Some((canonical, frequency)),
            _ => None,
        }
    }

    #[test]
    fn tab_and_space_delimiters_parse() {
        assert_eq!(entry("hello\t10000"), Some(("hello", 10000)));
        assert_eq!(entry("hello 10000"), Some(("hello", 10000)));
        assert_eq!(entry("hello   10000"), Some(("hello", 10000)));
        assert_eq!(entry("  hello\t10000  "), Some(("hello", 10000)));
    }

    #[test]
    fn tab_delimited_terms_keep_interior_spaces() {
        assert_eq!(entry("New York\t5000"), Some(("New York", 5000)));
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        assert!(matches!(parse_dictionary_line(""), DictLine::Skip));
        assert!(matches!(parse_dictionary_line("   "), DictLine::Skip));
        assert!(matches!(
            parse_dictionary_line("# a comment\t123"),
            DictLine::Skip
        ));
    }

    #[test]
    fn malformed_shapes_are_flagged() {
        assert!(matches!(parse_dictionary_line("justoneword"), DictLine::Malformed));
        assert!(matches!(parse_dictionary_line("a b c"), DictLine::Malformed));
        assert!(matches!(parse_dictionary_line("\t123"), DictLine::Malformed));
    }

    #[test]
    fn bad_frequencies_are_flagged() {
        assert!(matches!(
            parse_dictionary_line("hello\tlots"),
            DictLine::InvalidFrequency
        ));
        assert!(matches!(
            parse_dictionary_line("hello\t-5"),
            DictLine::InvalidFrequency
        ));
        assert!(matches!(
            parse_dictionary_line("hello\t1.5"),
            DictLine::InvalidFrequency
        ));
    }

    #[test]
    fn load_accounts_for_every_skipped_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello\t10000").unwrap();
        writeln!(file, "brokenrow").unwrap();
        writeln!(file, "another broken row").unwrap();
        writeln!(file, "\t99").unwrap();
        writeln!(file, "hello\tnotanumber").unwrap();
        writeln!(file, "HELLO\t500").unwrap();
        writeln!(file, "Hello\t250").unwrap();
        file.flush().unwrap();

        let idx = load_dictionary(file.path(), 1).unwrap();
        assert_eq!(idx.len(), 1);
        let stats = idx.stats();
        assert_eq!(stats.skipped_malformed, 3);
        assert_eq!(stats.skipped_invalid_freq, 1);
        assert_eq!(stats.skipped_duplicates, 2);
    }

    #[test]
    fn missing_dictionary_is_an_io_error() {
        let err = load_dictionary(Path::new("/no/such/dictionary.tsv"), 1).unwrap_err();
        assert!(matches!(err, SpellfixError::Io { .. }));
    }

    #[test]
    fn protected_terms_load_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# protected").unwrap();
        writeln!(file, "  IL-6  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "New York").unwrap();
        file.flush().unwrap();

        let terms = load_protected_terms(file.path()).unwrap();
        assert_eq!(terms, ["IL-6", "New York"]);
    }
}
