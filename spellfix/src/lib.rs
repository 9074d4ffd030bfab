/*! Fast fuzzy spelling correction over a frequency-weighted lexicon.

Builds a symmetric-delete (SymSpell) index from a `term<TAB>frequency`
dictionary file and answers three questions about a token: is it a known
term, which nearby terms best explain it, and should it be rewritten or
left alone. Domain tokens (identifiers, URLs, protected vocabulary) can be
guarded so they are never rewritten, and the whole dictionary can be
hot-reloaded under concurrent readers.

# Usage

```no_run
use spellfix::{Engine, EngineConfig};

let engine = Engine::new();
engine.load(&EngineConfig::new("unigrams.tsv"))?;

assert_eq!(engine.correct("helo", true)?, "hello");
for candidate in engine.suggestions("helo", 5)? {
    println!("{} (distance {})", candidate.canonical(), candidate.distance);
}
# Ok::<(), spellfix::SpellfixError>(())
```

A process-wide instance is available through [`default_engine`] for hosts
that want one shared corrector.
*/

#![warn(missing_docs)]

pub mod dictionary;
pub mod engine;
pub mod error;
pub mod guard;
pub mod index;
pub mod normalizer;

pub use engine::{default_engine, Engine, EngineConfig, EngineStats, DEFAULT_MAX_SUGGESTIONS};
pub use error::SpellfixError;
pub use guard::{Guard, PatternConfig};
pub use index::{BuildStats, Candidate, LexiconIndex, LexiconIndexBuilder};
