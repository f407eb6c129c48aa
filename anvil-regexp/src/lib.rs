/*!
Pattern matching for build scripts: one matcher capability backed by
interchangeable regular-expression engines.

Build-file constructs (file selectors, conditions, capture-based renaming,
substitutions) only ever talk to [`RegexpMatcher`](matcher::RegexpMatcher).
Which engine actually compiles and runs the pattern is resolved once, at
construction time: either named explicitly, or taken from the head of the
[prioritized list](engine::EngineKind::available) of engines compiled into
the build. Everything after that is engine-agnostic: options are normalized
per engine, compiles are cached per option combination, and every backend
failure is re-surfaced as one [`Error`] type.
*/
//! ## Usage
//! ```
//! use anvil_regexp::matcher::{MatchOptions, RegexpMatcher};
//!
//! let matcher = RegexpMatcher::new(r"(\d+)-(\d+)")?;
//! assert!(matcher.is_match("build 12-34")?);
//! assert_eq!(
//!     matcher.groups("build 12-34")?,
//!     Some(vec!["12-34".to_string(), "12".to_string(), "34".to_string()]),
//! );
//!
//! // Options are request-time modifiers; compiles are cached per combination.
//! assert!(matcher.is_match_with("BUILD 12-34", MatchOptions::CASE_INSENSITIVE)?);
//! # Ok::<(), anvil_regexp::Error>(())
//! ```
/*!
Binding a specific engine, e.g. when a build script asks for backreference
support:
```
// cargo add anvil-regexp --features fancy
use anvil_regexp::{engine::EngineKind, matcher::RegexpMatcher};

let matcher = RegexpMatcher::builder()
    .engine(EngineKind::Fancy)
    .pattern(r"(\w+) \1")
    .build()?;
assert!(matcher.is_match("say again again")?);
# Ok::<(), anvil_regexp::Error>(())
```

Substitution uses the same compiled-pattern machinery:
```
use anvil_regexp::matcher::{MatchOptions, RegexpMatcher};

let matcher = RegexpMatcher::new(r"(\w+)\.java")?;
assert_eq!(
    matcher.substitute("Core.java Util.java", "$1.class", MatchOptions::REPLACE_ALL)?,
    "Core.class Util.class",
);
# Ok::<(), anvil_regexp::Error>(())
```
*/
//! ## Crate features
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(feature = "doc", doc = document_features::document_features!())]

pub mod engine;
pub mod error;
pub mod matcher;

pub use error::{Error, ErrorKind};
