/*!
The matcher capability build-file constructs program against.

A [`RegexpMatcher`] stores one pattern string and evaluates match requests
through whichever engine it was bound to at construction. Compiles are lazy
and cached per compile-relevant [`MatchOptions`] combination; resetting the
pattern discards the cache, so no request ever sees a stale compile.
*/
use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use bon::bon;

use crate::{
    engine::{self, CompiledPattern, Engine, EngineKind},
    error::Error,
};

mod options;

pub use options::MatchOptions;

/// A regex matcher bound to one engine.
///
/// The pattern is configured once ([`builder`](RegexpMatcher::builder) or
/// [`set_pattern`](RegexpMatcher::set_pattern)) and queried many times; each
/// request supplies the input text and an options value. Requests through
/// `&self` are safe from multiple threads.
///
/// # Example
/// ```
/// use anvil_regexp::matcher::{MatchOptions, RegexpMatcher};
///
/// let mut matcher = RegexpMatcher::new("^b")?;
/// assert!(!matcher.is_match("a\nb")?);
/// assert!(matcher.is_match_with("a\nb", MatchOptions::MULTILINE)?);
///
/// matcher.set_pattern("^a");
/// assert!(matcher.is_match("a\nb")?);
/// # Ok::<(), anvil_regexp::Error>(())
/// ```
pub struct RegexpMatcher {
    engine: Arc<dyn Engine>,
    pattern: Option<String>,
    cache: RwLock<HashMap<MatchOptions, Arc<dyn CompiledPattern>>>,
}

#[bon]
impl RegexpMatcher {
    /// Resolve the engine and construct a matcher.
    ///
    /// Fails with a configuration error when no engine is compiled into the
    /// build.
    #[builder(start_fn = builder, finish_fn = build)]
    pub fn create(
        /// Engine to bind. Defaults to the first entry of
        /// [`EngineKind::available`].
        engine: Option<EngineKind>,
        /// Pattern to configure up front. Can also be set (or replaced)
        /// later with [`RegexpMatcher::set_pattern`].
        #[builder(into)]
        pattern: Option<String>,
    ) -> Result<RegexpMatcher, Error> {
        let engine = engine::select(engine)?;
        Ok(RegexpMatcher {
            engine,
            pattern,
            cache: RwLock::new(HashMap::new()),
        })
    }
}

impl RegexpMatcher {
    /// A matcher for `pattern` on the automatically selected engine.
    pub fn new(pattern: impl Into<String>) -> Result<RegexpMatcher, Error> {
        RegexpMatcher::builder().pattern(pattern).build()
    }

    /// The engine this matcher is bound to.
    pub fn engine(&self) -> EngineKind {
        self.engine.kind()
    }

    /// The last configured pattern, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Store `pattern` for subsequent requests.
    ///
    /// The pattern is not validated here; syntax errors surface from the
    /// first request that needs a compile. Compiles cached for the previous
    /// pattern are discarded.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = Some(pattern.into());
        self.cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Does `haystack` contain a match for the pattern?
    ///
    /// Equivalent to [`is_match_with`](Self::is_match_with) under
    /// [`MatchOptions::DEFAULT`].
    pub fn is_match(&self, haystack: &str) -> Result<bool, Error> {
        self.is_match_with(haystack, MatchOptions::DEFAULT)
    }

    /// Does `haystack` contain a match for the pattern under `options`?
    pub fn is_match_with(&self, haystack: &str, options: MatchOptions) -> Result<bool, Error> {
        self.compiled(options)?.contains(haystack)
    }

    /// Captured texts of the leftmost match under
    /// [`MatchOptions::DEFAULT`]; see
    /// [`groups_with`](Self::groups_with).
    pub fn groups(&self, haystack: &str) -> Result<Option<Vec<String>>, Error> {
        self.groups_with(haystack, MatchOptions::DEFAULT)
    }

    /// Captured texts of the leftmost match: group 0 is the full matched
    /// substring, groups 1..n the parenthesized subexpressions in order of
    /// opening parenthesis. A group that did not participate in the match
    /// captures the empty string, whichever engine is bound.
    ///
    /// Returns `None`, not an error, whenever
    /// [`is_match_with`](Self::is_match_with) on the same input and options
    /// would be false.
    pub fn groups_with(
        &self,
        haystack: &str,
        options: MatchOptions,
    ) -> Result<Option<Vec<String>>, Error> {
        self.compiled(options)?.groups(haystack)
    }

    /// Replace the leftmost match of the pattern in `haystack` with the
    /// `$n`-expanded `replacement` template, or every match under
    /// [`MatchOptions::REPLACE_ALL`].
    ///
    /// Returns `haystack` unchanged when there is no match.
    pub fn substitute(
        &self,
        haystack: &str,
        replacement: &str,
        options: MatchOptions,
    ) -> Result<String, Error> {
        let all = options.contains(MatchOptions::REPLACE_ALL);
        self.compiled(options)?.replace(haystack, replacement, all)
    }

    /// The compiled form of (current pattern, compile-relevant options),
    /// compiling through the bound engine if this combination has not been
    /// requested before.
    ///
    /// Concurrent first requests for the same combination re-check under the
    /// write lock, so every caller ends up with the same compile.
    fn compiled(&self, options: MatchOptions) -> Result<Arc<dyn CompiledPattern>, Error> {
        let pattern = self.pattern.as_deref().ok_or_else(Error::no_pattern)?;
        let key = options & MatchOptions::COMPILE;
        if let Some(compiled) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(compiled));
        }
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        match cache.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let compiled = self.engine.compile(pattern, key)?;
                Ok(Arc::clone(entry.insert(compiled)))
            }
        }
    }
}

impl fmt::Debug for RegexpMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexpMatcher")
            .field("engine", &self.engine.kind())
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(kind: EngineKind, pattern: &str) -> RegexpMatcher {
        RegexpMatcher::builder()
            .engine(kind)
            .pattern(pattern)
            .build()
            .unwrap()
    }

    #[test]
    fn unconfigured_matcher_is_a_configuration_error() {
        let matcher = RegexpMatcher::builder().build().unwrap();
        assert_eq!(matcher.pattern(), None);
        assert!(matcher.is_match("x").unwrap_err().is_configuration());
        assert!(matcher.groups("x").unwrap_err().is_configuration());
        assert!(matcher
            .substitute("x", "y", MatchOptions::DEFAULT)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn default_options_are_implied() {
        for kind in EngineKind::available() {
            let m = matcher(kind, "hello");
            assert_eq!(
                m.is_match("say hello").unwrap(),
                m.is_match_with("say hello", MatchOptions::DEFAULT).unwrap(),
            );
            assert!(m.is_match("say hello").unwrap());
        }
    }

    #[test]
    fn case_insensitivity_is_request_time() {
        for kind in EngineKind::available() {
            let m = matcher(kind, "hello");
            assert!(!m.is_match("HELLO").unwrap(), "{kind}");
            assert!(
                m.is_match_with("HELLO", MatchOptions::CASE_INSENSITIVE).unwrap(),
                "{kind}",
            );
        }
    }

    #[test]
    fn multiline_anchors_at_line_boundaries() {
        for kind in EngineKind::available() {
            let m = matcher(kind, "^b");
            assert!(!m.is_match("a\nb").unwrap(), "{kind}");
            assert!(m.is_match_with("a\nb", MatchOptions::MULTILINE).unwrap(), "{kind}");
        }
    }

    #[test]
    fn groups_follow_matches() {
        for kind in EngineKind::available() {
            let m = matcher(kind, r"(\d+)-(\d+)");
            assert!(m.is_match("12-34").unwrap());
            assert_eq!(
                m.groups("12-34").unwrap(),
                Some(vec!["12-34".to_owned(), "12".to_owned(), "34".to_owned()]),
                "{kind}",
            );

            let m = matcher(kind, "abc");
            assert!(!m.is_match("xyz").unwrap());
            assert_eq!(m.groups("xyz").unwrap(), None, "{kind}");
        }
    }

    #[test]
    fn group_zero_is_the_matched_substring() {
        for kind in EngineKind::available() {
            let m = matcher(kind, r"b\d+");
            let groups = m.groups("a1 b23 c4").unwrap().unwrap();
            assert_eq!(groups[0], "b23", "{kind}");
        }
    }

    #[test]
    fn non_participating_groups_capture_the_empty_string() {
        for kind in EngineKind::available() {
            let m = matcher(kind, "(a)(b)?");
            assert_eq!(
                m.groups("a").unwrap(),
                Some(vec!["a".to_owned(), "a".to_owned(), String::new()]),
                "{kind}",
            );
        }
    }

    #[test]
    fn resetting_the_pattern_discards_cached_compiles() {
        for kind in EngineKind::available() {
            let mut m = matcher(kind, "old");
            assert!(m.is_match_with("old", MatchOptions::CASE_INSENSITIVE).unwrap());
            assert!(m.is_match("old").unwrap());

            m.set_pattern("new");
            assert_eq!(m.pattern(), Some("new"));
            assert!(!m.is_match("old").unwrap(), "{kind}");
            assert!(!m.is_match_with("OLD", MatchOptions::CASE_INSENSITIVE).unwrap(), "{kind}");
            assert!(m.is_match("make it new").unwrap(), "{kind}");
        }
    }

    #[test]
    fn compiles_are_cached_per_compile_relevant_options() {
        for kind in EngineKind::available() {
            let m = matcher(kind, "x");
            let default = m.compiled(MatchOptions::DEFAULT).unwrap();
            // Request-only bits reuse the same compile.
            let replace_all = m.compiled(MatchOptions::REPLACE_ALL).unwrap();
            assert!(Arc::ptr_eq(&default, &replace_all), "{kind}");
            let repeated = m.compiled(MatchOptions::DEFAULT).unwrap();
            assert!(Arc::ptr_eq(&default, &repeated), "{kind}");

            let insensitive = m.compiled(MatchOptions::CASE_INSENSITIVE).unwrap();
            assert!(!Arc::ptr_eq(&default, &insensitive), "{kind}");
        }
    }

    #[test]
    fn substitute_replaces_first_or_all() {
        for kind in EngineKind::available() {
            let m = matcher(kind, r"(\d+)");
            assert_eq!(
                m.substitute("a1 b2", "[$1]", MatchOptions::DEFAULT).unwrap(),
                "a[1] b2",
                "{kind}",
            );
            assert_eq!(
                m.substitute("a1 b2", "[$1]", MatchOptions::REPLACE_FIRST).unwrap(),
                "a[1] b2",
                "{kind}",
            );
            assert_eq!(
                m.substitute("a1 b2", "[$1]", MatchOptions::REPLACE_ALL).unwrap(),
                "a[1] b[2]",
                "{kind}",
            );
            assert_eq!(
                m.substitute("none", "[$1]", MatchOptions::REPLACE_ALL).unwrap(),
                "none",
                "{kind}",
            );
        }
    }

    #[test]
    fn syntax_errors_surface_at_first_use_with_cause() {
        for kind in EngineKind::available() {
            let mut m = RegexpMatcher::builder().engine(kind).build().unwrap();
            m.set_pattern("(unclosed");
            let error = m.is_match("x").unwrap_err();
            assert!(error.is_match(), "{kind}");
            assert!(std::error::Error::source(&error).is_some(), "{kind}");
        }
    }

    #[test]
    fn explicit_engine_binding_sticks() {
        for kind in EngineKind::available() {
            let m = matcher(kind, "x");
            assert_eq!(m.engine(), kind);
        }
    }

    #[test]
    fn shared_matcher_serves_concurrent_requests() {
        for kind in EngineKind::available() {
            let m = matcher(kind, r"(\d+)-(\d+)");
            std::thread::scope(|scope| {
                for _ in 0..4 {
                    scope.spawn(|| {
                        for _ in 0..50 {
                            assert!(m
                                .is_match_with("12-34", MatchOptions::CASE_INSENSITIVE)
                                .unwrap());
                            assert!(m.groups("12-34").unwrap().is_some());
                        }
                    });
                }
            });
        }
    }
}
