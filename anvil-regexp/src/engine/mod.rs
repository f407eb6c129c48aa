/*!
Matching engines behind [`RegexpMatcher`](crate::matcher::RegexpMatcher).

Each engine is one [`Engine`] implementation in its own feature-gated
module; nothing outside this module names a concrete engine. An engine
translates [`MatchOptions`] to its native compile-time flags through an
explicit table, so a flag an engine cannot honor is dropped per engine
rather than rejected, and adding an engine stays mechanical: a module, a
table, an [`EngineKind`] variant.
*/
use std::{fmt, str::FromStr, sync::Arc};

use crate::{error::Error, matcher::MatchOptions};

#[cfg(feature = "fancy")]
pub mod fancy;
#[cfg(feature = "meta")]
pub mod meta;
#[cfg(feature = "plain")]
pub mod plain;

/// A matching engine: compiles (pattern, options) pairs into reusable
/// [`CompiledPattern`]s.
///
/// Compilation must be idempotent. Compiling the same pair twice, even
/// concurrently, never yields observably different matching behavior.
pub trait Engine: Send + Sync {
    /// Which engine this is.
    fn kind(&self) -> EngineKind;

    /// Compile `pattern` under the compile-relevant subset of `options`.
    ///
    /// Syntax rejections surface as [`Error`]s carrying the engine's
    /// original error as their source.
    fn compile(
        &self,
        pattern: &str,
        options: MatchOptions,
    ) -> Result<Arc<dyn CompiledPattern>, Error>;
}

/// An engine-specific prepared form of one (pattern, options) pair.
///
/// Handles are stateless: every operation takes the haystack and evaluates
/// from scratch, so one handle can serve concurrent callers.
pub trait CompiledPattern: Send + Sync + fmt::Debug {
    /// Does `haystack` contain a substring matching the pattern?
    fn contains(&self, haystack: &str) -> Result<bool, Error>;

    /// Texts of groups 0..n of the leftmost match: group 0 the full matched
    /// substring, the rest the parenthesized subexpressions in order of
    /// opening parenthesis. Non-participating groups capture the empty
    /// string. `None` when there is no match.
    fn groups(&self, haystack: &str) -> Result<Option<Vec<String>>, Error>;

    /// Replace the leftmost match (every match, with `all`) with the
    /// `$n`-expanded `replacement` template.
    fn replace(&self, haystack: &str, replacement: &str, all: bool) -> Result<String, Error>;
}

/// The engines this build knows about.
///
/// Variants exist only for engines compiled in, so host configuration that
/// names a disabled engine fails at [`FromStr`] time with a configuration
/// error, not deep inside a build step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EngineKind {
    /// The `regex` crate.
    #[cfg(feature = "plain")]
    Plain,
    /// The `regex-automata` meta engine.
    #[cfg(feature = "meta")]
    Meta,
    /// The `fancy-regex` engine.
    #[cfg(feature = "fancy")]
    Fancy,
}

impl EngineKind {
    /// Compiled-in engines, in automatic-selection order.
    pub fn available() -> Vec<EngineKind> {
        let mut order = Vec::new();
        #[cfg(feature = "plain")]
        order.push(EngineKind::Plain);
        #[cfg(feature = "meta")]
        order.push(EngineKind::Meta);
        #[cfg(feature = "fancy")]
        order.push(EngineKind::Fancy);
        order
    }

    /// Short engine name, as accepted by [`FromStr`] and shown in errors.
    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "plain")]
            EngineKind::Plain => "plain",
            #[cfg(feature = "meta")]
            EngineKind::Meta => "meta",
            #[cfg(feature = "fancy")]
            EngineKind::Fancy => "fancy",
        }
    }

    fn construct(self) -> Arc<dyn Engine> {
        match self {
            #[cfg(feature = "plain")]
            EngineKind::Plain => Arc::new(plain::PlainEngine),
            #[cfg(feature = "meta")]
            EngineKind::Meta => Arc::new(meta::MetaEngine),
            #[cfg(feature = "fancy")]
            EngineKind::Fancy => Arc::new(fancy::FancyEngine),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    /// Engine names for host configuration strings: the short name or the
    /// backing crate's name.
    fn from_str(name: &str) -> Result<EngineKind, Error> {
        match name {
            #[cfg(feature = "plain")]
            "plain" | "regex" => Ok(EngineKind::Plain),
            #[cfg(feature = "meta")]
            "meta" | "regex-automata" => Ok(EngineKind::Meta),
            #[cfg(feature = "fancy")]
            "fancy" | "fancy-regex" => Ok(EngineKind::Fancy),
            _ => Err(Error::unknown_engine(name)),
        }
    }
}

/// Resolve the engine a new matcher binds to: the explicitly requested one,
/// or the first available.
pub(crate) fn select(kind: Option<EngineKind>) -> Result<Arc<dyn Engine>, Error> {
    match kind {
        Some(kind) => Ok(kind.construct()),
        None => EngineKind::available()
            .into_iter()
            .next()
            .map(EngineKind::construct)
            .ok_or_else(Error::no_engine),
    }
}
