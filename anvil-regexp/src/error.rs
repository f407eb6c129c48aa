//! One error type for the whole layer. Backend failures are wrapped exactly
//! at the engine boundary; no engine-specific error type escapes it.

use std::{error, fmt};

use itertools::Itertools;

use crate::engine::EngineKind;

/// An error from matcher configuration, pattern compilation or matching.
///
/// Configuration failures ([`Error::is_configuration`]) are caller mistakes:
/// no pattern set, no usable engine. Match failures ([`Error::is_match`])
/// wrap whatever the bound engine rejected, with the engine's own error
/// retained as [`source`](error::Error::source). Both are deterministic for
/// a given (pattern, options) pair, so retrying cannot help.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The failures an [`Error`] can describe.
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A match operation was called before any pattern was set.
    NoPattern,
    /// No engine is compiled into this build.
    NoEngine,
    /// An engine name, e.g. from host configuration, matched no known engine.
    UnknownEngine {
        name: String,
    },
    /// The engine rejected the pattern at compile time.
    Compile {
        engine: EngineKind,
        pattern: String,
        source: Box<dyn error::Error + Send + Sync>,
    },
    /// The engine failed while executing a match.
    Match {
        engine: EngineKind,
        source: Box<dyn error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn no_pattern() -> Error {
        ErrorKind::NoPattern.into()
    }

    pub(crate) fn no_engine() -> Error {
        ErrorKind::NoEngine.into()
    }

    pub(crate) fn unknown_engine(name: &str) -> Error {
        ErrorKind::UnknownEngine {
            name: name.to_owned(),
        }
        .into()
    }

    pub(crate) fn compile(
        engine: EngineKind,
        pattern: &str,
        source: impl error::Error + Send + Sync + 'static,
    ) -> Error {
        ErrorKind::Compile {
            engine,
            pattern: pattern.to_owned(),
            source: Box::new(source),
        }
        .into()
    }

    pub(crate) fn matching(
        engine: EngineKind,
        source: impl error::Error + Send + Sync + 'static,
    ) -> Error {
        ErrorKind::Match {
            engine,
            source: Box::new(source),
        }
        .into()
    }

    /// The kind of failure.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// True for failures of matcher or engine configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NoPattern | ErrorKind::NoEngine | ErrorKind::UnknownEngine { .. }
        )
    }

    /// True for failures reported by the bound engine.
    pub fn is_match(&self) -> bool {
        matches!(self.kind, ErrorKind::Compile { .. } | ErrorKind::Match { .. })
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::NoPattern => f.write_str("no pattern has been set on this matcher"),
            ErrorKind::NoEngine => f.write_str("no matching engine available"),
            ErrorKind::UnknownEngine { name } => {
                let known = EngineKind::available();
                if known.is_empty() {
                    write!(f, "unknown matching engine `{name}` (no engine compiled in)")
                } else {
                    write!(
                        f,
                        "unknown matching engine `{name}` (known engines: {})",
                        known.into_iter().map(EngineKind::name).join(", "),
                    )
                }
            }
            ErrorKind::Compile { engine, pattern, .. } => {
                write!(f, "{engine} engine failed to compile pattern `{pattern}`")
            }
            ErrorKind::Match { engine, .. } => {
                write!(f, "{engine} engine failed while matching")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Compile { source, .. } | ErrorKind::Match { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn taxonomy_is_two_sided() {
        assert!(Error::no_pattern().is_configuration());
        assert!(Error::no_engine().is_configuration());
        assert!(Error::unknown_engine("perl5").is_configuration());
        assert!(!Error::no_pattern().is_match());
    }

    #[test]
    fn messages_are_human_readable() {
        let message = Error::unknown_engine("perl5").to_string();
        assert!(message.contains("perl5"), "{message}");
        assert_eq!(
            Error::no_pattern().to_string(),
            "no pattern has been set on this matcher",
        );
    }

    #[cfg(feature = "plain")]
    #[test]
    fn engine_failures_retain_their_cause() {
        let cause = regex::Regex::new("(").unwrap_err();
        let error = Error::compile(EngineKind::Plain, "(", cause);
        assert!(error.is_match());
        assert!(error.source().is_some());
        assert!(error.to_string().contains("`(`"), "{error}");
    }
}
