/*!
The [`regex`](https://docs.rs/regex/) crate engine. Linear-time matching, no
backtracking; the first choice for automatic selection.
*/
use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::{
    engine::{CompiledPattern, Engine, EngineKind},
    error::Error,
    matcher::MatchOptions,
};

/// [`MatchOptions`] → [`RegexBuilder`] compile flags.
const FLAGS: &[(MatchOptions, fn(&mut RegexBuilder, bool) -> &mut RegexBuilder)] = &[
    (MatchOptions::CASE_INSENSITIVE, RegexBuilder::case_insensitive),
    (MatchOptions::MULTILINE, RegexBuilder::multi_line),
    (MatchOptions::SINGLELINE, RegexBuilder::dot_matches_new_line),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct PlainEngine;

impl Engine for PlainEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Plain
    }

    fn compile(
        &self,
        pattern: &str,
        options: MatchOptions,
    ) -> Result<Arc<dyn CompiledPattern>, Error> {
        let mut builder = RegexBuilder::new(pattern);
        for &(flag, set) in FLAGS {
            set(&mut builder, options.contains(flag));
        }
        let regex = builder
            .build()
            .map_err(|e| Error::compile(EngineKind::Plain, pattern, e))?;
        Ok(Arc::new(PlainPattern { regex }))
    }
}

#[derive(Debug)]
struct PlainPattern {
    regex: Regex,
}

impl CompiledPattern for PlainPattern {
    fn contains(&self, haystack: &str) -> Result<bool, Error> {
        Ok(self.regex.is_match(haystack))
    }

    fn groups(&self, haystack: &str) -> Result<Option<Vec<String>>, Error> {
        Ok(self.regex.captures(haystack).map(|caps| {
            caps.iter()
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
                .collect()
        }))
    }

    fn replace(&self, haystack: &str, replacement: &str, all: bool) -> Result<String, Error> {
        let replaced = if all {
            self.regex.replace_all(haystack, replacement)
        } else {
            self.regex.replace(haystack, replacement)
        };
        Ok(replaced.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str, options: MatchOptions) -> Arc<dyn CompiledPattern> {
        PlainEngine.compile(pattern, options).unwrap()
    }

    #[test]
    fn flag_table_covers_each_option() {
        assert!(!compile("hello", MatchOptions::DEFAULT).contains("HELLO").unwrap());
        assert!(compile("hello", MatchOptions::CASE_INSENSITIVE)
            .contains("HELLO")
            .unwrap());
        assert!(!compile("^b", MatchOptions::DEFAULT).contains("a\nb").unwrap());
        assert!(compile("^b", MatchOptions::MULTILINE).contains("a\nb").unwrap());
        assert!(!compile("a.b", MatchOptions::DEFAULT).contains("a\nb").unwrap());
        assert!(compile("a.b", MatchOptions::SINGLELINE).contains("a\nb").unwrap());
    }

    #[test]
    fn groups_of_the_leftmost_match() {
        let compiled = compile(r"(\w)(\d)?", MatchOptions::DEFAULT);
        assert_eq!(
            compiled.groups("a1").unwrap(),
            Some(vec!["a1".to_owned(), "a".to_owned(), "1".to_owned()]),
        );
        // Optional group without a match captures the empty string.
        assert_eq!(
            compiled.groups("ab").unwrap(),
            Some(vec!["a".to_owned(), "a".to_owned(), String::new()]),
        );
        assert_eq!(compiled.groups("--").unwrap(), None);
    }

    #[test]
    fn bad_syntax_is_a_match_error() {
        let error = PlainEngine.compile("(", MatchOptions::DEFAULT).unwrap_err();
        assert!(error.is_match());
    }

    #[test]
    fn replace_expands_group_references() {
        let compiled = compile(r"(\d+)", MatchOptions::DEFAULT);
        assert_eq!(compiled.replace("a1 b2", "<$1>", false).unwrap(), "a<1> b2");
        assert_eq!(compiled.replace("a1 b2", "<$1>", true).unwrap(), "a<1> b<2>");
    }
}
