/*!
The [`regex-automata`](https://docs.rs/regex-automata/) meta engine: the
composite of NFA/DFA engines underneath the `regex` crate, bound directly
for its finer build-time configuration surface.
*/
use std::sync::Arc;

use regex_automata::{meta, util::syntax};

use crate::{
    engine::{CompiledPattern, Engine, EngineKind},
    error::Error,
    matcher::MatchOptions,
};

/// [`MatchOptions`] → [`syntax::Config`] compile flags.
const FLAGS: &[(MatchOptions, fn(syntax::Config, bool) -> syntax::Config)] = &[
    (MatchOptions::CASE_INSENSITIVE, syntax::Config::case_insensitive),
    (MatchOptions::MULTILINE, syntax::Config::multi_line),
    (MatchOptions::SINGLELINE, syntax::Config::dot_matches_new_line),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct MetaEngine;

impl Engine for MetaEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Meta
    }

    fn compile(
        &self,
        pattern: &str,
        options: MatchOptions,
    ) -> Result<Arc<dyn CompiledPattern>, Error> {
        let config = FLAGS.iter().fold(syntax::Config::new(), |config, &(flag, set)| {
            set(config, options.contains(flag))
        });
        let regex = meta::Regex::builder()
            .syntax(config)
            .build(pattern)
            .map_err(|e| Error::compile(EngineKind::Meta, pattern, e))?;
        Ok(Arc::new(MetaPattern { regex }))
    }
}

#[derive(Debug)]
struct MetaPattern {
    regex: meta::Regex,
}

impl CompiledPattern for MetaPattern {
    fn contains(&self, haystack: &str) -> Result<bool, Error> {
        Ok(self.regex.is_match(haystack))
    }

    fn groups(&self, haystack: &str) -> Result<Option<Vec<String>>, Error> {
        let mut caps = self.regex.create_captures();
        self.regex.captures(haystack, &mut caps);
        if !caps.is_match() {
            return Ok(None);
        }
        let mut groups = Vec::with_capacity(caps.group_len());
        for index in 0..caps.group_len() {
            let text = caps
                .get_group(index)
                .map_or_else(String::new, |span| haystack[span.start..span.end].to_owned());
            groups.push(text);
        }
        Ok(Some(groups))
    }

    fn replace(&self, haystack: &str, replacement: &str, all: bool) -> Result<String, Error> {
        let mut replaced = String::with_capacity(haystack.len());
        let mut last = 0;
        for caps in self.regex.captures_iter(haystack) {
            let m = match caps.get_match() {
                Some(m) => m,
                None => continue,
            };
            replaced.push_str(&haystack[last..m.start()]);
            caps.interpolate_string_into(haystack, replacement, &mut replaced);
            last = m.end();
            if !all {
                break;
            }
        }
        replaced.push_str(&haystack[last..]);
        Ok(replaced)
    }
}
