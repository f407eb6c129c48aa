/*!
The [`fancy-regex`](https://docs.rs/fancy-regex/) engine. Backtracking:
supports backreferences and look-around that the linear-time engines
reject, at the cost of worst-case match time. Flags are translated to an
inline `(?ims)` prefix, the engine's native compile-time mechanism.
*/
use std::{borrow::Cow, sync::Arc};

use fancy_regex::{Expander, Regex};

use crate::{
    engine::{CompiledPattern, Engine, EngineKind},
    error::Error,
    matcher::MatchOptions,
};

/// [`MatchOptions`] → inline flag characters.
const FLAGS: &[(MatchOptions, char)] = &[
    (MatchOptions::CASE_INSENSITIVE, 'i'),
    (MatchOptions::MULTILINE, 'm'),
    (MatchOptions::SINGLELINE, 's'),
];

fn translate(pattern: &str, options: MatchOptions) -> Cow<'_, str> {
    let flags: String = FLAGS
        .iter()
        .filter(|&&(flag, _)| options.contains(flag))
        .map(|&(_, flag)| flag)
        .collect();
    if flags.is_empty() {
        Cow::Borrowed(pattern)
    } else {
        Cow::Owned(format!("(?{flags}){pattern}"))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FancyEngine;

impl Engine for FancyEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Fancy
    }

    fn compile(
        &self,
        pattern: &str,
        options: MatchOptions,
    ) -> Result<Arc<dyn CompiledPattern>, Error> {
        let regex = Regex::new(&translate(pattern, options))
            .map_err(|e| Error::compile(EngineKind::Fancy, pattern, e))?;
        Ok(Arc::new(FancyPattern { regex }))
    }
}

#[derive(Debug)]
struct FancyPattern {
    regex: Regex,
}

impl CompiledPattern for FancyPattern {
    fn contains(&self, haystack: &str) -> Result<bool, Error> {
        self.regex
            .is_match(haystack)
            .map_err(|e| Error::matching(EngineKind::Fancy, e))
    }

    fn groups(&self, haystack: &str) -> Result<Option<Vec<String>>, Error> {
        let caps = self
            .regex
            .captures(haystack)
            .map_err(|e| Error::matching(EngineKind::Fancy, e))?;
        Ok(caps.map(|caps| {
            (0..caps.len())
                .map(|index| {
                    caps.get(index)
                        .map_or_else(String::new, |m| m.as_str().to_owned())
                })
                .collect()
        }))
    }

    fn replace(&self, haystack: &str, replacement: &str, all: bool) -> Result<String, Error> {
        let expander = Expander::default();
        let mut replaced = String::with_capacity(haystack.len());
        let mut last = 0;
        for caps in self.regex.captures_iter(haystack) {
            let caps = caps.map_err(|e| Error::matching(EngineKind::Fancy, e))?;
            let m = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            replaced.push_str(&haystack[last..m.start()]);
            expander.append_expansion(&mut replaced, replacement, &caps);
            last = m.end();
            if !all {
                break;
            }
        }
        replaced.push_str(&haystack[last..]);
        Ok(replaced)
    }
}
