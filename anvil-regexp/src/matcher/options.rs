use bitflags::bitflags;

bitflags! {
    /// Request-time modifiers for a single match, group-extraction or
    /// substitution request.
    ///
    /// Options combine with `|` and change matching semantics without
    /// changing the pattern text. A flag the bound engine cannot honor
    /// natively is silently dropped by that engine's translation table
    /// rather than rejected; call sites stay engine-agnostic at the cost
    /// of documented per-engine fidelity differences.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MatchOptions: u32 {
        /// Letters match both upper and lower case.
        const CASE_INSENSITIVE = 1 << 0;
        /// `^` and `$` match at line boundaries, not only at the haystack
        /// boundaries.
        const MULTILINE = 1 << 1;
        /// `.` also matches `\n`.
        const SINGLELINE = 1 << 2;

        /// Substitute the leftmost match only. This is already the default;
        /// the flag exists so build scripts can say it explicitly.
        const REPLACE_FIRST = 1 << 16;
        /// Substitute every match, not only the leftmost.
        const REPLACE_ALL = 1 << 17;

        /// The flags that participate in pattern compilation. Cache keys and
        /// engine translation tables mask with this, so request-only bits
        /// never force a recompile.
        const COMPILE = Self::CASE_INSENSITIVE.bits()
            | Self::MULTILINE.bits()
            | Self::SINGLELINE.bits();
    }
}

impl MatchOptions {
    /// No modifiers.
    pub const DEFAULT: MatchOptions = MatchOptions::empty();
}
