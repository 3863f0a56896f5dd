//! Character classes: predicates over a single character
//!
//! Four shapes exist: an inclusive range, a combination (union), a negation
//! (complement) and an exclusion (set difference). Composite classes share
//! their operands through `Arc`, so one named class can be reused by many
//! others and by many rules.
//!
//! Every class pre-computes a 128-bit membership bitmap for ASCII, so the
//! common case is a single bit test; non-ASCII characters walk the class
//! structure.

use std::fmt;
use std::sync::Arc;

/// Structure of a character class
#[derive(Debug, Clone)]
pub enum ClassKind {
    /// Inclusive range `[low, high]`
    Range {
        /// First character in the range
        low: char,
        /// Last character in the range
        high: char,
    },
    /// Union: matches if any operand matches
    Combination(Vec<Arc<CharClass>>),
    /// Complement of the operand
    Negation(Arc<CharClass>),
    /// Characters in `include` that are not in `exclude`
    Exclusion {
        /// Class that must match
        include: Arc<CharClass>,
        /// Class that must not match
        exclude: Arc<CharClass>,
    },
}

/// A named, immutable character predicate
#[derive(Clone)]
pub struct CharClass {
    name: Arc<str>,
    kind: ClassKind,
    ascii: u128,
}

impl CharClass {
    /// Build a class and its ASCII lookup table
    pub fn new(name: impl Into<Arc<str>>, kind: ClassKind) -> Self {
        let mut class = Self {
            name: name.into(),
            kind,
            ascii: 0,
        };
        let mut table = 0u128;
        for byte in 0u8..128 {
            if class.matches_slow(byte as char) {
                table |= 1u128 << byte;
            }
        }
        class.ascii = table;
        class
    }

    /// Shorthand for a [`ClassKind::Range`] class
    pub fn range(name: impl Into<Arc<str>>, low: char, high: char) -> Self {
        Self::new(name, ClassKind::Range { low, high })
    }

    /// Name the class was declared under
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Structure of the class
    #[inline]
    pub fn kind(&self) -> &ClassKind {
        &self.kind
    }

    /// Test membership of `c`
    #[inline]
    pub fn matches(&self, c: char) -> bool {
        if c.is_ascii() {
            return self.ascii & (1u128 << (c as u32)) != 0;
        }
        self.matches_slow(c)
    }

    fn matches_slow(&self, c: char) -> bool {
        match &self.kind {
            ClassKind::Range { low, high } => *low <= c && c <= *high,
            ClassKind::Combination(members) => members.iter().any(|m| m.matches(c)),
            ClassKind::Negation(inner) => !inner.matches(c),
            ClassKind::Exclusion { include, exclude } => {
                include.matches(c) && !exclude.matches(c)
            }
        }
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharClass")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ClassKind::Range { low, high } => write!(f, "[{:?}-{:?}]", low, high),
            ClassKind::Combination(members) => {
                f.write_str("(")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    f.write_str(m.name())?;
                }
                f.write_str(")")
            }
            ClassKind::Negation(inner) => write!(f, "!{}", inner.name()),
            ClassKind::Exclusion { include, exclude } => {
                write!(f, "{} - {}", include.name(), exclude.name())
            }
        }
    }
}
