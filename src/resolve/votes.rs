use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::types::{countable_base, UNKNOWN_BASE};

/// Occurrence counts of informative bases observed in one attempt.
///
/// Bases are kept in alphabetical order so count breakdowns are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseCounts {
    counts: BTreeMap<u8, usize>,
    total: usize,
}

impl BaseCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a base, ignoring `N`, gaps and NUL; case-insensitive
    pub fn add(&mut self, base: u8) {
        if let Some(base) = countable_base(base) {
            *self.counts.entry(base).or_default() += 1;
            self.total += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn get(&self, base: u8) -> usize {
        self.counts.get(&base).copied().unwrap_or(0)
    }

    /// `(base, count)` pairs in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&b, &n)| (char::from(b), n))
    }

    /// Apply the voting rule; `None` when nothing informative was observed
    #[must_use]
    pub fn vote(self) -> Option<Vote> {
        match self.total {
            0 => None,
            1 => self.counts.keys().next().map(|&b| Vote::Single(b)),
            _ => {
                let max = self.counts.values().copied().max().unwrap_or(0);
                let mut leaders = self
                    .counts
                    .iter()
                    .filter(|&(_, &n)| n == max)
                    .map(|(&b, _)| b);
                let first = leaders.next();
                let tied = leaders.next().is_some();
                match first {
                    Some(allele) if !tied => Some(Vote::Majority {
                        allele,
                        counts: self,
                    }),
                    _ => Some(Vote::Tie { counts: self }),
                }
            }
        }
    }
}

impl FromIterator<u8> for BaseCounts {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut counts = Self::new();
        for base in iter {
            counts.add(base);
        }
        counts
    }
}

/// Renders as `A=2,T=1`
impl fmt::Display for BaseCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (base, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{base}={count}")?;
        }
        Ok(())
    }
}

impl Serialize for BaseCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(b, n)| (b.to_string(), n)))
    }
}

/// Outcome of voting over a non-empty set of bases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vote {
    /// Exactly one base was observed
    Single(u8),
    /// One base has strictly the highest count
    Majority { allele: u8, counts: BaseCounts },
    /// Two or more bases share the highest count
    Tie { counts: BaseCounts },
}

impl Vote {
    /// The called allele; `N` for ties
    pub fn allele(&self) -> u8 {
        match self {
            Self::Single(allele) | Self::Majority { allele, .. } => *allele,
            Self::Tie { .. } => UNKNOWN_BASE,
        }
    }

    pub fn counts(&self) -> Option<&BaseCounts> {
        match self {
            Self::Single(_) => None,
            Self::Majority { counts, .. } | Self::Tie { counts } => Some(counts),
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Self::Tie { .. })
    }
}
