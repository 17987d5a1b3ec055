use std::collections::BTreeSet;

use tracing::debug;

use crate::alignment::{AlignmentIndex, GenomeId};
use crate::core::chain::AncestorChain;
use crate::core::types::{SearchMethod, Tier, UNKNOWN_BASE, WITHIN_SPECIES};
use crate::resolve::votes::{BaseCounts, Vote};

/// Structured outcome of resolving one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An ancestor in the chain supplied the bases
    Ancestor {
        /// Index into the ancestor chain
        index: usize,
        method: SearchMethod,
        vote: Vote,
    },
    /// Paralogous copies within the reference genome supplied the bases
    WithinSpecies { vote: Vote },
    /// No tier produced an informative base
    Exhausted {
        /// Number of ancestors tried before the within-species search
        attempted: usize,
    },
}

impl Resolution {
    /// The inferred ancestral allele, `N` when no call could be made
    pub fn allele(&self) -> u8 {
        self.vote().map_or(UNKNOWN_BASE, Vote::allele)
    }

    pub fn vote(&self) -> Option<&Vote> {
        match self {
            Self::Ancestor { vote, .. } | Self::WithinSpecies { vote } => Some(vote),
            Self::Exhausted { .. } => None,
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            Self::Ancestor { .. } => Tier::Ancestor,
            Self::WithinSpecies { .. } => Tier::WithinSpecies,
            Self::Exhausted { .. } => Tier::Exhausted,
        }
    }

    /// Name reported in the used-ancestor column
    pub fn used_ancestor<'c>(&self, chain: &'c AncestorChain) -> &'c str {
        match self {
            Self::Ancestor { index, .. } => chain.name(*index),
            Self::WithinSpecies { .. } => WITHIN_SPECIES,
            Self::Exhausted { .. } => chain.primary_name(),
        }
    }
}

/// One column query in the tiered search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// 1:1 column in the ancestor at this chain index
    Direct(usize),
    /// Duplicate-inclusive column in the ancestor at this chain index
    AncestralParalog(usize),
    /// Duplicate-inclusive column in the reference genome itself
    WithinSpecies,
}

impl Attempt {
    fn includes_duplicates(self) -> bool {
        !matches!(self, Self::Direct(_))
    }

    fn into_resolution(self, vote: Vote) -> Resolution {
        match self {
            Self::Direct(index) => Resolution::Ancestor {
                index,
                method: SearchMethod::Direct,
                vote,
            },
            Self::AncestralParalog(index) => Resolution::Ancestor {
                index,
                method: SearchMethod::Paralog,
                vote,
            },
            Self::WithinSpecies => Resolution::WithinSpecies { vote },
        }
    }
}

/// Tiered search for the ancestral allele at reference positions.
///
/// Attempts run in a fixed order, stopping at the first one that observes an
/// informative base:
///
/// 1. for each ancestor in chain order: direct column, then duplicate-inclusive column
/// 2. duplicate-inclusive column in the reference genome, excluding the query locus
///
/// Column query failures count as "no bases" for that attempt.
pub struct AlleleResolver<'a, A: AlignmentIndex + ?Sized> {
    index: &'a A,
    reference: GenomeId,
    chain: &'a AncestorChain,
    reference_targets: BTreeSet<GenomeId>,
}

impl<'a, A: AlignmentIndex + ?Sized> AlleleResolver<'a, A> {
    pub fn new(index: &'a A, reference: GenomeId, chain: &'a AncestorChain) -> Self {
        Self {
            index,
            reference,
            chain,
            reference_targets: BTreeSet::from([reference]),
        }
    }

    pub fn chain(&self) -> &AncestorChain {
        self.chain
    }

    /// Attempts in the order they are tried
    pub fn attempts(&self) -> impl Iterator<Item = Attempt> {
        (0..self.chain.len())
            .flat_map(|i| [Attempt::Direct(i), Attempt::AncestralParalog(i)])
            .chain(std::iter::once(Attempt::WithinSpecies))
    }

    /// Resolve the ancestral allele at an absolute reference coordinate
    pub fn resolve(&self, position: u64) -> Resolution {
        for attempt in self.attempts() {
            if let Some(vote) = self.collect(attempt, position).vote() {
                return attempt.into_resolution(vote);
            }
        }

        Resolution::Exhausted {
            attempted: self.chain.len(),
        }
    }

    /// Informative bases observed by a single attempt.
    ///
    /// In duplicate-inclusive queries the reference's own locus is dropped, so
    /// a position can never vote for itself.
    pub fn collect(&self, attempt: Attempt, position: u64) -> BaseCounts {
        let targets = match attempt {
            Attempt::Direct(i) | Attempt::AncestralParalog(i) => match self.chain.get(i) {
                Some(ancestor) => ancestor.targets(),
                None => return BaseCounts::new(),
            },
            Attempt::WithinSpecies => &self.reference_targets,
        };
        let duplicates = attempt.includes_duplicates();

        match self
            .index
            .aligned_bases(self.reference, position, targets, duplicates)
        {
            Ok(bases) => bases
                .into_iter()
                .filter(|b| !(duplicates && b.genome == self.reference && b.position == position))
                .map(|b| b.base)
                .collect(),
            Err(e) => {
                debug!("{attempt:?} query at {position} failed, treating as empty: {e}");
                BaseCounts::new()
            }
        }
    }
}
