//! Evidence tags recording how each call was made.
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `Direct` | single base from the 1:1 ancestor column |
//! | `MajorityVote:B=n,...` | majority of several bases from the 1:1 ancestor column |
//! | `AncestralParalog` | single base from duplicated ancestor copies |
//! | `AncestralParalogVote:B=n,...` | majority over duplicated ancestor copies |
//! | `AncestralParalogTie:B=n,...` | tie among ancestor bases, allele `N` |
//! | `WithinSpeciesParalog[Vote:...\|Tie:...]` | the same, from paralogs in the reference |
//! | `Missing(+self)` / `Missing(tried:N+self)` | every tier exhausted |
//! | `Missing` | the reference base itself could not be resolved |
//!
//! With more than one ancestor configured, ancestor tags end in `@Name`, plus
//! `(fallback:k)` when the ancestor at chain index `k > 0` was used.

use serde::Serialize;

use crate::core::chain::AncestorChain;
use crate::core::types::{SearchMethod, Tier};
use crate::resolve::resolver::Resolution;
use crate::resolve::votes::{BaseCounts, Vote};

/// Tag for positions whose reference base could not be resolved
pub const MISSING_REFERENCE: &str = "Missing";

/// Render a resolution as an evidence tag
#[must_use]
pub fn encode(resolution: &Resolution, chain: &AncestorChain) -> String {
    match resolution {
        Resolution::Ancestor {
            index,
            method,
            vote,
        } => {
            let call = match (vote, method) {
                (Vote::Single(_), SearchMethod::Direct) => "Direct".to_string(),
                (Vote::Single(_), SearchMethod::Paralog) => "AncestralParalog".to_string(),
                (Vote::Majority { counts, .. }, SearchMethod::Direct) => {
                    format!("MajorityVote:{counts}")
                }
                (Vote::Majority { counts, .. }, SearchMethod::Paralog) => {
                    format!("AncestralParalogVote:{counts}")
                }
                (Vote::Tie { counts }, _) => format!("AncestralParalogTie:{counts}"),
            };
            format!("{call}{}", source_suffix(*index, chain))
        }
        Resolution::WithinSpecies { vote } => match vote {
            Vote::Single(_) => "WithinSpeciesParalog".to_string(),
            Vote::Majority { counts, .. } => format!("WithinSpeciesParalogVote:{counts}"),
            Vote::Tie { counts } => format!("WithinSpeciesParalogTie:{counts}"),
        },
        Resolution::Exhausted { attempted } if *attempted > 1 => {
            format!("Missing(tried:{attempted}+self)")
        }
        Resolution::Exhausted { .. } => "Missing(+self)".to_string(),
    }
}

/// `@Name` and `(fallback:k)`, only when several ancestors are configured
fn source_suffix(index: usize, chain: &AncestorChain) -> String {
    if !chain.is_multiple() {
        return String::new();
    }
    if index > 0 {
        format!("@{}(fallback:{index})", chain.name(index))
    } else {
        format!("@{}", chain.name(index))
    }
}

/// Kind of call made by the voting rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Single,
    Majority,
    Tie,
    None,
}

/// The fields an evidence tag flattens, kept apart for structured output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceDetail {
    pub tier: Tier,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<SearchMethod>,

    /// Chain index of the ancestor used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestor_index: Option<usize>,

    pub call: CallKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<BaseCounts>,
}

impl EvidenceDetail {
    pub fn from_resolution(resolution: &Resolution) -> Self {
        let (method, ancestor_index) = match resolution {
            Resolution::Ancestor { index, method, .. } => (Some(*method), Some(*index)),
            _ => (None, None),
        };
        let call = match resolution.vote() {
            Some(Vote::Single(_)) => CallKind::Single,
            Some(Vote::Majority { .. }) => CallKind::Majority,
            Some(Vote::Tie { .. }) => CallKind::Tie,
            None => CallKind::None,
        };

        Self {
            tier: resolution.tier(),
            method,
            ancestor_index,
            call,
            counts: resolution.vote().and_then(Vote::counts).cloned(),
        }
    }

    pub fn no_reference() -> Self {
        Self {
            tier: Tier::NoReference,
            method: None,
            ancestor_index: None,
            call: CallKind::None,
            counts: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::InMemoryAlignment;

    fn make_chain(list: &str) -> AncestorChain {
        let mut aln = InMemoryAlignment::new();
        for name in ["Anc0", "Anc1", "Anc2"] {
            aln.add_genome(name, [("s", "A")]).unwrap();
        }
        AncestorChain::from_list(list, &aln).unwrap()
    }

    fn counts(bases: &[u8]) -> BaseCounts {
        bases.iter().copied().collect()
    }

    fn ancestor(index: usize, method: SearchMethod, bases: &[u8]) -> Resolution {
        Resolution::Ancestor {
            index,
            method,
            vote: counts(bases).vote().unwrap(),
        }
    }

    #[test]
    fn test_single_ancestor_tags_have_no_suffix() {
        let chain = make_chain("Anc0");
        assert_eq!(encode(&ancestor(0, SearchMethod::Direct, b"A"), &chain), "Direct");
        assert_eq!(
            encode(&ancestor(0, SearchMethod::Direct, b"CCG"), &chain),
            "MajorityVote:C=2,G=1"
        );
        assert_eq!(
            encode(&ancestor(0, SearchMethod::Paralog, b"T"), &chain),
            "AncestralParalog"
        );
        assert_eq!(
            encode(&ancestor(0, SearchMethod::Paralog, b"AAT"), &chain),
            "AncestralParalogVote:A=2,T=1"
        );
    }

    #[test]
    fn test_ties_are_tagged_as_paralog_ties() {
        let chain = make_chain("Anc0");
        assert_eq!(
            encode(&ancestor(0, SearchMethod::Paralog, b"AATT"), &chain),
            "AncestralParalogTie:A=2,T=2"
        );
        assert_eq!(
            encode(&ancestor(0, SearchMethod::Direct, b"AT"), &chain),
            "AncestralParalogTie:A=1,T=1"
        );
    }

    #[test]
    fn test_multiple_ancestor_suffixes() {
        let chain = make_chain("Anc0,Anc1,Anc2");
        assert_eq!(
            encode(&ancestor(0, SearchMethod::Direct, b"A"), &chain),
            "Direct@Anc0"
        );
        assert_eq!(
            encode(&ancestor(1, SearchMethod::Direct, b"G"), &chain),
            "Direct@Anc1(fallback:1)"
        );
        assert_eq!(
            encode(&ancestor(2, SearchMethod::Paralog, b"GGA"), &chain),
            "AncestralParalogVote:A=1,G=2@Anc2(fallback:2)"
        );
    }

    #[test]
    fn test_within_species_tags() {
        let chain = make_chain("Anc0,Anc1");
        let tag = |bases: &[u8]| {
            encode(
                &Resolution::WithinSpecies {
                    vote: counts(bases).vote().unwrap(),
                },
                &chain,
            )
        };
        assert_eq!(tag(b"C"), "WithinSpeciesParalog");
        assert_eq!(tag(b"CCA"), "WithinSpeciesParalogVote:A=1,C=2");
        assert_eq!(tag(b"CA"), "WithinSpeciesParalogTie:A=1,C=1");
    }

    #[test]
    fn test_missing_tags() {
        let single = make_chain("Anc0");
        let triple = make_chain("Anc0,Anc1,Anc2");
        assert_eq!(
            encode(&Resolution::Exhausted { attempted: 1 }, &single),
            "Missing(+self)"
        );
        assert_eq!(
            encode(&Resolution::Exhausted { attempted: 3 }, &triple),
            "Missing(tried:3+self)"
        );
    }

    #[test]
    fn test_evidence_detail() {
        let detail = EvidenceDetail::from_resolution(&ancestor(1, SearchMethod::Paralog, b"AAT"));
        assert_eq!(detail.tier, Tier::Ancestor);
        assert_eq!(detail.method, Some(SearchMethod::Paralog));
        assert_eq!(detail.ancestor_index, Some(1));
        assert_eq!(detail.call, CallKind::Majority);
        assert_eq!(detail.counts.unwrap().to_string(), "A=2,T=1");

        let missing = EvidenceDetail::from_resolution(&Resolution::Exhausted { attempted: 2 });
        assert_eq!(missing.tier, Tier::Exhausted);
        assert_eq!(missing.call, CallKind::None);
        assert!(missing.counts.is_none());
    }
}
