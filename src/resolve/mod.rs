//! Ancestral allele resolution.
//!
//! - [`AlleleResolver`](resolver::AlleleResolver): tiered search over the ancestor chain
//! - [`BaseCounts`](votes::BaseCounts) and [`Vote`](votes::Vote): the voting rule
//! - [`evidence`]: renders a [`Resolution`](resolver::Resolution) as an evidence tag
//!
//! ## Search Order
//!
//! 1. **Ancestors**, in chain order. For each ancestor the 1:1 aligned column
//!    is read first; only if it holds no informative base is the column
//!    re-read with duplicated (paralogous) copies included.
//! 2. **Within-species paralogs**: the reference is queried against itself
//!    with duplicates included, dropping the query locus so a position never
//!    votes for itself.
//! 3. **Exhausted**: the allele is `N`.
//!
//! ## Voting
//!
//! `N`, gaps and NUL are ignored and bases are uppercased. One observed base is
//! called as-is; otherwise the base with strictly the highest count wins, and a
//! tie for the highest count gives `N`.
//!
//! ## Example
//!
//! ```rust
//! use ancestral_allele::alignment::memory::{BlockRow, InMemoryAlignment};
//! use ancestral_allele::alignment::AlignmentIndex;
//! use ancestral_allele::core::chain::AncestorChain;
//! use ancestral_allele::resolve::{evidence, AlleleResolver};
//!
//! let mut aln = InMemoryAlignment::new();
//! let hg = aln.add_genome("hg", [("chr1", "ACGT")]).unwrap();
//! let anc = aln.add_genome("Anc0", [("s1", "TTCC")]).unwrap();
//! aln.add_block(2, &[BlockRow::new(hg, "chr1", 0), BlockRow::new(anc, "s1", 2)]).unwrap();
//!
//! let chain = AncestorChain::from_list("Anc0", &aln).unwrap();
//! let resolver = AlleleResolver::new(&aln, hg, &chain);
//! let resolution = resolver.resolve(aln.sequence_start(hg, "chr1").unwrap() + 1);
//!
//! assert_eq!(resolution.allele(), b'C');
//! assert_eq!(evidence::encode(&resolution, &chain), "Direct");
//! ```

pub mod evidence;
pub mod resolver;
pub mod votes;

pub use resolver::{AlleleResolver, Attempt, Resolution};
pub use votes::{BaseCounts, Vote};
