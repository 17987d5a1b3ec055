//! Core data types for ancestral allele inference.
//!
//! - [`CoordinateRecord`](position::CoordinateRecord): a reference position read from input
//! - [`AncestorChain`](chain::AncestorChain): priority-ordered candidate ancestor genomes
//! - [`types`]: base symbols, resolution tiers and sentinel names
//!
//! ## Ancestor Chains
//!
//! Ancestors are given as a single genome name or a comma-separated list in
//! priority order. The first ancestor with usable bases at a position decides
//! the call; later ancestors are only consulted as fallbacks.
//!
//! | Input | Chain |
//! |-------|-------|
//! | `Anc0` | `[Anc0]` |
//! | `Anc0, Anc1` | `[Anc0, Anc1]` |
//! | `Anc0,,Anc1,` | `[Anc0, Anc1]` |

pub mod chain;
pub mod position;
pub mod types;
