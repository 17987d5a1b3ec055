use std::collections::BTreeSet;

use thiserror::Error;

use crate::alignment::{AlignmentIndex, GenomeId};
use crate::core::types::UNKNOWN_ANCESTOR;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChainError {
    #[error("No valid genome names provided in: '{0}'")]
    Empty(String),

    #[error("Target genome {0} not found")]
    GenomeNotFound(String),
}

/// One candidate ancestor genome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    /// Name reported in output rows
    pub name: String,

    pub genome: GenomeId,

    /// Singleton target set used for column queries
    targets: BTreeSet<GenomeId>,
}

impl Ancestor {
    pub fn new(name: impl Into<String>, genome: GenomeId) -> Self {
        Self {
            name: name.into(),
            genome,
            targets: BTreeSet::from([genome]),
        }
    }

    pub fn targets(&self) -> &BTreeSet<GenomeId> {
        &self.targets
    }
}

/// Priority-ordered ancestor genomes, immutable for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorChain {
    ancestors: Vec<Ancestor>,
}

impl AncestorChain {
    /// Split a comma-separated ancestor list, trimming names and dropping empty entries
    #[must_use]
    pub fn parse_names(list: &str) -> Vec<String> {
        list.split(',')
            .map(|name| name.trim_matches(|c| c == ' ' || c == '\t'))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Resolve a comma-separated ancestor list against an alignment
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Empty` if the list names no genome, or
    /// `ChainError::GenomeNotFound` for the first name the alignment lacks.
    pub fn from_list<A: AlignmentIndex + ?Sized>(list: &str, index: &A) -> Result<Self, ChainError> {
        let names = Self::parse_names(list);
        if names.is_empty() {
            return Err(ChainError::Empty(list.to_string()));
        }

        let ancestors = names
            .into_iter()
            .map(|name| match index.genome(&name) {
                Some(genome) => Ok(Ancestor::new(name, genome)),
                None => Err(ChainError::GenomeNotFound(name)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(ancestors)
    }

    /// Build a chain from already resolved ancestors
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Empty` if `ancestors` is empty.
    pub fn new(ancestors: Vec<Ancestor>) -> Result<Self, ChainError> {
        if ancestors.is_empty() {
            return Err(ChainError::Empty(String::new()));
        }
        Ok(Self { ancestors })
    }

    pub fn get(&self, index: usize) -> Option<&Ancestor> {
        self.ancestors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ancestor> {
        self.ancestors.iter()
    }

    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Whether evidence tags should name the ancestor that was used
    pub fn is_multiple(&self) -> bool {
        self.ancestors.len() > 1
    }

    /// Name of the highest-priority ancestor
    pub fn primary_name(&self) -> &str {
        self.ancestors
            .first()
            .map_or(UNKNOWN_ANCESTOR, |a| a.name.as_str())
    }

    /// Name of the ancestor at `index`, falling back to the primary name
    pub fn name(&self, index: usize) -> &str {
        self.ancestors
            .get(index)
            .map_or_else(|| self.primary_name(), |a| a.name.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.ancestors.iter().map(|a| a.name.as_str()).collect()
    }
}
