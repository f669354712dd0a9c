//! Curriculum structure owned by schools and titles.

use serde::{Deserialize, Serialize};

use super::ref_string::CurriculumEntry;

/// One rank of a curriculum: a cost step and the content that earns full
/// progress credit while this rank is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumRank {
    /// Experience required to pass this rank, on top of all previous ranks.
    /// The absolute threshold of rank `i` is the sum of costs `0..=i`.
    pub rank_up_cost: u32,
    /// Content expressions resolved against the catalog when the rank is
    /// evaluated (single refs and group expressions).
    #[serde(default)]
    pub entries: Vec<CurriculumEntry>,
}

impl CurriculumRank {
    pub fn new(rank_up_cost: u32) -> Self {
        Self {
            rank_up_cost,
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: CurriculumEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// The ordered rank sequence of a school or title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curriculum {
    pub ranks: Vec<CurriculumRank>,
}

impl Curriculum {
    pub fn new(ranks: Vec<CurriculumRank>) -> Self {
        Self { ranks }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Absolute experience threshold of the 0-indexed rank: the cumulative
    /// sum of `rank_up_cost` through that rank.
    pub fn threshold(&self, rank_index: usize) -> u32 {
        self.ranks
            .iter()
            .take(rank_index + 1)
            .map(|r| r.rank_up_cost)
            .sum()
    }

    /// Experience needed to complete every rank.
    pub fn total_cost(&self) -> u32 {
        self.ranks.iter().map(|r| r.rank_up_cost).sum()
    }
}
