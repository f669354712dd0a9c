//! The five rings.

use serde::{Deserialize, Serialize};

use crate::refs::RingRef;

/// Refs of the five standard rings, in display order.
pub const STANDARD_RING_REFS: [&str; 5] = ["air", "earth", "fire", "water", "void"];

/// A ring from the content catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    #[serde(rename = "ref", default)]
    pub ring_ref: RingRef,
    pub name: String,
    /// Approach flavor text shown in the catalog view
    #[serde(default)]
    pub outlook: String,
}

impl Ring {
    /// Experience cost of raising a ring is this much per point of the new rank.
    pub const COST_PER_RANK: u32 = 3;
    /// Rings cannot be raised past this rank.
    pub const MAX_RANK: u8 = 5;

    pub fn new(ring_ref: impl Into<RingRef>, name: impl Into<String>) -> Self {
        Self {
            ring_ref: ring_ref.into(),
            name: name.into(),
            outlook: String::new(),
        }
    }

    pub fn with_outlook(mut self, outlook: impl Into<String>) -> Self {
        self.outlook = outlook.into();
        self
    }
}

/// Rank values for all five rings, as persisted in the character document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingValues {
    pub air: u8,
    pub earth: u8,
    pub fire: u8,
    pub water: u8,
    pub void: u8,
}

impl RingValues {
    /// All five rings at zero. Used as the serde default for delta-shaped
    /// fields (school ring increases), where the character default of 1 would
    /// be wrong.
    pub fn zero() -> Self {
        Self::uniform(0)
    }

    /// All five rings at the same rank.
    pub fn uniform(rank: u8) -> Self {
        Self {
            air: rank,
            earth: rank,
            fire: rank,
            water: rank,
            void: rank,
        }
    }

    pub fn get(&self, ring: &RingRef) -> Option<u8> {
        match ring.as_str() {
            "air" => Some(self.air),
            "earth" => Some(self.earth),
            "fire" => Some(self.fire),
            "water" => Some(self.water),
            "void" => Some(self.void),
            _ => None,
        }
    }

    pub fn set(&mut self, ring: &RingRef, rank: u8) -> bool {
        match ring.as_str() {
            "air" => self.air = rank,
            "earth" => self.earth = rank,
            "fire" => self.fire = rank,
            "water" => self.water = rank,
            "void" => self.void = rank,
            _ => return false,
        }
        true
    }

    /// Raise one ring by one rank. Returns false for an unknown ref.
    pub fn bump(&mut self, ring: &RingRef) -> bool {
        match self.get(ring) {
            Some(rank) => self.set(ring, rank + 1),
            None => false,
        }
    }

    /// (ref, rank) pairs in display order.
    pub fn pairs(&self) -> [(RingRef, u8); 5] {
        [
            (RingRef::new("air"), self.air),
            (RingRef::new("earth"), self.earth),
            (RingRef::new("fire"), self.fire),
            (RingRef::new("water"), self.water),
            (RingRef::new("void"), self.void),
        ]
    }
}

impl Default for RingValues {
    /// Characters start with every ring at 1.
    fn default() -> Self {
        Self::uniform(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_values_get_and_set_by_ref() {
        let mut rings = RingValues::default();
        assert_eq!(rings.get(&RingRef::new("fire")), Some(1));
        assert!(rings.set(&RingRef::new("fire"), 3));
        assert_eq!(rings.fire, 3);
        assert!(!rings.set(&RingRef::new("metal"), 3));
        assert_eq!(rings.get(&RingRef::new("metal")), None);
    }

    #[test]
    fn bump_raises_one_rank() {
        let mut rings = RingValues::uniform(2);
        assert!(rings.bump(&RingRef::new("void")));
        assert_eq!(rings.void, 3);
        assert_eq!(rings.air, 2);
    }

    #[test]
    fn serializes_with_lowercase_keys() {
        let json = serde_json::to_value(RingValues::uniform(2)).expect("serialize");
        assert_eq!(json["air"], 2);
        assert_eq!(json["void"], 2);
    }
}
