//! Tagged reference strings for the learning log and curriculum content.
//!
//! Learning-log entries use the wire format `"[F|C]K: identifier"` where
//! `K` is `R` (ring), `S` (skill) or `T` (technique) and the optional prefix
//! marks the entry free (`F`) or forced curriculum credit (`C`).
//!
//! Curriculum content lists use the same single-ref forms plus two group
//! expressions: `"SG: group"` (every skill in a named group) and
//! `"TG: ring group maxRank"` (techniques filtered by ring, group and rank;
//! the ring token may be `*` for "any ring").
//!
//! Parsing is done by hand to avoid a regex dependency in the domain layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::refs::{GroupRef, RingRef, SkillRef, TechRef};

/// Error when parsing a ref string or curriculum expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefParseError {
    /// The input string is empty
    #[error("Empty ref string")]
    Empty,
    /// Missing the `": "` separator between kind and identifier
    #[error("Missing ': ' separator in '{0}'")]
    MissingSeparator(String),
    /// The kind letter is not one of the known kinds
    #[error("Unknown ref kind in '{0}'")]
    UnknownKind(String),
    /// The identifier part is empty
    #[error("Empty identifier in '{0}'")]
    EmptyIdentifier(String),
    /// A technique-group expression does not have the expected tokens
    #[error("Invalid technique group expression: '{0}'")]
    InvalidTechGroup(String),
    /// The max-rank token of a technique-group expression is not a number
    #[error("Invalid max rank '{rank}' in '{expr}'")]
    InvalidMaxRank { expr: String, rank: String },
}

/// The kind of content a learning-log entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Ring,
    Skill,
    Technique,
}

impl ContentKind {
    /// The single-letter wire encoding of this kind
    pub fn letter(self) -> char {
        match self {
            Self::Ring => 'R',
            Self::Skill => 'S',
            Self::Technique => 'T',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'R' => Some(Self::Ring),
            'S' => Some(Self::Skill),
            'T' => Some(Self::Technique),
            _ => None,
        }
    }
}

/// Cost/credit modifier carried by a learning-log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LearningTag {
    /// Costs experience; contributes full or half curriculum progress
    /// depending on rank-list membership
    #[default]
    Normal,
    /// No cost and no progress contribution; state still advances
    Free,
    /// Costs experience and always contributes full progress
    Forced,
}

impl LearningTag {
    fn prefix(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Free => "F",
            Self::Forced => "C",
        }
    }
}

/// One parsed learning-log entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LearningEntry {
    pub tag: LearningTag,
    pub kind: ContentKind,
    pub id: String,
}

impl LearningEntry {
    pub fn new(tag: LearningTag, kind: ContentKind, id: impl Into<String>) -> Self {
        Self {
            tag,
            kind,
            id: id.into(),
        }
    }

    /// A normally-priced entry
    pub fn normal(kind: ContentKind, id: impl Into<String>) -> Self {
        Self::new(LearningTag::Normal, kind, id)
    }

    /// A free entry (`F` prefix)
    pub fn free(kind: ContentKind, id: impl Into<String>) -> Self {
        Self::new(LearningTag::Free, kind, id)
    }

    /// A forced-curriculum-credit entry (`C` prefix)
    pub fn forced(kind: ContentKind, id: impl Into<String>) -> Self {
        Self::new(LearningTag::Forced, kind, id)
    }

    pub fn is_free(&self) -> bool {
        self.tag == LearningTag::Free
    }
}

impl FromStr for LearningEntry {
    type Err = RefParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RefParseError::Empty);
        }

        let (head, id) = split_head(input)?;

        // The head is the kind letter with an optional one-letter prefix.
        let mut chars = head.chars();
        let first = chars.next().ok_or(RefParseError::Empty)?;
        let rest: String = chars.collect();

        let (tag, kind_letter) = match (first, rest.chars().next()) {
            ('F', Some(k)) if rest.len() == 1 => (LearningTag::Free, k),
            ('C', Some(k)) if rest.len() == 1 => (LearningTag::Forced, k),
            (k, None) => (LearningTag::Normal, k),
            _ => return Err(RefParseError::UnknownKind(input.to_string())),
        };

        let kind = ContentKind::from_letter(kind_letter)
            .ok_or_else(|| RefParseError::UnknownKind(input.to_string()))?;

        Ok(Self::new(tag, kind, id))
    }
}

impl fmt::Display for LearningEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}: {}", self.tag.prefix(), self.kind.letter(), self.id)
    }
}

impl Serialize for LearningEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LearningEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of a curriculum rank's content list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurriculumEntry {
    /// A single skill
    Skill(SkillRef),
    /// A single technique
    Technique(TechRef),
    /// Every skill belonging to the named skill group
    SkillGroup(GroupRef),
    /// Techniques filtered by ring (None = any), group and maximum rank.
    /// Clan-restricted techniques only match characters of that clan.
    TechniqueGroup {
        ring: Option<RingRef>,
        group: GroupRef,
        max_rank: u8,
    },
}

impl FromStr for CurriculumEntry {
    type Err = RefParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RefParseError::Empty);
        }

        let (head, body) = split_head(input)?;

        match head {
            "S" => Ok(Self::Skill(SkillRef::new(body))),
            "T" => Ok(Self::Technique(TechRef::new(body))),
            "SG" => Ok(Self::SkillGroup(GroupRef::new(body))),
            "TG" => {
                let tokens: Vec<&str> = body.split_whitespace().collect();
                let (ring, group, rank_token) = match tokens.as_slice() {
                    [ring, group, rank] => {
                        let ring = if *ring == "*" {
                            None
                        } else {
                            Some(RingRef::new(*ring))
                        };
                        (ring, GroupRef::new(*group), *rank)
                    }
                    // Ring omitted entirely: any ring.
                    [group, rank] => (None, GroupRef::new(*group), *rank),
                    _ => return Err(RefParseError::InvalidTechGroup(input.to_string())),
                };
                let max_rank: u8 =
                    rank_token
                        .parse()
                        .map_err(|_| RefParseError::InvalidMaxRank {
                            expr: input.to_string(),
                            rank: rank_token.to_string(),
                        })?;
                Ok(Self::TechniqueGroup {
                    ring,
                    group,
                    max_rank,
                })
            }
            _ => Err(RefParseError::UnknownKind(input.to_string())),
        }
    }
}

impl fmt::Display for CurriculumEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skill(skill) => write!(f, "S: {skill}"),
            Self::Technique(tech) => write!(f, "T: {tech}"),
            Self::SkillGroup(group) => write!(f, "SG: {group}"),
            Self::TechniqueGroup {
                ring,
                group,
                max_rank,
            } => {
                let ring = ring.as_ref().map(RingRef::as_str).unwrap_or("*");
                write!(f, "TG: {ring} {group} {max_rank}")
            }
        }
    }
}

impl Serialize for CurriculumEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CurriculumEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Split `"HEAD: body"` into head and body, validating both are non-empty.
fn split_head(input: &str) -> Result<(&str, &str), RefParseError> {
    let colon = input
        .find(':')
        .ok_or_else(|| RefParseError::MissingSeparator(input.to_string()))?;
    let head = input[..colon].trim();
    let body = input[colon + 1..].trim();
    if head.is_empty() {
        return Err(RefParseError::UnknownKind(input.to_string()));
    }
    if body.is_empty() {
        return Err(RefParseError::EmptyIdentifier(input.to_string()));
    }
    Ok((head, body))
}
