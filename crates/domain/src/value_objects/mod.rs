//! Value objects: parsed wire formats and creation output.

mod creation;
mod curriculum;
mod ref_string;

pub use creation::CharacterCreation;
pub use curriculum::{Curriculum, CurriculumRank};
pub use ref_string::{
    ContentKind, CurriculumEntry, LearningEntry, LearningTag, RefParseError,
};
