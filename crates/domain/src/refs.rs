//! Typed reference keys for catalog content.
//!
//! Every piece of content is addressed by a stable string identifier (a
//! "ref"). The newtypes below keep refs of different content kinds from being
//! mixed up at compile time while staying cheap to clone and order.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_ref {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Content refs
define_ref!(RingRef);
define_ref!(SkillRef);
define_ref!(TechRef);
define_ref!(TraitRef);
define_ref!(ItemRef);
define_ref!(QualityRef);

// Classification refs
define_ref!(GroupRef);

// Identity refs
define_ref!(ClanRef);
define_ref!(FamilyRef);

// Institution refs
define_ref!(SchoolRef);
define_ref!(TitleRef);

// A curriculum is owned by a school or a title; its ref is the owning
// institution's ref.
define_ref!(CurriculumRef);

impl From<SchoolRef> for CurriculumRef {
    fn from(value: SchoolRef) -> Self {
        Self(value.0)
    }
}

impl From<TitleRef> for CurriculumRef {
    fn from(value: TitleRef) -> Self {
        Self(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refs_compare_by_value() {
        assert_eq!(SkillRef::new("courtesy"), SkillRef::from("courtesy"));
        assert_ne!(SkillRef::new("courtesy"), SkillRef::new("fitness"));
    }

    #[test]
    fn refs_serialize_transparently() {
        let json = serde_json::to_string(&RingRef::new("void")).expect("serialize");
        assert_eq!(json, "\"void\"");
        let back: RingRef = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, RingRef::new("void"));
    }

    #[test]
    fn institution_refs_convert_to_curriculum_refs() {
        let school = SchoolRef::new("shrine-keeper");
        let curriculum: CurriculumRef = school.into();
        assert_eq!(curriculum.as_str(), "shrine-keeper");
    }
}
