//! Shared fixtures for engine tests: a small but complete catalog and a
//! character ready to learn from it.

use sheetbldr_domain::{
    Ability, CharacterRecord, Clan, ContentCatalog, Curriculum, CurriculumEntry, CurriculumRank,
    Family, Ring, RingValues, School, Skill, Technique, TechniqueGroup, Title, SocialStat,
    StatAward,
};

pub fn five_rings(catalog: &mut ContentCatalog) {
    for (ring_ref, name) in [
        ("air", "Air"),
        ("earth", "Earth"),
        ("fire", "Fire"),
        ("water", "Water"),
        ("void", "Void"),
    ] {
        catalog.insert_ring(Ring::new(ring_ref, name));
    }
}

/// Catalog used by most progression and session tests.
///
/// The shrine-keeper school allows rituals and shuji and runs a two-rank
/// curriculum with thresholds at 10 and 20 XP:
/// - rank 1: courtesy, theology, and rank-1 rituals
/// - rank 2: meditation, the social skill group, and one out-of-group kata
pub fn fixture_catalog() -> ContentCatalog {
    let mut catalog = ContentCatalog::new();
    five_rings(&mut catalog);

    catalog.insert_skill(Skill::new("courtesy", "Courtesy", "social"));
    catalog.insert_skill(Skill::new("sentiment", "Sentiment", "social"));
    catalog.insert_skill(Skill::new("theology", "Theology", "scholar"));
    catalog.insert_skill(Skill::new("meditation", "Meditation", "scholar"));
    catalog.insert_skill(Skill::new("fitness", "Fitness", "martial"));

    catalog.insert_technique(
        Technique::new("cleansing-rite", "Cleansing Rite", TechniqueGroup::Ritual)
            .with_rank(1)
            .with_ring("water"),
    );
    catalog.insert_technique(
        Technique::new("tempest-call", "Tempest Call", TechniqueGroup::Ritual)
            .with_rank(2)
            .with_ring("air"),
    );
    catalog.insert_technique(
        Technique::new("cadence", "Cadence", TechniqueGroup::Shuji)
            .with_rank(1)
            .with_ring("air"),
    );
    catalog.insert_technique(
        Technique::new("shallow-waters", "Shallow Waters", TechniqueGroup::Shuji)
            .with_rank(2)
            .with_ring("water"),
    );
    catalog.insert_technique(
        Technique::new(
            "crimson-leaves-strike",
            "Crimson Leaves Strike",
            TechniqueGroup::Kata,
        )
        .with_rank(1)
        .with_ring("fire"),
    );
    catalog.insert_technique(
        Technique::new("way-of-the-crane", "Way of the Crane", TechniqueGroup::Shuji)
            .with_rank(1)
            .with_ring("air")
            .with_clan("crane"),
    );
    catalog.insert_technique(
        Technique::new(
            "heartpiercing-strike",
            "Heartpiercing Strike",
            TechniqueGroup::Kata,
        )
        .with_rank(3)
        .with_ring("fire")
        .with_exp_cost(4),
    );

    catalog.insert_clan(
        Clan::new("phoenix", "Phoenix")
            .with_ring_increase("air")
            .with_status(30),
    );
    catalog.insert_family(
        Family::new("kitsune", "Kitsune", "phoenix")
            .with_ring_increase("water")
            .with_glory(40),
    );

    catalog.insert_school(
        School::new(
            "shrine-keeper",
            "Shrine Keeper",
            Ability::new("blessing", "Blessing").with_effect("Call on the water kami"),
            Ability::new("grand-blessing", "Grand Blessing"),
        )
        .with_clan("phoenix")
        .with_honor(50)
        .with_technique_group(TechniqueGroup::Ritual)
        .with_technique_group(TechniqueGroup::Shuji)
        .with_starting_skill("theology")
        .with_curriculum(Curriculum::new(vec![
            CurriculumRank::new(10)
                .with_entry(parse_entry("S: courtesy"))
                .with_entry(parse_entry("S: theology"))
                .with_entry(parse_entry("TG: * ritual 1")),
            CurriculumRank::new(10)
                .with_entry(parse_entry("S: meditation"))
                .with_entry(parse_entry("SG: social"))
                .with_entry(parse_entry("T: crimson-leaves-strike")),
        ])),
    );

    catalog.insert_title(
        Title::new(
            "emerald-magistrate",
            "Emerald Magistrate",
            Ability::new("jurisdiction", "Jurisdiction"),
            Ability::new("emerald-edict", "Emerald Edict"),
        )
        .with_award(StatAward::new(SocialStat::Status, 5).with_limit(60))
        .with_curriculum(Curriculum::new(vec![CurriculumRank::new(6)
            .with_entry(parse_entry("S: sentiment"))
            .with_entry(parse_entry("TG: * shuji 2"))])),
    );

    catalog.finalize();
    catalog
}

/// A shrine-keeper student with every ring at 2 and theology at 1.
pub fn fixture_character() -> CharacterRecord {
    let mut character = CharacterRecord::new("Ayame", "phoenix", "kitsune", "shrine-keeper");
    character.starting_rings = RingValues::uniform(2);
    character.starting_skills.insert("theology".into(), 1);
    character.received_xp = 60;
    character.set_honor(50);
    character.set_glory(40);
    character.set_status(30);
    character
}

/// A school with three empty-list ranks at cumulative thresholds 10/25/45,
/// plus forced-credit drills priced to land exactly on them.
pub fn threshold_catalog() -> ContentCatalog {
    let mut catalog = ContentCatalog::new();
    five_rings(&mut catalog);
    for (tech_ref, cost) in [("drill-a", 10), ("drill-b", 14), ("drill-c", 1)] {
        catalog.insert_technique(
            Technique::new(tech_ref, tech_ref, TechniqueGroup::Kata)
                .with_rank(1)
                .with_exp_cost(cost),
        );
    }
    catalog.insert_school(
        School::new(
            "proving-grounds",
            "Proving Grounds",
            Ability::new("first-stance", "First Stance"),
            Ability::new("final-stance", "Final Stance"),
        )
        .with_technique_group(TechniqueGroup::Kata)
        .with_curriculum(Curriculum::new(vec![
            CurriculumRank::new(10),
            CurriculumRank::new(15),
            CurriculumRank::new(20),
        ])),
    );
    catalog.finalize();
    catalog
}

pub fn threshold_character() -> CharacterRecord {
    CharacterRecord::new("Tadaka", "phoenix", "isawa", "proving-grounds")
}

fn parse_entry(raw: &str) -> CurriculumEntry {
    raw.parse().expect("fixture curriculum entry")
}
