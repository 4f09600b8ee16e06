//! Builtin encounter rule table.

use game_core::encounter::{Biome, Difficulty, EncounterKind, EncounterRule};
use game_core::stats::MonsterType;

fn rule(
    biome: Biome,
    difficulty: Difficulty,
    kind: EncounterKind,
    monster_types: &[MonsterType],
    weight: u32,
) -> EncounterRule {
    EncounterRule {
        biome,
        difficulty,
        kind,
        monster_types: monster_types.to_vec(),
        min_level: 1,
        max_level: 100,
        weight,
    }
}

/// The standard rule table: biome ladders for forest, cave, and dungeon,
/// plus any-biome boss, ambush, and random rows.
pub fn builtin_rules() -> Vec<EncounterRule> {
    use Biome::{Any, Cave, Dungeon, Forest};
    use Difficulty::{Boss, Easy, Hard, Normal};
    use EncounterKind::{Ambush, Combat, Random};
    use MonsterType::{Beast, Demon, Elemental, Humanoid, Undead};

    vec![
        // Forest
        rule(Forest, Easy, Combat, &[Beast, Humanoid], 100),
        rule(Forest, Normal, Combat, &[Beast, Humanoid, Elemental], 80),
        rule(Forest, Hard, Combat, &[Beast, Elemental, Demon], 60),
        // Cave
        rule(Cave, Easy, Combat, &[Beast, Undead], 100),
        rule(Cave, Normal, Combat, &[Undead, Humanoid, Beast], 80),
        rule(Cave, Hard, Combat, &[Undead, Demon, Elemental], 60),
        // Dungeon
        rule(Dungeon, Easy, Combat, &[Undead, Humanoid], 100),
        rule(Dungeon, Normal, Combat, &[Undead, Humanoid, Demon], 80),
        rule(Dungeon, Hard, Combat, &[Demon, Undead, Elemental], 60),
        // Bosses can appear anywhere their quest puts them.
        rule(
            Any,
            Boss,
            EncounterKind::Boss,
            &[Beast, Undead, Demon, Elemental],
            100,
        ),
        // Ambushes and wandering encounters.
        rule(Any, Normal, Ambush, &[Humanoid, Beast, Demon], 30),
        rule(Any, Easy, Random, &[Beast, Humanoid, Undead], 20),
    ]
}

#[cfg(test)]
mod tests {
    use game_core::encounter::EncounterTags;

    use super::*;

    #[test]
    fn forest_tags_match_only_forest_and_any_rows() {
        let tags = EncounterTags {
            biome: Biome::Forest,
            difficulty: Difficulty::Normal,
            kind: EncounterKind::Combat,
        };
        let matching: Vec<_> = builtin_rules()
            .into_iter()
            .filter(|rule| rule.applies_to(5, &tags))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].biome, Biome::Forest);
    }

    #[test]
    fn boss_row_applies_in_every_biome() {
        for biome in [Biome::Forest, Biome::Cave, Biome::Tower] {
            let tags = EncounterTags {
                biome,
                difficulty: Difficulty::Boss,
                kind: EncounterKind::Boss,
            };
            assert!(builtin_rules().iter().any(|rule| rule.applies_to(10, &tags)));
        }
    }
}
