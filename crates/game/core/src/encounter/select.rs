//! Rule-driven encounter selection.

use rand::Rng;

use crate::stats::{MonsterArchetype, MonsterType};

use super::{Biome, EncounterKind, EncounterResult, EncounterRule, EncounterTags, SpecialModifiers};

/// Read-only lookup into the monster archetype catalog.
///
/// Implemented by static content; the selector stays agnostic of where the
/// catalog actually lives.
pub trait MonsterCatalog: Send + Sync {
    /// Archetypes matching any of the given types at the given difficulty.
    fn archetypes_matching(
        &self,
        types: &[MonsterType],
        difficulty: super::Difficulty,
    ) -> Vec<MonsterArchetype>;

    /// Exact lookup by archetype name, used when resuming a persisted
    /// encounter.
    fn archetype_by_name(&self, name: &str) -> Option<MonsterArchetype>;
}

/// Select an encounter for the given hero level and node tags.
///
/// Returns `None` when no rule applies or the catalog has no matching
/// archetype. The returned [`EncounterResult`] is self-contained: resuming it
/// later requires only the serialized result, never the RNG state used here.
pub fn select_encounter<R: Rng>(
    hero_level: u32,
    tags: &EncounterTags,
    rules: &[EncounterRule],
    catalog: &dyn MonsterCatalog,
    rng: &mut R,
) -> Option<EncounterResult> {
    let applicable: Vec<&EncounterRule> = rules
        .iter()
        .filter(|rule| rule.applies_to(hero_level, tags))
        .collect();

    let rule = pick_weighted(&applicable, rng)?;

    let candidates = catalog.archetypes_matching(&rule.monster_types, rule.difficulty);
    if candidates.is_empty() {
        return None;
    }

    let archetype = pick_archetype(&candidates, hero_level, rule, rng)?;

    Some(EncounterResult {
        monster_name: archetype.name.clone(),
        monster_type: archetype.monster_type,
        kind: tags.kind,
        biome: tags.biome,
        difficulty: tags.difficulty,
        is_ambush: tags.kind == EncounterKind::Ambush,
        is_boss: tags.difficulty == super::Difficulty::Boss,
        modifiers: modifiers_for(tags),
    })
}

fn pick_weighted<'a, R: Rng>(rules: &[&'a EncounterRule], rng: &mut R) -> Option<&'a EncounterRule> {
    let total: u64 = rules.iter().map(|rule| u64::from(rule.weight)).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(0..total);
    for rule in rules {
        let weight = u64::from(rule.weight);
        if roll < weight {
            return Some(rule);
        }
        roll -= weight;
    }
    None
}

/// Prefer archetypes whose effective level sits within the difficulty's
/// tolerance of the hero level; fall back to any candidate when none do.
fn pick_archetype<R: Rng>(
    candidates: &[MonsterArchetype],
    hero_level: u32,
    rule: &EncounterRule,
    rng: &mut R,
) -> Option<MonsterArchetype> {
    let tolerance = rule.difficulty.level_tolerance();
    let suitable: Vec<&MonsterArchetype> = candidates
        .iter()
        .filter(|archetype| {
            let level = archetype.effective_level(rule.difficulty);
            hero_level.abs_diff(level) <= tolerance
        })
        .collect();

    if suitable.is_empty() {
        let index = rng.gen_range(0..candidates.len());
        return Some(candidates[index].clone());
    }

    let index = rng.gen_range(0..suitable.len());
    Some(suitable[index].clone())
}

fn modifiers_for(tags: &EncounterTags) -> SpecialModifiers {
    let mut modifiers = SpecialModifiers::default();

    if tags.kind == EncounterKind::Ambush {
        modifiers.ambush_bonus = Some(0.2);
        modifiers.hero_penalty = Some(0.1);
    }
    if tags.difficulty == super::Difficulty::Boss {
        modifiers.boss_bonus = Some(0.5);
    }
    match tags.biome {
        Biome::Cave => modifiers.darkness_penalty = Some(0.05),
        Biome::Swamp => modifiers.poison_chance = Some(0.1),
        _ => {}
    }

    modifiers
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::stats::CoreStats;

    use super::super::Difficulty;
    use super::*;

    struct FixedCatalog(Vec<MonsterArchetype>);

    impl MonsterCatalog for FixedCatalog {
        fn archetypes_matching(
            &self,
            types: &[MonsterType],
            difficulty: Difficulty,
        ) -> Vec<MonsterArchetype> {
            self.0
                .iter()
                .filter(|a| types.contains(&a.monster_type) && a.difficulty == difficulty)
                .cloned()
                .collect()
        }

        fn archetype_by_name(&self, name: &str) -> Option<MonsterArchetype> {
            self.0.iter().find(|a| a.name == name).cloned()
        }
    }

    fn archetype(name: &str, monster_type: MonsterType, average: i32) -> MonsterArchetype {
        MonsterArchetype {
            name: name.into(),
            monster_type,
            difficulty: Difficulty::Normal,
            base_stats: CoreStats::new(average, average, average, average, average),
        }
    }

    fn forest_rule() -> EncounterRule {
        EncounterRule {
            biome: Biome::Forest,
            difficulty: Difficulty::Normal,
            kind: EncounterKind::Combat,
            monster_types: vec![MonsterType::Beast],
            min_level: 1,
            max_level: 100,
            weight: 100,
        }
    }

    fn forest_tags() -> EncounterTags {
        EncounterTags {
            biome: Biome::Forest,
            difficulty: Difficulty::Normal,
            kind: EncounterKind::Combat,
        }
    }

    #[test]
    fn no_applicable_rule_yields_none() {
        let catalog = FixedCatalog(vec![archetype("Wolf", MonsterType::Beast, 5)]);
        let mut rng = SmallRng::seed_from_u64(7);
        let tags = EncounterTags {
            biome: Biome::Desert,
            ..forest_tags()
        };

        assert!(select_encounter(5, &tags, &[forest_rule()], &catalog, &mut rng).is_none());
    }

    #[test]
    fn level_appropriate_archetype_is_preferred() {
        // Hero level 5, normal tolerance 5: the level-30 giant is out of range.
        let catalog = FixedCatalog(vec![
            archetype("Wolf", MonsterType::Beast, 5),
            archetype("Giant", MonsterType::Beast, 30),
        ]);

        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let result =
                select_encounter(5, &forest_tags(), &[forest_rule()], &catalog, &mut rng).unwrap();
            assert_eq!(result.monster_name, "Wolf");
        }
    }

    #[test]
    fn falls_back_to_any_candidate_when_none_qualify() {
        let catalog = FixedCatalog(vec![archetype("Giant", MonsterType::Beast, 30)]);
        let mut rng = SmallRng::seed_from_u64(3);

        let result =
            select_encounter(1, &forest_tags(), &[forest_rule()], &catalog, &mut rng).unwrap();
        assert_eq!(result.monster_name, "Giant");
    }

    #[test]
    fn ambush_and_boss_tags_attach_modifiers() {
        let catalog = FixedCatalog(vec![MonsterArchetype {
            difficulty: Difficulty::Boss,
            ..archetype("Lich", MonsterType::Undead, 10)
        }]);
        let rule = EncounterRule {
            biome: Biome::Any,
            difficulty: Difficulty::Boss,
            kind: EncounterKind::Ambush,
            monster_types: vec![MonsterType::Undead],
            min_level: 1,
            max_level: 100,
            weight: 100,
        };
        let tags = EncounterTags {
            biome: Biome::Cave,
            difficulty: Difficulty::Boss,
            kind: EncounterKind::Ambush,
        };
        let mut rng = SmallRng::seed_from_u64(11);

        let result = select_encounter(8, &tags, &[rule], &catalog, &mut rng).unwrap();
        assert!(result.is_ambush);
        assert!(result.is_boss);
        assert_eq!(result.modifiers.ambush_bonus, Some(0.2));
        assert_eq!(result.modifiers.hero_penalty, Some(0.1));
        assert_eq!(result.modifiers.boss_bonus, Some(0.5));
        assert_eq!(result.modifiers.darkness_penalty, Some(0.05));
    }

    #[test]
    fn encounter_result_round_trips_through_serde() {
        let catalog = FixedCatalog(vec![archetype("Wolf", MonsterType::Beast, 5)]);
        let mut rng = SmallRng::seed_from_u64(9);
        let result =
            select_encounter(5, &forest_tags(), &[forest_rule()], &catalog, &mut rng).unwrap();

        let encoded = serde_json::to_string(&result).unwrap();
        let decoded: EncounterResult = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, result);
    }
}
