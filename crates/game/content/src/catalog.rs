//! Builtin monster archetype catalog.

use game_core::encounter::Difficulty;
use game_core::stats::{CoreStats, MonsterArchetype, MonsterType};
use game_core::MonsterCatalog;

/// In-memory catalog backed by the builtin archetype table.
pub struct StaticMonsterCatalog {
    archetypes: Vec<MonsterArchetype>,
}

impl StaticMonsterCatalog {
    pub fn builtin() -> Self {
        Self {
            archetypes: builtin_archetypes(),
        }
    }

    /// Catalog over an explicit archetype list, for tests and tooling.
    pub fn with_archetypes(archetypes: Vec<MonsterArchetype>) -> Self {
        Self { archetypes }
    }

    pub fn archetypes(&self) -> &[MonsterArchetype] {
        &self.archetypes
    }
}

impl MonsterCatalog for StaticMonsterCatalog {
    fn archetypes_matching(
        &self,
        types: &[MonsterType],
        difficulty: Difficulty,
    ) -> Vec<MonsterArchetype> {
        self.archetypes
            .iter()
            .filter(|archetype| {
                types.contains(&archetype.monster_type) && archetype.difficulty == difficulty
            })
            .cloned()
            .collect()
    }

    fn archetype_by_name(&self, name: &str) -> Option<MonsterArchetype> {
        self.archetypes
            .iter()
            .find(|archetype| archetype.name == name)
            .cloned()
    }
}

fn archetype(
    name: &str,
    monster_type: MonsterType,
    difficulty: Difficulty,
    stats: (i32, i32, i32, i32, i32),
) -> MonsterArchetype {
    let (strength, agility, intellect, vitality, luck) = stats;
    MonsterArchetype {
        name: name.to_owned(),
        monster_type,
        difficulty,
        base_stats: CoreStats::new(strength, agility, intellect, vitality, luck),
    }
}

fn builtin_archetypes() -> Vec<MonsterArchetype> {
    use Difficulty::{Boss, Easy, Hard, Normal};
    use MonsterType::{Beast, Demon, Elemental, Humanoid, Undead};

    vec![
        // Easy: stat averages around 3-5.
        archetype("Forest Wolf", Beast, Easy, (5, 6, 1, 4, 3)),
        archetype("Giant Rat", Beast, Easy, (3, 5, 1, 3, 4)),
        archetype("Goblin Scout", Humanoid, Easy, (4, 5, 2, 3, 4)),
        archetype("Restless Skeleton", Undead, Easy, (4, 3, 1, 5, 2)),
        archetype("Mud Sprite", Elemental, Easy, (2, 4, 5, 3, 3)),
        archetype("Imp", Demon, Easy, (3, 5, 4, 3, 5)),
        // Normal: averages around 6-9.
        archetype("Dire Wolf", Beast, Normal, (8, 9, 2, 7, 5)),
        archetype("Bandit Raider", Humanoid, Normal, (8, 7, 4, 7, 6)),
        archetype("Orc Warrior", Humanoid, Normal, (10, 5, 2, 9, 4)),
        archetype("Ghoul", Undead, Normal, (7, 6, 3, 8, 3)),
        archetype("Stone Golem", Elemental, Normal, (9, 3, 4, 11, 2)),
        archetype("Shadow Fiend", Demon, Normal, (6, 9, 8, 6, 7)),
        // Hard: averages around 11-14.
        archetype("Cave Bear", Beast, Hard, (14, 9, 2, 14, 5)),
        archetype("Black Knight", Humanoid, Hard, (13, 10, 6, 13, 7)),
        archetype("Wight Commander", Undead, Hard, (12, 9, 11, 12, 6)),
        archetype("Flame Elemental", Elemental, Hard, (10, 12, 14, 10, 8)),
        archetype("Pit Fiend", Demon, Hard, (13, 11, 12, 12, 9)),
        // Boss: averages around 15-20; the +5 offset puts them well above.
        archetype("Alpha Ravager", Beast, Boss, (19, 16, 4, 20, 8)),
        archetype("Lich King", Undead, Boss, (14, 12, 22, 18, 10)),
        archetype("Storm Colossus", Elemental, Boss, (18, 13, 20, 19, 9)),
        archetype("Dragon of the Pass", Demon, Boss, (22, 15, 18, 21, 12)),
    ]
}
