//! Strike resolution: crit, dodge, variance, defense.

use rand::Rng;

use super::session::CombatantStats;

/// Which offensive stat a strike draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeKind {
    /// Physical, scales with `atk`.
    Attack,
    /// Magical, scales with `mag`.
    Magic,
}

/// Pre-sampled randomness for a single strike.
///
/// Crit and dodge rolls are percentages in `[0, 100)`, compared against the
/// attacker's crit chance and defender's dodge chance respectively. Variance
/// is the damage multiplier drawn from `U(0.8, 1.2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrikeRolls {
    pub crit_roll: f64,
    pub dodge_roll: f64,
    pub variance: f64,
}

impl StrikeRolls {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            crit_roll: rng.gen_range(0.0..100.0),
            dodge_roll: rng.gen_range(0.0..100.0),
            variance: rng.gen_range(0.8..1.2),
        }
    }

    /// Rolls that never crit, never dodge, and carry no variance.
    pub const fn flat() -> Self {
        Self {
            crit_roll: 100.0,
            dodge_roll: 100.0,
            variance: 1.0,
        }
    }
}

/// Outcome of one resolved strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrikeOutcome {
    /// Damage dealt; zero exactly when the strike was dodged.
    pub damage: u32,
    pub critical: bool,
    pub dodged: bool,
}

/// Resolve a single strike.
///
/// Dodge negates the strike entirely. Otherwise damage is
/// `floor(base · variance)` with base = atk or mag, ×1.5 on a critical,
/// floored at 1, then halved again if the defender is defending.
pub fn resolve_strike(
    attacker: &CombatantStats,
    defender: &CombatantStats,
    defender_defending: bool,
    kind: StrikeKind,
    rolls: &StrikeRolls,
) -> StrikeOutcome {
    if rolls.dodge_roll < defender.dodge {
        return StrikeOutcome {
            damage: 0,
            critical: false,
            dodged: true,
        };
    }

    let critical = rolls.crit_roll < attacker.crit_chance;

    let mut base = f64::from(match kind {
        StrikeKind::Attack => attacker.atk,
        StrikeKind::Magic => attacker.mag,
    });
    if critical {
        base = (base * 1.5).floor();
    }

    let mut damage = (base * rolls.variance).floor().max(1.0) as u32;
    if defender_defending {
        damage /= 2;
    }

    StrikeOutcome {
        damage,
        critical,
        dodged: false,
    }
}
