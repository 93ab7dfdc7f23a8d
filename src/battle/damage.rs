use crate::battle::state::TurnRng;
use crate::battle::weather::WeatherState;
use crate::moves::{DamageClass, Move};
use crate::pokemon::{Combatant, StatBoosts, StatusCondition};
use crate::types::ElementalType;

/// All combatants fight at a fixed level.
pub const BATTLE_LEVEL: u16 = 50;

/// Probability of a critical hit.
pub const CRITICAL_HIT_CHANCE: f64 = 0.0625;
pub const CRITICAL_HIT_MULTIPLIER: f64 = 1.5;
pub const STAB_MULTIPLIER: f64 = 1.5;
pub const ULTIMATE_MULTIPLIER: f64 = 3.0;

/// Every landed attack deals at least this much, immunities included.
pub const MINIMUM_DAMAGE: u16 = 5;

/// Global scale applied after all multipliers to keep battles from ending
/// in two hits.
const DAMAGE_SCALE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub effectiveness: f64,
    pub is_critical: bool,
    pub move_name: String,
    pub move_type: ElementalType,
}

/// Compute the damage of one attack.
///
/// Consumes exactly two rolls, in order: damage variance, then the critical
/// hit check.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    weather: &WeatherState,
    is_ultimate: bool,
    rng: &mut TurnRng,
) -> DamageOutcome {
    let (offense_base, defense_base) = match mv.damage_class {
        DamageClass::Physical => (attacker.base_stats.attack, defender.base_stats.defense),
        DamageClass::Special => (
            attacker.base_stats.special_attack,
            defender.base_stats.special_defense,
        ),
    };

    // Boost stages share one offense and one defense track across both
    // damage classes.
    let mut offense =
        (offense_base as f64 * StatBoosts::multiplier(attacker.boosts.attack)).floor();
    let defense =
        (defense_base as f64 * StatBoosts::multiplier(defender.boosts.defense)).floor();

    if attacker.status == Some(StatusCondition::Burn) && mv.damage_class == DamageClass::Physical {
        offense = (offense * 0.5).floor();
    }

    let offense = offense.max(1.0);
    let defense = defense.max(1.0);

    let power = mv.effective_power() as f64;
    let level_factor = (2 * BATTLE_LEVEL / 5 + 2) as f64;
    let base = (level_factor * power * (offense / defense)) / 50.0 + 2.0;

    let variance = 0.85 + rng.next_roll("damage variance") * 0.15;
    let is_critical = rng.next_roll("critical hit check") < CRITICAL_HIT_CHANCE;
    let critical = if is_critical {
        CRITICAL_HIT_MULTIPLIER
    } else {
        1.0
    };
    let stab = if attacker.has_type(mv.elemental_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let effectiveness = ElementalType::effectiveness_against_all(mv.elemental_type, &defender.types);
    let weather_factor = weather.damage_multiplier(mv.elemental_type);
    let ultimate = if is_ultimate { ULTIMATE_MULTIPLIER } else { 1.0 };

    let raw =
        base * effectiveness * variance * critical * stab * weather_factor * ultimate * DAMAGE_SCALE;
    let damage = (raw.floor() as u16).max(MINIMUM_DAMAGE);

    DamageOutcome {
        damage,
        effectiveness,
        is_critical,
        move_name: mv.name.clone(),
        move_type: mv.elemental_type,
    }
}
