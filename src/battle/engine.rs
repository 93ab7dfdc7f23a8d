use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::damage::calculate_damage;
use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState, Side, TurnRng};
use crate::battle::weather::{WeatherKind, WeatherState, CHIP_DAMAGE_FRACTION};
use crate::pokemon::{BoostStat, Combatant, StatusCondition};
use crate::types::ElementalType;

/// Chance a paralyzed actor loses its turn outright.
pub const PARALYSIS_SKIP_CHANCE: f64 = 0.25;
/// Chance the defender braces and takes a quarter of the damage.
pub const DEFEND_CHANCE: f64 = 0.20;
/// Chance a typed attack inflicts its status on a status-free defender.
pub const STATUS_CHANCE: f64 = 0.15;
/// Chance an attack is followed by a stat swing.
pub const STAT_CHANGE_CHANCE: f64 = 0.10;
/// Chance the battle starts under non-clear weather.
pub const WEATHER_CHANCE: f64 = 0.30;
/// How many turns rolled weather lasts.
pub const WEATHER_DURATION: u8 = 5;
/// Energy gained per ordinary landed attack.
pub const ULTIMATE_ENERGY_GAIN: u8 = 25;
/// Energy required to unleash an ultimate attack.
pub const ULTIMATE_THRESHOLD: u8 = 100;
/// Fraction of damage that gets through a brace.
const DEFEND_DAMAGE_FACTOR: f64 = 0.25;

const WEATHER_KINDS: [WeatherKind; 4] = [
    WeatherKind::Sun,
    WeatherKind::Rain,
    WeatherKind::Sandstorm,
    WeatherKind::Snow,
];

const BOOSTABLE_STATS: [BoostStat; 2] = [BoostStat::Attack, BoostStat::Defense];

/// Dodge chance scales with the defender's base speed.
pub fn dodge_chance(speed: u16) -> f64 {
    if speed > 100 {
        0.15
    } else if speed > 80 {
        0.10
    } else {
        0.05
    }
}

/// Set up a fresh battle: roll weather, decide who acts first, announce.
///
/// Consumes one roll for the weather check, plus one pick when weather
/// comes up.
pub fn initialize_battle(
    battle_id: impl Into<String>,
    combatant_a: Combatant,
    combatant_b: Combatant,
    rng: &mut TurnRng,
) -> (BattleState, EventBus) {
    let mut state = BattleState::new(battle_id, combatant_a, combatant_b);
    let mut bus = EventBus::new();
    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::BattleStarted)];

    if rng.next_roll("weather check") < WEATHER_CHANCE {
        let kind = WEATHER_KINDS[rng.pick_index(WEATHER_KINDS.len(), "weather kind")];
        commands.push(BattleCommand::SetWeather(WeatherState::new(
            kind,
            WEATHER_DURATION,
        )));
        commands.push(BattleCommand::EmitEvent(BattleEvent::WeatherStarted {
            kind,
        }));
    }

    // Speed decides the opener; ties go to side A.
    let first = if state.combatant(Side::A).base_stats.speed
        >= state.combatant(Side::B).base_stats.speed
    {
        Side::A
    } else {
        Side::B
    };
    commands.push(BattleCommand::SetActingSide(first));
    commands.push(BattleCommand::EmitEvent(BattleEvent::FirstActor {
        side: first,
    }));
    commands.push(BattleCommand::SetGameState(GameState::Active));

    execute_command_batch(commands, &mut state, &mut bus);
    (state, bus)
}

/// Resolve one tick of the battle: upkeep damage, termination check, then
/// one attack by the acting side. Returns the events of the tick.
///
/// Roll order on the full attack path: paralysis (paralyzed actors only),
/// dodge, move selection, damage variance, critical check, defend, status,
/// then up to two stat swing rolls.
pub fn resolve_tick(state: &mut BattleState, rng: &mut TurnRng) -> EventBus {
    let mut bus = EventBus::new();
    if state.game_state != GameState::Active {
        return bus;
    }

    execute_command_batch(
        vec![BattleCommand::IncrementTurnNumber],
        state,
        &mut bus,
    );

    let upkeep = upkeep_commands(state);
    execute_command_batch(upkeep, state, &mut bus);

    if let Some(commands) = termination_commands(state) {
        execute_command_batch(commands, state, &mut bus);
        return bus;
    }

    let attacker_side = state.acting_side;
    let defender_side = attacker_side.opponent();

    // Paralysis can cost the whole turn. The roll is only consumed when the
    // actor actually carries the status.
    if state.combatant(attacker_side).status == Some(StatusCondition::Paralysis)
        && rng.next_roll("paralysis check") < PARALYSIS_SKIP_CHANCE
    {
        execute_command_batch(
            vec![
                BattleCommand::EmitEvent(BattleEvent::FullyParalyzed {
                    side: attacker_side,
                }),
                BattleCommand::SetActingSide(defender_side),
            ],
            state,
            &mut bus,
        );
        return bus;
    }

    let defender_speed = state.combatant(defender_side).base_stats.speed;
    if rng.next_roll("dodge check") < dodge_chance(defender_speed) {
        execute_command_batch(
            vec![
                BattleCommand::EmitEvent(BattleEvent::Dodged {
                    side: defender_side,
                }),
                BattleCommand::SetActingSide(defender_side),
            ],
            state,
            &mut bus,
        );
        return bus;
    }

    let commands = attack_commands(state, attacker_side, rng);
    execute_command_batch(commands, state, &mut bus);

    if let Some(commands) = termination_commands(state) {
        execute_command_batch(commands, state, &mut bus);
        return bus;
    }

    execute_command_batch(
        vec![BattleCommand::SetActingSide(defender_side)],
        state,
        &mut bus,
    );
    bus
}

/// Weather countdown, then sandstorm and poison chip damage.
fn upkeep_commands(state: &BattleState) -> Vec<BattleCommand> {
    let mut commands = Vec::new();

    // The countdown runs first, so weather on its last turn expires without
    // one more round of chip damage.
    let mut weather = state.weather;
    if weather.is_active() {
        weather.remaining_turns -= 1;
        if weather.remaining_turns == 0 {
            weather = WeatherState::clear();
            commands.push(BattleCommand::SetWeather(weather));
            commands.push(BattleCommand::EmitEvent(BattleEvent::WeatherEnded));
        } else {
            commands.push(BattleCommand::SetWeather(weather));
        }
    }

    for side in [Side::A, Side::B] {
        let combatant = state.combatant(side);
        if weather.sandstorm_affects(combatant) {
            let damage = chip_damage(combatant);
            commands.push(BattleCommand::DealDamage {
                target: side,
                amount: damage,
            });
            commands.push(BattleCommand::EmitEvent(BattleEvent::SandstormDamage {
                target: side,
                damage,
            }));
        }
    }

    for side in [Side::A, Side::B] {
        let combatant = state.combatant(side);
        if combatant.status == Some(StatusCondition::Poison) {
            let damage = chip_damage(combatant);
            commands.push(BattleCommand::DealDamage {
                target: side,
                amount: damage,
            });
            commands.push(BattleCommand::EmitEvent(BattleEvent::PoisonDamage {
                target: side,
                damage,
            }));
        }
    }

    commands
}

// Rounds down, so combatants with less than 16 base HP shrug chip off.
fn chip_damage(combatant: &Combatant) -> u16 {
    (combatant.base_stats.hp as f64 * CHIP_DAMAGE_FRACTION).floor() as u16
}

/// Winner check. Side A is examined first, so if chip damage drops both to
/// zero on the same tick, side B takes the battle.
fn termination_commands(state: &BattleState) -> Option<Vec<BattleCommand>> {
    let winner = if state.combatant(Side::A).is_fainted() {
        Side::B
    } else if state.combatant(Side::B).is_fainted() {
        Side::A
    } else {
        return None;
    };

    Some(vec![
        BattleCommand::SetWinner(winner),
        BattleCommand::EmitEvent(BattleEvent::BattleEnded { winner }),
        BattleCommand::SetGameState(GameState::Concluded),
    ])
}

/// One attack by `attacker_side`, including the ultimate check, the brace,
/// and the follow-up status and stat swing rolls.
fn attack_commands(
    state: &BattleState,
    attacker_side: Side,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let defender_side = attacker_side.opponent();
    let attacker = state.combatant(attacker_side);
    let defender = state.combatant(defender_side);
    let mut commands = Vec::new();

    let is_ultimate = attacker.ultimate_energy >= ULTIMATE_THRESHOLD;
    if is_ultimate {
        commands.push(BattleCommand::SetUltimateEnergy {
            target: attacker_side,
            energy: 0,
        });
        commands.push(BattleCommand::EmitEvent(BattleEvent::UltimateUnleashed {
            side: attacker_side,
        }));
    }

    let mv = &attacker.moves[rng.pick_index(attacker.moves.len(), "move selection")];
    let outcome = calculate_damage(attacker, defender, mv, &state.weather, is_ultimate, rng);

    let mut damage = outcome.damage;
    if rng.next_roll("defend check") < DEFEND_CHANCE {
        damage = ((damage as f64 * DEFEND_DAMAGE_FACTOR).floor() as u16).max(1);
        commands.push(BattleCommand::EmitEvent(BattleEvent::Defended {
            side: defender_side,
        }));
    }

    commands.push(BattleCommand::DealDamage {
        target: defender_side,
        amount: damage,
    });
    commands.push(BattleCommand::EmitEvent(BattleEvent::AttackLanded {
        attacker: attacker_side,
        move_name: outcome.move_name.clone(),
        damage,
        effectiveness: outcome.effectiveness,
        is_critical: outcome.is_critical,
        is_ultimate,
    }));

    if !is_ultimate {
        let energy = attacker
            .ultimate_energy
            .saturating_add(ULTIMATE_ENERGY_GAIN)
            .min(ULTIMATE_THRESHOLD);
        commands.push(BattleCommand::SetUltimateEnergy {
            target: attacker_side,
            energy,
        });
    }

    // The status roll is consumed whether or not it can land; an existing
    // condition just blanks the effect.
    let status_roll = rng.next_roll("status check");
    if status_roll < STATUS_CHANCE && defender.status.is_none() {
        if let Some(status) = status_for_type(outcome.move_type) {
            commands.push(BattleCommand::SetStatus {
                target: defender_side,
                status,
            });
            commands.push(BattleCommand::EmitEvent(BattleEvent::StatusInflicted {
                target: defender_side,
                status,
            }));
        }
    }

    if rng.next_roll("stat swing check") < STAT_CHANGE_CHANCE {
        let raise_self = rng.next_roll("stat swing direction") < 0.5;
        let stat = BOOSTABLE_STATS[rng.pick_index(BOOSTABLE_STATS.len(), "stat swing stat")];
        let (target, delta) = if raise_self {
            (attacker_side, 1)
        } else {
            (defender_side, -1)
        };
        commands.push(BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        });
        // Announced even when the stage is already pinned at its bound.
        commands.push(BattleCommand::EmitEvent(BattleEvent::StatStageChanged {
            target,
            stat,
            raised: raise_self,
        }));
    }

    commands
}

fn status_for_type(move_type: ElementalType) -> Option<StatusCondition> {
    match move_type {
        ElementalType::Fire => Some(StatusCondition::Burn),
        ElementalType::Electric => Some(StatusCondition::Paralysis),
        ElementalType::Poison => Some(StatusCondition::Poison),
        _ => None,
    }
}
