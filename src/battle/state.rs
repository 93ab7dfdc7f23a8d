use crate::battle::weather::{WeatherKind, WeatherState};
use crate::pokemon::{BoostStat, Combatant, StatusCondition};
use serde::{Deserialize, Serialize};

/// One of the two slots in a battle. Side A is always listed first in the
/// state; which side acts first is decided by speed at battle start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn index(&self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    Active,
    Concluded,
}

/// Full state of one battle. Mutated only through command execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub battle_id: String,
    pub combatants: [Combatant; 2],
    pub acting_side: Side,
    pub weather: WeatherState,
    pub turn_number: u32,
    pub event_log: Vec<String>,
    pub winner: Option<Side>,
    pub game_state: GameState,
}

impl BattleState {
    pub fn new(battle_id: impl Into<String>, combatant_a: Combatant, combatant_b: Combatant) -> Self {
        BattleState {
            battle_id: battle_id.into(),
            combatants: [combatant_a, combatant_b],
            acting_side: Side::A,
            weather: WeatherState::clear(),
            turn_number: 0,
            event_log: Vec::new(),
            winner: None,
            game_state: GameState::NotStarted,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.combatants[side.index()]
    }

    pub fn is_concluded(&self) -> bool {
        self.game_state == GameState::Concluded
    }
}

/// Everything observable that happens during a battle, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    BattleStarted,
    FirstActor {
        side: Side,
    },
    WeatherStarted {
        kind: WeatherKind,
    },
    WeatherEnded,
    SandstormDamage {
        target: Side,
        damage: u16,
    },
    PoisonDamage {
        target: Side,
        damage: u16,
    },
    FullyParalyzed {
        side: Side,
    },
    Dodged {
        side: Side,
    },
    UltimateUnleashed {
        side: Side,
    },
    Defended {
        side: Side,
    },
    AttackLanded {
        attacker: Side,
        move_name: String,
        damage: u16,
        effectiveness: f64,
        is_critical: bool,
        is_ultimate: bool,
    },
    StatusInflicted {
        target: Side,
        status: StatusCondition,
    },
    StatStageChanged {
        target: Side,
        stat: BoostStat,
        raised: bool,
    },
    BattleEnded {
        winner: Side,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for events with no user-visible text.
    pub fn format(&self, state: &BattleState) -> Option<String> {
        match self {
            BattleEvent::BattleStarted => {
                let a = state.combatant(Side::A);
                let b = state.combatant(Side::B);
                Some(format!(
                    "Battle start: {} (speed {}) vs {} (speed {})!",
                    a.name, a.base_stats.speed, b.name, b.base_stats.speed
                ))
            }
            BattleEvent::FirstActor { side } => {
                Some(format!("{} moves first!", state.combatant(*side).name))
            }
            BattleEvent::WeatherStarted { kind } => match kind {
                WeatherKind::None => None,
                kind => Some(format!("The battle begins under {}!", kind)),
            },
            BattleEvent::WeatherEnded => Some("The weather returned to normal.".to_string()),
            BattleEvent::SandstormDamage { target, damage } => Some(format!(
                "{} is buffeted by the sandstorm! ({} damage)",
                state.combatant(*target).name,
                damage
            )),
            BattleEvent::PoisonDamage { target, damage } => Some(format!(
                "{} is hurt by poison! ({} damage)",
                state.combatant(*target).name,
                damage
            )),
            BattleEvent::FullyParalyzed { side } => Some(format!(
                "{} is paralyzed! It can't move!",
                state.combatant(*side).name
            )),
            BattleEvent::Dodged { side } => Some(format!(
                "{} dodged the attack!",
                state.combatant(*side).name
            )),
            BattleEvent::UltimateUnleashed { side } => Some(format!(
                "{} unleashes its ultimate attack!",
                state.combatant(*side).name
            )),
            BattleEvent::Defended { side } => Some(format!(
                "{} braced for impact!",
                state.combatant(*side).name
            )),
            BattleEvent::AttackLanded {
                attacker,
                move_name,
                damage,
                effectiveness,
                is_critical,
                is_ultimate,
            } => {
                let attacker_name = &state.combatant(*attacker).name;
                let mut message = if *is_ultimate {
                    format!(
                        "{} used {} as an ultimate attack for {} damage!",
                        attacker_name, move_name, damage
                    )
                } else {
                    format!("{} used {} for {} damage!", attacker_name, move_name, damage)
                };
                if *is_critical {
                    message.push_str(" A critical hit!");
                }
                if *effectiveness > 1.0 {
                    message.push_str(" It's super effective!");
                } else if *effectiveness < 1.0 && *effectiveness > 0.0 {
                    message.push_str(" It's not very effective...");
                } else if *effectiveness == 0.0 {
                    message.push_str(" It had no effect!");
                }
                Some(message)
            }
            BattleEvent::StatusInflicted { target, status } => Some(format!(
                "{} was {}!",
                state.combatant(*target).name,
                status
            )),
            BattleEvent::StatStageChanged {
                target,
                stat,
                raised,
            } => {
                let name = &state.combatant(*target).name;
                if *raised {
                    Some(format!("{}'s {} rose!", name, stat))
                } else {
                    Some(format!("{}'s {} fell!", name, stat))
                }
            }
            BattleEvent::BattleEnded { winner } => Some(format!(
                "{} wins the battle!",
                state.combatant(*winner).name
            )),
        }
    }
}

/// Collects the events emitted while resolving one tick.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Pre-drawn randomness for one tick. Each consumed value is a uniform
/// f64 in [0, 1), tagged with a reason so test failures read well.
///
/// Tests inject exact outcomes with `new_for_test`; production draws a
/// fresh batch per tick.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<f64>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        TurnRng { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    pub fn from_rng<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        // 20 values comfortably covers the deepest tick path.
        let outcomes = (0..20).map(|_| rng.random_range(0.0..1.0)).collect();
        TurnRng { outcomes, index: 0 }
    }

    /// Take the next roll. Panics when the oracle runs dry, which means the
    /// engine consumed more randomness than the test provided.
    pub fn next_roll(&mut self, reason: &str) -> f64 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng ran out of outcomes (consumed {}, asked for '{}')",
                self.outcomes.len(),
                reason
            );
        }
        let value = self.outcomes[self.index];
        self.index += 1;

        #[cfg(test)]
        println!("TurnRng: {} -> {:.4}", reason, value);

        value
    }

    /// Uniform pick of an index in `0..len`.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0);
        let roll = self.next_roll(reason);
        ((roll * len as f64) as usize).min(len - 1)
    }
}
