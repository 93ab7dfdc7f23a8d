use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState, Side};
use crate::battle::weather::WeatherState;
use crate::pokemon::{BoostStat, StatusCondition};

/// Atomic commands representing final state changes. Calculators decide,
/// commands apply; nothing else mutates `BattleState`.
#[derive(Debug, Clone)]
pub enum BattleCommand {
    // Direct state changes
    SetGameState(GameState),
    IncrementTurnNumber,
    SetActingSide(Side),
    SetWeather(WeatherState),
    SetWinner(Side),

    // Combatant modifications
    DealDamage {
        target: Side,
        amount: u16,
    },
    SetStatus {
        target: Side,
        status: StatusCondition,
    },
    ChangeStatStage {
        target: Side,
        stat: BoostStat,
        delta: i8,
    },
    SetUltimateEnergy {
        target: Side,
        energy: u8,
    },

    // Battle flow
    EmitEvent(BattleEvent),
}

/// Apply a single command to the state, collecting any emitted events.
pub fn execute_command(command: BattleCommand, state: &mut BattleState, bus: &mut EventBus) {
    match command {
        BattleCommand::SetGameState(game_state) => {
            state.game_state = game_state;
        }
        BattleCommand::IncrementTurnNumber => {
            state.turn_number += 1;
        }
        BattleCommand::SetActingSide(side) => {
            state.acting_side = side;
        }
        BattleCommand::SetWeather(weather) => {
            state.weather = weather;
        }
        BattleCommand::SetWinner(side) => {
            state.winner = Some(side);
        }
        BattleCommand::DealDamage { target, amount } => {
            let combatant = state.combatant_mut(target);
            combatant.current_hp = combatant.current_hp.saturating_sub(amount);
        }
        BattleCommand::SetStatus { target, status } => {
            state.combatant_mut(target).status = Some(status);
        }
        BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        } => {
            let boosts = &mut state.combatant_mut(target).boosts;
            let stage = boosts.stage(stat);
            boosts.set_stage(stat, stage.saturating_add(delta));
        }
        BattleCommand::SetUltimateEnergy { target, energy } => {
            state.combatant_mut(target).ultimate_energy = energy;
        }
        BattleCommand::EmitEvent(event) => {
            if let Some(text) = event.format(state) {
                state.event_log.push(text);
            }
            bus.push(event);
        }
    }
}

/// Apply a batch of commands in order.
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    bus: &mut EventBus,
) {
    for command in commands {
        execute_command(command, state, bus);
    }
}
