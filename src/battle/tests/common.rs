use crate::battle::state::{BattleState, GameState, Side};
use crate::moves::{DamageClass, Move};
use crate::pokemon::{BaseStats, Combatant, CombatantData, StatusCondition};
use crate::types::ElementalType;

/// A builder for battle-ready test combatants with common defaults.
///
/// Defaults are tuned so a plain 60-power physical move between two default
/// combatants deals exactly 27 damage at variance 1.0: attack 100 against
/// defense 50 with no STAB and neutral typing.
pub struct TestCombatantBuilder {
    name: String,
    base_stats: BaseStats,
    types: Vec<ElementalType>,
    moves: Vec<Move>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
    ultimate_energy: u8,
}

impl TestCombatantBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_stats: BaseStats {
                hp: 200,
                attack: 100,
                defense: 50,
                special_attack: 100,
                special_defense: 50,
                speed: 50,
            },
            types: vec![ElementalType::Fighting],
            moves: vec![tackle()],
            status: None,
            current_hp: None,
            ultimate_energy: 0,
        }
    }

    pub fn with_stats(mut self, base_stats: BaseStats) -> Self {
        self.base_stats = base_stats;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.base_stats.speed = speed;
        self
    }

    pub fn with_types(mut self, types: Vec<ElementalType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_energy(mut self, energy: u8) -> Self {
        self.ultimate_energy = energy;
        self
    }

    pub fn build(self) -> Combatant {
        let data = CombatantData {
            id: 1,
            name: self.name,
            base_stats: self.base_stats,
            types: self.types,
            known_moves: vec![],
        };
        let mut combatant = Combatant::new(&data, self.moves);
        combatant.status = self.status;
        combatant.ultimate_energy = self.ultimate_energy;
        if let Some(hp) = self.current_hp {
            combatant.current_hp = hp;
        }
        combatant
    }
}

/// A clear-weather battle already in the Active state with side A to act.
pub fn create_test_battle(combatant_a: Combatant, combatant_b: Combatant) -> BattleState {
    let mut state = BattleState::new("test-battle", combatant_a, combatant_b);
    state.acting_side = Side::A;
    state.game_state = GameState::Active;
    state
}

pub fn tackle() -> Move {
    basic_move("tackle", ElementalType::Normal, 60, DamageClass::Physical)
}

pub fn basic_move(
    name: &str,
    elemental_type: ElementalType,
    power: u16,
    damage_class: DamageClass,
) -> Move {
    Move {
        name: name.to_string(),
        elemental_type,
        power: Some(power),
        damage_class,
    }
}
