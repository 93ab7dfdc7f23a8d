use crate::moves::{Move, MoveRef};
use crate::types::ElementalType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

/// Volatile status condition. At most one per combatant; the first one
/// inflicted sticks for the rest of the battle (no cure mechanic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    Burn,
    Paralysis,
    Poison,
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCondition::Burn => write!(f, "burned"),
            StatusCondition::Paralysis => write!(f, "paralyzed"),
            StatusCondition::Poison => write!(f, "poisoned"),
        }
    }
}

/// Stats that can carry a boost stage during battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostStat {
    Attack,
    Defense,
    Speed,
}

impl fmt::Display for BoostStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoostStat::Attack => write!(f, "Attack"),
            BoostStat::Defense => write!(f, "Defense"),
            BoostStat::Speed => write!(f, "Speed"),
        }
    }
}

/// Per-combatant boost stages in [-3, +3]. Each stage is worth +/-50% of the
/// base stat at the moment of use; base stats are never mutated.
///
/// One offense track and one defense track are shared between the physical
/// and special stat pairs. Speed stages are tracked but never consulted by
/// the damage math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBoosts {
    pub attack: i8,
    pub defense: i8,
    pub speed: i8,
}

pub const MIN_BOOST_STAGE: i8 = -3;
pub const MAX_BOOST_STAGE: i8 = 3;

impl StatBoosts {
    pub fn stage(&self, stat: BoostStat) -> i8 {
        match stat {
            BoostStat::Attack => self.attack,
            BoostStat::Defense => self.defense,
            BoostStat::Speed => self.speed,
        }
    }

    pub fn set_stage(&mut self, stat: BoostStat, stage: i8) {
        let stage = stage.clamp(MIN_BOOST_STAGE, MAX_BOOST_STAGE);
        match stat {
            BoostStat::Attack => self.attack = stage,
            BoostStat::Defense => self.defense = stage,
            BoostStat::Speed => self.speed = stage,
        }
    }

    /// Multiplicative factor for a stage: `1 + stage * 0.5`.
    pub fn multiplier(stage: i8) -> f64 {
        1.0 + stage as f64 * 0.5
    }
}

/// Catalog-side description of a combatant: identity, base stats, typing,
/// and the full list of moves it knows. Produced by a `CatalogProvider`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantData {
    pub id: u32,
    pub name: String,
    pub base_stats: BaseStats,
    pub types: Vec<ElementalType>,
    pub known_moves: Vec<MoveRef>,
}

impl CombatantData {
    pub fn primary_type(&self) -> ElementalType {
        self.types.first().copied().unwrap_or(ElementalType::Normal)
    }
}

/// A combatant as it exists inside one battle. Everything below `moves` is
/// battle-scoped and reset whenever a new battle starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub base_stats: BaseStats,
    pub types: Vec<ElementalType>,
    /// Resolved move pool, fixed at battle start. 1 to 4 entries.
    pub moves: Vec<Move>,
    pub current_hp: u16,
    pub status: Option<StatusCondition>,
    pub boosts: StatBoosts,
    pub ultimate_energy: u8,
}

impl Combatant {
    /// Build a battle-ready combatant from catalog data and a resolved pool.
    pub fn new(data: &CombatantData, moves: Vec<Move>) -> Self {
        Combatant {
            id: data.id,
            name: data.name.clone(),
            base_stats: data.base_stats,
            types: data.types.clone(),
            moves,
            current_hp: data.base_stats.hp,
            status: None,
            boosts: StatBoosts::default(),
            ultimate_energy: 0,
        }
    }

    /// Reset all battle-scoped fields for a fresh battle.
    pub fn reset_for_battle(&mut self) {
        self.current_hp = self.base_stats.hp;
        self.status = None;
        self.boosts = StatBoosts::default();
        self.ultimate_energy = 0;
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, elemental_type: ElementalType) -> bool {
        self.types.contains(&elemental_type)
    }
}
