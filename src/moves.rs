use crate::errors::{DataResolutionError, EmptyMovePoolError, SimulationError};
use crate::catalog::CatalogProvider;
use crate::pokemon::CombatantData;
use crate::types::ElementalType;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MAX_MOVES_PER_BATTLE: usize = 4;

/// Default power assumed for a move whose catalog entry cannot be resolved.
pub const FALLBACK_MOVE_POWER: u16 = 60;

/// Physical moves read attack vs defense; special moves read
/// special attack vs special defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageClass {
    Physical,
    Special,
}

/// Lightweight reference to a move, as listed in catalog data. Resolving it
/// through a `CatalogProvider` yields a `MoveDetail`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRef {
    pub name: String,
}

impl MoveRef {
    pub fn new(name: impl Into<String>) -> Self {
        MoveRef { name: name.into() }
    }
}

/// Catalog-side detail for a move. `power` is `None` for pure status moves,
/// which never enter a battle pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDetail {
    pub power: Option<u16>,
    pub elemental_type: ElementalType,
    pub damage_class: DamageClass,
}

/// A fully resolved move as carried by a battling combatant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub elemental_type: ElementalType,
    pub power: Option<u16>,
    pub damage_class: DamageClass,
}

impl Move {
    pub fn effective_power(&self) -> u16 {
        match self.power {
            Some(0) | None => FALLBACK_MOVE_POWER,
            Some(power) => power,
        }
    }
}

/// Pick up to four known moves at random, without replacement. Selection is
/// synchronous so callers can finish with a thread-local rng before any
/// await point.
pub fn select_move_refs<R: Rng + ?Sized>(data: &CombatantData, rng: &mut R) -> Vec<MoveRef> {
    let mut refs: Vec<MoveRef> = data.known_moves.clone();
    refs.shuffle(rng);
    refs.truncate(MAX_MOVES_PER_BATTLE);
    refs
}

/// Resolve a selected subset of move refs into a battle pool.
///
/// A ref that fails to resolve gets a fallback detail (default power, the
/// combatant's primary type, physical) rather than aborting the battle.
/// Resolved status moves (no power, or zero power) are dropped. An empty
/// resulting pool is an error; battles need at least one usable move.
pub async fn load_move_pool(
    catalog: &dyn CatalogProvider,
    data: &CombatantData,
    selected: &[MoveRef],
) -> Result<Vec<Move>, SimulationError> {
    let mut pool = Vec::with_capacity(selected.len());

    for move_ref in selected {
        let detail = match catalog.move_detail(move_ref).await {
            Ok(detail) => detail,
            Err(DataResolutionError::MoveNotFound(name)) => {
                warn!(move_name = %name, combatant = %data.name, "move missing from catalog, using fallback detail");
                fallback_detail(data)
            }
            Err(err) => {
                warn!(move_name = %move_ref.name, combatant = %data.name, error = %err, "move lookup failed, using fallback detail");
                fallback_detail(data)
            }
        };

        match detail.power {
            Some(power) if power > 0 => pool.push(Move {
                name: move_ref.name.clone(),
                elemental_type: detail.elemental_type,
                power: detail.power,
                damage_class: detail.damage_class,
            }),
            // Status moves have no place in an auto-battler pool.
            _ => {}
        }
    }

    if pool.is_empty() {
        return Err(EmptyMovePoolError {
            combatant: data.name.clone(),
        }
        .into());
    }

    Ok(pool)
}

fn fallback_detail(data: &CombatantData) -> MoveDetail {
    MoveDetail {
        power: Some(FALLBACK_MOVE_POWER),
        elemental_type: data.primary_type(),
        damage_class: DamageClass::Physical,
    }
}
