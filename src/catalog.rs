use crate::errors::{validate_combatant_id, DataResolutionError};
use crate::moves::{DamageClass, MoveDetail, MoveRef};
use crate::pokemon::{BaseStats, CombatantData};
use crate::types::ElementalType;
use async_trait::async_trait;
use std::collections::HashMap;

/// Source of combatant and move data. Implementations may be backed by a
/// remote dex service or, as with `StaticCatalog`, a built-in roster.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn combatant_data(&self, id: u32) -> Result<CombatantData, DataResolutionError>;
    async fn move_detail(&self, move_ref: &MoveRef) -> Result<MoveDetail, DataResolutionError>;
}

/// In-memory catalog with a small prefab roster. Useful for demos and as a
/// stand-in where no external dex is wired up.
pub struct StaticCatalog {
    combatants: HashMap<u32, CombatantData>,
    moves: HashMap<String, MoveDetail>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        let mut catalog = StaticCatalog {
            combatants: HashMap::new(),
            moves: HashMap::new(),
        };
        catalog.load_roster();
        catalog.load_moves();
        catalog
    }

    fn add_combatant(
        &mut self,
        id: u32,
        name: &str,
        base_stats: BaseStats,
        types: Vec<ElementalType>,
        move_names: &[&str],
    ) {
        self.combatants.insert(
            id,
            CombatantData {
                id,
                name: name.to_string(),
                base_stats,
                types,
                known_moves: move_names.iter().map(|n| MoveRef::new(*n)).collect(),
            },
        );
    }

    fn add_move(
        &mut self,
        name: &str,
        power: Option<u16>,
        elemental_type: ElementalType,
        damage_class: DamageClass,
    ) {
        self.moves.insert(
            name.to_string(),
            MoveDetail {
                power,
                elemental_type,
                damage_class,
            },
        );
    }

    fn load_roster(&mut self) {
        use ElementalType::*;

        self.add_combatant(
            6,
            "Charizard",
            BaseStats {
                hp: 78,
                attack: 84,
                defense: 78,
                special_attack: 109,
                special_defense: 85,
                speed: 100,
            },
            vec![Fire, Flying],
            &["flamethrower", "air-slash", "dragon-claw", "slash", "fire-spin"],
        );

        self.add_combatant(
            9,
            "Blastoise",
            BaseStats {
                hp: 79,
                attack: 83,
                defense: 100,
                special_attack: 85,
                special_defense: 105,
                speed: 78,
            },
            vec![Water],
            &["hydro-pump", "surf", "bite", "skull-bash", "ice-beam"],
        );

        self.add_combatant(
            25,
            "Pikachu",
            BaseStats {
                hp: 35,
                attack: 55,
                defense: 40,
                special_attack: 50,
                special_defense: 50,
                speed: 90,
            },
            vec![Electric],
            &["thunderbolt", "quick-attack", "iron-tail", "slam", "thunder-wave"],
        );

        self.add_combatant(
            94,
            "Gengar",
            BaseStats {
                hp: 60,
                attack: 65,
                defense: 60,
                special_attack: 130,
                special_defense: 75,
                speed: 110,
            },
            vec![Ghost, Poison],
            &["shadow-ball", "sludge-bomb", "dark-pulse", "lick"],
        );

        self.add_combatant(
            95,
            "Onix",
            BaseStats {
                hp: 35,
                attack: 45,
                defense: 160,
                special_attack: 30,
                special_defense: 45,
                speed: 70,
            },
            vec![Rock, Ground],
            &["rock-throw", "earthquake", "iron-tail", "bind"],
        );
    }

    fn load_moves(&mut self) {
        use DamageClass::*;
        use ElementalType::*;

        self.add_move("flamethrower", Some(90), Fire, Special);
        self.add_move("fire-spin", Some(35), Fire, Special);
        self.add_move("air-slash", Some(75), Flying, Special);
        self.add_move("dragon-claw", Some(80), Dragon, Physical);
        self.add_move("slash", Some(70), Normal, Physical);

        self.add_move("hydro-pump", Some(110), Water, Special);
        self.add_move("surf", Some(90), Water, Special);
        self.add_move("bite", Some(60), Dark, Physical);
        self.add_move("skull-bash", Some(130), Normal, Physical);
        self.add_move("ice-beam", Some(90), Ice, Special);

        self.add_move("thunderbolt", Some(90), Electric, Special);
        self.add_move("quick-attack", Some(40), Normal, Physical);
        self.add_move("iron-tail", Some(100), Steel, Physical);
        self.add_move("slam", Some(80), Normal, Physical);
        // Pure status move; the pool loader filters it out.
        self.add_move("thunder-wave", None, Electric, Special);

        self.add_move("shadow-ball", Some(80), Ghost, Special);
        self.add_move("sludge-bomb", Some(90), Poison, Special);
        self.add_move("dark-pulse", Some(80), Dark, Special);
        self.add_move("lick", Some(30), Ghost, Physical);

        self.add_move("rock-throw", Some(50), Rock, Physical);
        self.add_move("earthquake", Some(100), Ground, Physical);
        self.add_move("bind", Some(15), Normal, Physical);
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn combatant_data(&self, id: u32) -> Result<CombatantData, DataResolutionError> {
        validate_combatant_id(id)?;
        self.combatants
            .get(&id)
            .cloned()
            .ok_or(DataResolutionError::CombatantNotFound(id))
    }

    async fn move_detail(&self, move_ref: &MoveRef) -> Result<MoveDetail, DataResolutionError> {
        self.moves
            .get(&move_ref.name)
            .cloned()
            .ok_or_else(|| DataResolutionError::MoveNotFound(move_ref.name.clone()))
    }
}
