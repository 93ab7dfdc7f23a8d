use crate::pokemon::Combatant;
use crate::types::ElementalType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of max HP chipped each turn by sandstorm, and also by poison.
pub const CHIP_DAMAGE_FRACTION: f64 = 0.0625;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherKind {
    None,
    Sun,
    Rain,
    Sandstorm,
    Snow,
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherKind::None => write!(f, "clear skies"),
            WeatherKind::Sun => write!(f, "harsh sunlight"),
            WeatherKind::Rain => write!(f, "rain"),
            WeatherKind::Sandstorm => write!(f, "a sandstorm"),
            WeatherKind::Snow => write!(f, "snow"),
        }
    }
}

/// Active weather plus its remaining duration in turns. Rolled once at
/// battle start; no move can change it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherState {
    pub kind: WeatherKind,
    pub remaining_turns: u8,
}

impl WeatherState {
    pub fn clear() -> Self {
        WeatherState {
            kind: WeatherKind::None,
            remaining_turns: 0,
        }
    }

    pub fn new(kind: WeatherKind, remaining_turns: u8) -> Self {
        WeatherState {
            kind,
            remaining_turns,
        }
    }

    pub fn is_active(&self) -> bool {
        self.kind != WeatherKind::None && self.remaining_turns > 0
    }

    /// Damage multiplier weather applies to a move of the given type.
    pub fn damage_multiplier(&self, move_type: ElementalType) -> f64 {
        if !self.is_active() {
            return 1.0;
        }
        match (self.kind, move_type) {
            (WeatherKind::Sun, ElementalType::Fire) => 1.5,
            (WeatherKind::Sun, ElementalType::Water) => 0.5,
            (WeatherKind::Rain, ElementalType::Water) => 1.5,
            (WeatherKind::Rain, ElementalType::Fire) => 0.5,
            (WeatherKind::Snow, ElementalType::Ice) => 1.3,
            _ => 1.0,
        }
    }

    /// Whether a combatant takes sandstorm chip damage this turn.
    pub fn sandstorm_affects(&self, combatant: &Combatant) -> bool {
        self.is_active() && self.kind == WeatherKind::Sandstorm && !is_immune_to_sandstorm(combatant)
    }
}

/// Rock, Ground, and Steel types weather the sand unharmed.
pub fn is_immune_to_sandstorm(combatant: &Combatant) -> bool {
    combatant.has_type(ElementalType::Rock)
        || combatant.has_type(ElementalType::Ground)
        || combatant.has_type(ElementalType::Steel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{BaseStats, CombatantData};

    fn combatant_of_types(types: Vec<ElementalType>) -> Combatant {
        let data = CombatantData {
            id: 1,
            name: "Test".to_string(),
            base_stats: BaseStats {
                hp: 50,
                attack: 50,
                defense: 50,
                special_attack: 50,
                special_defense: 50,
                speed: 50,
            },
            types,
            known_moves: vec![],
        };
        Combatant::new(&data, vec![])
    }

    #[test]
    fn test_weather_type_multipliers() {
        let sun = WeatherState::new(WeatherKind::Sun, 5);
        assert_eq!(sun.damage_multiplier(ElementalType::Fire), 1.5);
        assert_eq!(sun.damage_multiplier(ElementalType::Water), 0.5);
        assert_eq!(sun.damage_multiplier(ElementalType::Grass), 1.0);

        let rain = WeatherState::new(WeatherKind::Rain, 5);
        assert_eq!(rain.damage_multiplier(ElementalType::Water), 1.5);
        assert_eq!(rain.damage_multiplier(ElementalType::Fire), 0.5);

        let snow = WeatherState::new(WeatherKind::Snow, 5);
        assert_eq!(snow.damage_multiplier(ElementalType::Ice), 1.3);
        assert_eq!(snow.damage_multiplier(ElementalType::Water), 1.0);
    }

    #[test]
    fn test_expired_weather_is_neutral() {
        let expired = WeatherState::new(WeatherKind::Sun, 0);
        assert!(!expired.is_active());
        assert_eq!(expired.damage_multiplier(ElementalType::Fire), 1.0);
    }

    #[test]
    fn test_sandstorm_immunity() {
        let sandstorm = WeatherState::new(WeatherKind::Sandstorm, 5);
        let onix = combatant_of_types(vec![ElementalType::Rock, ElementalType::Ground]);
        let pikachu = combatant_of_types(vec![ElementalType::Electric]);
        let steelix = combatant_of_types(vec![ElementalType::Steel, ElementalType::Ground]);

        assert!(!sandstorm.sandstorm_affects(&onix));
        assert!(sandstorm.sandstorm_affects(&pikachu));
        assert!(!sandstorm.sandstorm_affects(&steelix));
    }

    #[test]
    fn test_sandstorm_never_scales_damage() {
        let sandstorm = WeatherState::new(WeatherKind::Sandstorm, 5);
        assert_eq!(sandstorm.damage_multiplier(ElementalType::Rock), 1.0);
        assert_eq!(sandstorm.damage_multiplier(ElementalType::Fire), 1.0);
    }
}
