#[cfg(test)]
mod tests {
    use crate::battle::engine::{initialize_battle, resolve_tick};
    use crate::battle::state::{BattleEvent, Side, TurnRng};
    use crate::battle::tests::common::{basic_move, create_test_battle, TestCombatantBuilder};
    use crate::battle::weather::{WeatherKind, WeatherState};
    use crate::moves::DamageClass;
    use crate::types::ElementalType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sandstorm_chips_only_non_immune_sides() {
        let a = TestCombatantBuilder::new("Onix")
            .with_types(vec![ElementalType::Rock, ElementalType::Ground])
            .build();
        let b = TestCombatantBuilder::new("Pikachu")
            .with_types(vec![ElementalType::Electric])
            .build();
        let mut state = create_test_battle(a, b);
        state.weather = WeatherState::new(WeatherKind::Sandstorm, 5);

        let mut rng = TurnRng::new_for_test(vec![0.9, 0.0, 1.0, 0.5, 0.9, 0.9, 0.9]);
        let bus = resolve_tick(&mut state, &mut rng);

        // floor(200 * 0.0625) = 12 off the exposed side only, before the
        // attack lands.
        assert_eq!(state.combatant(Side::A).current_hp, 200);
        assert!(bus.events().iter().any(|e| matches!(
            e,
            BattleEvent::SandstormDamage { target: Side::B, damage: 12 }
        )));
        assert!(!bus.events().iter().any(|e| matches!(
            e,
            BattleEvent::SandstormDamage { target: Side::A, .. }
        )));
        assert_eq!(state.weather.remaining_turns, 4);
    }

    #[test]
    fn test_weather_expires_after_its_last_turn() {
        let a = TestCombatantBuilder::new("A").build();
        let b = TestCombatantBuilder::new("B").build();
        let mut state = create_test_battle(a, b);
        state.weather = WeatherState::new(WeatherKind::Rain, 1);

        let mut rng = TurnRng::new_for_test(vec![0.9, 0.0, 1.0, 0.5, 0.9, 0.9, 0.9]);
        let bus = resolve_tick(&mut state, &mut rng);

        assert!(!state.weather.is_active());
        assert_eq!(state.weather.kind, WeatherKind::None);
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::WeatherEnded)));
    }

    #[test]
    fn test_sun_amplifies_fire_through_a_full_tick() {
        let attacker = TestCombatantBuilder::new("Attacker")
            .with_moves(vec![basic_move(
                "ember",
                ElementalType::Fire,
                60,
                DamageClass::Special,
            )])
            .build();
        let defender = TestCombatantBuilder::new("Defender").build();
        let mut state = create_test_battle(attacker, defender);
        state.weather = WeatherState::new(WeatherKind::Sun, 5);

        let mut rng = TurnRng::new_for_test(vec![0.9, 0.0, 1.0, 0.5, 0.9, 0.9, 0.9]);
        resolve_tick(&mut state, &mut rng);

        // 54.8 * 1.5 * 0.5 = 41.1 -> 41 instead of the clear-sky 27.
        assert_eq!(state.combatant(Side::B).current_hp, 159);
    }

    #[test]
    fn test_initialize_battle_can_roll_weather() {
        let a = TestCombatantBuilder::new("Fast").with_speed(90).build();
        let b = TestCombatantBuilder::new("Slow").with_speed(50).build();

        // Weather check 0.1 passes; pick 0.6 indexes Sandstorm.
        let mut rng = TurnRng::new_for_test(vec![0.1, 0.6]);
        let (state, bus) = initialize_battle("init-test", a, b, &mut rng);

        assert_eq!(state.weather.kind, WeatherKind::Sandstorm);
        assert_eq!(state.weather.remaining_turns, 5);
        assert_eq!(state.acting_side, Side::A);
        assert!(bus.events().iter().any(|e| matches!(
            e,
            BattleEvent::WeatherStarted { kind: WeatherKind::Sandstorm }
        )));
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::FirstActor { side: Side::A })));
    }

    #[test]
    fn test_initialize_battle_clear_skies_and_speed_order() {
        let a = TestCombatantBuilder::new("Slow").with_speed(40).build();
        let b = TestCombatantBuilder::new("Fast").with_speed(90).build();

        let mut rng = TurnRng::new_for_test(vec![0.9]);
        let (state, bus) = initialize_battle("init-test", a, b, &mut rng);

        assert_eq!(state.weather.kind, WeatherKind::None);
        assert_eq!(state.acting_side, Side::B);
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::BattleStarted)));
        assert!(!bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::WeatherStarted { .. })));
    }

    #[test]
    fn test_speed_tie_goes_to_side_a() {
        let a = TestCombatantBuilder::new("A").with_speed(75).build();
        let b = TestCombatantBuilder::new("B").with_speed(75).build();

        let mut rng = TurnRng::new_for_test(vec![0.9]);
        let (state, _) = initialize_battle("init-test", a, b, &mut rng);

        assert_eq!(state.acting_side, Side::A);
    }
}
