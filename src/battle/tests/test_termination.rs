#[cfg(test)]
mod tests {
    use crate::battle::engine::resolve_tick;
    use crate::battle::state::{BattleEvent, GameState, Side, TurnRng};
    use crate::battle::tests::common::{create_test_battle, TestCombatantBuilder};
    use crate::pokemon::StatusCondition;
    use crate::types::ElementalType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attack_ko_ends_battle() {
        let attacker = TestCombatantBuilder::new("Attacker").build();
        let defender = TestCombatantBuilder::new("Defender").with_hp(10).build();
        let mut state = create_test_battle(attacker, defender);

        let mut rng = TurnRng::new_for_test(vec![0.9, 0.0, 1.0, 0.5, 0.9, 0.9, 0.9]);
        let bus = resolve_tick(&mut state, &mut rng);

        assert_eq!(state.game_state, GameState::Concluded);
        assert_eq!(state.winner, Some(Side::A));
        assert!(state.combatant(Side::B).is_fainted());
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::BattleEnded { winner: Side::A })));
    }

    #[test]
    fn test_poison_chip_can_end_battle_before_the_attack() {
        // Poison chips 1/16 of max HP: floor(200 * 0.0625) = 12.
        let attacker = TestCombatantBuilder::new("Attacker")
            .with_status(StatusCondition::Poison)
            .with_hp(5)
            .build();
        let defender = TestCombatantBuilder::new("Defender").build();
        let mut state = create_test_battle(attacker, defender);

        // No attack rolls: the battle must conclude during upkeep.
        let mut rng = TurnRng::new_for_test(vec![]);
        let bus = resolve_tick(&mut state, &mut rng);

        assert_eq!(state.game_state, GameState::Concluded);
        assert_eq!(state.winner, Some(Side::B));
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::PoisonDamage { target: Side::A, damage: 12 })));
    }

    #[test]
    fn test_simultaneous_chip_ko_goes_to_side_b() {
        let a = TestCombatantBuilder::new("A")
            .with_status(StatusCondition::Poison)
            .with_hp(1)
            .build();
        let b = TestCombatantBuilder::new("B")
            .with_status(StatusCondition::Poison)
            .with_hp(1)
            .build();
        let mut state = create_test_battle(a, b);

        let mut rng = TurnRng::new_for_test(vec![]);
        resolve_tick(&mut state, &mut rng);

        assert!(state.combatant(Side::A).is_fainted());
        assert!(state.combatant(Side::B).is_fainted());
        assert_eq!(state.winner, Some(Side::B));
    }

    #[test]
    fn test_immune_defender_still_loses_to_floor_damage() {
        let attacker = TestCombatantBuilder::new("Attacker").build();
        let defender = TestCombatantBuilder::new("Defender")
            .with_types(vec![ElementalType::Ghost])
            .with_hp(5)
            .build();
        let mut state = create_test_battle(attacker, defender);

        // Normal into Ghost is immune, but every landed attack deals at
        // least 5.
        let mut rng = TurnRng::new_for_test(vec![0.9, 0.0, 1.0, 0.5, 0.9, 0.9, 0.9]);
        let bus = resolve_tick(&mut state, &mut rng);

        assert!(state.combatant(Side::B).is_fainted());
        assert_eq!(state.winner, Some(Side::A));
        assert!(bus.events().iter().any(|e| matches!(
            e,
            BattleEvent::AttackLanded { damage: 5, effectiveness, .. } if *effectiveness == 0.0
        )));
    }

    #[test]
    fn test_winner_side_not_flipped_after_ko() {
        let attacker = TestCombatantBuilder::new("Attacker").build();
        let defender = TestCombatantBuilder::new("Defender").with_hp(10).build();
        let mut state = create_test_battle(attacker, defender);

        let mut rng = TurnRng::new_for_test(vec![0.9, 0.0, 1.0, 0.5, 0.9, 0.9, 0.9]);
        resolve_tick(&mut state, &mut rng);

        // The KO path returns before the acting side hand-off.
        assert_eq!(state.acting_side, Side::A);
    }
}
