use crate::battle::state::{BattleState, Side};
use crate::battle::weather::WeatherKind;
use crate::errors::ReportingError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSummary {
    pub id: u32,
    pub name: String,
    pub final_hp: u16,
}

/// Record of one finished battle, as handed to a `ResultSink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub battle_id: String,
    pub combatant_a: CombatantSummary,
    pub combatant_b: CombatantSummary,
    pub winner: Side,
    pub turns: u32,
    /// Damage absorbed by the loser over the whole battle.
    pub total_damage: u16,
    /// Weather still active at the moment of conclusion.
    pub weather: WeatherKind,
}

/// Summarize a concluded battle. Returns `None` while the battle is still
/// running or never produced a winner.
pub fn summarize(state: &BattleState) -> Option<BattleSummary> {
    if !state.is_concluded() {
        return None;
    }
    let winner = state.winner?;
    let loser = state.combatant(winner.opponent());

    let summary_of = |side: Side| {
        let combatant = state.combatant(side);
        CombatantSummary {
            id: combatant.id,
            name: combatant.name.clone(),
            final_hp: combatant.current_hp,
        }
    };

    Some(BattleSummary {
        battle_id: state.battle_id.clone(),
        combatant_a: summary_of(Side::A),
        combatant_b: summary_of(Side::B),
        winner,
        turns: state.turn_number,
        total_damage: loser.base_stats.hp - loser.current_hp,
        weather: state.weather.kind,
    })
}

/// Destination for finished battles. Implementations may write to a remote
/// store; `MemorySink` keeps them in process.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn submit(&self, summary: BattleSummary) -> Result<(), ReportingError>;
}

/// In-memory sink. Records are kept in submission order.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<BattleSummary>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent records first, at most `limit` of them.
    pub async fn recent(&self, limit: usize) -> Vec<BattleSummary> {
        let records = self.records.lock().await;
        records.iter().rev().take(limit).cloned().collect()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn submit(&self, summary: BattleSummary) -> Result<(), ReportingError> {
        self.records.lock().await.push(summary);
        Ok(())
    }
}

/// Submit a summary, logging instead of propagating on failure. Reporting
/// must never take a finished battle down with it.
pub async fn submit_result(sink: &dyn ResultSink, summary: BattleSummary) {
    let battle_id = summary.battle_id.clone();
    if let Err(err) = sink.submit(summary).await {
        warn!(battle_id = %battle_id, error = %err, "failed to record battle result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::GameState;
    use crate::pokemon::{BaseStats, Combatant, CombatantData};
    use crate::types::ElementalType;
    use pretty_assertions::assert_eq;

    fn combatant(id: u32, name: &str, hp: u16) -> Combatant {
        let data = CombatantData {
            id,
            name: name.to_string(),
            base_stats: BaseStats {
                hp,
                attack: 50,
                defense: 50,
                special_attack: 50,
                special_defense: 50,
                speed: 50,
            },
            types: vec![ElementalType::Normal],
            known_moves: vec![],
        };
        Combatant::new(&data, vec![])
    }

    fn concluded_state() -> BattleState {
        let a = combatant(25, "Pikachu", 35);
        let mut b = combatant(6, "Charizard", 78);
        b.current_hp = 0;
        let mut state = BattleState::new("battle-1", a, b);
        state.turn_number = 12;
        state.winner = Some(Side::A);
        state.game_state = GameState::Concluded;
        state
    }

    #[test]
    fn test_summarize_concluded_battle() {
        let state = concluded_state();
        let summary = summarize(&state).unwrap();
        assert_eq!(summary.battle_id, "battle-1");
        assert_eq!(summary.winner, Side::A);
        assert_eq!(summary.turns, 12);
        // The loser started at 78 and ended at 0.
        assert_eq!(summary.total_damage, 78);
        assert_eq!(summary.combatant_a.final_hp, 35);
        assert_eq!(summary.combatant_b.final_hp, 0);
    }

    #[test]
    fn test_summarize_requires_conclusion() {
        let mut state = concluded_state();
        state.game_state = GameState::Active;
        assert_eq!(summarize(&state), None);
    }

    #[test]
    fn test_summary_serializes_for_the_wire() {
        let summary = summarize(&concluded_state()).unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"winner\":\"A\""));
        assert!(json.contains("\"total_damage\":78"));
    }

    #[tokio::test]
    async fn test_memory_sink_recent_order() {
        let sink = MemorySink::new();
        for turns in 1..=3 {
            let mut summary = summarize(&concluded_state()).unwrap();
            summary.turns = turns;
            sink.submit(summary).await.unwrap();
        }
        let recent = sink.recent(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].turns, 3);
        assert_eq!(recent[1].turns, 2);
    }
}
