use crate::battle::engine::{initialize_battle, resolve_tick};
use crate::battle::state::{BattleEvent, BattleState, TurnRng};
use crate::catalog::CatalogProvider;
use crate::errors::{validate_combatant_id, SimulationError};
use crate::moves::{load_move_pool, select_move_refs};
use crate::pokemon::Combatant;
use crate::report::{submit_result, summarize, BattleSummary, ResultSink};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// How often the simulation advances by one turn.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub tick_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Events of one resolved tick plus the state after it.
#[derive(Debug, Clone)]
pub struct TickUpdate {
    pub events: Vec<BattleEvent>,
    pub snapshot: BattleState,
}

/// Stream items a running battle pushes to its observer.
#[derive(Debug, Clone)]
pub enum BattleUpdate {
    Tick(TickUpdate),
    Concluded(BattleSummary),
}

/// A battle running on its own tokio task. Dropping the handle leaves the
/// battle running to conclusion; `abort` stops it between ticks.
#[derive(Debug)]
pub struct BattleHandle {
    task: JoinHandle<()>,
    updates: mpsc::UnboundedReceiver<BattleUpdate>,
}

impl BattleHandle {
    pub async fn recv(&mut self) -> Option<BattleUpdate> {
        self.updates.recv().await
    }

    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Entry point for running battles: resolves combatants through the
/// catalog, spawns the tick loop, and reports finished battles to the sink.
pub struct Simulation {
    catalog: Arc<dyn CatalogProvider>,
    sink: Arc<dyn ResultSink>,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        sink: Arc<dyn ResultSink>,
        config: SimulationConfig,
    ) -> Self {
        Simulation {
            catalog,
            sink,
            config,
        }
    }

    /// Start a battle between two catalog ids. Data resolution failures
    /// surface here; after spawn the battle runs to conclusion on its own.
    pub async fn start_battle(&self, id_a: u32, id_b: u32) -> Result<BattleHandle, SimulationError> {
        validate_combatant_id(id_a)?;
        validate_combatant_id(id_b)?;

        let (data_a, data_b) = tokio::join!(
            self.catalog.combatant_data(id_a),
            self.catalog.combatant_data(id_b)
        );
        let (data_a, data_b) = (data_a?, data_b?);

        // Thread-local rng is not Send, so the move subsets are drawn before
        // the pool loads await.
        let (refs_a, refs_b) = {
            let mut rng = rand::rng();
            (
                select_move_refs(&data_a, &mut rng),
                select_move_refs(&data_b, &mut rng),
            )
        };

        let (pool_a, pool_b) = tokio::join!(
            load_move_pool(&*self.catalog, &data_a, &refs_a),
            load_move_pool(&*self.catalog, &data_b, &refs_b)
        );

        let combatant_a = Combatant::new(&data_a, pool_a?);
        let combatant_b = Combatant::new(&data_b, pool_b?);

        let battle_id = next_battle_id(id_a, id_b);
        info!(battle_id = %battle_id, a = %combatant_a.name, b = %combatant_b.name, "starting battle");

        let mut rng = TurnRng::new_random();
        let (state, intro_bus) = initialize_battle(battle_id, combatant_a, combatant_b, &mut rng);

        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Arc::clone(&self.sink);
        let tick_interval = self.config.tick_interval;

        let task = tokio::spawn(run_battle(state, intro_bus.into_events(), tick_interval, tx, sink));

        Ok(BattleHandle { task, updates: rx })
    }
}

async fn run_battle(
    mut state: BattleState,
    intro_events: Vec<BattleEvent>,
    tick_interval: Duration,
    tx: mpsc::UnboundedSender<BattleUpdate>,
    sink: Arc<dyn ResultSink>,
) {
    let _ = tx.send(BattleUpdate::Tick(TickUpdate {
        events: intro_events,
        snapshot: state.clone(),
    }));

    let mut interval = tokio::time::interval(tick_interval);
    // The first interval tick fires immediately; swallow it so the opening
    // turn waits a full period.
    interval.tick().await;

    loop {
        interval.tick().await;

        let mut rng = TurnRng::new_random();
        let bus = resolve_tick(&mut state, &mut rng);
        debug!(battle_id = %state.battle_id, turn = state.turn_number, events = bus.len(), "tick resolved");

        // A dropped receiver is fine; the battle still runs to conclusion
        // so the result lands in the sink.
        let _ = tx.send(BattleUpdate::Tick(TickUpdate {
            events: bus.into_events(),
            snapshot: state.clone(),
        }));

        if state.is_concluded() {
            if let Some(summary) = summarize(&state) {
                info!(
                    battle_id = %state.battle_id,
                    winner = %state.combatant(summary.winner).name,
                    turns = summary.turns,
                    "battle concluded"
                );
                let _ = tx.send(BattleUpdate::Concluded(summary.clone()));
                // Reporting runs detached; a slow sink must not hold up
                // anything else.
                tokio::spawn(async move {
                    submit_result(&*sink, summary).await;
                });
            }
            break;
        }
    }
}

fn next_battle_id(id_a: u32, id_b: u32) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("battle-{}-{}-{}", id_a, id_b, millis)
}
