//! Pokemon Arena Battle Simulator
//!
//! A two-combatant auto-battler: combatants are resolved from a catalog,
//! the engine advances one attack per tick on a fixed interval, and
//! finished battles are reported to a result sink.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod errors;
pub mod moves;
pub mod pokemon;
pub mod report;
pub mod types;

// --- PUBLIC API RE-EXPORTS ---

// Core battle engine functions and state.
pub use battle::engine::{initialize_battle, resolve_tick};
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState, Side, TurnRng};
pub use battle::weather::{WeatherKind, WeatherState};

// Async simulation driver.
pub use battle::runner::{BattleHandle, BattleUpdate, Simulation, SimulationConfig, TickUpdate};

// Core runtime types for a battle.
pub use moves::{DamageClass, Move, MoveDetail, MoveRef};
pub use pokemon::{BaseStats, BoostStat, Combatant, CombatantData, StatBoosts, StatusCondition};
pub use types::ElementalType;

// Data access and reporting seams.
pub use catalog::{CatalogProvider, StaticCatalog};
pub use report::{BattleSummary, CombatantSummary, MemorySink, ResultSink};

// Crate-specific error and result types.
pub use errors::{
    DataResolutionError, DataResult, EmptyMovePoolError, ReportingError, SimulationError,
    SimulationResult,
};
