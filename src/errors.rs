use std::fmt;

/// Smallest valid catalog id. The classic dex starts at 1.
pub const MIN_COMBATANT_ID: u32 = 1;
/// Largest valid catalog id.
pub const MAX_COMBATANT_ID: u32 = 1025;

/// Errors raised while resolving combatant or move data from a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataResolutionError {
    /// Id is outside the supported catalog range.
    InvalidCombatantId(u32),
    /// Id is in range but the catalog has no entry for it.
    CombatantNotFound(u32),
    /// The named move has no catalog entry.
    MoveNotFound(String),
    /// The catalog backend itself failed.
    Provider(String),
}

impl fmt::Display for DataResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataResolutionError::InvalidCombatantId(id) => write!(
                f,
                "Invalid combatant id {} (expected {}..={})",
                id, MIN_COMBATANT_ID, MAX_COMBATANT_ID
            ),
            DataResolutionError::CombatantNotFound(id) => {
                write!(f, "Combatant not found: {}", id)
            }
            DataResolutionError::MoveNotFound(name) => write!(f, "Move not found: {}", name),
            DataResolutionError::Provider(details) => write!(f, "Catalog error: {}", details),
        }
    }
}

/// A combatant's selected moves all resolved to status moves, leaving
/// nothing to attack with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyMovePoolError {
    pub combatant: String,
}

impl fmt::Display for EmptyMovePoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No damaging moves available for {}", self.combatant)
    }
}

/// Errors raised while submitting a finished battle to a result sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportingError {
    /// The sink could not be reached.
    Unavailable(String),
    /// The sink refused the record.
    Rejected(String),
}

impl fmt::Display for ReportingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportingError::Unavailable(details) => {
                write!(f, "Result sink unavailable: {}", details)
            }
            ReportingError::Rejected(details) => write!(f, "Result rejected: {}", details),
        }
    }
}

/// Main error type for the battle simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Error resolving catalog data
    DataResolution(DataResolutionError),
    /// Error assembling a battle-ready move pool
    EmptyMovePool(EmptyMovePoolError),
    /// Error reporting a finished battle
    Reporting(ReportingError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::DataResolution(err) => write!(f, "Data resolution error: {}", err),
            SimulationError::EmptyMovePool(err) => write!(f, "Move pool error: {}", err),
            SimulationError::Reporting(err) => write!(f, "Reporting error: {}", err),
        }
    }
}

impl std::error::Error for DataResolutionError {}
impl std::error::Error for EmptyMovePoolError {}
impl std::error::Error for ReportingError {}
impl std::error::Error for SimulationError {}

impl From<DataResolutionError> for SimulationError {
    fn from(err: DataResolutionError) -> Self {
        SimulationError::DataResolution(err)
    }
}

impl From<EmptyMovePoolError> for SimulationError {
    fn from(err: EmptyMovePoolError) -> Self {
        SimulationError::EmptyMovePool(err)
    }
}

impl From<ReportingError> for SimulationError {
    fn from(err: ReportingError) -> Self {
        SimulationError::Reporting(err)
    }
}

/// Type alias for Results using SimulationError
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Type alias for Results using DataResolutionError
pub type DataResult<T> = Result<T, DataResolutionError>;

/// Validate a catalog id against the supported range.
pub fn validate_combatant_id(id: u32) -> DataResult<u32> {
    if (MIN_COMBATANT_ID..=MAX_COMBATANT_ID).contains(&id) {
        Ok(id)
    } else {
        Err(DataResolutionError::InvalidCombatantId(id))
    }
}
