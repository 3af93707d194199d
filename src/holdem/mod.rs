/// Monte Carlo equity estimation against random opponent hands.
mod monte_carlo_game;
/// Export the simulator and everything it takes and returns.
pub use self::monte_carlo_game::{
    EquitySimulator, MAX_OPPONENTS, Outcome, SimulationConfig, SimulationResult, simulate,
    simulate_with_rng,
};

/// Turn an equity number into a suggested action.
mod recommendation;
/// Export `recommend` and its inputs and outputs.
pub use self::recommendation::{
    Action, Position, Recommendation, Street, TableContext, adjusted_equity, recommend,
};
