//! Holdem Equity estimates how often a Texas Hold'em hand wins.
//!
//! Given the hero's two hole cards, the known board, and a number of
//! opponents holding unknown cards, it deals out the rest of the hand
//! many times and scores every showdown. The resulting equity can be
//! turned into a suggested action with [`holdem::recommend`].
//!
//! ```
//! use holdem_equity::holdem::SimulationConfig;
//! use holdem_equity::holdem::EquitySimulator;
//!
//! let config = SimulationConfig::from_codes(["As", "Ah"], &[], 1, 2_000).unwrap();
//! let result = EquitySimulator::new(config).estimate_equity();
//! assert!(result.equity_pct() > 70.0);
//! ```

/// Cards, decks, and hand ranking. Nothing in core knows about
/// betting or how many players are at the table.
pub mod core;
/// Hold'em specific code: the equity simulator and action advice.
pub mod holdem;
