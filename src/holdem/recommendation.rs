//! A fixed, stateless decision table that turns an equity estimate
//! and the table situation into a suggested action.
//!
//! The equity is shaded by seat and by how many opponents are in the
//! hand. With no bet to face the shaded equity alone picks the action.
//! Facing a bet it is compared against the pot odds of calling.
use std::fmt;

use tracing::{Level, event};

use crate::core::EquityError;

// Every reason quotes the number its branch compared: the shaded
// equity with no bet to face, shaded equity and pot odds for a fold
// or call, and the edge over pot odds for a raise.

/// Shaded equity needed to bet for value.
const VALUE_EQUITY: f64 = 0.62;
/// Shaded equity needed to stay in with a probe or check.
const PROBE_EQUITY: f64 = 0.45;
/// Below this edge over the pot odds, fold.
const FOLD_EDGE: f64 = -0.02;
/// Above this edge over the pot odds, raise.
const RAISE_EDGE: f64 = 0.12;
/// Equity taken off for every opponent past the first.
const MULTIWAY_PENALTY: f64 = 0.015;
/// Stacks this deep or shorter (in big blinds) get jam advice.
const SHORT_STACK_BB: f64 = 20.0;

/// Where the hero sits relative to the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Position {
    Early,
    Middle,
    Late,
    Blind,
}

impl Position {
    /// Equity added for the seat.
    pub fn bias(self) -> f64 {
        match self {
            Position::Early => -0.02,
            Position::Middle => 0.0,
            Position::Late => 0.015,
            Position::Blind => -0.01,
        }
    }
}

/// Betting round, named by how many board cards are showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// 0 is preflop, 3 the flop, 4 the turn. Everything else is
    /// read as the river.
    pub fn from_board_cards(board_cards: usize) -> Self {
        match board_cards {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        };
        f.write_str(name)
    }
}

/// The suggested play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    #[cfg_attr(feature = "serde", serde(rename = "Aggressive Bet / Jam"))]
    AggressiveBetJam,
    #[cfg_attr(feature = "serde", serde(rename = "Value Bet / Raise"))]
    ValueBetRaise,
    #[cfg_attr(feature = "serde", serde(rename = "Check or Small Probe Bet"))]
    CheckOrProbe,
    #[cfg_attr(feature = "serde", serde(rename = "Check / Fold to Heavy Action"))]
    CheckFold,
    #[cfg_attr(feature = "serde", serde(rename = "Fold"))]
    Fold,
    #[cfg_attr(feature = "serde", serde(rename = "Raise / Jam"))]
    RaiseJam,
    #[cfg_attr(feature = "serde", serde(rename = "Raise"))]
    Raise,
    #[cfg_attr(feature = "serde", serde(rename = "Call"))]
    Call,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::AggressiveBetJam => "Aggressive Bet / Jam",
            Action::ValueBetRaise => "Value Bet / Raise",
            Action::CheckOrProbe => "Check or Small Probe Bet",
            Action::CheckFold => "Check / Fold to Heavy Action",
            Action::Fold => "Fold",
            Action::RaiseJam => "Raise / Jam",
            Action::Raise => "Raise",
            Action::Call => "Call",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Chips in play for the decision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableContext {
    pot: f64,
    to_call: f64,
    stack_bb: f64,
}

impl TableContext {
    /// `pot` and `to_call` must be finite and not negative, the
    /// effective stack in big blinds finite and above zero.
    ///
    /// ```
    /// use holdem_equity::holdem::TableContext;
    ///
    /// assert!(TableContext::new(120.0, 40.0, 35.0).is_ok());
    /// assert!(TableContext::new(120.0, -1.0, 35.0).is_err());
    /// assert!(TableContext::new(120.0, 40.0, 0.0).is_err());
    /// ```
    pub fn new(pot: f64, to_call: f64, stack_bb: f64) -> Result<Self, EquityError> {
        for (name, value) in [("pot size", pot), ("amount to call", to_call)] {
            if !value.is_finite() || value < 0.0 {
                return Err(EquityError::InvalidTableAmount { name, value });
            }
        }
        if !stack_bb.is_finite() || stack_bb <= 0.0 {
            return Err(EquityError::InvalidTableAmount {
                name: "stack in big blinds",
                value: stack_bb,
            });
        }
        Ok(Self {
            pot,
            to_call,
            stack_bb,
        })
    }

    pub fn pot(&self) -> f64 {
        self.pot
    }

    pub fn to_call(&self) -> f64 {
        self.to_call
    }

    pub fn stack_bb(&self) -> f64 {
        self.stack_bb
    }

    /// Share of the final pot the call pays for. `None` with no bet
    /// to face.
    pub fn pot_odds(&self) -> Option<f64> {
        (self.to_call > 0.0).then(|| self.to_call / (self.pot + self.to_call))
    }

    fn is_short(&self) -> bool {
        self.stack_bb <= SHORT_STACK_BB
    }
}

/// What to do and why.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recommendation {
    street: Street,
    action: Action,
    reason: String,
}

impl Recommendation {
    pub fn street(&self) -> Street {
        self.street
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Equity after the seat and multiway adjustments, never below 0.
pub fn adjusted_equity(equity_pct: f64, opponents: usize, position: Position) -> f64 {
    let equity = equity_pct / 100.0;
    let multiway = MULTIWAY_PENALTY * opponents.saturating_sub(1) as f64;
    (equity + position.bias() - multiway).max(0.0)
}

/// Suggest an action for `equity_pct` (0 to 100) against
/// `opponents` players.
///
/// ```
/// use holdem_equity::holdem::{recommend, Action, Position, Street, TableContext};
///
/// let table = TableContext::new(50.0, 50.0, 100.0).unwrap();
/// let rec = recommend(30.0, 1, Position::Middle, &table, 3);
/// assert_eq!(Street::Flop, rec.street());
/// assert_eq!(Action::Fold, rec.action());
/// ```
pub fn recommend(
    equity_pct: f64,
    opponents: usize,
    position: Position,
    table: &TableContext,
    board_cards: usize,
) -> Recommendation {
    let street = Street::from_board_cards(board_cards);
    let adjusted = adjusted_equity(equity_pct, opponents, position);

    let (action, reason) = match table.pot_odds() {
        None if adjusted >= VALUE_EQUITY => {
            let action = if table.is_short() {
                Action::AggressiveBetJam
            } else {
                Action::ValueBetRaise
            };
            let reason = format!(
                "Strong adjusted equity ({:.1}%) with no call pressure.",
                adjusted * 100.0
            );
            (action, reason)
        }
        None if adjusted >= PROBE_EQUITY => (
            Action::CheckOrProbe,
            format!(
                "Medium strength spot ({:.1}% adjusted equity) where pot control is reasonable.",
                adjusted * 100.0
            ),
        ),
        None => (
            Action::CheckFold,
            format!(
                "Adjusted equity is likely too low ({:.1}%) for building a big pot.",
                adjusted * 100.0
            ),
        ),
        Some(pot_odds) => {
            let edge = adjusted - pot_odds;
            if edge < FOLD_EDGE {
                let reason = format!(
                    "Adjusted equity ({:.1}%) is below the pot odds requirement ({:.1}%).",
                    adjusted * 100.0,
                    pot_odds * 100.0
                );
                (Action::Fold, reason)
            } else if edge > RAISE_EDGE {
                let action = if table.is_short() {
                    Action::RaiseJam
                } else {
                    Action::Raise
                };
                let reason = format!(
                    "Large equity edge over pot odds ({:.1} pts).",
                    edge * 100.0
                );
                (action, reason)
            } else {
                let reason = format!(
                    "Adjusted equity ({:.1}%) is close to or above the pot odds threshold ({:.1}%).",
                    adjusted * 100.0,
                    pot_odds * 100.0
                );
                (Action::Call, reason)
            }
        }
    };

    event!(
        Level::TRACE,
        %street,
        adjusted_equity = adjusted,
        pot_odds = ?table.pot_odds(),
        %action,
        "recommendation"
    );

    Recommendation {
        street,
        action,
        reason,
    }
}
