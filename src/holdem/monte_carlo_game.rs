use std::cmp::Ordering;

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{Level, event};

use crate::core::{Card, CardBitSet, Deck, EquityError, FlatDeck, rank_seven};

/// Most opponents a simulation will deal in.
pub const MAX_OPPONENTS: usize = 8;

fn codes(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect()
}

/// Everything a simulation needs, checked once up front so that
/// running it can't fail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationConfig {
    hero: [Card; 2],
    board: Vec<Card>,
    opponents: usize,
    iterations: usize,
}

impl SimulationConfig {
    /// Validate a simulation request.
    ///
    /// The checks run in this order: board size, hero holding the
    /// same card twice, any card repeated between hero and board,
    /// opponent count (1 to 8), and at least one iteration.
    pub fn new(
        hero: [Card; 2],
        board: Vec<Card>,
        opponents: usize,
        iterations: usize,
    ) -> Result<Self, EquityError> {
        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(EquityError::InvalidBoardSize(board.len()));
        }
        if hero[0] == hero[1] {
            return Err(EquityError::DuplicateCard(hero[0]));
        }
        let known: Vec<Card> = hero.iter().chain(&board).copied().collect();
        CardBitSet::try_from_unique(&known).map_err(EquityError::DuplicateCard)?;
        if !(1..=MAX_OPPONENTS).contains(&opponents) {
            return Err(EquityError::InvalidOpponentCount(opponents));
        }
        if iterations == 0 {
            return Err(EquityError::InvalidIterations(iterations));
        }
        Ok(Self {
            hero,
            board,
            opponents,
            iterations,
        })
    }

    /// Same as `new` but starting from two character card codes.
    ///
    /// ```
    /// use holdem_equity::core::EquityError;
    /// use holdem_equity::holdem::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_codes(["As", "Kd"], &["7c", "7d", "2h"], 2, 1_000);
    /// assert!(config.is_ok());
    ///
    /// let bad = SimulationConfig::from_codes(["As", "Ks"], &["Kx"], 2, 1_000);
    /// assert_eq!(Err(EquityError::InvalidCard("Kx".to_string())), bad);
    /// ```
    pub fn from_codes(
        hero: [&str; 2],
        board: &[&str],
        opponents: usize,
        iterations: usize,
    ) -> Result<Self, EquityError> {
        let hero = [hero[0].parse()?, hero[1].parse()?];
        let board = board
            .iter()
            .map(|code| code.parse())
            .collect::<Result<Vec<Card>, _>>()?;
        Self::new(hero, board, opponents, iterations)
    }

    pub fn hero(&self) -> [Card; 2] {
        self.hero
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn opponents(&self) -> usize {
        self.opponents
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// How the hero did in one dealt out hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Hero had the only best hand.
    Win,
    /// Hero shared the best hand with `winners - 1` opponents.
    Tie { winners: usize },
    /// Somebody had a better hand.
    Loss,
}

impl Outcome {
    /// The part of the pot the hero takes home.
    pub fn pot_share(&self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Tie { winners } => 1.0 / *winners as f64,
            Outcome::Loss => 0.0,
        }
    }
}

/// Final tallies of a simulation.
///
/// `win_pct + tie_pct + loss_pct` is 100. `equity_pct` is the
/// expected share of the pot, where a tie only pays its split.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationResult {
    wins: u64,
    ties: u64,
    losses: u64,
    iterations: u64,
    win_pct: f64,
    tie_pct: f64,
    loss_pct: f64,
    equity_pct: f64,
}

impl SimulationResult {
    pub fn wins(&self) -> u64 {
        self.wins
    }
    pub fn ties(&self) -> u64 {
        self.ties
    }
    pub fn losses(&self) -> u64 {
        self.losses
    }
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
    pub fn win_pct(&self) -> f64 {
        self.win_pct
    }
    pub fn tie_pct(&self) -> f64 {
        self.tie_pct
    }
    pub fn loss_pct(&self) -> f64 {
        self.loss_pct
    }
    pub fn equity_pct(&self) -> f64 {
        self.equity_pct
    }
}

#[derive(Debug, Default)]
struct Tally {
    wins: u64,
    ties: u64,
    losses: u64,
    pot_share: f64,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie { .. } => self.ties += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.pot_share += outcome.pot_share();
    }

    fn finish(self) -> SimulationResult {
        let iterations = self.wins + self.ties + self.losses;
        let pct = |count: f64| 100.0 * count / iterations as f64;
        SimulationResult {
            wins: self.wins,
            ties: self.ties,
            losses: self.losses,
            iterations,
            win_pct: pct(self.wins as f64),
            tie_pct: pct(self.ties as f64),
            loss_pct: pct(self.losses as f64),
            equity_pct: pct(self.pot_share),
        }
    }
}

/// Monte Carlo equity of two hole cards against random hands.
///
/// Every trial deals the rest of the board and two cards to each
/// opponent from the cards nobody has seen, then scores everyone's
/// best seven card hand.
///
/// The simulator owns its rng. `new` uses the thread rng, while
/// `with_rng` takes any `Rng` so that a seeded generator gives the
/// same result every run.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_equity::holdem::{EquitySimulator, SimulationConfig};
///
/// let config = SimulationConfig::from_codes(["As", "Ah"], &[], 1, 2_000).unwrap();
/// let mut sim = EquitySimulator::with_rng(config, StdRng::seed_from_u64(420));
/// let result = sim.estimate_equity();
/// assert!(result.equity_pct() > 75.0);
/// ```
#[derive(Debug)]
pub struct EquitySimulator<R: Rng = ThreadRng> {
    config: SimulationConfig,
    /// Cards that can still be dealt.
    deck: FlatDeck,
    rng: R,
}

impl EquitySimulator<ThreadRng> {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_rng(config, rand::rng())
    }
}

impl<R: Rng> EquitySimulator<R> {
    pub fn with_rng(config: SimulationConfig, rng: R) -> Self {
        let dead: CardBitSet = config.hero.iter().chain(&config.board).copied().collect();
        let deck: FlatDeck = Deck::without(dead).into();
        Self { config, deck, rng }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Deal out one hand and score it from the hero's side.
    pub fn simulate(&mut self) -> Outcome {
        let known = self.config.board.len();
        let board_needed = 5 - known;
        let dealt = self
            .deck
            .deal_random(&mut self.rng, board_needed + 2 * self.config.opponents);

        // Hole cards go in the first two slots, the board fills the rest.
        let mut hand = [self.config.hero[0]; 7];
        hand[1] = self.config.hero[1];
        hand[2..2 + known].copy_from_slice(&self.config.board);
        hand[2 + known..].copy_from_slice(&dealt[..board_needed]);

        let hero_score = rank_seven(&hand);
        let mut best = hero_score;
        let mut winners = 1;
        for hole in dealt[board_needed..].chunks_exact(2) {
            hand[..2].copy_from_slice(hole);
            let score = rank_seven(&hand);
            match score.cmp(&best) {
                Ordering::Greater => {
                    best = score;
                    winners = 1;
                }
                Ordering::Equal => winners += 1,
                Ordering::Less => {}
            }
        }

        if hero_score < best {
            Outcome::Loss
        } else if winners == 1 {
            Outcome::Win
        } else {
            Outcome::Tie { winners }
        }
    }

    /// Run the configured number of trials.
    pub fn estimate_equity(&mut self) -> SimulationResult {
        event!(
            Level::DEBUG,
            hero = %codes(&self.config.hero),
            board = %codes(&self.config.board),
            opponents = self.config.opponents,
            iterations = self.config.iterations,
            "equity_simulation_start"
        );

        let mut tally = Tally::default();
        for _ in 0..self.config.iterations {
            let outcome = self.simulate();
            tally.record(outcome);
        }
        let result = tally.finish();

        event!(
            Level::DEBUG,
            wins = result.wins,
            ties = result.ties,
            losses = result.losses,
            equity_pct = result.equity_pct,
            "equity_simulation_done"
        );
        result
    }
}

/// Estimate hero's equity using the thread rng.
///
/// ```
/// use holdem_equity::core::{parse_cards, EquityError};
/// use holdem_equity::holdem::simulate;
///
/// let hero = parse_cards("KhKd").unwrap();
/// let board = parse_cards("Ks7c2d").unwrap();
/// let result = simulate([hero[0], hero[1]], &board, 3, 500).unwrap();
/// assert_eq!(500, result.iterations());
///
/// let err = simulate([hero[0], hero[0]], &board, 3, 500);
/// assert_eq!(Err(EquityError::DuplicateCard(hero[0])), err);
/// ```
pub fn simulate(
    hero: [Card; 2],
    board: &[Card],
    opponents: usize,
    iterations: usize,
) -> Result<SimulationResult, EquityError> {
    simulate_with_rng(hero, board, opponents, iterations, rand::rng())
}

/// Estimate hero's equity drawing from `rng`.
pub fn simulate_with_rng<R: Rng>(
    hero: [Card; 2],
    board: &[Card],
    opponents: usize,
    iterations: usize,
    rng: R,
) -> Result<SimulationResult, EquityError> {
    let config = SimulationConfig::new(hero, board.to_vec(), opponents, iterations)?;
    Ok(EquitySimulator::with_rng(config, rng).estimate_equity())
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::{Suit, Value, parse_cards};

    fn seeded(hero: &str, board: &str, opponents: usize, iterations: usize) -> SimulationResult {
        let hero = parse_cards(hero).unwrap();
        let board = parse_cards(board).unwrap();
        simulate_with_rng(
            [hero[0], hero[1]],
            &board,
            opponents,
            iterations,
            StdRng::seed_from_u64(420),
        )
        .unwrap()
    }

    fn assert_percentages(result: &SimulationResult) {
        assert_eq!(
            result.iterations(),
            result.wins() + result.ties() + result.losses()
        );
        assert_abs_diff_eq!(
            100.0,
            result.win_pct() + result.tie_pct() + result.loss_pct(),
            epsilon = 1e-9
        );
        assert!(result.equity_pct() >= result.win_pct() - 1e-9);
        assert!(result.equity_pct() <= result.win_pct() + result.tie_pct() + 1e-9);
    }

    #[test]
    fn test_config_errors() {
        let ace = Card::new(Value::Ace, Suit::Spade);
        let king = Card::new(Value::King, Suit::Spade);
        let board = parse_cards("Qs7d2c").unwrap();

        assert_eq!(
            Err(EquityError::DuplicateCard(ace)),
            SimulationConfig::new([ace, ace], vec![], 1, 100)
        );
        assert_eq!(
            Err(EquityError::DuplicateCard(king)),
            SimulationConfig::new([ace, king], vec![board[0], king, board[1]], 1, 100)
        );
        assert_eq!(
            Err(EquityError::InvalidBoardSize(2)),
            SimulationConfig::new([ace, king], board[..2].to_vec(), 1, 100)
        );
        assert_eq!(
            Err(EquityError::InvalidBoardSize(1)),
            SimulationConfig::new([ace, king], board[..1].to_vec(), 1, 100)
        );
        assert_eq!(
            Err(EquityError::InvalidOpponentCount(0)),
            SimulationConfig::new([ace, king], board.clone(), 0, 100)
        );
        assert_eq!(
            Err(EquityError::InvalidOpponentCount(9)),
            SimulationConfig::new([ace, king], board.clone(), 9, 100)
        );
        assert_eq!(
            Err(EquityError::InvalidIterations(0)),
            SimulationConfig::new([ace, king], board.clone(), 1, 0)
        );
        assert!(SimulationConfig::new([ace, king], board, 8, 1).is_ok());
    }

    #[test]
    fn test_six_card_board_is_rejected() {
        let hero = parse_cards("AsKs").unwrap();
        let board = parse_cards("2c3c4c5c6c7c").unwrap();
        assert_eq!(
            Err(EquityError::InvalidBoardSize(6)),
            simulate([hero[0], hero[1]], &board, 1, 10)
        );
    }

    #[test]
    fn test_from_codes() {
        let config = SimulationConfig::from_codes(["Td", "9d"], &["8d", "7c", "2h", "Kd"], 3, 50)
            .unwrap();
        assert_eq!(parse_cards("Td9d").unwrap(), config.hero().to_vec());
        assert_eq!(parse_cards("8d7c2hKd").unwrap(), config.board());
        assert_eq!(3, config.opponents());
        assert_eq!(50, config.iterations());

        assert_eq!(
            Err(EquityError::InvalidCard("1d".to_string())),
            SimulationConfig::from_codes(["1d", "9d"], &[], 1, 50)
        );
        assert_eq!(
            Err(EquityError::DuplicateCard(Card::new(Value::Ace, Suit::Spade))),
            SimulationConfig::from_codes(["As", "As"], &[], 1, 50)
        );
    }

    #[test]
    fn test_dead_cards_never_dealt() {
        let config = SimulationConfig::from_codes(["Ah", "Kh"], &["Qh", "Jh", "2c"], 8, 1).unwrap();
        let mut sim = EquitySimulator::with_rng(config, StdRng::seed_from_u64(1));
        assert_eq!(47, sim.deck.len());
        let dead = parse_cards("AhKhQhJh2c").unwrap();
        for _ in 0..200 {
            sim.simulate();
            assert!(sim.deck[..].iter().all(|c| !dead.contains(c)));
        }
        assert_eq!(47, sim.deck.len());
    }

    #[test_log::test]
    fn test_pocket_aces_heads_up() {
        let result = seeded("AsAh", "", 1, 20_000);
        assert_percentages(&result);
        assert!(
            (82.0..=88.0).contains(&result.win_pct()),
            "win pct {}",
            result.win_pct()
        );
        assert!(result.equity_pct() > result.win_pct());
    }

    #[test]
    fn test_more_opponents_less_equity() {
        let heads_up = seeded("AsAh", "", 1, 3_000);
        let four_way = seeded("AsAh", "", 4, 3_000);
        assert!(heads_up.equity_pct() > four_way.equity_pct() + 15.0);
        assert_percentages(&four_way);
    }

    #[test]
    fn test_same_seed_same_result() {
        let one = seeded("7s6s", "8s9d2s", 3, 1_000);
        let two = seeded("7s6s", "8s9d2s", 3, 1_000);
        assert_eq!(one, two);
        assert_percentages(&one);
    }

    #[test]
    fn test_locked_nuts_win_everything() {
        // Four aces and no straight flush possible on this board.
        let result = seeded("AsAc", "AhAdKs7c2d", 8, 500);
        assert_eq!(500, result.wins());
        assert_abs_diff_eq!(100.0, result.win_pct());
        assert_abs_diff_eq!(100.0, result.equity_pct());
        assert_abs_diff_eq!(0.0, result.tie_pct());
    }

    #[test]
    fn test_royal_board_always_chops() {
        let result = seeded("2c3d", "AsKsQsJsTs", 3, 400);
        assert_eq!(400, result.ties());
        assert_abs_diff_eq!(100.0, result.tie_pct());
        assert_abs_diff_eq!(25.0, result.equity_pct(), epsilon = 1e-9);
    }

    #[test]
    fn test_playing_the_board_never_wins() {
        // Hero plays aces full off the board and only the last ace beats it.
        let result = seeded("7c2d", "AhAdAsKcKd", 4, 2_000);
        assert_eq!(0, result.wins());
        assert!(result.ties() > 0);
        assert!(result.losses() > 0);
        assert_percentages(&result);
        assert!(result.equity_pct() < result.tie_pct());
    }

    #[test]
    fn test_every_street_and_table_size() {
        for board in ["", "Kd7c2s", "Kd7c2s9h", "Kd7c2s9h3c"] {
            for opponents in 1..=MAX_OPPONENTS {
                let result = seeded("QhJh", board, opponents, 200);
                assert_eq!(200, result.iterations());
                assert_percentages(&result);
            }
        }
    }

    #[test]
    fn test_outcome_pot_share() {
        assert_abs_diff_eq!(1.0, Outcome::Win.pot_share());
        assert_abs_diff_eq!(0.0, Outcome::Loss.pot_share());
        assert_abs_diff_eq!(0.25, Outcome::Tie { winners: 4 }.pot_share());
    }

    #[test]
    fn test_tally() {
        let mut tally = Tally::default();
        tally.record(Outcome::Win);
        tally.record(Outcome::Tie { winners: 2 });
        tally.record(Outcome::Loss);
        tally.record(Outcome::Loss);
        let result = tally.finish();
        assert_eq!(4, result.iterations());
        assert_abs_diff_eq!(25.0, result.win_pct());
        assert_abs_diff_eq!(25.0, result.tie_pct());
        assert_abs_diff_eq!(50.0, result.loss_pct());
        assert_abs_diff_eq!(37.5, result.equity_pct());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_json() {
        let mut tally = Tally::default();
        tally.record(Outcome::Win);
        tally.record(Outcome::Tie { winners: 4 });
        let json = serde_json::to_value(tally.finish()).unwrap();
        assert_eq!(2, json["iterations"]);
        assert_eq!(1, json["ties"]);
        assert_eq!(62.5, json["equity_pct"]);
    }
}
