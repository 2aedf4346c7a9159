//! Turn orchestration: players, the turn loop and battle outcomes.

use crate::error::{ErrorSeverity, GameError, InvalidAction};
use crate::state::{Character, CharacterId, Side};

use super::GameEngine;

/// A player's turn did not complete.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Invalid(#[from] InvalidAction),

    #[error("turn aborted: {0}")]
    Aborted(String),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invalid(inner) => inner.severity(),
            Self::Aborted(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(inner) => inner.error_code(),
            Self::Aborted(_) => "TURN_ABORTED",
        }
    }
}

/// Side-level turn logic: human input, scripted play or an AI adapter.
///
/// One call is one turn. The engine does not enforce a move or action
/// budget; implementations consult [`Character::budget`] themselves.
pub trait Player {
    fn take_turn(&mut self, engine: &mut GameEngine, side: Side) -> Result<(), TurnError>;
}

impl<F> Player for F
where
    F: FnMut(&mut GameEngine, Side) -> Result<(), TurnError>,
{
    fn take_turn(&mut self, engine: &mut GameEngine, side: Side) -> Result<(), TurnError> {
        self(engine, side)
    }
}

/// Per-character decision logic.
pub trait AiStrategy {
    fn take_turn(&mut self, engine: &mut GameEngine, actor: CharacterId) -> Result<(), TurnError>;
}

/// Drives an [`AiStrategy`] once for every living character of a side, in
/// roster order.
///
/// A character whose strategy fails is skipped for the turn; the rest of the
/// side still acts.
#[derive(Clone, Debug, Default)]
pub struct StrategyPlayer<S> {
    strategy: S,
}

impl<S: AiStrategy> StrategyPlayer<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<S: AiStrategy> Player for StrategyPlayer<S> {
    fn take_turn(&mut self, engine: &mut GameEngine, side: Side) -> Result<(), TurnError> {
        let actors: Vec<CharacterId> = engine.state().alive(side).map(Character::id).collect();
        for actor in actors {
            if !engine.character(actor)?.is_alive() {
                continue;
            }
            if let Err(error) = self.strategy.take_turn(engine, actor) {
                tracing::warn!(%actor, %error, "strategy failed, skipping character");
            }
        }
        Ok(())
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEnd {
    /// One side still has living characters.
    Victory,
    /// Both sides were wiped out.
    Draw,
    /// The turn ceiling was reached.
    TurnLimit,
}

/// Result of [`TurnManager::run_turns`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    pub winner: Option<Side>,
    pub loser: Option<Side>,
    /// Completed turns.
    pub turns: u64,
    pub end: BattleEnd,
}

/// Immutable end-of-battle data for persistence and UI layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub winner: Option<Side>,
    pub loser: Option<Side>,
    pub end: BattleEnd,
    pub turns: u64,
    /// Living characters per side, indexed by [`Side::index`].
    pub survivors: [usize; 2],
}

impl BattleSummary {
    pub fn survivors(&self, side: Side) -> usize {
        self.survivors[side.index()]
    }
}

/// Alternates control between two players until one side is wiped out.
///
/// `players[0]` controls [`Side::First`] and acts on even turn numbers.
pub struct TurnManager {
    players: [Box<dyn Player>; 2],
    max_turns: Option<u64>,
}

impl TurnManager {
    pub fn new(first: impl Player + 'static, second: impl Player + 'static) -> Self {
        Self {
            players: [Box::new(first), Box::new(second)],
            max_turns: None,
        }
    }

    /// Overrides [`GameConfig::max_turns`](crate::GameConfig::max_turns).
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u64) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    pub fn current_player(&self, engine: &GameEngine) -> Side {
        Side::for_turn(engine.turn().number)
    }

    /// Runs turns until one side has no living characters or the attempt
    /// ceiling is reached.
    ///
    /// A side's housekeeping runs once when control reaches it. A failed turn
    /// is logged and retried for the same side without advancing the turn
    /// counter; every attempt, failed or not, counts toward the ceiling.
    pub fn run_turns(&mut self, engine: &mut GameEngine) -> BattleOutcome {
        let limit = self.max_turns.unwrap_or(engine.config().max_turns);
        let mut attempts = 0u64;
        let mut prepared = None;

        while engine.is_contested() {
            let turn = engine.turn();
            let side = Side::for_turn(turn.number);

            if prepared != Some(turn.number) {
                engine.start_turn(side);
                prepared = Some(turn.number);
                continue;
            }

            if attempts >= limit {
                tracing::warn!(attempts, limit, "turn ceiling reached");
                return engine.conclude(true);
            }
            attempts += 1;

            match self.players[side.index()].take_turn(engine, side) {
                Ok(()) => engine.complete_turn(),
                Err(error) => {
                    tracing::warn!(
                        %side,
                        turn = turn.number,
                        code = error.error_code(),
                        severity = error.severity().as_str(),
                        %error,
                        "turn failed, retrying"
                    );
                    engine.log(format!("Turn {} for the {side} failed: {error}", turn.number));
                }
            }
        }

        engine.conclude(false)
    }
}

impl core::fmt::Debug for TurnManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TurnManager")
            .field("max_turns", &self.max_turns)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// True while both sides still have living characters.
    pub fn is_contested(&self) -> bool {
        Side::BOTH.iter().all(|side| self.state().has_living(*side))
    }

    /// Hands control to `side` and runs its housekeeping.
    pub(crate) fn start_turn(&mut self, side: Side) {
        let mut turn = self.turn();
        turn.active = side;
        self.state.set_turn(turn);

        self.end_turn_housekeeping(side);
        self.log(format!("Turn {}: {side} to act", turn.number));
        self.emit(super::CombatEvent::TurnStarted { turn });
    }

    /// Advances the turn counter after a completed turn.
    pub(crate) fn complete_turn(&mut self) {
        let mut turn = self.turn();
        turn.number += 1;
        turn.active = Side::for_turn(turn.number);
        self.state.set_turn(turn);
    }

    /// Declares the result, notifies battle listeners and returns it.
    pub(crate) fn conclude(&mut self, aborted: bool) -> BattleOutcome {
        let survivors = Side::BOTH.map(|side| self.state().alive(side).count());
        let turns = self.turn().number;

        let (winner, end) = if aborted {
            (None, BattleEnd::TurnLimit)
        } else {
            match survivors {
                [0, 0] => (None, BattleEnd::Draw),
                [_, 0] => (Some(Side::First), BattleEnd::Victory),
                [0, _] => (Some(Side::Second), BattleEnd::Victory),
                _ => (None, BattleEnd::TurnLimit),
            }
        };
        let outcome = BattleOutcome {
            winner,
            loser: winner.map(Side::opponent),
            turns,
            end,
        };
        let summary = BattleSummary {
            winner,
            loser: outcome.loser,
            end,
            turns,
            survivors,
        };

        match winner {
            Some(side) => self.log(format!("The {side} wins after {turns} turns")),
            None => self.log(format!("Battle ends without a winner ({end}) after {turns} turns")),
        }
        tracing::info!(?winner, %end, turns, "battle concluded");

        let event = if aborted {
            super::CombatEvent::BattleAborted { summary }
        } else {
            super::CombatEvent::BattleEnded { summary }
        };
        self.emit(event);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::engine::{CombatEvent, EventTopic};
    use crate::state::{Board, CharacterClass, Position, Stats};
    use crate::GameConfig;

    fn duel(first_hp: u32, second_hp: u32) -> (GameEngine, CharacterId, CharacterId) {
        let mut engine = GameEngine::new(Board::new(6, 6), GameConfig::default());
        let a = engine
            .add_character(
                Side::First,
                Character::new("a", CharacterClass::Warrior, Stats::new(first_hp, 30, 0, 1), 0),
                Position::new(0, 0),
            )
            .unwrap();
        let b = engine
            .add_character(
                Side::Second,
                Character::new("b", CharacterClass::Warrior, Stats::new(second_hp, 30, 0, 1), 0),
                Position::new(1, 0),
            )
            .unwrap();
        (engine, a, b)
    }

    fn attack_first_enemy(engine: &mut GameEngine, side: Side) -> Result<(), TurnError> {
        let attacker = engine.state().alive(side).map(Character::id).next();
        let target = engine.state().alive(side.opponent()).map(Character::id).next();
        match (attacker, target) {
            (Some(attacker), Some(target)) => {
                engine.attack(attacker, target)?;
                Ok(())
            }
            _ => Err(TurnError::Aborted("nothing to do".into())),
        }
    }

    #[test]
    fn first_side_lethal_attack_ends_battle_in_one_turn() {
        let (mut engine, _, _) = duel(100, 1);
        let mut manager = TurnManager::new(attack_first_enemy, attack_first_enemy);

        let outcome = manager.run_turns(&mut engine);
        assert_eq!(outcome.winner, Some(Side::First));
        assert_eq!(outcome.loser, Some(Side::Second));
        assert_eq!(outcome.end, BattleEnd::Victory);
        assert_eq!(outcome.turns, 1);
    }

    #[test]
    fn failed_turns_are_retried_then_capped() {
        let (mut engine, _, _) = duel(50, 50);
        let attempts = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&attempts);
        let failing = move |_: &mut GameEngine, _: Side| -> Result<(), TurnError> {
            *counter.borrow_mut() += 1;
            Err(TurnError::Aborted("stuck".into()))
        };
        let mut manager = TurnManager::new(failing, attack_first_enemy).with_max_turns(5);

        let outcome = manager.run_turns(&mut engine);
        assert_eq!(*attempts.borrow(), 5);
        assert_eq!(outcome.end, BattleEnd::TurnLimit);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.turns, 0);
        assert!(engine.combat_log().contains("stuck"));
    }

    #[test]
    fn battle_listeners_receive_summary() {
        let (mut engine, _, _) = duel(100, 1);
        let summaries = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&summaries);
        engine.subscribe(EventTopic::Battle, move |event: &CombatEvent| {
            if let CombatEvent::BattleEnded { summary } = event {
                sink.borrow_mut().push(*summary);
            }
        });

        TurnManager::new(attack_first_enemy, attack_first_enemy).run_turns(&mut engine);

        let summaries = summaries.borrow();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].survivors(Side::First), 1);
        assert_eq!(summaries[0].survivors(Side::Second), 0);
    }

    #[test]
    fn housekeeping_runs_once_per_turn_not_per_retry() {
        let (mut engine, _, _) = duel(50, 50);
        let turns = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&turns);
        engine.subscribe(EventTopic::Turn, move |event: &CombatEvent| {
            if let CombatEvent::TurnStarted { turn } = event {
                sink.borrow_mut().push(turn.number);
            }
        });

        let mut failures = 0;
        let flaky = move |engine: &mut GameEngine, side: Side| -> Result<(), TurnError> {
            failures += 1;
            if failures < 3 {
                return Err(TurnError::Aborted("retry".into()));
            }
            attack_first_enemy(engine, side)
        };
        TurnManager::new(flaky, attack_first_enemy).run_turns(&mut engine);

        assert_eq!(*turns.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn strategy_player_drives_each_living_character() {
        struct Recorder(Rc<RefCell<Vec<CharacterId>>>);

        impl AiStrategy for Recorder {
            fn take_turn(&mut self, _: &mut GameEngine, actor: CharacterId) -> Result<(), TurnError> {
                self.0.borrow_mut().push(actor);
                Ok(())
            }
        }

        let (mut engine, a, _) = duel(10, 10);
        let second = engine
            .add_character(
                Side::First,
                Character::new("c", CharacterClass::Rogue, Stats::new(10, 1, 0, 1), 0),
                Position::new(0, 3),
            )
            .unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut player = StrategyPlayer::new(Recorder(Rc::clone(&seen)));

        player.take_turn(&mut engine, Side::First).unwrap();
        assert_eq!(*seen.borrow(), vec![a, second]);
    }
}
