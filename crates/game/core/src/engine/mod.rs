//! Battle facade.
//!
//! [`GameEngine`] wires the board, the authoritative [`GameState`], the
//! movement and action validators, event notification, the combat log and
//! undo/redo history. Every state change made during a battle flows through
//! it: HP only moves through [`GameEngine::apply_damage`] and friends, and
//! positions only through [`GameEngine::move_character`].
//!
//! Each outermost mutating call is checkpointed: the state is captured
//! before the mutation and pushed to history if the call changed it, so one
//! [`GameEngine::undo`] reverts one action.

mod combat;
mod events;
mod log;
mod turns;

pub use combat::{DamageReport, StrikeReport, effective_damage, raw_damage};
pub use events::{CombatEvent, CombatListener, EventBus, EventTopic, ListenerId};
pub use log::CombatLog;
pub use turns::{
    AiStrategy, BattleEnd, BattleOutcome, BattleSummary, Player, StrategyPlayer, TurnError,
    TurnManager,
};

use crate::config::GameConfig;
use crate::error::{InvalidAction, SetupError};
use crate::history::{GameCaretaker, GameMemento};
use crate::rng::{PcgRng, RngOracle, compute_seed};
use crate::state::{Board, Character, CharacterId, GameState, Position, Side, TurnState};
use crate::validation::{ActionCheck, MovementValidator, ValidatorChain};

/// Game engine that owns one battle.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    movement: MovementValidator,
    validators: ValidatorChain,
    events: EventBus,
    history: GameCaretaker,
    combat_log: CombatLog,
    rng: PcgRng,
    nonce: u64,
    in_action: bool,
}

impl GameEngine {
    /// Creates an empty battle on `board` with the standard validator chain.
    pub fn new(board: Board, config: GameConfig) -> Self {
        Self {
            movement: MovementValidator::new(board),
            validators: ValidatorChain::standard(),
            events: EventBus::new(),
            history: GameCaretaker::new(config.history_depth),
            combat_log: CombatLog::new(config.log_capacity),
            rng: PcgRng,
            nonce: 0,
            in_action: false,
            state: GameState::new(),
            config,
        }
    }

    /// Replaces the validator chain used for targeted actions.
    #[must_use]
    pub fn with_validators(mut self, validators: ValidatorChain) -> Self {
        self.validators = validators;
        self
    }

    /// Places a character before the battle starts.
    pub fn add_character(
        &mut self,
        side: Side,
        character: Character,
        position: Position,
    ) -> Result<CharacterId, SetupError> {
        if !self.board().contains(position) {
            return Err(SetupError::OutOfBounds { position });
        }
        let name = character.name().to_owned();
        let id = self.state.add(side, character, position)?;
        tracing::debug!(%id, %side, %name, %position, "character placed");
        Ok(id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn board(&self) -> &Board {
        self.movement.board()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn turn(&self) -> TurnState {
        self.state.turn()
    }

    pub fn character(&self, id: CharacterId) -> Result<&Character, InvalidAction> {
        self.state.character(id).ok_or(InvalidAction::UnknownCharacter)
    }

    /// Side opposing the character's own.
    pub fn opponent_of(&self, id: CharacterId) -> Option<Side> {
        self.state.character(id).map(|c| c.side().opponent())
    }

    /// Living characters opposing `id`, in roster order.
    pub fn living_opponents(&self, id: CharacterId) -> Vec<CharacterId> {
        self.opponent_of(id)
            .map(|side| self.state.alive(side).map(Character::id).collect())
            .unwrap_or_default()
    }

    pub fn combat_log(&self) -> &CombatLog {
        &self.combat_log
    }

    pub fn history(&self) -> &GameCaretaker {
        &self.history
    }

    pub fn validators(&self) -> &ValidatorChain {
        &self.validators
    }

    pub fn can_move(&self, id: CharacterId, destination: Position) -> bool {
        self.movement.can_move(&self.state, id, destination)
    }

    // ========================================================================
    // Notification
    // ========================================================================

    /// Records a human-readable combat line.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "combat", "{message}");
        self.combat_log.push(message);
    }

    pub fn subscribe(
        &mut self,
        topic: EventTopic,
        listener: impl CombatListener + 'static,
    ) -> ListenerId {
        self.events.subscribe(topic, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub(crate) fn emit(&mut self, event: CombatEvent) {
        self.events.emit(&event);
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Runs the validator chain for a targeted action and returns the
    /// validated target.
    pub fn validate_action(
        &self,
        actor: CharacterId,
        target: Option<CharacterId>,
    ) -> Result<CharacterId, InvalidAction> {
        let actor_ref = self.character(actor)?;
        let target_ref = target.map(|id| self.character(id)).transpose()?;
        self.validators
            .validate(&ActionCheck::new(actor_ref, target_ref))?;
        target.ok_or(InvalidAction::MissingTarget)
    }

    /// Checks only that `actor` exists and may act.
    pub fn validate_actor(&self, actor: CharacterId) -> Result<(), InvalidAction> {
        let character = self.character(actor)?;
        character.state().ensure_can_act(character.name())
    }

    // ========================================================================
    // Movement
    // ========================================================================

    /// Moves a character, reporting the broken rule on failure.
    ///
    /// Nothing changes when an error is returned.
    pub fn try_move(&mut self, id: CharacterId, destination: Position) -> Result<(), InvalidAction> {
        self.movement.check(&self.state, id, destination)?;
        let from = self.state.position_of(id);

        self.checkpointed(|engine| {
            let movement = engine.movement;
            if !movement.validate_and_move(&mut engine.state, id, destination) {
                return Err(InvalidAction::UnknownCharacter);
            }
            let character = engine
                .state
                .character_mut(id)
                .ok_or(InvalidAction::UnknownCharacter)?;
            character.record_move();
            let name = character.name().to_owned();
            if let Some(from) = from {
                engine.log(format!("{name} moves from {from} to {destination}"));
            }
            Ok(())
        })
    }

    /// Moves a character. Returns `false` and changes nothing when the move
    /// is illegal.
    pub fn move_character(&mut self, id: CharacterId, destination: Position) -> bool {
        match self.try_move(id, destination) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(character = %id, %destination, %error, "move refused");
                false
            }
        }
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Reverts the most recent recorded action. Returns `false` if there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = GameMemento::capture(&self.state);
        let Some(memento) = self.history.undo(current) else {
            return false;
        };
        memento.restore(&mut self.state);
        self.log(format!("Undo: back to turn {}", memento.turn().number));
        true
    }

    /// Re-applies the most recently undone action.
    pub fn redo(&mut self) -> bool {
        let current = GameMemento::capture(&self.state);
        let Some(memento) = self.history.redo(current) else {
            return false;
        };
        memento.restore(&mut self.state);
        self.log(format!("Redo: forward to turn {}", memento.turn().number));
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Runs `action` as one undoable step.
    ///
    /// Nested calls join the outermost step. The pre-action snapshot is
    /// pushed whenever the state changed, even if `action` then failed.
    pub(crate) fn checkpointed<T>(
        &mut self,
        action: impl FnOnce(&mut Self) -> Result<T, InvalidAction>,
    ) -> Result<T, InvalidAction> {
        if self.in_action {
            return action(self);
        }

        let before = GameMemento::capture(&self.state);
        self.in_action = true;
        let result = action(self);
        self.in_action = false;

        if !before.same_state_as(&GameMemento::capture(&self.state)) {
            self.history.push(before);
        }
        result
    }

    // ========================================================================
    // Randomness
    // ========================================================================

    /// Rolls a `percent` chance on behalf of `actor`, advancing the nonce.
    pub fn roll_chance(&mut self, actor: CharacterId, percent: u32) -> bool {
        let seed = compute_seed(self.config.rng_seed, self.nonce, actor.0, 0);
        self.nonce += 1;
        self.rng.chance(seed, percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CharacterClass, Stats};

    fn engine() -> GameEngine {
        GameEngine::new(Board::new(8, 8), GameConfig::default())
    }

    fn unit(name: &str, class: CharacterClass) -> Character {
        Character::new(name, class, Stats::new(50, 10, 2, 3), 20)
    }

    #[test]
    fn setup_rejects_out_of_bounds() {
        let mut engine = engine();
        let err = engine
            .add_character(Side::First, unit("a", CharacterClass::Warrior), Position::new(8, 0))
            .unwrap_err();
        assert_eq!(
            err,
            SetupError::OutOfBounds {
                position: Position::new(8, 0)
            }
        );
    }

    #[test]
    fn opponents_are_resolved_by_side() {
        let mut engine = engine();
        let a = engine
            .add_character(Side::First, unit("a", CharacterClass::Warrior), Position::new(0, 0))
            .unwrap();
        let b = engine
            .add_character(Side::Second, unit("b", CharacterClass::Mage), Position::new(4, 4))
            .unwrap();

        assert_eq!(engine.opponent_of(a), Some(Side::Second));
        assert_eq!(engine.living_opponents(b), vec![a]);
        assert_eq!(engine.opponent_of(CharacterId(9)), None);
    }

    #[test]
    fn move_updates_position_budget_and_history() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, unit("scout", CharacterClass::Archer), Position::new(0, 0))
            .unwrap();

        assert!(engine.move_character(id, Position::new(2, 2)));
        let scout = engine.character(id).unwrap();
        assert_eq!(scout.position(), Position::new(2, 2));
        assert_eq!(scout.budget().moves, 1);
        assert_eq!(engine.history().undo_depth(), 1);
        assert!(engine.combat_log().contains("scout moves from (0, 0) to (2, 2)"));
    }

    #[test]
    fn dead_character_move_fails_and_stays_put() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, unit("fallen", CharacterClass::Rogue), Position::new(3, 3))
            .unwrap();
        engine.apply_damage(id, 1_000, None).unwrap();

        assert_eq!(
            engine.try_move(id, Position::new(4, 4)),
            Err(InvalidAction::DeadActor {
                name: "fallen".into()
            })
        );
        assert!(!engine.move_character(id, Position::new(4, 4)));
        assert_eq!(engine.character(id).unwrap().position(), Position::new(3, 3));
        assert_eq!(engine.state().position_of(id), Some(Position::new(3, 3)));
    }

    #[test]
    fn rejected_move_records_no_history() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, unit("k", CharacterClass::Knight), Position::new(0, 0))
            .unwrap();

        assert!(!engine.move_character(id, Position::new(5, 5)));
        assert!(!engine.can_undo());
    }

    #[test]
    fn staying_in_place_is_not_a_move() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, unit("a", CharacterClass::Warrior), Position::new(3, 3))
            .unwrap();

        assert_eq!(
            engine.try_move(id, Position::new(3, 3)),
            Err(InvalidAction::Occupied {
                destination: Position::new(3, 3)
            })
        );
        assert!(!engine.move_character(id, Position::new(3, 3)));
        assert_eq!(engine.character(id).unwrap().budget().moves, 0);
        assert!(!engine.can_undo());
    }

    #[test]
    fn undo_redo_round_trip() {
        let mut engine = engine();
        let a = engine
            .add_character(Side::First, unit("a", CharacterClass::Rogue), Position::new(0, 0))
            .unwrap();
        let b = engine
            .add_character(Side::Second, unit("b", CharacterClass::Knight), Position::new(6, 6))
            .unwrap();

        assert!(engine.move_character(a, Position::new(2, 0)));
        engine.apply_damage(b, 15, None).unwrap();
        let before_undo = GameMemento::capture(engine.state());

        assert!(engine.undo());
        assert_eq!(engine.character(b).unwrap().stats().hp(), 50);
        assert_eq!(engine.character(a).unwrap().position(), Position::new(2, 0));

        assert!(engine.redo());
        assert!(GameMemento::capture(engine.state()).same_state_as(&before_undo));
        assert_eq!(engine.character(b).unwrap().stats().hp(), 35);
    }

    #[test]
    fn undo_restores_dead_character_to_life() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, unit("x", CharacterClass::Warrior), Position::new(0, 0))
            .unwrap();
        engine.apply_damage(id, 60, None).unwrap();
        assert!(!engine.character(id).unwrap().is_alive());

        assert!(engine.undo());
        assert!(engine.character(id).unwrap().is_alive());
        assert!(!engine.undo());
    }

    #[test]
    fn rolls_are_deterministic_per_seed() {
        let config = GameConfig::default().with_rng_seed(99);
        let mut first = GameEngine::new(Board::new(4, 4), config.clone());
        let mut second = GameEngine::new(Board::new(4, 4), config);

        let a: Vec<_> = (0..32).map(|_| first.roll_chance(CharacterId(1), 50)).collect();
        let b: Vec<_> = (0..32).map(|_| second.roll_chance(CharacterId(1), 50)).collect();
        assert_eq!(a, b);
        assert!(!first.roll_chance(CharacterId(1), 0));
        assert!(first.roll_chance(CharacterId(1), 100));
    }
}
