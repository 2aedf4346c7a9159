//! Turn-based tactical combat rules.
//!
//! `tactics-core` defines the canonical battle rules: characters and their
//! stats, abilities with cooldowns and mana costs, action and movement
//! validation, turn orchestration and undo/redo history. All state mutation
//! during a battle flows through [`engine::GameEngine`]; setup layers only
//! build characters and place them on the board.
pub mod ability;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod rng;
pub mod state;
pub mod validation;

pub use ability::{
    Ability, AbilityOutcome, Cooldown, DoubleShot, Evade, Fireball, Flurry, PowerStrike, Rally,
    ShieldWall, Targeting,
};
pub use config::GameConfig;
pub use engine::{
    AiStrategy, BattleEnd, BattleOutcome, BattleSummary, CombatEvent, CombatListener, CombatLog,
    DamageReport, EventTopic, GameEngine, ListenerId, Player, StrategyPlayer, StrikeReport,
    TurnError, TurnManager,
};
pub use error::{DeadCharacter, ErrorSeverity, GameError, InvalidAction, SetupError};
pub use history::{CharacterSnapshot, GameCaretaker, GameMemento};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use state::{
    Board, Character, CharacterClass, CharacterId, CharacterState, GameState, Housekeeping,
    ManaPool, Position, Side, Stats, StatusEffect, StatusEffectKind, StatusEffects, TurnBudget,
    TurnState,
};
pub use validation::{
    ActionCheck, ActionValidator, AliveValidator, HostilityValidator, MovementValidator,
    RangeValidator, TargetValidator, ValidatorChain,
};
