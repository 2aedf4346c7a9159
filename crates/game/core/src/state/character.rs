//! Character aggregate: identity, stats, mana, abilities, status effects and
//! life state.
//!
//! Every HP-changing method here is crate-private. Outside the crate, HP only
//! moves through [`GameEngine`](crate::GameEngine), which is what guarantees
//! kill notifications and history snapshots.

use std::cell::Cell;

use arrayvec::ArrayVec;

use super::{CharacterId, Position, Side, Stats, StatusEffect, StatusEffects, StatusTick};
use crate::ability::Ability;
use crate::config::GameConfig;
use crate::error::InvalidAction;
use crate::state::StatusEffectKind;

/// Character archetype. Decides movement allowance, ranged-ness and base damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterClass {
    Warrior,
    Knight,
    Archer,
    Mage,
    Rogue,
}

impl CharacterClass {
    /// Maximum Chebyshev distance covered by one move.
    ///
    /// Melee classes step one tile, ranged scouts two, the elite mobile
    /// class three.
    pub const fn movement_allowance(self) -> u32 {
        match self {
            Self::Warrior | Self::Knight => 1,
            Self::Archer | Self::Mage => 2,
            Self::Rogue => 3,
        }
    }

    /// Ranged classes attack anywhere within their `range` stat; everyone
    /// else must be adjacent.
    pub const fn is_ranged(self) -> bool {
        matches!(self, Self::Archer | Self::Mage)
    }

    /// Flat damage added to every hit before defense is subtracted.
    pub const fn base_damage(self) -> u32 {
        match self {
            Self::Warrior => 3,
            Self::Knight => 2,
            Self::Archer => 2,
            Self::Mage => 1,
            Self::Rogue => 4,
        }
    }
}

/// Life state of a character.
///
/// Transitions happen only inside the engine's damage, revive and restore
/// paths; reading the state never changes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterState {
    Alive,
    Dead,
}

impl CharacterState {
    pub const fn from_hp(hp: u32) -> Self {
        if hp > 0 { Self::Alive } else { Self::Dead }
    }

    pub const fn can_act(self) -> bool {
        matches!(self, Self::Alive)
    }

    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Gate for attacks, moves and abilities.
    pub fn ensure_can_act(self, name: &str) -> Result<(), InvalidAction> {
        if self.can_act() {
            Ok(())
        } else {
            Err(InvalidAction::DeadActor {
                name: name.to_owned(),
            })
        }
    }
}

/// Mana pool. `current` never exceeds `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManaPool {
    current: u32,
    max: u32,
}

impl ManaPool {
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub fn set_current(&mut self, current: u32) {
        self.current = current.min(self.max);
    }

    /// Deducts `cost` or fails without touching the pool.
    pub fn spend(&mut self, cost: u32) -> Result<(), InvalidAction> {
        if self.current < cost {
            return Err(InvalidAction::InsufficientMana {
                required: cost,
                available: self.current,
            });
        }
        self.current -= cost;
        Ok(())
    }

    /// Restores up to `amount`, capped at `max`. Returns the mana gained.
    pub fn regenerate(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max - self.current);
        self.current += gained;
        gained
    }
}

/// Moves and actions a character has taken during the current turn.
///
/// Recorded by the engine, reset by housekeeping, never enforced by the
/// engine itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnBudget {
    pub moves: u32,
    pub actions: u32,
}

/// What one housekeeping pass did to a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Housekeeping {
    pub mana_regenerated: u32,
    pub status: StatusTick,
}

/// HP loss applied to a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HpLoss {
    pub lost: u32,
    pub killed: bool,
}

pub(crate) type AbilitySlots = ArrayVec<Option<Box<dyn Ability>>, { GameConfig::MAX_ABILITIES }>;

/// A combatant.
#[derive(Debug)]
pub struct Character {
    id: CharacterId,
    side: Side,
    name: String,
    class: CharacterClass,
    stats: Stats,
    /// Projection of the position held by `GameState`.
    position: Position,
    mana: ManaPool,
    abilities: AbilitySlots,
    status_effects: StatusEffects,
    state: CharacterState,
    temporary_defense: u32,
    /// Percent chance to avoid a hit, 0..=100.
    temporary_evasion: u32,
    budget: TurnBudget,
    base_damage: Cell<Option<u32>>,
}

impl Character {
    /// Creates a character at full HP and mana.
    ///
    /// Id, side and position are assigned when the character is added to a
    /// [`GameState`](super::GameState).
    pub fn new(name: impl Into<String>, class: CharacterClass, stats: Stats, max_mana: u32) -> Self {
        Self {
            id: CharacterId::default(),
            side: Side::First,
            name: name.into(),
            class,
            state: CharacterState::from_hp(stats.hp()),
            stats,
            position: Position::ORIGIN,
            mana: ManaPool::full(max_mana),
            abilities: ArrayVec::new(),
            status_effects: StatusEffects::new(),
            temporary_defense: 0,
            temporary_evasion: 0,
            budget: TurnBudget::default(),
            base_damage: Cell::new(None),
        }
    }

    /// Adds an ability to the next free slot.
    ///
    /// Abilities beyond [`GameConfig::MAX_ABILITIES`] are dropped with a
    /// warning.
    #[must_use]
    pub fn with_ability(mut self, ability: impl Ability + 'static) -> Self {
        if self.abilities.try_push(Some(Box::new(ability))).is_err() {
            tracing::warn!(character = %self.name, "ability slots full, ability dropped");
        }
        self
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Last position committed by the engine.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn mana(&self) -> &ManaPool {
        &self.mana
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    pub fn status_effects(&self) -> &StatusEffects {
        &self.status_effects
    }

    pub fn temporary_defense(&self) -> u32 {
        self.temporary_defense
    }

    pub fn temporary_evasion(&self) -> u32 {
        self.temporary_evasion
    }

    /// Defense including this turn's temporary bonus.
    pub fn effective_defense(&self) -> u32 {
        self.stats.defense() + self.temporary_defense
    }

    pub fn movement_allowance(&self) -> u32 {
        self.class.movement_allowance()
    }

    pub fn budget(&self) -> TurnBudget {
        self.budget
    }

    /// Flat damage added to every hit: class base adjusted by Empowered and
    /// Weakened effects. Cached until the next move, status change or
    /// restore.
    pub fn base_damage(&self) -> u32 {
        if let Some(cached) = self.base_damage.get() {
            return cached;
        }
        let value = (self.class.base_damage()
            + self.status_effects.magnitude(StatusEffectKind::Empowered))
        .saturating_sub(self.status_effects.magnitude(StatusEffectKind::Weakened));
        self.base_damage.set(Some(value));
        value
    }

    pub fn invalidate_cache(&self) {
        self.base_damage.set(None);
    }

    pub fn ability(&self, slot: usize) -> Option<&dyn Ability> {
        self.abilities.get(slot)?.as_deref()
    }

    /// Slot index and ability for every ability the character owns.
    pub fn abilities(&self) -> impl Iterator<Item = (usize, &dyn Ability)> {
        self.abilities
            .iter()
            .enumerate()
            .filter_map(|(slot, ability)| Some((slot, ability.as_deref()?)))
    }

    pub fn ability_slot(&self, name: &str) -> Option<usize> {
        self.abilities()
            .find(|(_, ability)| ability.name() == name)
            .map(|(slot, _)| slot)
    }

    // ========================================================================
    // Crate-private mutation
    // ========================================================================

    pub(crate) fn assign(&mut self, id: CharacterId, side: Side, position: Position) {
        self.id = id;
        self.side = side;
        self.position = position;
    }

    pub(crate) fn sync_position(&mut self, position: Position) {
        if self.position != position {
            self.position = position;
            self.invalidate_cache();
        }
    }

    pub(crate) fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    pub(crate) fn mana_mut(&mut self) -> &mut ManaPool {
        &mut self.mana
    }

    pub(crate) fn take_ability(&mut self, slot: usize) -> Option<Box<dyn Ability>> {
        self.abilities.get_mut(slot)?.take()
    }

    pub(crate) fn restore_ability(&mut self, slot: usize, ability: Box<dyn Ability>) {
        if let Some(entry) = self.abilities.get_mut(slot) {
            *entry = Some(ability);
        }
    }

    pub(crate) fn add_status(&mut self, effect: StatusEffect) -> bool {
        self.invalidate_cache();
        self.status_effects.add(effect)
    }

    pub(crate) fn add_temporary_defense(&mut self, bonus: u32) {
        self.temporary_defense += bonus;
    }

    pub(crate) fn raise_temporary_evasion(&mut self, percent: u32) {
        self.temporary_evasion = self.temporary_evasion.max(percent.min(100));
    }

    pub(crate) fn record_move(&mut self) {
        self.budget.moves += 1;
    }

    pub(crate) fn record_action(&mut self) {
        self.budget.actions += 1;
    }

    /// Removes HP and flips Alive to Dead when it reaches zero.
    pub(crate) fn lose_hp(&mut self, amount: u32) -> HpLoss {
        let lost = self.stats.reduce_hp(amount);
        let killed = self.state.is_alive() && self.stats.hp() == 0;
        if killed {
            self.state = CharacterState::Dead;
        }
        HpLoss { lost, killed }
    }

    /// Restores HP on a living character. Returns the HP gained.
    pub(crate) fn gain_hp(&mut self, amount: u32) -> u32 {
        self.stats.restore_hp(amount)
    }

    /// Brings a dead character back with `hp` (at least 1) and no lingering
    /// effects.
    pub(crate) fn revive(&mut self, hp: u32) {
        self.stats.set_hp(hp.max(1));
        self.status_effects.clear();
        self.temporary_defense = 0;
        self.temporary_evasion = 0;
        self.state = CharacterState::Alive;
        self.invalidate_cache();
    }

    /// Overwrites snapshotted attributes. Life state follows the restored HP.
    pub(crate) fn restore(&mut self, stats: Stats, mana: u32) {
        self.stats = stats;
        self.mana.set_current(mana);
        self.state = CharacterState::from_hp(stats.hp());
        self.invalidate_cache();
    }

    /// Overwrites temporary buffs and status effects.
    pub(crate) fn restore_effects(&mut self, defense: u32, evasion: u32, effects: &[StatusEffect]) {
        self.temporary_defense = defense;
        self.temporary_evasion = evasion;
        self.status_effects.clear();
        for effect in effects {
            self.status_effects.add(*effect);
        }
        self.invalidate_cache();
    }

    /// Clears per-turn buffs and the turn budget. Idempotent.
    pub(crate) fn clear_turn_buffs(&mut self) {
        self.temporary_defense = 0;
        self.temporary_evasion = 0;
        self.budget = TurnBudget::default();
    }

    /// End-of-turn housekeeping.
    ///
    /// Every call decrements each cooldown by one, regenerates mana and ticks
    /// status effects; clearing buffs and the budget is idempotent. Periodic
    /// damage is only reported here and must be routed through the engine.
    /// Dead characters only have their buffs cleared.
    pub(crate) fn end_turn_housekeeping(&mut self, mana_regen: u32) -> Housekeeping {
        self.clear_turn_buffs();
        if !self.is_alive() {
            return Housekeeping::default();
        }

        for ability in self.abilities.iter_mut().flatten() {
            ability.reduce_cooldown();
        }
        let mana_regenerated = self.mana.regenerate(mana_regen);
        let status = self.status_effects.tick();
        if !status.expired.is_empty() {
            self.invalidate_cache();
        }

        Housekeeping {
            mana_regenerated,
            status,
        }
    }
}
