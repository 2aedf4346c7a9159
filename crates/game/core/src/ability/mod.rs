//! Cooldown- and mana-gated abilities.
//!
//! An [`Ability`] is a pluggable definition: it names itself, declares its
//! cost and targeting, owns its [`Cooldown`], and describes its effect in
//! [`Ability::resolve`]. The shared [`Ability::activate`] wraps every
//! ability in the same gate:
//!
//! ```text
//! user dead?        → DeadActor
//! not ready?        → log, no-op
//! validate          → action validator chain for targeted abilities
//! spend mana        → InsufficientMana on failure, nothing changed
//! start cooldown    → before any hit, so partial sequences still cool down
//! resolve           → hits go through the engine's strike and damage paths
//! ```
//!
//! Each character holds its own ability instances; nothing is shared.

mod buff;
mod multi_hit;
mod strike;

use core::fmt;

pub use buff::{Evade, Rally, ShieldWall};
pub use multi_hit::{DoubleShot, Flurry};
pub use strike::{Fireball, PowerStrike};

use crate::engine::{GameEngine, StrikeReport};
use crate::error::InvalidAction;
use crate::state::{Character, CharacterId};

/// Cooldown counter: `remaining` is always within `[0, cap]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    cap: u32,
    remaining: u32,
}

impl Cooldown {
    /// A ready cooldown with the given cap.
    pub const fn new(cap: u32) -> Self {
        Self { cap, remaining: 0 }
    }

    pub const fn cap(&self) -> u32 {
        self.cap
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Sets `remaining` to the cap.
    pub fn start(&mut self) {
        self.remaining = self.cap;
    }

    /// Counts down by one, stopping at zero.
    pub fn reduce(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Who an ability may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Targeting {
    /// A living opponent that passes the full validator chain.
    Enemy,
    /// The user; no target is needed and any given target is ignored.
    SelfOnly,
}

/// Result of [`Ability::activate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// The ability was still cooling down; nothing happened.
    NotReady { remaining: u32 },
    /// The ability resolved. `strikes` lists hits in order and is empty for
    /// self-buffs.
    Resolved { strikes: Vec<StrikeReport> },
}

impl AbilityOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// A named, cooldown-gated, mana-gated combat action.
pub trait Ability: fmt::Debug {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn mana_cost(&self) -> u32;

    fn targeting(&self) -> Targeting {
        Targeting::Enemy
    }

    fn cooldown(&self) -> &Cooldown;

    fn cooldown_mut(&mut self) -> &mut Cooldown;

    /// Applies the ability's effect. Called by [`Ability::activate`] after
    /// validation, mana payment and cooldown start.
    ///
    /// `target` is `Some` and validated for [`Targeting::Enemy`] abilities.
    fn resolve(
        &self,
        engine: &mut GameEngine,
        user: CharacterId,
        target: Option<CharacterId>,
    ) -> Result<Vec<StrikeReport>, InvalidAction>;

    fn is_ready(&self) -> bool {
        self.cooldown().is_ready()
    }

    fn remaining_cooldown(&self) -> u32 {
        self.cooldown().remaining()
    }

    fn reduce_cooldown(&mut self) {
        self.cooldown_mut().reduce();
    }

    fn can_use(&self, actor: &Character) -> bool {
        self.is_ready() && actor.mana().current() >= self.mana_cost()
    }

    /// Runs the ability through the shared gate.
    ///
    /// A dead user fails with [`InvalidAction::DeadActor`]. Otherwise it never
    /// fails because of the cooldown: an ability that is not ready only logs
    /// and returns [`AbilityOutcome::NotReady`].
    fn activate(
        &mut self,
        engine: &mut GameEngine,
        user: CharacterId,
        target: Option<CharacterId>,
    ) -> Result<AbilityOutcome, InvalidAction> {
        let user_name = engine.character(user)?.name().to_owned();
        engine.validate_actor(user)?;

        if !self.is_ready() {
            let remaining = self.remaining_cooldown();
            engine.log(format!(
                "{user_name}'s {} is not ready ({remaining} turns remaining)",
                self.name()
            ));
            return Ok(AbilityOutcome::NotReady { remaining });
        }

        let target = match self.targeting() {
            Targeting::Enemy => Some(engine.validate_action(user, target)?),
            Targeting::SelfOnly => None,
        };

        engine.spend_mana(user, self.mana_cost())?;
        self.cooldown_mut().start();
        engine.log(format!("{user_name} uses {}", self.name()));

        let strikes = self.resolve(engine, user, target)?;
        Ok(AbilityOutcome::Resolved { strikes })
    }
}

/// Lands up to `hits` strikes of `multiplier_pct` each on `target`, stopping
/// as soon as the target is dead.
///
/// An interruption after hit N leaves exactly N hits applied.
pub(crate) fn strike_sequence(
    engine: &mut GameEngine,
    user: CharacterId,
    target: CharacterId,
    hits: u32,
    multiplier_pct: u32,
) -> Result<Vec<StrikeReport>, InvalidAction> {
    let mut strikes = Vec::with_capacity(hits as usize);
    for _ in 0..hits {
        if !engine.character(target)?.is_alive() {
            break;
        }
        strikes.push(engine.strike(user, target, multiplier_pct)?);
    }
    Ok(strikes)
}

/// Extracts the validated target of an [`Targeting::Enemy`] ability.
pub(crate) fn required_target(target: Option<CharacterId>) -> Result<CharacterId, InvalidAction> {
    target.ok_or(InvalidAction::MissingTarget)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_counts_down_to_ready() {
        let mut cooldown = Cooldown::new(3);
        assert!(cooldown.is_ready());

        cooldown.start();
        assert_eq!(cooldown.remaining(), 3);
        assert!(!cooldown.is_ready());

        for _ in 0..3 {
            cooldown.reduce();
        }
        assert!(cooldown.is_ready());

        cooldown.reduce();
        assert_eq!(cooldown.remaining(), 0);
    }

    #[test]
    fn zero_cap_is_always_ready() {
        let mut cooldown = Cooldown::new(0);
        cooldown.start();
        assert!(cooldown.is_ready());
    }
}
