//! Abilities that land several hits in sequence.
//!
//! The target's life is re-checked before every hit, so no hit ever lands on
//! a character that an earlier hit already killed.

use super::{Ability, Cooldown, required_target, strike_sequence};
use crate::engine::{GameEngine, StrikeReport};
use crate::error::InvalidAction;
use crate::state::CharacterId;

/// Two quick arrows at 80% attack each.
#[derive(Clone, Debug)]
pub struct DoubleShot {
    cooldown: Cooldown,
}

impl DoubleShot {
    pub const HITS: u32 = 2;
    pub const MULTIPLIER_PCT: u32 = 80;

    pub fn new() -> Self {
        Self {
            cooldown: Cooldown::new(2),
        }
    }
}

impl Default for DoubleShot {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for DoubleShot {
    fn name(&self) -> &'static str {
        "Double Shot"
    }

    fn description(&self) -> &'static str {
        "Looses two arrows, each dealing 80% attack damage."
    }

    fn mana_cost(&self) -> u32 {
        10
    }

    fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    fn cooldown_mut(&mut self) -> &mut Cooldown {
        &mut self.cooldown
    }

    fn resolve(
        &self,
        engine: &mut GameEngine,
        user: CharacterId,
        target: Option<CharacterId>,
    ) -> Result<Vec<StrikeReport>, InvalidAction> {
        let target = required_target(target)?;
        strike_sequence(engine, user, target, Self::HITS, Self::MULTIPLIER_PCT)
    }
}

/// Three rapid stabs at 60% attack each.
#[derive(Clone, Debug)]
pub struct Flurry {
    cooldown: Cooldown,
}

impl Flurry {
    pub const HITS: u32 = 3;
    pub const MULTIPLIER_PCT: u32 = 60;

    pub fn new() -> Self {
        Self {
            cooldown: Cooldown::new(3),
        }
    }
}

impl Default for Flurry {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for Flurry {
    fn name(&self) -> &'static str {
        "Flurry"
    }

    fn description(&self) -> &'static str {
        "Three rapid strikes, each dealing 60% attack damage."
    }

    fn mana_cost(&self) -> u32 {
        15
    }

    fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    fn cooldown_mut(&mut self) -> &mut Cooldown {
        &mut self.cooldown
    }

    fn resolve(
        &self,
        engine: &mut GameEngine,
        user: CharacterId,
        target: Option<CharacterId>,
    ) -> Result<Vec<StrikeReport>, InvalidAction> {
        let target = required_target(target)?;
        strike_sequence(engine, user, target, Self::HITS, Self::MULTIPLIER_PCT)
    }
}
