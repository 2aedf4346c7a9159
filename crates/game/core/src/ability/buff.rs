//! Self-targeted buffs. None of these need a target.

use super::{Ability, Cooldown, Targeting};
use crate::engine::{GameEngine, StrikeReport};
use crate::error::InvalidAction;
use crate::state::{CharacterId, StatusEffect, StatusEffectKind};

/// Raises temporary defense until the user's next housekeeping.
#[derive(Clone, Debug)]
pub struct ShieldWall {
    cooldown: Cooldown,
}

impl ShieldWall {
    pub const DEFENSE_BONUS: u32 = 8;

    pub fn new() -> Self {
        Self {
            cooldown: Cooldown::new(3),
        }
    }
}

impl Default for ShieldWall {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for ShieldWall {
    fn name(&self) -> &'static str {
        "Shield Wall"
    }

    fn description(&self) -> &'static str {
        "Braces behind the shield for +8 defense until the next turn."
    }

    fn mana_cost(&self) -> u32 {
        10
    }

    fn targeting(&self) -> Targeting {
        Targeting::SelfOnly
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
        _target: Option<CharacterId>,
    ) -> Result<Vec<StrikeReport>, InvalidAction> {
        engine.grant_temporary_defense(user, Self::DEFENSE_BONUS)?;
        Ok(Vec::new())
    }
}

/// Grants a temporary chance to avoid incoming hits.
#[derive(Clone, Debug)]
pub struct Evade {
    cooldown: Cooldown,
}

impl Evade {
    pub const EVASION_PCT: u32 = 50;

    pub fn new() -> Self {
        Self {
            cooldown: Cooldown::new(3),
        }
    }
}

impl Default for Evade {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for Evade {
    fn name(&self) -> &'static str {
        "Evade"
    }

    fn description(&self) -> &'static str {
        "Gains a 50% chance to dodge hits until the next turn."
    }

    fn mana_cost(&self) -> u32 {
        10
    }

    fn targeting(&self) -> Targeting {
        Targeting::SelfOnly
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
        _target: Option<CharacterId>,
    ) -> Result<Vec<StrikeReport>, InvalidAction> {
        engine.grant_evasion(user, Self::EVASION_PCT)?;
        Ok(Vec::new())
    }
}

/// Empowers the user, raising base damage for two turns.
#[derive(Clone, Debug)]
pub struct Rally {
    cooldown: Cooldown,
}

impl Rally {
    pub const EMPOWER: StatusEffect = StatusEffect::new(StatusEffectKind::Empowered, 4, 2);

    pub fn new() -> Self {
        Self {
            cooldown: Cooldown::new(4),
        }
    }
}

impl Default for Rally {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for Rally {
    fn name(&self) -> &'static str {
        "Rally"
    }

    fn description(&self) -> &'static str {
        "A battle cry adding 4 base damage for 2 turns."
    }

    fn mana_cost(&self) -> u32 {
        15
    }

    fn targeting(&self) -> Targeting {
        Targeting::SelfOnly
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
        _target: Option<CharacterId>,
    ) -> Result<Vec<StrikeReport>, InvalidAction> {
        engine.add_status(user, Self::EMPOWER)?;
        Ok(Vec::new())
    }
}
