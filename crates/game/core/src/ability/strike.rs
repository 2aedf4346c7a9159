//! Single-hit damage abilities.

use super::{Ability, Cooldown, required_target};
use crate::engine::{GameEngine, StrikeReport};
use crate::error::InvalidAction;
use crate::state::{CharacterId, StatusEffect, StatusEffectKind};

/// One heavy melee blow at 150% attack.
#[derive(Clone, Debug)]
pub struct PowerStrike {
    cooldown: Cooldown,
}

impl PowerStrike {
    pub const MULTIPLIER_PCT: u32 = 150;

    pub fn new() -> Self {
        Self {
            cooldown: Cooldown::new(2),
        }
    }
}

impl Default for PowerStrike {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for PowerStrike {
    fn name(&self) -> &'static str {
        "Power Strike"
    }

    fn description(&self) -> &'static str {
        "A crushing blow dealing 150% attack damage."
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
        Ok(vec![engine.strike(user, target, Self::MULTIPLIER_PCT)?])
    }
}

/// 200% attack damage that leaves the target burning.
#[derive(Clone, Debug)]
pub struct Fireball {
    cooldown: Cooldown,
}

impl Fireball {
    pub const MULTIPLIER_PCT: u32 = 200;
    pub const BURN: StatusEffect = StatusEffect::new(StatusEffectKind::Burning, 3, 2);

    pub fn new() -> Self {
        Self {
            cooldown: Cooldown::new(3),
        }
    }
}

impl Default for Fireball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ability for Fireball {
    fn name(&self) -> &'static str {
        "Fireball"
    }

    fn description(&self) -> &'static str {
        "Hurls fire for 200% attack damage; the target then burns for 3 damage per turn for 2 turns."
    }

    fn mana_cost(&self) -> u32 {
        25
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
        let report = engine.strike(user, target, Self::MULTIPLIER_PCT)?;
        if report.landed() && engine.character(target)?.is_alive() {
            engine.add_status(target, Self::BURN)?;
        }
        Ok(vec![report])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Board, Character, CharacterClass, Position, Side, Stats};
    use crate::{GameConfig, InvalidAction};

    #[test]
    fn fireball_hits_at_range_and_burns() {
        let mut engine = GameEngine::new(Board::new(6, 6), GameConfig::default());
        let mage = Character::new("mage", CharacterClass::Mage, Stats::new(70, 14, 3, 3), 60)
            .with_ability(Fireball::new());
        let mage = engine
            .add_character(Side::First, mage, Position::new(0, 0))
            .unwrap();
        let target = engine
            .add_character(
                Side::Second,
                Character::new("brute", CharacterClass::Warrior, Stats::new(100, 12, 8, 1), 0),
                Position::new(3, 0),
            )
            .unwrap();

        engine.use_ability(mage, 0, Some(target)).unwrap();

        // 200% of 14 plus 1 base, minus 8 defense.
        let brute = engine.character(target).unwrap();
        assert_eq!(brute.stats().hp(), 79);
        assert_eq!(
            brute.status_effects().get(StatusEffectKind::Burning),
            Some(&Fireball::BURN)
        );
        assert_eq!(engine.character(mage).unwrap().mana().current(), 35);
    }

    #[test]
    fn power_strike_needs_adjacency() {
        let mut engine = GameEngine::new(Board::new(6, 6), GameConfig::default());
        let user = engine
            .add_character(
                Side::First,
                Character::new("w", CharacterClass::Warrior, Stats::new(100, 12, 8, 1), 30)
                    .with_ability(PowerStrike::new()),
                Position::new(0, 0),
            )
            .unwrap();
        let target = engine
            .add_character(
                Side::Second,
                Character::new("x", CharacterClass::Warrior, Stats::new(100, 12, 8, 1), 30),
                Position::new(2, 0),
            )
            .unwrap();

        assert!(matches!(
            engine.use_ability(user, 0, Some(target)),
            Err(InvalidAction::OutOfRange { .. })
        ));
        let user = engine.character(user).unwrap();
        assert!(user.ability(0).unwrap().is_ready());
        assert_eq!(user.mana().current(), 30);
    }

    #[test]
    fn fireball_description_matches_burn() {
        let burn = Fireball::BURN;
        let expected = format!(
            "burns for {} damage per turn for {} turns",
            burn.magnitude, burn.remaining_turns
        );
        assert!(Fireball::new().description().contains(&expected));
    }
}
