//! Class archetypes: starting stats, mana and ability loadouts.
//!
//! Archetypes are static content. Building one produces a fresh
//! [`Character`] with its own ability instances, so two characters of the
//! same class never share cooldowns.

use tactics_core::{
    Character, CharacterClass, DoubleShot, Evade, Fireball, Flurry, PowerStrike, Rally,
    ShieldWall, Stats,
};

/// Starting numbers for one class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Archetype {
    pub class: CharacterClass,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub range: u32,
    pub max_mana: u32,
}

impl Archetype {
    pub const WARRIOR: Self = Self {
        class: CharacterClass::Warrior,
        max_hp: 100,
        attack: 12,
        defense: 8,
        range: 1,
        max_mana: 30,
    };

    pub const KNIGHT: Self = Self {
        class: CharacterClass::Knight,
        max_hp: 120,
        attack: 10,
        defense: 10,
        range: 1,
        max_mana: 30,
    };

    pub const ARCHER: Self = Self {
        class: CharacterClass::Archer,
        max_hp: 80,
        attack: 10,
        defense: 5,
        range: 4,
        max_mana: 40,
    };

    pub const MAGE: Self = Self {
        class: CharacterClass::Mage,
        max_hp: 70,
        attack: 14,
        defense: 3,
        range: 3,
        max_mana: 60,
    };

    pub const ROGUE: Self = Self {
        class: CharacterClass::Rogue,
        max_hp: 75,
        attack: 11,
        defense: 4,
        range: 1,
        max_mana: 40,
    };

    pub const fn of(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Warrior => Self::WARRIOR,
            CharacterClass::Knight => Self::KNIGHT,
            CharacterClass::Archer => Self::ARCHER,
            CharacterClass::Mage => Self::MAGE,
            CharacterClass::Rogue => Self::ROGUE,
        }
    }

    pub fn stats(&self) -> Stats {
        Stats::new(self.max_hp, self.attack, self.defense, self.range)
    }

    /// Builds a full-health character with the class loadout.
    pub fn build(&self, name: impl Into<String>) -> Character {
        let character = Character::new(name, self.class, self.stats(), self.max_mana);
        match self.class {
            CharacterClass::Warrior => character
                .with_ability(PowerStrike::new())
                .with_ability(ShieldWall::new()),
            CharacterClass::Knight => character
                .with_ability(ShieldWall::new())
                .with_ability(Rally::new()),
            CharacterClass::Archer => character.with_ability(DoubleShot::new()),
            CharacterClass::Mage => character.with_ability(Fireball::new()),
            CharacterClass::Rogue => character
                .with_ability(Flurry::new())
                .with_ability(Evade::new()),
        }
    }
}

impl From<CharacterClass> for Archetype {
    fn from(class: CharacterClass) -> Self {
        Self::of(class)
    }
}
