//! Per-character numeric attributes.
//!
//! Every mutator clamps, so `0 <= hp <= max_hp` and `max_hp >= 1` hold no
//! matter what values callers pass in.

/// Mutable attribute holder for one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    hp: u32,
    max_hp: u32,
    attack: u32,
    defense: u32,
    range: u32,
}

impl Stats {
    /// Creates stats at full health.
    pub fn new(max_hp: u32, attack: u32, defense: u32, range: u32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            hp: max_hp,
            max_hp,
            attack,
            defense,
            range,
        }
    }

    pub const fn hp(&self) -> u32 {
        self.hp
    }

    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub const fn attack(&self) -> u32 {
        self.attack
    }

    pub const fn defense(&self) -> u32 {
        self.defense
    }

    pub const fn range(&self) -> u32 {
        self.range
    }

    /// Sets HP, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Sets the maximum HP (at least 1) and pulls current HP down if needed.
    pub fn set_max_hp(&mut self, max_hp: u32) {
        self.max_hp = max_hp.max(1);
        self.hp = self.hp.min(self.max_hp);
    }

    pub fn set_attack(&mut self, attack: u32) {
        self.attack = attack;
    }

    pub fn set_defense(&mut self, defense: u32) {
        self.defense = defense;
    }

    pub fn set_range(&mut self, range: u32) {
        self.range = range;
    }

    /// Removes up to `amount` HP, flooring at 0. Returns the HP actually lost.
    pub fn reduce_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores up to `amount` HP, capped at `max_hp`. Returns the HP gained.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }
}
