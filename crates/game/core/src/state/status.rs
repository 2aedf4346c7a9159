//! Status effect system for characters.
//!
//! Status effects are temporary conditions that either tick damage every
//! turn or shift a character's base damage. Durations count housekeeping
//! passes: an effect applied with `turns = 2` survives two passes.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// A single status effect with a remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Damage per tick for periodic effects, base-damage shift otherwise.
    pub magnitude: u32,
    pub remaining_turns: u32,
}

impl StatusEffect {
    pub const fn new(kind: StatusEffectKind, magnitude: u32, turns: u32) -> Self {
        Self {
            kind,
            magnitude,
            remaining_turns: turns,
        }
    }
}

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Fire damage every turn.
    Burning,

    /// Poison damage every turn.
    Poisoned,

    /// Base damage raised by the magnitude.
    Empowered,

    /// Base damage lowered by the magnitude.
    Weakened,
}

impl StatusEffectKind {
    /// Returns true for effects that deal damage on every tick.
    pub const fn is_periodic(self) -> bool {
        matches!(self, Self::Burning | Self::Poisoned)
    }
}

/// Outcome of one status tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Total periodic damage due this tick.
    pub damage: u32,
    /// Kinds that ran out during this tick.
    pub expired: Vec<StatusEffectKind>,
}

/// Active status effects on a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Adds a status effect.
    ///
    /// If the kind is already present, the stronger magnitude and the longer
    /// duration are kept. When the set is full the new effect is dropped and
    /// `false` is returned.
    pub fn add(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            existing.remaining_turns = existing.remaining_turns.max(effect.remaining_turns);
            return true;
        }
        self.effects.try_push(effect).is_ok()
    }

    /// Sum of magnitudes of all active effects of `kind`.
    pub fn magnitude(&self, kind: StatusEffectKind) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.magnitude)
            .sum()
    }

    /// Collects periodic damage, then decrements durations and drops expired
    /// effects.
    pub fn tick(&mut self) -> StatusTick {
        let mut tick = StatusTick::default();
        for effect in self.effects.iter_mut() {
            if effect.kind.is_periodic() {
                tick.damage += effect.magnitude;
            }
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            if effect.remaining_turns == 0 {
                tick.expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining_turns > 0);
        tick
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplying_keeps_strongest_and_longest() {
        let mut effects = StatusEffects::new();
        effects.add(StatusEffect::new(StatusEffectKind::Burning, 3, 1));
        effects.add(StatusEffect::new(StatusEffectKind::Burning, 2, 4));

        let burning = effects.get(StatusEffectKind::Burning).copied();
        assert_eq!(
            burning,
            Some(StatusEffect::new(StatusEffectKind::Burning, 3, 4))
        );
        assert_eq!(effects.iter().count(), 1);
    }

    #[test]
    fn tick_collects_periodic_damage_and_expires() {
        let mut effects = StatusEffects::new();
        effects.add(StatusEffect::new(StatusEffectKind::Burning, 3, 2));
        effects.add(StatusEffect::new(StatusEffectKind::Poisoned, 2, 1));
        effects.add(StatusEffect::new(StatusEffectKind::Empowered, 4, 1));

        let first = effects.tick();
        assert_eq!(first.damage, 5);
        assert_eq!(
            first.expired,
            vec![StatusEffectKind::Poisoned, StatusEffectKind::Empowered]
        );

        let second = effects.tick();
        assert_eq!(second.damage, 3);
        assert_eq!(second.expired, vec![StatusEffectKind::Burning]);
        assert!(effects.is_empty());
    }

    #[test]
    fn repeated_kind_merges_instead_of_taking_a_slot() {
        let mut effects = StatusEffects::new();
        assert!(effects.add(StatusEffect::new(StatusEffectKind::Weakened, 1, 1)));
        assert!(effects.add(StatusEffect::new(StatusEffectKind::Weakened, 2, 1)));
        assert_eq!(effects.iter().count(), 1);
        assert_eq!(effects.magnitude(StatusEffectKind::Weakened), 2);
    }
}
