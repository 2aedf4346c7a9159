//! Damage, healing and the combat actions built on them.
//!
//! [`GameEngine::apply_damage`] is the only way HP goes down. It is what
//! flips a character to Dead and fires the kill notification, exactly once.

use crate::ability::AbilityOutcome;
use crate::error::{DeadCharacter, InvalidAction};
use crate::state::{CharacterId, Housekeeping, Side, StatusEffect};

use super::{CombatEvent, GameEngine};

/// Basic attacks hit at 100% attack.
pub const BASIC_ATTACK_PCT: u32 = 100;

/// `round(attack * multiplier_pct / 100) + base_damage`, rounding half up.
pub fn raw_damage(attack: u32, multiplier_pct: u32, base_damage: u32) -> u32 {
    let scaled = (u64::from(attack) * u64::from(multiplier_pct) + 50) / 100;
    u32::try_from(scaled)
        .unwrap_or(u32::MAX)
        .saturating_add(base_damage)
}

/// Raw damage minus total defense, floored at zero.
pub fn effective_damage(raw: u32, defense: u32) -> u32 {
    raw.saturating_sub(defense)
}

/// HP actually removed by one damage application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageReport {
    pub target: CharacterId,
    pub dealt: u32,
    pub remaining_hp: u32,
    /// Set when this application was the fatal one.
    pub killed: Option<DeadCharacter>,
}

/// One hit of an attack or ability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrikeReport {
    pub attacker: CharacterId,
    pub target: CharacterId,
    pub raw: u32,
    pub effective: u32,
    pub evaded: bool,
    /// `None` when the hit was evaded or fully absorbed by defense.
    pub damage: Option<DamageReport>,
}

impl StrikeReport {
    /// True if the hit removed HP.
    pub fn landed(&self) -> bool {
        self.damage.is_some()
    }

    pub fn killed(&self) -> Option<&DeadCharacter> {
        self.damage.as_ref()?.killed.as_ref()
    }
}

impl GameEngine {
    /// Removes `amount` HP from `target`.
    ///
    /// Non-positive amounts and dead targets are ignored with a warning and
    /// yield `Ok(None)`. Reaching 0 HP flips the target to Dead, fires
    /// [`CombatEvent::CharacterKilled`] and reports the death in
    /// [`DamageReport::killed`]; the character stays in its roster.
    pub fn apply_damage(
        &mut self,
        target: CharacterId,
        amount: i32,
        source: Option<CharacterId>,
    ) -> Result<Option<DamageReport>, InvalidAction> {
        self.checkpointed(|engine| engine.deal_damage(target, amount, source))
    }

    pub(crate) fn deal_damage(
        &mut self,
        target: CharacterId,
        amount: i32,
        source: Option<CharacterId>,
    ) -> Result<Option<DamageReport>, InvalidAction> {
        let character = self.character(target)?;
        let name = character.name().to_owned();
        let side = character.side();

        let amount = match u32::try_from(amount) {
            Ok(amount) if amount > 0 => amount,
            _ => {
                tracing::warn!(%target, amount, "ignoring non-positive damage");
                return Ok(None);
            }
        };
        if !character.is_alive() {
            tracing::warn!(%target, amount, "ignoring damage to a dead character");
            return Ok(None);
        }

        let character = self
            .state
            .character_mut(target)
            .ok_or(InvalidAction::UnknownCharacter)?;
        let loss = character.lose_hp(amount);
        let remaining_hp = character.stats().hp();
        let max_hp = character.stats().max_hp();

        self.emit(CombatEvent::CharacterDamaged {
            target,
            source,
            amount: loss.lost,
            remaining_hp,
        });
        self.log(format!(
            "{name} takes {} damage ({remaining_hp}/{max_hp} HP)",
            loss.lost
        ));

        let killed = loss.killed.then(|| DeadCharacter { name, side });
        if let Some(death) = &killed {
            self.log(death.to_string());
            self.emit(CombatEvent::CharacterKilled {
                target,
                killer: source,
                death: death.clone(),
            });
        }

        Ok(Some(DamageReport {
            target,
            dealt: loss.lost,
            remaining_hp,
            killed,
        }))
    }

    /// Restores HP to a living character. Returns the HP gained.
    pub fn heal(&mut self, target: CharacterId, amount: u32) -> Result<u32, InvalidAction> {
        let character = self.character(target)?;
        if !character.is_alive() {
            return Err(InvalidAction::DeadTarget {
                name: character.name().to_owned(),
            });
        }

        self.checkpointed(|engine| {
            let character = engine
                .state
                .character_mut(target)
                .ok_or(InvalidAction::UnknownCharacter)?;
            let gained = character.gain_hp(amount);
            let line = format!(
                "{} recovers {gained} HP ({}/{} HP)",
                character.name(),
                character.stats().hp(),
                character.stats().max_hp()
            );
            engine.log(line);
            Ok(gained)
        })
    }

    /// Brings a dead character back with `hp` (at least 1).
    ///
    /// The only way from Dead to Alive. Fails if the character is alive or
    /// its tile has been taken in the meantime.
    pub fn revive(&mut self, target: CharacterId, hp: u32) -> Result<(), InvalidAction> {
        let character = self.character(target)?;
        if character.is_alive() {
            return Err(InvalidAction::AlreadyAlive {
                name: character.name().to_owned(),
            });
        }
        let position = character.position();
        if self.state.occupant_at(position).is_some() {
            return Err(InvalidAction::Occupied {
                destination: position,
            });
        }

        self.checkpointed(|engine| {
            let character = engine
                .state
                .character_mut(target)
                .ok_or(InvalidAction::UnknownCharacter)?;
            character.revive(hp);
            let hp = character.stats().hp();
            let line = format!("{} returns to the fight with {hp} HP", character.name());
            engine.log(line);
            engine.emit(CombatEvent::CharacterRevived { target, hp });
            Ok(())
        })
    }

    /// Resolves one hit of `multiplier_pct` attack from `attacker` on
    /// `target`, including the target's evasion roll.
    ///
    /// Building block for [`GameEngine::attack`] and abilities, which run the
    /// validator chain and open the history step first. Only a dead target is
    /// refused here.
    pub(crate) fn strike(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
        multiplier_pct: u32,
    ) -> Result<StrikeReport, InvalidAction> {
        let attacker_ref = self.character(attacker)?;
        let raw = raw_damage(
            attacker_ref.stats().attack(),
            multiplier_pct,
            attacker_ref.base_damage(),
        );
        let attacker_name = attacker_ref.name().to_owned();

        let target_ref = self.character(target)?;
        if !target_ref.is_alive() {
            return Err(InvalidAction::DeadTarget {
                name: target_ref.name().to_owned(),
            });
        }
        let effective = effective_damage(raw, target_ref.effective_defense());
        let evasion = target_ref.temporary_evasion();
        let target_name = target_ref.name().to_owned();

        let mut report = StrikeReport {
            attacker,
            target,
            raw,
            effective,
            evaded: false,
            damage: None,
        };

        if evasion > 0 && self.roll_chance(target, evasion) {
            report.evaded = true;
            self.log(format!("{target_name} evades {attacker_name}'s attack"));
            return Ok(report);
        }
        if effective == 0 {
            self.log(format!("{attacker_name}'s attack glances off {target_name}"));
            return Ok(report);
        }

        let amount = i32::try_from(effective).unwrap_or(i32::MAX);
        report.damage = self.deal_damage(target, amount, Some(attacker))?;
        Ok(report)
    }

    /// Basic attack: validator chain, then one hit at 100% attack.
    pub fn attack(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
    ) -> Result<StrikeReport, InvalidAction> {
        self.validate_action(attacker, Some(target))?;
        self.checkpointed(|engine| {
            let (attacker_name, target_name) = (
                engine.character(attacker)?.name().to_owned(),
                engine.character(target)?.name().to_owned(),
            );
            engine.log(format!("{attacker_name} attacks {target_name}"));
            let report = engine.strike(attacker, target, BASIC_ATTACK_PCT)?;
            if let Some(character) = engine.state.character_mut(attacker) {
                character.record_action();
            }
            Ok(report)
        })
    }

    /// Braces for `max(1, defense / 2)` temporary defense until the
    /// character's next housekeeping. Returns the bonus granted.
    pub fn defend(&mut self, id: CharacterId) -> Result<u32, InvalidAction> {
        self.validate_actor(id)?;
        self.checkpointed(|engine| {
            let character = engine
                .state
                .character_mut(id)
                .ok_or(InvalidAction::UnknownCharacter)?;
            let bonus = (character.stats().defense() / 2).max(1);
            character.add_temporary_defense(bonus);
            character.record_action();
            let line = format!("{} defends (+{bonus} defense)", character.name());
            engine.log(line);
            Ok(bonus)
        })
    }

    /// Activates the ability in `slot` of `user`.
    ///
    /// A cooling-down ability only logs and returns
    /// [`AbilityOutcome::NotReady`].
    pub fn use_ability(
        &mut self,
        user: CharacterId,
        slot: usize,
        target: Option<CharacterId>,
    ) -> Result<AbilityOutcome, InvalidAction> {
        self.checkpointed(|engine| {
            let mut ability = engine
                .state
                .character_mut(user)
                .ok_or(InvalidAction::UnknownCharacter)?
                .take_ability(slot)
                .ok_or(InvalidAction::UnknownAbility { slot })?;

            let outcome = ability.activate(engine, user, target);

            if let Some(character) = engine.state.character_mut(user) {
                character.restore_ability(slot, ability);
                if outcome.as_ref().is_ok_and(AbilityOutcome::is_resolved) {
                    character.record_action();
                }
            }
            outcome
        })
    }

    /// Deducts mana, failing without change if the pool is short.
    pub fn spend_mana(&mut self, id: CharacterId, cost: u32) -> Result<(), InvalidAction> {
        self.checkpointed(|engine| {
            engine
                .state
                .character_mut(id)
                .ok_or(InvalidAction::UnknownCharacter)?
                .mana_mut()
                .spend(cost)
        })
    }

    /// Applies a status effect. Returns `false` if the character's effect
    /// slots are full.
    pub fn add_status(&mut self, id: CharacterId, effect: StatusEffect) -> Result<bool, InvalidAction> {
        self.checkpointed(|engine| {
            let character = engine
                .state
                .character_mut(id)
                .ok_or(InvalidAction::UnknownCharacter)?;
            let added = character.add_status(effect);
            let name = character.name().to_owned();
            if added {
                engine.log(format!(
                    "{name} is {} for {} turns",
                    effect.kind, effect.remaining_turns
                ));
            } else {
                tracing::warn!(character = %id, kind = %effect.kind, "status slots full");
            }
            Ok(added)
        })
    }

    pub fn grant_temporary_defense(&mut self, id: CharacterId, bonus: u32) -> Result<(), InvalidAction> {
        self.checkpointed(|engine| {
            let character = engine
                .state
                .character_mut(id)
                .ok_or(InvalidAction::UnknownCharacter)?;
            character.add_temporary_defense(bonus);
            let line = format!("{} gains +{bonus} defense", character.name());
            engine.log(line);
            Ok(())
        })
    }

    pub fn grant_evasion(&mut self, id: CharacterId, percent: u32) -> Result<(), InvalidAction> {
        self.checkpointed(|engine| {
            let character = engine
                .state
                .character_mut(id)
                .ok_or(InvalidAction::UnknownCharacter)?;
            character.raise_temporary_evasion(percent);
            let line = format!(
                "{} readies to evade ({}% chance)",
                character.name(),
                character.temporary_evasion()
            );
            engine.log(line);
            Ok(())
        })
    }

    /// End-of-turn housekeeping for every character on `side`.
    ///
    /// Each call decrements cooldowns, regenerates mana and ticks status
    /// effects once; clearing buffs and the turn budget is idempotent.
    /// Periodic damage goes through the regular damage path.
    pub fn end_turn_housekeeping(&mut self, side: Side) -> Vec<(CharacterId, Housekeeping)> {
        let ids: Vec<CharacterId> = self.state.roster(side).map(|c| c.id()).collect();
        let regen = self.config.mana_regen_per_turn;
        let mut reports = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(character) = self.state.character_mut(id) else {
                continue;
            };
            let report = character.end_turn_housekeeping(regen);
            let name = character.name().to_owned();

            for kind in &report.status.expired {
                self.log(format!("{name} is no longer {kind}"));
            }
            if report.status.damage > 0 {
                let amount = i32::try_from(report.status.damage).unwrap_or(i32::MAX);
                if let Err(error) = self.deal_damage(id, amount, None) {
                    tracing::warn!(%id, %error, "periodic damage failed");
                }
            }
            reports.push((id, report));
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ability::{DoubleShot, Flurry, PowerStrike, ShieldWall};
    use crate::engine::EventTopic;
    use crate::state::{
        Board, Character, CharacterClass, Position, Stats, StatusEffectKind, TurnBudget,
    };
    use crate::GameConfig;

    fn engine() -> GameEngine {
        GameEngine::new(Board::new(10, 10), GameConfig::default())
    }

    fn warrior() -> Character {
        Character::new("warrior", CharacterClass::Warrior, Stats::new(100, 12, 8, 1), 30)
            .with_ability(PowerStrike::new())
            .with_ability(ShieldWall::new())
    }

    fn archer() -> Character {
        Character::new("archer", CharacterClass::Archer, Stats::new(80, 10, 5, 4), 40)
            .with_ability(DoubleShot::new())
    }

    fn kill_counter(engine: &mut GameEngine) -> Rc<RefCell<Vec<CharacterId>>> {
        let kills = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&kills);
        engine.subscribe(EventTopic::Combat, move |event: &CombatEvent| {
            if let CombatEvent::CharacterKilled { target, .. } = event {
                sink.borrow_mut().push(*target);
            }
        });
        kills
    }

    #[test]
    fn damage_formula_rounds_half_up() {
        assert_eq!(raw_damage(12, 100, 3), 15);
        assert_eq!(raw_damage(11, 150, 0), 17);
        assert_eq!(raw_damage(10, 80, 2), 10);
        assert_eq!(effective_damage(15, 20), 0);
    }

    #[test]
    fn melee_attack_on_adjacent_archer() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();
        let a = engine
            .add_character(Side::Second, archer(), Position::new(1, 0))
            .unwrap();

        let report = engine.attack(w, a).unwrap();
        let base = CharacterClass::Warrior.base_damage();
        let expected = (12 + base).saturating_sub(5);

        assert_eq!(report.effective, expected);
        assert_eq!(engine.character(a).unwrap().stats().hp(), 80 - expected);
        assert_eq!(engine.character(w).unwrap().stats().hp(), 100);
        assert_eq!(engine.character(w).unwrap().budget().actions, 1);
    }

    #[test]
    fn lethal_damage_kills_exactly_once() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();
        let kills = kill_counter(&mut engine);
        engine.state.character_mut(id).unwrap().stats_mut().set_hp(5);

        let report = engine.apply_damage(id, 10, None).unwrap().unwrap();
        assert_eq!(report.remaining_hp, 0);
        assert_eq!(report.dealt, 5);
        assert!(report.killed.is_some());
        assert!(!engine.character(id).unwrap().is_alive());

        assert_eq!(engine.apply_damage(id, 10, None).unwrap(), None);
        assert_eq!(*kills.borrow(), vec![id]);
        assert!(!engine.state().has_living(Side::First));
        assert_eq!(engine.state().roster(Side::First).count(), 1);
    }

    #[test]
    fn non_positive_damage_is_ignored() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();

        assert_eq!(engine.apply_damage(id, 0, None).unwrap(), None);
        assert_eq!(engine.apply_damage(id, -7, None).unwrap(), None);
        assert_eq!(engine.character(id).unwrap().stats().hp(), 100);
        assert!(!engine.can_undo());
    }

    #[test]
    fn invalid_attacks_leave_state_untouched() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();
        let a = engine
            .add_character(Side::Second, archer(), Position::new(5, 5))
            .unwrap();

        assert_eq!(
            engine.attack(w, a),
            Err(InvalidAction::OutOfRange {
                distance: 5,
                range: 1
            })
        );
        assert!(matches!(
            engine.attack(w, w),
            Err(InvalidAction::SelfTarget { .. })
        ));
        assert_eq!(engine.character(a).unwrap().stats().hp(), 80);
        assert!(!engine.can_undo());
    }

    #[test]
    fn heal_and_revive_rules() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();

        engine.apply_damage(id, 30, None).unwrap();
        assert_eq!(engine.heal(id, 50).unwrap(), 30);
        assert!(matches!(
            engine.revive(id, 10),
            Err(InvalidAction::AlreadyAlive { .. })
        ));

        engine.apply_damage(id, 500, None).unwrap();
        assert!(matches!(
            engine.heal(id, 50),
            Err(InvalidAction::DeadTarget { .. })
        ));
        engine.revive(id, 10).unwrap();
        let revived = engine.character(id).unwrap();
        assert!(revived.is_alive());
        assert_eq!(revived.stats().hp(), 10);
    }

    #[test]
    fn defend_grants_half_defense_until_housekeeping() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();

        assert_eq!(engine.defend(id).unwrap(), 4);
        assert_eq!(engine.character(id).unwrap().effective_defense(), 12);

        engine.end_turn_housekeeping(Side::First);
        assert_eq!(engine.character(id).unwrap().effective_defense(), 8);
    }

    #[test]
    fn ability_cools_down_and_costs_mana() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();
        let a = engine
            .add_character(Side::Second, archer(), Position::new(1, 1))
            .unwrap();

        let outcome = engine.use_ability(w, 0, Some(a)).unwrap();
        assert!(outcome.is_resolved());
        let user = engine.character(w).unwrap();
        assert_eq!(user.mana().current(), 20);
        assert_eq!(user.ability(0).unwrap().remaining_cooldown(), 2);
        // 150% of 12 rounds to 18, plus 3 base, minus 5 defense.
        assert_eq!(engine.character(a).unwrap().stats().hp(), 80 - 16);

        let again = engine.use_ability(w, 0, Some(a)).unwrap();
        assert_eq!(again, AbilityOutcome::NotReady { remaining: 2 });
        assert_eq!(engine.character(w).unwrap().mana().current(), 20);
    }

    #[test]
    fn missing_slot_and_short_mana_are_rejected() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();
        let a = engine
            .add_character(Side::Second, archer(), Position::new(1, 0))
            .unwrap();

        assert_eq!(
            engine.use_ability(w, 3, Some(a)),
            Err(InvalidAction::UnknownAbility { slot: 3 })
        );

        engine.spend_mana(w, 25).unwrap();
        assert_eq!(
            engine.use_ability(w, 0, Some(a)),
            Err(InvalidAction::InsufficientMana {
                required: 10,
                available: 5
            })
        );
        let user = engine.character(w).unwrap();
        assert!(user.ability(0).unwrap().is_ready());
        assert_eq!(engine.character(a).unwrap().stats().hp(), 80);
    }

    #[test]
    fn self_buff_needs_no_target() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();

        let outcome = engine.use_ability(w, 1, None).unwrap();
        assert_eq!(outcome, AbilityOutcome::Resolved { strikes: vec![] });
        assert_eq!(engine.character(w).unwrap().temporary_defense(), 8);
    }

    #[test]
    fn multi_hit_stops_at_death() {
        let mut engine = engine();
        let rogue = Character::new("rogue", CharacterClass::Rogue, Stats::new(75, 11, 4, 1), 40)
            .with_ability(Flurry::new());
        let r = engine
            .add_character(Side::First, rogue, Position::new(0, 0))
            .unwrap();
        let a = engine
            .add_character(Side::Second, archer(), Position::new(0, 1))
            .unwrap();
        let kills = kill_counter(&mut engine);
        // Each Flurry hit: round(11 * 0.6) = 7, plus 4 base, minus 5 defense.
        engine.state.character_mut(a).unwrap().stats_mut().set_hp(6);

        let AbilityOutcome::Resolved { strikes } = engine.use_ability(r, 0, Some(a)).unwrap() else {
            panic!("flurry should resolve");
        };
        assert_eq!(strikes.len(), 1);
        assert!(strikes[0].killed().is_some());
        assert_eq!(*kills.borrow(), vec![a]);
        assert_eq!(
            engine.character(r).unwrap().ability(0).unwrap().remaining_cooldown(),
            3
        );
    }

    #[test]
    fn housekeeping_semantics_per_call() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();
        let a = engine
            .add_character(Side::Second, archer(), Position::new(1, 0))
            .unwrap();

        engine.use_ability(w, 0, Some(a)).unwrap();
        engine.defend(w).unwrap();

        engine.end_turn_housekeeping(Side::First);
        let once = engine.character(w).unwrap();
        assert_eq!(once.temporary_defense(), 0);
        assert_eq!(once.ability(0).unwrap().remaining_cooldown(), 1);
        assert_eq!(once.mana().current(), 25);

        engine.end_turn_housekeeping(Side::First);
        let twice = engine.character(w).unwrap();
        assert_eq!(twice.temporary_defense(), 0);
        assert_eq!(twice.budget(), TurnBudget::default());
        assert_eq!(twice.ability(0).unwrap().remaining_cooldown(), 0);
        assert_eq!(twice.mana().current(), 30);
    }

    #[test]
    fn periodic_damage_uses_damage_path() {
        let mut engine = engine();
        let id = engine
            .add_character(Side::Second, archer(), Position::new(0, 0))
            .unwrap();
        let kills = kill_counter(&mut engine);
        engine
            .add_status(id, StatusEffect::new(StatusEffectKind::Burning, 3, 2))
            .unwrap();
        engine.state.character_mut(id).unwrap().stats_mut().set_hp(4);

        engine.end_turn_housekeeping(Side::Second);
        assert_eq!(engine.character(id).unwrap().stats().hp(), 1);
        engine.end_turn_housekeeping(Side::Second);
        assert!(!engine.character(id).unwrap().is_alive());
        assert_eq!(*kills.borrow(), vec![id]);
    }

    #[test]
    fn direct_mutators_are_single_undo_steps() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();

        engine.spend_mana(w, 20).unwrap();
        assert_eq!(engine.character(w).unwrap().mana().current(), 10);
        assert_eq!(engine.history().undo_depth(), 1);

        engine
            .add_status(w, StatusEffect::new(StatusEffectKind::Weakened, 2, 2))
            .unwrap();
        engine.grant_temporary_defense(w, 4).unwrap();
        engine.grant_evasion(w, 30).unwrap();
        assert_eq!(engine.history().undo_depth(), 4);

        assert!(engine.undo());
        assert_eq!(engine.character(w).unwrap().temporary_evasion(), 0);
        assert!(engine.undo());
        assert_eq!(engine.character(w).unwrap().temporary_defense(), 0);
        assert!(engine.undo());
        assert!(engine.character(w).unwrap().status_effects().is_empty());
        assert!(engine.undo());
        assert_eq!(engine.character(w).unwrap().mana().current(), 30);
        assert!(!engine.can_undo());
    }

    #[test]
    fn failed_mana_spend_records_nothing() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();

        assert!(matches!(
            engine.spend_mana(w, 31),
            Err(InvalidAction::InsufficientMana { .. })
        ));
        assert!(!engine.can_undo());
    }

    #[test]
    fn attack_on_ally_is_refused() {
        let mut engine = engine();
        let w = engine
            .add_character(Side::First, warrior(), Position::new(0, 0))
            .unwrap();
        let ally = engine
            .add_character(Side::First, archer(), Position::new(1, 1))
            .unwrap();

        assert!(matches!(
            engine.attack(w, ally),
            Err(InvalidAction::FriendlyTarget { .. })
        ));
        assert_eq!(engine.character(ally).unwrap().stats().hp(), 80);
        assert!(!engine.can_undo());
    }
}
