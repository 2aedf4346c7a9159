#![allow(dead_code)]

use tactics_core::{AiStrategy, CharacterId, GameEngine, Position, Targeting, TurnError};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Closes in on the nearest enemy and hits it, preferring ready abilities.
/// Out of reach, it buffs itself or defends.
#[derive(Clone, Copy, Debug, Default)]
pub struct Aggressor;

impl Aggressor {
    fn nearest_enemy(engine: &GameEngine, actor: CharacterId) -> Option<(CharacterId, Position)> {
        let from = engine.character(actor).ok()?.position();
        engine
            .living_opponents(actor)
            .into_iter()
            .filter_map(|id| Some((id, engine.character(id).ok()?.position())))
            .min_by_key(|(id, pos)| (pos.distance_to(from), *id))
    }

    fn ready_slot(engine: &GameEngine, actor: CharacterId, targeting: Targeting) -> Option<usize> {
        let me = engine.character(actor).ok()?;
        me.abilities()
            .find(|(_, ability)| ability.targeting() == targeting && ability.can_use(me))
            .map(|(slot, _)| slot)
    }
}

impl AiStrategy for Aggressor {
    fn take_turn(&mut self, engine: &mut GameEngine, actor: CharacterId) -> Result<(), TurnError> {
        let Some((target, target_pos)) = Self::nearest_enemy(engine, actor) else {
            return Ok(());
        };

        if engine.validate_action(actor, Some(target)).is_err() {
            let here = engine.character(actor)?.position();
            let step = engine
                .board()
                .tiles()
                .filter(|tile| engine.can_move(actor, *tile))
                .min_by_key(|tile| (tile.distance_to(target_pos), *tile));
            if let Some(step) = step.filter(|s| s.distance_to(target_pos) < here.distance_to(target_pos)) {
                engine.try_move(actor, step)?;
            }
        }

        if engine.validate_action(actor, Some(target)).is_ok() {
            match Self::ready_slot(engine, actor, Targeting::Enemy) {
                Some(slot) => engine.use_ability(actor, slot, Some(target)).map(|_| ())?,
                None => engine.attack(actor, target).map(|_| ())?,
            }
        } else {
            match Self::ready_slot(engine, actor, Targeting::SelfOnly) {
                Some(slot) => engine.use_ability(actor, slot, None).map(|_| ())?,
                None => engine.defend(actor).map(|_| ())?,
            }
        }
        Ok(())
    }
}
