//! The standard targeted-action validators.

use super::{ActionCheck, ActionValidator};
use crate::error::InvalidAction;

/// The actor must be alive.
#[derive(Clone, Copy, Debug, Default)]
pub struct AliveValidator;

impl ActionValidator for AliveValidator {
    fn name(&self) -> &'static str {
        "alive"
    }

    fn validate(&self, check: &ActionCheck<'_>) -> Result<(), InvalidAction> {
        check.actor.state().ensure_can_act(check.actor.name())
    }
}

/// The target must exist, be alive, and not be the actor.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetValidator;

impl ActionValidator for TargetValidator {
    fn name(&self) -> &'static str {
        "target"
    }

    fn validate(&self, check: &ActionCheck<'_>) -> Result<(), InvalidAction> {
        let target = check.target()?;
        if target.id() == check.actor.id() {
            return Err(InvalidAction::SelfTarget {
                name: target.name().to_owned(),
            });
        }
        if !target.is_alive() {
            return Err(InvalidAction::DeadTarget {
                name: target.name().to_owned(),
            });
        }
        Ok(())
    }
}

/// The target must be on the opposing side.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostilityValidator;

impl ActionValidator for HostilityValidator {
    fn name(&self) -> &'static str {
        "hostility"
    }

    fn validate(&self, check: &ActionCheck<'_>) -> Result<(), InvalidAction> {
        let target = check.target()?;
        if target.side() == check.actor.side() {
            return Err(InvalidAction::FriendlyTarget {
                name: target.name().to_owned(),
            });
        }
        Ok(())
    }
}

/// Ranged classes reach up to their `range` stat, everyone else only
/// adjacent tiles. Distances are Chebyshev.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeValidator;

impl RangeValidator {
    pub fn reach(actor: &crate::state::Character) -> u32 {
        if actor.class().is_ranged() {
            actor.stats().range()
        } else {
            1
        }
    }
}

impl ActionValidator for RangeValidator {
    fn name(&self) -> &'static str {
        "range"
    }

    fn validate(&self, check: &ActionCheck<'_>) -> Result<(), InvalidAction> {
        let target = check.target()?;
        let range = Self::reach(check.actor);
        let distance = check.actor.position().distance_to(target.position());
        if distance > range {
            return Err(InvalidAction::OutOfRange { distance, range });
        }
        Ok(())
    }
}
