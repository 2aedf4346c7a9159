//! Validation gates for targeted actions and movement.
//!
//! Targeted actions (basic attacks and enemy-targeted abilities) run through
//! an ordered [`ValidatorChain`] that stops at the first failure. Movement
//! has its own [`MovementValidator`] because it checks tiles, not targets.

mod action;
mod movement;

pub use action::{AliveValidator, HostilityValidator, RangeValidator, TargetValidator};
pub use movement::MovementValidator;

use crate::error::InvalidAction;
use crate::state::Character;

/// Participants of a targeted action under validation.
#[derive(Clone, Copy, Debug)]
pub struct ActionCheck<'a> {
    pub actor: &'a Character,
    pub target: Option<&'a Character>,
}

impl<'a> ActionCheck<'a> {
    pub fn new(actor: &'a Character, target: Option<&'a Character>) -> Self {
        Self { actor, target }
    }

    /// The target, or [`InvalidAction::MissingTarget`].
    pub fn target(&self) -> Result<&'a Character, InvalidAction> {
        self.target.ok_or(InvalidAction::MissingTarget)
    }
}

/// One rule in the chain.
pub trait ActionValidator: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, check: &ActionCheck<'_>) -> Result<(), InvalidAction>;
}

/// Ordered list of validators, run first to last.
pub struct ValidatorChain {
    validators: Vec<Box<dyn ActionValidator>>,
}

impl ValidatorChain {
    /// A chain that accepts everything.
    pub fn empty() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Alive, target, hostility, range.
    pub fn standard() -> Self {
        Self::empty()
            .with(AliveValidator)
            .with(TargetValidator)
            .with(HostilityValidator)
            .with(RangeValidator)
    }

    /// Appends a validator to the end of the chain.
    #[must_use]
    pub fn with(mut self, validator: impl ActionValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.validators.iter().map(|v| v.name())
    }

    /// Runs every validator in order, stopping at the first failure.
    pub fn validate(&self, check: &ActionCheck<'_>) -> Result<(), InvalidAction> {
        for validator in &self.validators {
            if let Err(error) = validator.validate(check) {
                tracing::debug!(
                    validator = validator.name(),
                    actor = check.actor.name(),
                    %error,
                    "action rejected"
                );
                return Err(error);
            }
        }
        Ok(())
    }
}

impl Default for ValidatorChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl core::fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
