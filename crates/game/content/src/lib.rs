//! Battle content and setup.
//!
//! This crate houses static content and the setup layer in front of
//! `tactics-core`:
//! - Class archetypes (starting stats, mana, ability loadouts)
//! - Skirmish setup (two rosters placed on a board)
//! - Game configuration (data-driven via TOML)
//! - Skirmish layouts (data-driven via RON)
//!
//! Content only builds characters and places them; the battle itself runs
//! entirely inside [`tactics_core::GameEngine`].

pub mod archetypes;
pub mod skirmish;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use archetypes::Archetype;
pub use skirmish::{Placement, SkirmishBuilder};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SkirmishLoader, SkirmishSpec};
