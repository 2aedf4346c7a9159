/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Hard ceiling on turn attempts in a single battle.
    ///
    /// Failed turns count against this limit, so a player that keeps failing
    /// cannot stall the battle forever.
    pub max_turns: u64,

    /// Number of snapshots retained on each of the undo and redo stacks.
    pub history_depth: usize,

    /// Mana restored to every character by end-of-turn housekeeping.
    pub mana_regen_per_turn: u32,

    /// Base seed for evasion rolls.
    pub rng_seed: u64,

    /// Number of combat log lines kept in memory.
    pub log_capacity: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ABILITIES: usize = 4;
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u64 = 200;
    pub const DEFAULT_HISTORY_DEPTH: usize = 10;
    pub const DEFAULT_MANA_REGEN: u32 = 5;
    pub const DEFAULT_LOG_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            history_depth: Self::DEFAULT_HISTORY_DEPTH,
            mana_regen_per_turn: Self::DEFAULT_MANA_REGEN,
            rng_seed: 0,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
        }
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u64) -> Self {
        self.max_turns = max_turns;
        self
    }

    #[must_use]
    pub fn with_history_depth(mut self, history_depth: usize) -> Self {
        self.history_depth = history_depth;
        self
    }

    #[must_use]
    pub fn with_mana_regen(mut self, mana_regen_per_turn: u32) -> Self {
        self.mana_regen_per_turn = mana_regen_per_turn;
        self
    }

    #[must_use]
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    #[must_use]
    pub fn with_log_capacity(mut self, log_capacity: usize) -> Self {
        self.log_capacity = log_capacity;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
