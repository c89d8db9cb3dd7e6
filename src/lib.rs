//! # Emberwild Mystery Encounters
//!
//! The mystery encounter system for a wave-based creature-battling roguelite.
//!
//! ## Architecture Overview
//!
//! Emberwild's encounter system is built from a few cooperating pieces:
//!
//! - **Run State**: the per-run context (wave index, biome, seeded random
//!   stream) that encounters read and write
//! - **Trainer System**: canonical trainer configurations and the party
//!   templates that shape their teams
//! - **Encounter Framework**: definitions, option prompts, and the runtime
//!   state of the currently active encounter
//! - **Battle Setup**: turning a resolved enemy party configuration into a
//!   concrete enemy team
//! - **Reward System**: declarative reward specifications granted after a
//!   won encounter
//!
//! ## Determinism
//!
//! All randomness flows through a single seeded stream per run. Encounter
//! resolution re-seeds that stream with a wave-derived offset for the
//! duration of team generation, then restores it, so identical runs roll
//! identical encounters and unrelated draws later in the run are never
//! perturbed.

pub mod battle;
pub mod biomes;
pub mod encounters;
pub mod rewards;
pub mod run;
pub mod trainers;
pub mod utils;

pub use battle::{
    init_battle_with_enemy_config, init_battle_with_seed_offset, EnemyMember, EnemyPartyConfig,
    EnemyTeam,
};
pub use biomes::{random_trainer_class, Biome, Species};
pub use encounters::mysterious_challengers::MysteriousChallengers;
pub use encounters::{
    ActiveEncounter, DialogueLine, EncounterDef, EncounterRegistry, MysteryEncounter,
    MysteryEncounterTier, MysteryEncounterType, OptionPrompt, SpriteConfig,
};
pub use rewards::{grant_rewards, set_encounter_rewards, RewardSpec, RewardTier, RewardType};
pub use run::RunState;
pub use trainers::{
    templates, PartyComposition, PartyMemberStrength, PartyTemplate, TrainerClass, TrainerConfig,
    TrainerRegistry,
};
pub use utils::rng::SeededRng;

/// Core error type for the Emberwild encounter system.
#[derive(thiserror::Error, Debug)]
pub enum EmberwildError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Run state is invalid for the requested operation
    #[error("Invalid run state: {0}")]
    InvalidState(String),

    /// An encounter option index or prompt was out of range
    #[error("Invalid encounter option: {0}")]
    InvalidOption(String),

    /// Trainer lookup or customization failed
    #[error("Unknown trainer: {0}")]
    UnknownTrainer(String),

    /// Encounter initialization or resolution failed
    #[error("Encounter failed: {0}")]
    EncounterFailed(String),

    /// Battle setup failed
    #[error("Battle setup failed: {0}")]
    BattleSetupFailed(String),
}

/// Result type used throughout the Emberwild codebase.
pub type EmberwildResult<T> = Result<T, EmberwildError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gameplay configuration constants.
pub mod config {
    /// First wave on which the Mysterious Challengers encounter may spawn
    pub const MYSTERIOUS_CHALLENGERS_MIN_WAVE: u32 = 10;

    /// Last wave on which the Mysterious Challengers encounter may spawn
    pub const MYSTERIOUS_CHALLENGERS_MAX_WAVE: u32 = 180;

    /// Waves per additional member in the hard challenger's party
    pub const HARD_PARTY_WAVE_DIVISOR: u32 = 20;

    /// Cap on the hard challenger's non-lead party members
    pub const HARD_PARTY_MAX_MEMBERS: u32 = 5;

    /// Total reward slots offered after a won encounter
    pub const REWARD_SLOTS: usize = 4;

    /// Experience multiplier applied when the brutal option is chosen
    pub const BRUTAL_EXP_MULTIPLIER: f64 = 0.9;
}
