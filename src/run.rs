//! # Run State Module
//!
//! The per-run context that encounters read and write: current wave,
//! biome, the seeded random stream, the canonical trainer table, and the
//! runtime state of whichever mystery encounter is active.

use crate::biomes::Biome;
use crate::encounters::ActiveEncounter;
use crate::trainers::TrainerRegistry;
use crate::utils::rng::SeededRng;
use crate::{EmberwildError, EmberwildResult};
use serde::{Deserialize, Serialize};

/// Central per-run state.
///
/// # Examples
///
/// ```
/// use emberwild::{Biome, RunState};
///
/// let state = RunState::new(12345, 50, Biome::Meadow);
/// assert_eq!(state.wave_index, 50);
/// assert!(state.active_encounter.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Current wave index within the run
    pub wave_index: u32,
    /// Biome the current wave takes place in
    pub biome: Biome,
    /// The run's seeded random stream
    pub rng: SeededRng,
    /// Canonical trainer configurations
    pub trainers: TrainerRegistry,
    /// Runtime state of the active mystery encounter, if one is rolled
    pub active_encounter: Option<ActiveEncounter>,
}

impl RunState {
    /// Creates a run state at the given wave with a fresh seeded stream.
    pub fn new(seed: u64, wave_index: u32, biome: Biome) -> Self {
        Self {
            wave_index,
            biome,
            rng: SeededRng::new(seed),
            trainers: TrainerRegistry::new(),
            active_encounter: None,
        }
    }

    /// Installs a freshly rolled encounter as the active one.
    ///
    /// Replaces any previous encounter state; encounter state never
    /// outlives the occurrence that created it.
    pub fn begin_encounter(&mut self, encounter: ActiveEncounter) {
        self.active_encounter = Some(encounter);
    }

    /// Clears the active encounter after it resolves.
    pub fn end_encounter(&mut self) {
        self.active_encounter = None;
    }

    /// The active encounter, or an error if none is in progress.
    pub fn active_encounter(&self) -> EmberwildResult<&ActiveEncounter> {
        self.active_encounter
            .as_ref()
            .ok_or_else(|| EmberwildError::InvalidState("no active encounter".to_string()))
    }

    /// Mutable access to the active encounter.
    pub fn active_encounter_mut(&mut self) -> EmberwildResult<&mut ActiveEncounter> {
        self.active_encounter
            .as_mut()
            .ok_or_else(|| EmberwildError::InvalidState("no active encounter".to_string()))
    }
}
