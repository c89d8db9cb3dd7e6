//! # Mystery Encounter Framework
//!
//! Definitions, option prompts, and runtime state for mystery encounters:
//! randomly triggered events that replace a normal wave battle with a
//! choice among several outcomes.
//!
//! An encounter has a two-phase lifecycle. When it is rolled, its
//! [`MysteryEncounter::on_init`] hook populates the run's
//! [`ActiveEncounter`] state (enemy party configurations, intro sprites).
//! When the player commits to one of the offered options,
//! [`MysteryEncounter::resolve_option`] applies that option's rewards and
//! delegates battle setup. There are no intermediate states.

pub mod mysterious_challengers;

use crate::battle::{EnemyPartyConfig, EnemyTeam};
use crate::rewards::RewardSpec;
use crate::run::RunState;
use crate::{EmberwildError, EmberwildResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The mystery encounters this slice of the game defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MysteryEncounterType {
    MysteriousChallengers,
}

impl MysteryEncounterType {
    /// Stable snake_case key, used as the dialogue namespace root.
    pub fn key(self) -> &'static str {
        match self {
            MysteryEncounterType::MysteriousChallengers => "mysterious_challengers",
        }
    }
}

/// Quality tier of an encounter, controlling how often it is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MysteryEncounterTier {
    Common,
    Great,
    Ultra,
    Rogue,
}

/// One line of encounter dialogue, referenced by localization key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Dot-separated localization key
    pub text_key: String,
}

impl DialogueLine {
    /// Creates a dialogue line for the given key.
    pub fn new(text_key: impl Into<String>) -> Self {
        Self {
            text_key: text_key.into(),
        }
    }
}

/// Sprite shown during the encounter's intro scene.
///
/// Derived at init time from the resolved trainer and gender, since the
/// atlas key depends on both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    /// Atlas key within the file root
    pub sprite_key: String,
    /// Sprite sheet root directory
    pub file_root: String,
    /// Whether the sprite casts a drop shadow
    pub has_shadow: bool,
    /// Tint strength applied while the encounter is unrevealed
    pub tint: f32,
}

impl SpriteConfig {
    /// Creates a front-facing, shadowed trainer sprite config.
    pub fn trainer(sprite_key: impl Into<String>) -> Self {
        Self {
            sprite_key: sprite_key.into(),
            file_root: "trainer".to_string(),
            has_shadow: true,
            tint: 1.0,
        }
    }
}

/// The player-facing prompt for one selectable encounter option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPrompt {
    /// Localization key for the option button
    pub button_label: String,
    /// Localization key for the option tooltip
    pub button_tooltip: String,
    /// Dialogue played once the option is committed
    pub selected_dialogue: Vec<DialogueLine>,
}

/// Immutable definition of one mystery encounter.
///
/// Built once by plain struct construction when the encounter is
/// registered; runtime state lives in [`ActiveEncounter`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterDef {
    /// Which encounter this defines
    pub encounter_type: MysteryEncounterType,
    /// Spawn-rate tier
    pub tier: MysteryEncounterTier,
    /// Inclusive wave range in which the encounter may spawn
    pub wave_range: (u32, u32),
    /// Dialogue shown when the encounter appears
    pub intro_dialogue: Vec<DialogueLine>,
    /// Dialogue shown after the encounter resolves
    pub outro_dialogue: Vec<DialogueLine>,
    /// Localization key for the encounter title
    pub title_key: String,
    /// Localization key for the encounter description
    pub description_key: String,
    /// Localization key for the option-select prompt
    pub query_key: String,
    /// The selectable options, in presentation order
    pub options: Vec<OptionPrompt>,
}

/// Runtime state of the active encounter occurrence.
///
/// Created fresh by `on_init` each time the encounter is rolled and
/// discarded when it resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveEncounter {
    /// Which encounter is active
    pub encounter_type: MysteryEncounterType,
    /// Pre-built enemy party configurations, one per battle option
    pub enemy_party_configs: Vec<EnemyPartyConfig>,
    /// Intro sprites derived from the resolved trainers
    pub sprite_configs: Vec<SpriteConfig>,
    /// Reward specification set by the chosen option
    pub rewards: Option<RewardSpec>,
    /// Experience multiplier applied to the resulting battle
    pub exp_multiplier: f64,
}

impl ActiveEncounter {
    /// Creates empty runtime state for a freshly rolled encounter.
    pub fn new(encounter_type: MysteryEncounterType) -> Self {
        Self {
            encounter_type,
            enemy_party_configs: Vec::new(),
            sprite_configs: Vec::new(),
            rewards: None,
            exp_multiplier: 1.0,
        }
    }
}

/// The plug-in contract every mystery encounter satisfies.
pub trait MysteryEncounter {
    /// The encounter's immutable definition.
    fn def(&self) -> &EncounterDef;

    /// Whether the encounter may spawn on the given wave.
    fn can_spawn(&self, wave_index: u32) -> bool {
        let (min, max) = self.def().wave_range;
        (min..=max).contains(&wave_index)
    }

    /// Populates the active encounter's runtime state.
    ///
    /// Returns `Ok(false)` if the encounter has no valid content for the
    /// current run state, in which case the caller must skip it.
    fn on_init(&self, state: &mut RunState) -> EmberwildResult<bool>;

    /// Resolves the player's committed option, returning the battle's
    /// enemy team.
    fn resolve_option(&self, state: &mut RunState, option_index: usize)
        -> EmberwildResult<EnemyTeam>;
}

/// Registry of mystery encounters, keyed by type.
#[derive(Default)]
pub struct EncounterRegistry {
    encounters: HashMap<MysteryEncounterType, Box<dyn MysteryEncounter>>,
}

impl EncounterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            encounters: HashMap::new(),
        }
    }

    /// Creates a registry with every encounter this crate defines.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(mysterious_challengers::MysteriousChallengers::new()));
        registry
    }

    /// Registers an encounter under its definition's type.
    pub fn register(&mut self, encounter: Box<dyn MysteryEncounter>) {
        self.encounters
            .insert(encounter.def().encounter_type, encounter);
    }

    /// Looks up an encounter by type.
    pub fn get(&self, encounter_type: MysteryEncounterType) -> EmberwildResult<&dyn MysteryEncounter> {
        self.encounters
            .get(&encounter_type)
            .map(|boxed| boxed.as_ref())
            .ok_or_else(|| {
                EmberwildError::EncounterFailed(format!(
                    "encounter {} is not registered",
                    encounter_type.key()
                ))
            })
    }

    /// Rolls an encounter of the given tier for the current wave.
    ///
    /// Picks uniformly among applicable encounters via the run's seeded
    /// stream, installs fresh runtime state, and runs the encounter's init
    /// hook. Returns `Ok(None)` when nothing is applicable or the chosen
    /// encounter reports it has no valid content.
    pub fn roll(
        &self,
        state: &mut RunState,
        tier: MysteryEncounterTier,
    ) -> EmberwildResult<Option<MysteryEncounterType>> {
        let mut candidates: Vec<MysteryEncounterType> = self
            .encounters
            .values()
            .filter(|enc| enc.def().tier == tier && enc.can_spawn(state.wave_index))
            .map(|enc| enc.def().encounter_type)
            .collect();
        // HashMap iteration order is arbitrary; sort so the stream draw
        // below is deterministic.
        candidates.sort_by_key(|encounter_type| encounter_type.key());

        let Some(&chosen) = state.rng.pick(&candidates) else {
            return Ok(None);
        };

        let encounter = self.get(chosen)?;
        state.begin_encounter(ActiveEncounter::new(chosen));
        log::info!(
            "Rolled mystery encounter {} on wave {}",
            chosen.key(),
            state.wave_index
        );

        if encounter.on_init(state)? {
            Ok(Some(chosen))
        } else {
            log::debug!("Encounter {} had no valid content; skipping", chosen.key());
            state.end_encounter();
            Ok(None)
        }
    }

    /// Number of registered encounters.
    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }
}
