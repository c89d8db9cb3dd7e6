//! # Mysterious Challengers Encounter
//!
//! A Great-tier mystery encounter offering three escalating trainer
//! battles with escalating rewards: a normal biome trainer, a hardened
//! trainer with a wave-scaled party behind a stronger lead, and a warden
//! fielding a full six-member champion-grade team.

use crate::battle::{init_battle_with_seed_offset, EnemyPartyConfig, EnemyTeam};
use crate::biomes::random_trainer_class;
use crate::config::{
    BRUTAL_EXP_MULTIPLIER, HARD_PARTY_MAX_MEMBERS, HARD_PARTY_WAVE_DIVISOR,
    MYSTERIOUS_CHALLENGERS_MAX_WAVE, MYSTERIOUS_CHALLENGERS_MIN_WAVE,
};
use crate::encounters::{
    DialogueLine, EncounterDef, MysteryEncounter, MysteryEncounterTier, MysteryEncounterType,
    OptionPrompt, SpriteConfig,
};
use crate::rewards::{set_encounter_rewards, RewardSpec, RewardTier, RewardType};
use crate::run::RunState;
use crate::trainers::templates;
use crate::{EmberwildError, EmberwildResult};

/// Dialogue namespace for this encounter.
const NAMESPACE: &str = "mystery_encounter.mysterious_challengers";

/// Seed-offset factors per option, chosen so no two options (or the
/// unoffset stream) can generate colliding teams on the same wave.
const SEED_OFFSET_FACTORS: [u64; 3] = [10, 100, 1_000];

/// The Mysterious Challengers encounter.
pub struct MysteriousChallengers {
    def: EncounterDef,
}

impl MysteriousChallengers {
    /// Builds the encounter with its static definition.
    pub fn new() -> Self {
        let options = (1..=3)
            .map(|index| OptionPrompt {
                button_label: format!("{NAMESPACE}.option_{index}_label"),
                button_tooltip: format!("{NAMESPACE}.option_{index}_tooltip"),
                selected_dialogue: vec![DialogueLine::new(format!(
                    "{NAMESPACE}.option_selected_message"
                ))],
            })
            .collect();

        Self {
            def: EncounterDef {
                encounter_type: MysteryEncounterType::MysteriousChallengers,
                tier: MysteryEncounterTier::Great,
                wave_range: (
                    MYSTERIOUS_CHALLENGERS_MIN_WAVE,
                    MYSTERIOUS_CHALLENGERS_MAX_WAVE,
                ),
                intro_dialogue: vec![DialogueLine::new(format!("{NAMESPACE}.intro_message"))],
                outro_dialogue: vec![DialogueLine::new(format!("{NAMESPACE}.outro_win"))],
                title_key: format!("{NAMESPACE}.title"),
                description_key: format!("{NAMESPACE}.description"),
                query_key: format!("{NAMESPACE}.query"),
                options,
            },
        }
    }

    /// Non-lead party size for the hard challenger at the given wave:
    /// one member per twenty waves, at least one, capped at five.
    fn hard_party_members(wave_index: u32) -> u32 {
        wave_index
            .div_ceil(HARD_PARTY_WAVE_DIVISOR)
            .clamp(1, HARD_PARTY_MAX_MEMBERS)
    }
}

impl Default for MysteriousChallengers {
    fn default() -> Self {
        Self::new()
    }
}

impl MysteryEncounter for MysteriousChallengers {
    fn def(&self) -> &EncounterDef {
        &self.def
    }

    fn on_init(&self, state: &mut RunState) -> EmberwildResult<bool> {
        let wave_index = state.wave_index;
        let biome = state.biome;

        // Normal: a random biome trainer with its default party.
        let normal_class = random_trainer_class(biome, &mut state.rng, false)?;
        let normal_trainer = state.trainers.get(normal_class)?.clone();
        let normal_female = normal_trainer.has_genders && state.rng.rand_bool();
        let normal_sprite = normal_trainer.sprite_key(normal_female);
        let normal_config = EnemyPartyConfig::new(normal_trainer, normal_female);

        // Hard: a second independent random trainer, forced onto a
        // stronger lead plus a wave-scaled average backline, with the
        // level boost halved at battle setup.
        let hard_class = random_trainer_class(biome, &mut state.rng, false)?;
        let mut hard_trainer = state.trainers.get(hard_class)?.clone();
        hard_trainer.set_party(templates::stronger_lead(Self::hard_party_members(
            wave_index,
        )));
        let hard_female = hard_trainer.has_genders && state.rng.rand_bool();
        let hard_sprite = hard_trainer.sprite_key(hard_female);
        let hard_config =
            EnemyPartyConfig::new(hard_trainer, hard_female).with_level_multiplier(0.5);

        // Brutal: a warden from the biome's boss pool on the full
        // six-member champion composition. Wardens normally force their
        // signature party, so the override is disabled explicitly.
        let brutal_class = random_trainer_class(biome, &mut state.rng, true)?;
        let mut brutal_trainer = state.trainers.get(brutal_class)?.clone();
        brutal_trainer.set_party(templates::elite_six());
        brutal_trainer.clear_class_template_override();
        let brutal_female = brutal_trainer.has_genders && state.rng.rand_bool();
        let brutal_sprite = brutal_trainer.sprite_key(brutal_female);
        let brutal_config =
            EnemyPartyConfig::new(brutal_trainer, brutal_female).with_level_multiplier(1.0);

        let encounter = state.active_encounter_mut()?;
        encounter.enemy_party_configs =
            vec![normal_config, hard_config, brutal_config];
        encounter.sprite_configs = vec![
            SpriteConfig::trainer(normal_sprite),
            SpriteConfig::trainer(hard_sprite),
            SpriteConfig::trainer(brutal_sprite),
        ];

        log::info!(
            "Mysterious challengers at wave {}: {}, {}, {}",
            wave_index,
            normal_class.key(),
            hard_class.key(),
            brutal_class.key()
        );

        Ok(true)
    }

    fn resolve_option(
        &self,
        state: &mut RunState,
        option_index: usize,
    ) -> EmberwildResult<EnemyTeam> {
        if option_index >= self.def.options.len() {
            return Err(EmberwildError::InvalidOption(format!(
                "option index {} out of range",
                option_index
            )));
        }

        let config: EnemyPartyConfig = state
            .active_encounter()?
            .enemy_party_configs
            .get(option_index)
            .cloned()
            .ok_or_else(|| {
                EmberwildError::EncounterFailed(format!(
                    "no enemy party config for option {}",
                    option_index
                ))
            })?;

        let rewards = match option_index {
            // Standard trainer battle with a memory mushroom thrown in.
            0 => RewardSpec::from_types(
                vec![
                    RewardType::TmCommon,
                    RewardType::TmGreat,
                    RewardType::MemoryMushroom,
                ],
                true,
            ),
            // Hard fight; rewards can improve further with luck.
            1 => RewardSpec::from_tiers(
                vec![RewardTier::Ultra, RewardTier::Great, RewardTier::Great],
                true,
            ),
            _ => RewardSpec::from_tiers(
                vec![RewardTier::Rogue, RewardTier::Ultra, RewardTier::Great],
                true,
            ),
        };
        set_encounter_rewards(state, rewards)?;

        if option_index == 2 {
            // The brutal team sits well above the wave curve; damp the
            // experience payout so the player's levels don't snowball.
            state.active_encounter_mut()?.exp_multiplier = BRUTAL_EXP_MULTIPLIER;
        }

        // Each option generates its team under its own wave-derived seed
        // offset so the three trainers can never roll identical teams.
        let offset = state.wave_index as u64 * SEED_OFFSET_FACTORS[option_index];
        init_battle_with_seed_offset(state, &config, offset)
    }
}
