//! # Battle Setup Module
//!
//! Turns a resolved [`EnemyPartyConfig`] into the concrete enemy team a
//! battle is fought against. This is the delegation target of every
//! encounter option: encounters decide *who* is fought and under which
//! seed offset; this module decides the team itself.
//!
//! Team generation is deterministic given the stream position: member
//! count comes from the trainer's party composition, species from the
//! biome pool, and levels from the wave index plus the band adjustment
//! plus the config's multiplier-scaled wave boost.

use crate::biomes::{Biome, Species};
use crate::run::RunState;
use crate::trainers::TrainerConfig;
use crate::utils::rng::SeededRng;
use crate::{EmberwildError, EmberwildResult};
use serde::{Deserialize, Serialize};

/// Hard cap on generated member levels.
const MAX_LEVEL: u32 = 200;

/// Random level jitter range (exclusive upper bound), in levels.
const LEVEL_JITTER: u32 = 3;

/// A fully resolved enemy party configuration for one battle.
///
/// Built by an encounter's init hook and consumed at battle setup. The
/// trainer config inside is always a defensive clone; canonical registry
/// entries never end up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyPartyConfig {
    /// The (cloned, possibly customized) trainer to fight
    pub trainer: TrainerConfig,
    /// Resolved gender flag for sprite and name variants
    pub female: bool,
    /// Scale on the wave-derived additive level boost, applied at battle
    /// setup rather than construction time
    pub level_multiplier: f64,
}

impl EnemyPartyConfig {
    /// Creates a config with the default level multiplier of 1.0.
    pub fn new(trainer: TrainerConfig, female: bool) -> Self {
        Self {
            trainer,
            female,
            level_multiplier: 1.0,
        }
    }

    /// Sets the level multiplier.
    pub fn with_level_multiplier(mut self, level_multiplier: f64) -> Self {
        self.level_multiplier = level_multiplier;
        self
    }
}

/// One member of a generated enemy team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyMember {
    /// Species of the member
    pub species: Species,
    /// Final level after band adjustment and boost
    pub level: u32,
}

/// A concrete enemy team ready for battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTeam {
    /// Localization key of the opposing trainer's title
    pub trainer_name_key: String,
    /// Sprite atlas key of the opposing trainer
    pub trainer_sprite_key: String,
    /// The team members, lead first
    pub members: Vec<EnemyMember>,
}

/// Generates an enemy team from a party configuration.
///
/// Pure with respect to the stream: the same wave, biome, config, and
/// stream position always yield the same team.
pub fn generate_enemy_team(
    wave_index: u32,
    biome: Biome,
    config: &EnemyPartyConfig,
    rng: &mut SeededRng,
) -> EmberwildResult<EnemyTeam> {
    // A warden with its template override active forces its signature
    // party over whatever was assigned.
    let party = config.trainer.effective_party();
    let bands = party.bands();
    if party.total_size() == 0 {
        return Err(EmberwildError::BattleSetupFailed(format!(
            "trainer {} has an empty party composition",
            config.trainer.class.key()
        )));
    }
    let pool = biome.species_pool();
    if pool.is_empty() {
        return Err(EmberwildError::BattleSetupFailed(format!(
            "no species available in biome {}",
            biome.key()
        )));
    }

    let base_level = wave_index.max(1);
    let boost = ((wave_index as f64 / 10.0).floor() * config.level_multiplier).round() as i32;

    let mut members = Vec::with_capacity(party.total_size() as usize);
    for band in bands {
        // A same-species band rolls once and repeats; a balanced band
        // avoids repeating species drawn earlier in the band.
        let shared_species = if band.same_species {
            rng.pick(pool).copied()
        } else {
            None
        };
        let mut band_species: Vec<Species> = Vec::new();
        for _ in 0..band.size {
            let species = match shared_species {
                Some(species) => species,
                None => pick_species(pool, &band_species, band.balanced, rng)?,
            };
            band_species.push(species);

            let level = base_level as i32 + band.strength.level_adjustment() + boost
                - rng.rand_int(LEVEL_JITTER) as i32;
            members.push(EnemyMember {
                species,
                level: level.clamp(1, MAX_LEVEL as i32) as u32,
            });
        }
    }

    log::debug!(
        "Generated {}-member team for {} at wave {}",
        members.len(),
        config.trainer.class.key(),
        wave_index
    );

    Ok(EnemyTeam {
        trainer_name_key: config.trainer.name_key.clone(),
        trainer_sprite_key: config.trainer.sprite_key(config.female),
        members,
    })
}

/// Draws a species, re-rolling duplicates for balanced bands.
fn pick_species(
    pool: &[Species],
    taken: &[Species],
    balanced: bool,
    rng: &mut SeededRng,
) -> EmberwildResult<Species> {
    if balanced {
        let remaining: Vec<Species> = pool
            .iter()
            .copied()
            .filter(|species| !taken.contains(species))
            .collect();
        if !remaining.is_empty() {
            return rng.pick(&remaining).copied().ok_or_else(|| {
                EmberwildError::BattleSetupFailed("species pool exhausted".to_string())
            });
        }
        // Pool smaller than the band; fall through to repeats.
    }
    rng.pick(pool)
        .copied()
        .ok_or_else(|| EmberwildError::BattleSetupFailed("species pool exhausted".to_string()))
}

/// Initializes a battle against the given enemy party configuration.
///
/// This is the battle-initialization primitive encounters delegate to.
pub fn init_battle_with_enemy_config(
    state: &mut RunState,
    config: &EnemyPartyConfig,
) -> EmberwildResult<EnemyTeam> {
    let wave_index = state.wave_index;
    let biome = state.biome;
    generate_enemy_team(wave_index, biome, config, &mut state.rng)
}

/// Initializes a battle under a scoped seed offset.
///
/// The run's stream is re-seeded with the offset only for the duration of
/// team generation and restored afterwards, so unrelated draws later in
/// the run are unaffected even when generation fails.
pub fn init_battle_with_seed_offset(
    state: &mut RunState,
    config: &EnemyPartyConfig,
    offset: u64,
) -> EmberwildResult<EnemyTeam> {
    let wave_index = state.wave_index;
    let biome = state.biome;
    state
        .rng
        .with_offset(offset, |rng| generate_enemy_team(wave_index, biome, config, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainers::{templates, PartyComposition, PartyTemplate, PartyMemberStrength, TrainerClass, TrainerRegistry};

    fn test_config(party: PartyComposition) -> EnemyPartyConfig {
        let registry = TrainerRegistry::new();
        let mut trainer = registry.get(TrainerClass::Forager).unwrap().clone();
        trainer.set_party(party);
        EnemyPartyConfig::new(trainer, false)
    }

    #[test]
    fn test_team_size_matches_composition() {
        let mut rng = SeededRng::new(42);
        let config = test_config(templates::stronger_lead(3));
        let team = generate_enemy_team(50, Biome::Meadow, &config, &mut rng).unwrap();
        assert_eq!(team.members.len(), 4);
    }

    #[test]
    fn test_team_generation_is_deterministic() {
        let config = test_config(templates::elite_six());
        let mut rng_a = SeededRng::new(7);
        let mut rng_b = SeededRng::new(7);
        let team_a = generate_enemy_team(80, Biome::Peak, &config, &mut rng_a).unwrap();
        let team_b = generate_enemy_team(80, Biome::Peak, &config, &mut rng_b).unwrap();
        assert_eq!(team_a, team_b);
    }

    #[test]
    fn test_level_multiplier_scales_boost() {
        // Identical stream positions, different multipliers: the boosted
        // team is uniformly ahead by the extra boost.
        let config_half = test_config(templates::two_average()).with_level_multiplier(0.5);
        let config_full = test_config(templates::two_average()).with_level_multiplier(1.0);
        let mut rng_a = SeededRng::new(9);
        let mut rng_b = SeededRng::new(9);
        let team_half = generate_enemy_team(100, Biome::Meadow, &config_half, &mut rng_a).unwrap();
        let team_full = generate_enemy_team(100, Biome::Meadow, &config_full, &mut rng_b).unwrap();
        for (half, full) in team_half.members.iter().zip(team_full.members.iter()) {
            assert_eq!(full.level - half.level, 5); // wave 100: boost 10 vs 5
        }
    }

    #[test]
    fn test_strength_bands_order_levels() {
        let config = test_config(templates::stronger_lead(5));
        let mut rng = SeededRng::new(3);
        let team = generate_enemy_team(60, Biome::Marsh, &config, &mut rng).unwrap();
        let lead = team.members[0].level;
        // Stronger lead sits 8 above the average band before jitter; jitter
        // is at most 2 in either member's favor.
        for member in &team.members[1..] {
            assert!(lead > member.level);
        }
    }

    #[test]
    fn test_same_species_band() {
        let party = PartyComposition::Single(
            PartyTemplate::new(4, PartyMemberStrength::Average).same_species(),
        );
        let config = test_config(party);
        let mut rng = SeededRng::new(11);
        let team = generate_enemy_team(30, Biome::Cavern, &config, &mut rng).unwrap();
        let first = team.members[0].species;
        assert!(team.members.iter().all(|member| member.species == first));
    }

    #[test]
    fn test_balanced_band_has_unique_species() {
        let party = PartyComposition::Single(
            PartyTemplate::new(5, PartyMemberStrength::Average).balanced(),
        );
        let config = test_config(party);
        let mut rng = SeededRng::new(13);
        let team = generate_enemy_team(30, Biome::Cavern, &config, &mut rng).unwrap();
        let mut seen = Vec::new();
        for member in &team.members {
            assert!(!seen.contains(&member.species));
            seen.push(member.species);
        }
    }

    #[test]
    fn test_warden_override_forces_signature_party() {
        let registry = TrainerRegistry::new();
        let mut trainer = registry.get(TrainerClass::ThornWarden).unwrap().clone();
        trainer.set_party(templates::two_average());
        let config = EnemyPartyConfig::new(trainer, false);

        // Override still active: the assigned two-member party is ignored
        // in favor of the four-member signature composition.
        let mut rng = SeededRng::new(17);
        let team = generate_enemy_team(60, Biome::Meadow, &config, &mut rng).unwrap();
        assert_eq!(
            team.members.len(),
            templates::warden_signature().total_size() as usize
        );

        // Cleared: the assigned party takes effect.
        let mut cleared = config.clone();
        cleared.trainer.clear_class_template_override();
        let mut rng = SeededRng::new(17);
        let team = generate_enemy_team(60, Biome::Meadow, &cleared, &mut rng).unwrap();
        assert_eq!(team.members.len(), 2);
    }

    #[test]
    fn test_empty_composition_is_error() {
        let party = PartyComposition::Compound(Vec::new());
        let config = test_config(party);
        let mut rng = SeededRng::new(1);
        assert!(generate_enemy_team(30, Biome::Cavern, &config, &mut rng).is_err());
    }

    #[test]
    fn test_levels_clamped_to_valid_range() {
        let party = PartyComposition::Single(PartyTemplate::new(3, PartyMemberStrength::Weaker));
        let config = test_config(party);
        let mut rng = SeededRng::new(2);
        let team = generate_enemy_team(1, Biome::Meadow, &config, &mut rng).unwrap();
        assert!(team.members.iter().all(|member| member.level >= 1));
    }

    #[test]
    fn test_init_battle_advances_run_stream() {
        use crate::run::RunState;

        let config = test_config(templates::three_average());
        let mut state = RunState::new(42, 50, Biome::Meadow);
        let before = state.rng.draws();
        let team = init_battle_with_enemy_config(&mut state, &config).unwrap();
        assert_eq!(team.members.len(), 3);
        // Unscoped init consumes draws from the run's own stream.
        assert!(state.rng.draws() > before);
    }

    #[test]
    fn test_seed_offset_init_restores_stream() {
        use crate::run::RunState;

        let config = test_config(templates::three_average());
        let mut state = RunState::new(42, 50, Biome::Meadow);
        state.rng.rand_int(100);
        let mut control = state.rng.clone();

        init_battle_with_seed_offset(&mut state, &config, 500).unwrap();

        for _ in 0..8 {
            assert_eq!(state.rng.rand_int(u32::MAX), control.rand_int(u32::MAX));
        }
    }
}
