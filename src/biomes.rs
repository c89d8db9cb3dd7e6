//! # Biomes Module
//!
//! Biome definitions and the trainer/species pools drawn from during an
//! encounter. Pool selection is the only randomness this module owns; it
//! consumes exactly one draw from the run's seeded stream per selection.

use crate::trainers::TrainerClass;
use crate::utils::rng::SeededRng;
use crate::{EmberwildError, EmberwildResult};
use serde::{Deserialize, Serialize};

/// The biomes a run can pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Meadow,
    Cavern,
    Marsh,
    Peak,
    Ashlands,
}

/// Creature species that can appear on enemy teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Thistletuft,
    Bramblehog,
    Windfinch,
    Glowmoth,
    Shardback,
    Deepcrawler,
    Echobat,
    Murkfin,
    Bogstrider,
    Sporeling,
    Craghorn,
    Frostowl,
    Galecub,
    Cindertail,
    Ashenmaw,
    Emberling,
}

impl Species {
    /// Stable snake_case key for localization and sprite lookup.
    pub fn key(self) -> &'static str {
        match self {
            Species::Thistletuft => "thistletuft",
            Species::Bramblehog => "bramblehog",
            Species::Windfinch => "windfinch",
            Species::Glowmoth => "glowmoth",
            Species::Shardback => "shardback",
            Species::Deepcrawler => "deepcrawler",
            Species::Echobat => "echobat",
            Species::Murkfin => "murkfin",
            Species::Bogstrider => "bogstrider",
            Species::Sporeling => "sporeling",
            Species::Craghorn => "craghorn",
            Species::Frostowl => "frostowl",
            Species::Galecub => "galecub",
            Species::Cindertail => "cindertail",
            Species::Ashenmaw => "ashenmaw",
            Species::Emberling => "emberling",
        }
    }
}

impl Biome {
    /// Ordinary trainer classes that can spawn in this biome.
    pub fn trainer_pool(self) -> &'static [TrainerClass] {
        match self {
            Biome::Meadow => &[
                TrainerClass::Forager,
                TrainerClass::Wrangler,
                TrainerClass::Cartographer,
            ],
            Biome::Cavern => &[
                TrainerClass::Cartographer,
                TrainerClass::Mycologist,
                TrainerClass::Relichunter,
            ],
            Biome::Marsh => &[
                TrainerClass::Mycologist,
                TrainerClass::Tidecaller,
                TrainerClass::Forager,
            ],
            Biome::Peak => &[
                TrainerClass::Stormcaller,
                TrainerClass::Cartographer,
                TrainerClass::Wrangler,
            ],
            Biome::Ashlands => &[
                TrainerClass::Cinderguard,
                TrainerClass::Relichunter,
                TrainerClass::Stormcaller,
            ],
        }
    }

    /// Boss-eligible warden classes for this biome.
    pub fn boss_pool(self) -> &'static [TrainerClass] {
        match self {
            Biome::Meadow => &[TrainerClass::ThornWarden, TrainerClass::GaleWarden],
            Biome::Cavern => &[TrainerClass::StoneWarden, TrainerClass::ThornWarden],
            Biome::Marsh => &[TrainerClass::TideWarden, TrainerClass::ThornWarden],
            Biome::Peak => &[TrainerClass::GaleWarden, TrainerClass::StoneWarden],
            Biome::Ashlands => &[TrainerClass::EmberWarden, TrainerClass::StoneWarden],
        }
    }

    /// Species that enemy teams in this biome draw from.
    pub fn species_pool(self) -> &'static [Species] {
        match self {
            Biome::Meadow => &[
                Species::Thistletuft,
                Species::Bramblehog,
                Species::Windfinch,
                Species::Glowmoth,
                Species::Galecub,
            ],
            Biome::Cavern => &[
                Species::Shardback,
                Species::Deepcrawler,
                Species::Echobat,
                Species::Sporeling,
                Species::Craghorn,
            ],
            Biome::Marsh => &[
                Species::Murkfin,
                Species::Bogstrider,
                Species::Sporeling,
                Species::Glowmoth,
                Species::Thistletuft,
            ],
            Biome::Peak => &[
                Species::Craghorn,
                Species::Frostowl,
                Species::Galecub,
                Species::Windfinch,
                Species::Shardback,
            ],
            Biome::Ashlands => &[
                Species::Cindertail,
                Species::Ashenmaw,
                Species::Emberling,
                Species::Echobat,
                Species::Craghorn,
            ],
        }
    }

    /// Stable snake_case key for this biome.
    pub fn key(self) -> &'static str {
        match self {
            Biome::Meadow => "meadow",
            Biome::Cavern => "cavern",
            Biome::Marsh => "marsh",
            Biome::Peak => "peak",
            Biome::Ashlands => "ashlands",
        }
    }
}

/// Draws a random trainer class from the biome's pool.
///
/// With `boss_only` set, draws from the warden pool instead of the
/// ordinary pool. Consumes exactly one draw from the stream.
///
/// # Examples
///
/// ```
/// use emberwild::{random_trainer_class, Biome, SeededRng};
///
/// let mut rng = SeededRng::new(42);
/// let class = random_trainer_class(Biome::Meadow, &mut rng, false).unwrap();
/// assert!(!class.is_boss());
/// ```
pub fn random_trainer_class(
    biome: Biome,
    rng: &mut SeededRng,
    boss_only: bool,
) -> EmberwildResult<TrainerClass> {
    let pool = if boss_only {
        biome.boss_pool()
    } else {
        biome.trainer_pool()
    };
    rng.pick(pool).copied().ok_or_else(|| {
        EmberwildError::InvalidState(format!("empty trainer pool for biome {}", biome.key()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_biomes_have_pools() {
        let biomes = [
            Biome::Meadow,
            Biome::Cavern,
            Biome::Marsh,
            Biome::Peak,
            Biome::Ashlands,
        ];
        for biome in biomes {
            assert!(!biome.trainer_pool().is_empty());
            assert!(!biome.boss_pool().is_empty());
            assert!(!biome.species_pool().is_empty());
        }
    }

    #[test]
    fn test_pools_respect_boss_split() {
        let biomes = [
            Biome::Meadow,
            Biome::Cavern,
            Biome::Marsh,
            Biome::Peak,
            Biome::Ashlands,
        ];
        for biome in biomes {
            assert!(biome.trainer_pool().iter().all(|class| !class.is_boss()));
            assert!(biome.boss_pool().iter().all(|class| class.is_boss()));
        }
    }

    #[test]
    fn test_random_trainer_class_from_pool() {
        let mut rng = SeededRng::new(123);
        for _ in 0..20 {
            let ordinary = random_trainer_class(Biome::Cavern, &mut rng, false).unwrap();
            assert!(Biome::Cavern.trainer_pool().contains(&ordinary));

            let boss = random_trainer_class(Biome::Cavern, &mut rng, true).unwrap();
            assert!(Biome::Cavern.boss_pool().contains(&boss));
        }
    }

    #[test]
    fn test_random_trainer_class_consumes_one_draw() {
        let mut rng = SeededRng::new(5);
        let before = rng.draws();
        random_trainer_class(Biome::Meadow, &mut rng, false).unwrap();
        assert_eq!(rng.draws(), before + 1);
    }
}
