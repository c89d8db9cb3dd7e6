//! # Reward System
//!
//! Declarative reward specifications for mystery encounters.
//!
//! An encounter option states its rewards abstractly (explicit reward
//! types, abstract quality tiers, and whether to fill the remaining
//! slots) and stores that on the active encounter. Concrete items are only
//! drawn from the tier catalogs at grant time, after the battle is won.

use crate::config::REWARD_SLOTS;
use crate::run::RunState;
use crate::EmberwildResult;
use serde::{Deserialize, Serialize};

/// Abstract quality bucket a concrete reward is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RewardTier {
    Common,
    Great,
    Ultra,
    Rogue,
    Master,
}

/// Concrete reward items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardType {
    // Common
    TmCommon,
    SoothingHerb,
    BattleTonic,
    // Great
    TmGreat,
    MemoryMushroom,
    VigorRoot,
    WardCharm,
    // Ultra
    TmUltra,
    AncientRelic,
    RevivalEmber,
    // Rogue
    PhoenixAsh,
    MasteryBand,
    // Master
    CrownShard,
}

impl RewardType {
    /// The quality tier this item is drawn from.
    pub fn tier(self) -> RewardTier {
        match self {
            RewardType::TmCommon | RewardType::SoothingHerb | RewardType::BattleTonic => {
                RewardTier::Common
            }
            RewardType::TmGreat
            | RewardType::MemoryMushroom
            | RewardType::VigorRoot
            | RewardType::WardCharm => RewardTier::Great,
            RewardType::TmUltra | RewardType::AncientRelic | RewardType::RevivalEmber => {
                RewardTier::Ultra
            }
            RewardType::PhoenixAsh | RewardType::MasteryBand => RewardTier::Rogue,
            RewardType::CrownShard => RewardTier::Master,
        }
    }

    /// Stable snake_case key for localization and sprite lookup.
    pub fn key(self) -> &'static str {
        match self {
            RewardType::TmCommon => "tm_common",
            RewardType::SoothingHerb => "soothing_herb",
            RewardType::BattleTonic => "battle_tonic",
            RewardType::TmGreat => "tm_great",
            RewardType::MemoryMushroom => "memory_mushroom",
            RewardType::VigorRoot => "vigor_root",
            RewardType::WardCharm => "ward_charm",
            RewardType::TmUltra => "tm_ultra",
            RewardType::AncientRelic => "ancient_relic",
            RewardType::RevivalEmber => "revival_ember",
            RewardType::PhoenixAsh => "phoenix_ash",
            RewardType::MasteryBand => "mastery_band",
            RewardType::CrownShard => "crown_shard",
        }
    }
}

/// Catalog of items drawn from when a tier is granted abstractly.
fn tier_catalog(tier: RewardTier) -> &'static [RewardType] {
    match tier {
        RewardTier::Common => &[
            RewardType::TmCommon,
            RewardType::SoothingHerb,
            RewardType::BattleTonic,
        ],
        RewardTier::Great => &[
            RewardType::TmGreat,
            RewardType::VigorRoot,
            RewardType::WardCharm,
        ],
        RewardTier::Ultra => &[
            RewardType::TmUltra,
            RewardType::AncientRelic,
            RewardType::RevivalEmber,
        ],
        RewardTier::Rogue => &[RewardType::PhoenixAsh, RewardType::MasteryBand],
        RewardTier::Master => &[RewardType::CrownShard],
    }
}

/// Declarative reward grant for one encounter option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSpec {
    /// Rewards granted verbatim
    pub guaranteed_types: Vec<RewardType>,
    /// Tiers from which one concrete reward each is drawn at grant time
    pub guaranteed_tiers: Vec<RewardTier>,
    /// Whether to top the grant up to the full reward-slot count
    pub fill_remaining: bool,
}

impl RewardSpec {
    /// A spec granting explicit reward types.
    pub fn from_types(guaranteed_types: Vec<RewardType>, fill_remaining: bool) -> Self {
        Self {
            guaranteed_types,
            guaranteed_tiers: Vec::new(),
            fill_remaining,
        }
    }

    /// A spec granting abstract tiers.
    pub fn from_tiers(guaranteed_tiers: Vec<RewardTier>, fill_remaining: bool) -> Self {
        Self {
            guaranteed_types: Vec::new(),
            guaranteed_tiers,
            fill_remaining,
        }
    }
}

/// Stores the reward specification on the active encounter.
pub fn set_encounter_rewards(state: &mut RunState, spec: RewardSpec) -> EmberwildResult<()> {
    state.active_encounter_mut()?.rewards = Some(spec);
    Ok(())
}

/// Tier used for fill slots, scaled to run progress.
fn fill_tier_for_wave(wave_index: u32) -> RewardTier {
    match wave_index {
        0..=39 => RewardTier::Common,
        40..=99 => RewardTier::Great,
        _ => RewardTier::Ultra,
    }
}

/// Grants the active encounter's rewards.
///
/// Guaranteed types are granted verbatim, each guaranteed tier yields one
/// draw from its catalog, and with `fill_remaining` set the grant is
/// topped up to [`REWARD_SLOTS`] with wave-appropriate draws. Draws come
/// from the run's seeded stream, so grants are reproducible.
pub fn grant_rewards(state: &mut RunState) -> EmberwildResult<Vec<RewardType>> {
    let spec = state
        .active_encounter()?
        .rewards
        .clone()
        .unwrap_or_else(|| RewardSpec::from_tiers(Vec::new(), true));

    let mut granted = spec.guaranteed_types.clone();
    for &tier in &spec.guaranteed_tiers {
        if let Some(&reward) = state.rng.pick(tier_catalog(tier)) {
            granted.push(reward);
        }
    }
    if spec.fill_remaining {
        let fill_tier = fill_tier_for_wave(state.wave_index);
        while granted.len() < REWARD_SLOTS {
            if let Some(&reward) = state.rng.pick(tier_catalog(fill_tier)) {
                granted.push(reward);
            }
        }
    }

    log::info!("Granted {} rewards", granted.len());
    Ok(granted)
}
