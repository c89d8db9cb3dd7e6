//! # Emberwild Encounter Demo
//!
//! Rolls the Mysterious Challengers encounter for a given seed, wave, and
//! biome, resolves the chosen option, and prints the resulting battle and
//! rewards. Exists to exercise the encounter system end to end.

use clap::Parser;
use emberwild::{
    grant_rewards, Biome, EmberwildError, EmberwildResult, EncounterRegistry, MysteryEncounterTier,
    RunState,
};
use log::info;

/// Command line arguments for the encounter demo.
#[derive(Parser, Debug)]
#[command(name = "emberwild")]
#[command(about = "Mystery encounter demo for the Emberwild roguelite")]
#[command(version)]
struct Args {
    /// Random seed for the run
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Wave index to roll the encounter on
    #[arg(short, long, default_value_t = 50)]
    wave: u32,

    /// Biome for the wave (meadow, cavern, marsh, peak, ashlands)
    #[arg(short, long, default_value = "meadow")]
    biome: String,

    /// Encounter option to commit to (1-3)
    #[arg(short, long, default_value_t = 1)]
    option: usize,
}

fn parse_biome(name: &str) -> EmberwildResult<Biome> {
    match name.to_lowercase().as_str() {
        "meadow" => Ok(Biome::Meadow),
        "cavern" => Ok(Biome::Cavern),
        "marsh" => Ok(Biome::Marsh),
        "peak" => Ok(Biome::Peak),
        "ashlands" => Ok(Biome::Ashlands),
        other => Err(EmberwildError::InvalidState(format!(
            "unknown biome: {}",
            other
        ))),
    }
}

fn main() -> EmberwildResult<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Emberwild encounter demo v{}", emberwild::VERSION);

    let biome = parse_biome(&args.biome)?;
    if args.option == 0 || args.option > 3 {
        return Err(EmberwildError::InvalidOption(format!(
            "option must be 1-3, got {}",
            args.option
        )));
    }

    let mut state = RunState::new(args.seed, args.wave, biome);
    let registry = EncounterRegistry::with_defaults();

    let Some(rolled) = registry.roll(&mut state, MysteryEncounterTier::Great)? else {
        println!(
            "No encounter applicable on wave {} (valid range is 10-180).",
            args.wave
        );
        return Ok(());
    };
    let encounter = registry.get(rolled)?;

    println!("Encounter: {}", encounter.def().title_key);
    println!("Challengers awaiting on wave {}:", args.wave);
    let active = state.active_encounter()?;
    for (index, config) in active.enemy_party_configs.iter().enumerate() {
        println!(
            "  {}. {} ({} members{})",
            index + 1,
            config.trainer.class.key(),
            config.trainer.party.total_size(),
            if config.level_multiplier != 1.0 {
                format!(", level boost x{}", config.level_multiplier)
            } else {
                String::new()
            }
        );
    }

    let team = encounter.resolve_option(&mut state, args.option - 1)?;
    println!("\nYou challenge {}:", team.trainer_name_key);
    for member in &team.members {
        println!("  Lv.{:>3} {}", member.level, member.species.key());
    }

    let rewards = grant_rewards(&mut state)?;
    println!("\nVictory rewards:");
    for reward in rewards {
        println!("  {}", reward.key());
    }
    if state.active_encounter()?.exp_multiplier != 1.0 {
        println!(
            "(experience gain x{})",
            state.active_encounter()?.exp_multiplier
        );
    }
    state.end_encounter();

    Ok(())
}
