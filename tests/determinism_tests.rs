//! Property-based tests for encounter determinism
//!
//! Tests invariants:
//! - Resolving the same option on the same wave with the same seed always
//!   yields the same enemy team
//! - Different options on the same wave use distinct seed offsets and do
//!   not collide on team composition
//! - The seed offset used during resolution is fully scoped: the run's
//!   stream position afterwards matches a run that never resolved

use proptest::prelude::*;

use emberwild::{
    Biome, EncounterRegistry, MysteryEncounterTier, MysteryEncounterType, RunState, SeededRng,
};

fn arb_biome() -> impl Strategy<Value = Biome> {
    prop_oneof![
        Just(Biome::Meadow),
        Just(Biome::Cavern),
        Just(Biome::Marsh),
        Just(Biome::Peak),
        Just(Biome::Ashlands),
    ]
}

fn rolled_state(seed: u64, wave: u32, biome: Biome) -> (EncounterRegistry, RunState) {
    let registry = EncounterRegistry::with_defaults();
    let mut state = RunState::new(seed, wave, biome);
    let rolled = registry
        .roll(&mut state, MysteryEncounterTier::Great)
        .unwrap();
    assert_eq!(rolled, Some(MysteryEncounterType::MysteriousChallengers));
    (registry, state)
}

proptest! {
    #[test]
    fn same_seed_same_option_same_team(
        seed in any::<u64>(),
        wave in 10u32..=180,
        biome in arb_biome(),
        option in 0usize..3,
    ) {
        let (registry_a, mut state_a) = rolled_state(seed, wave, biome);
        let (_registry_b, mut state_b) = rolled_state(seed, wave, biome);
        let encounter = registry_a
            .get(MysteryEncounterType::MysteriousChallengers)
            .unwrap();

        let team_a = encounter.resolve_option(&mut state_a, option).unwrap();
        let team_b = encounter.resolve_option(&mut state_b, option).unwrap();
        prop_assert_eq!(team_a, team_b);
    }

    #[test]
    fn different_options_use_distinct_streams(
        seed in any::<u64>(),
        wave in 10u32..=180,
    ) {
        // The three options re-seed with wave*10, wave*100, wave*1000, so
        // their generation streams are pairwise distinct. Team composition
        // can still coincide by chance for tiny parties, so compare the
        // streams' first draws rather than the teams themselves.
        let mut draws = Vec::new();
        for factor in [10u64, 100, 1_000] {
            let mut rng = SeededRng::new(seed);
            let draw = rng.with_offset(wave as u64 * factor, |r| {
                (r.rand_int(u32::MAX), r.rand_int(u32::MAX), r.rand_int(u32::MAX))
            });
            draws.push(draw);
        }
        prop_assert_ne!(draws[0], draws[1]);
        prop_assert_ne!(draws[1], draws[2]);
        prop_assert_ne!(draws[0], draws[2]);
    }

    #[test]
    fn resolution_offset_is_fully_scoped(
        seed in any::<u64>(),
        wave in 10u32..=180,
        biome in arb_biome(),
        option in 0usize..3,
    ) {
        let (registry, mut state) = rolled_state(seed, wave, biome);
        let encounter = registry
            .get(MysteryEncounterType::MysteriousChallengers)
            .unwrap();

        let mut control = state.rng.clone();
        encounter.resolve_option(&mut state, option).unwrap();

        // Draws after resolution match draws on a stream that never
        // resolved at all.
        for _ in 0..4 {
            prop_assert_eq!(state.rng.rand_int(u32::MAX), control.rand_int(u32::MAX));
        }
    }

    #[test]
    fn init_draw_order_is_stable(
        seed in any::<u64>(),
        wave in 10u32..=180,
        biome in arb_biome(),
    ) {
        // Rolling twice from the same seed resolves the same trainers,
        // genders, and sprite keys.
        let (_ra, state_a) = rolled_state(seed, wave, biome);
        let (_rb, state_b) = rolled_state(seed, wave, biome);
        let enc_a = state_a.active_encounter().unwrap();
        let enc_b = state_b.active_encounter().unwrap();
        prop_assert_eq!(&enc_a.enemy_party_configs, &enc_b.enemy_party_configs);
        prop_assert_eq!(&enc_a.sprite_configs, &enc_b.sprite_configs);
    }
}

#[test]
fn test_hard_and_brutal_teams_rarely_collide() {
    // Collision-avoidance across many seeds: hard and brutal teams on the
    // same wave should essentially never share full species/level lists.
    // Party sizes already differ below wave 81, so test deep waves where
    // both field comparable teams.
    let mut collisions = 0;
    for seed in 0..200u64 {
        let (registry, mut state_hard) = rolled_state(seed, 120, Biome::Peak);
        let (_registry2, mut state_brutal) = rolled_state(seed, 120, Biome::Peak);
        let encounter = registry
            .get(MysteryEncounterType::MysteriousChallengers)
            .unwrap();
        let hard = encounter.resolve_option(&mut state_hard, 1).unwrap();
        let brutal = encounter.resolve_option(&mut state_brutal, 2).unwrap();
        if hard.members == brutal.members {
            collisions += 1;
        }
    }
    assert_eq!(collisions, 0);
}
