//! # Trainer System
//!
//! Canonical trainer configurations and the party templates that shape
//! their teams.
//!
//! The [`TrainerRegistry`] owns one immutable config per trainer class.
//! Lookups hand out shared references only; anything that needs to
//! customize a trainer for a single encounter clones the config first and
//! mutates the clone. The canonical table is never touched after
//! construction.

pub mod templates;

pub use templates::*;

use crate::{EmberwildError, EmberwildResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Relative strength band of a generated party member, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartyMemberStrength {
    Weaker,
    Weak,
    Average,
    Strong,
    Stronger,
}

impl PartyMemberStrength {
    /// Level adjustment applied to members in this band, relative to the
    /// wave-derived base level.
    pub fn level_adjustment(self) -> i32 {
        match self {
            PartyMemberStrength::Weaker => -8,
            PartyMemberStrength::Weak => -4,
            PartyMemberStrength::Average => 0,
            PartyMemberStrength::Strong => 4,
            PartyMemberStrength::Stronger => 8,
        }
    }
}

/// One band of a trainer's party: how many members, at what strength.
///
/// # Examples
///
/// ```
/// use emberwild::{PartyMemberStrength, PartyTemplate};
///
/// let band = PartyTemplate::new(3, PartyMemberStrength::Average);
/// assert_eq!(band.size, 3);
/// assert!(!band.same_species);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyTemplate {
    /// Number of members in this band
    pub size: u32,
    /// Strength band for every member
    pub strength: PartyMemberStrength,
    /// Whether all members of the band share one species
    pub same_species: bool,
    /// Whether species within the band must not repeat
    pub balanced: bool,
}

impl PartyTemplate {
    /// Creates a band with the given size and strength.
    pub fn new(size: u32, strength: PartyMemberStrength) -> Self {
        Self {
            size,
            strength,
            same_species: false,
            balanced: false,
        }
    }

    /// Marks every member of the band as sharing one species.
    pub fn same_species(mut self) -> Self {
        self.same_species = true;
        self
    }

    /// Marks the band as balanced (no repeated species within it).
    pub fn balanced(mut self) -> Self {
        self.balanced = true;
        self
    }
}

/// A trainer's full party composition: one band, or an ordered compound of
/// bands (e.g. a strong lead followed by average backups).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyComposition {
    /// A single uniform band
    Single(PartyTemplate),
    /// An ordered sequence of bands, generated lead-first
    Compound(Vec<PartyTemplate>),
}

impl PartyComposition {
    /// Total number of party members across all bands.
    ///
    /// # Examples
    ///
    /// ```
    /// use emberwild::{PartyComposition, PartyMemberStrength, PartyTemplate};
    ///
    /// let comp = PartyComposition::Compound(vec![
    ///     PartyTemplate::new(1, PartyMemberStrength::Stronger),
    ///     PartyTemplate::new(3, PartyMemberStrength::Average),
    /// ]);
    /// assert_eq!(comp.total_size(), 4);
    /// ```
    pub fn total_size(&self) -> u32 {
        match self {
            PartyComposition::Single(band) => band.size,
            PartyComposition::Compound(bands) => bands.iter().map(|band| band.size).sum(),
        }
    }

    /// The bands of this composition in generation order.
    pub fn bands(&self) -> &[PartyTemplate] {
        match self {
            PartyComposition::Single(band) => std::slice::from_ref(band),
            PartyComposition::Compound(bands) => bands.as_slice(),
        }
    }
}

/// Trainer archetypes encountered during a run.
///
/// Ordinary classes appear in normal wave battles; warden classes are the
/// boss-eligible pool drawn for milestone fights and the hardest encounter
/// options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainerClass {
    // Ordinary trainers
    Forager,
    Wrangler,
    Stormcaller,
    Cartographer,
    Mycologist,
    Tidecaller,
    Cinderguard,
    Relichunter,
    // Boss-eligible wardens
    ThornWarden,
    GaleWarden,
    TideWarden,
    StoneWarden,
    EmberWarden,
}

impl TrainerClass {
    /// Stable snake_case key, used for name lookup and sprite derivation.
    pub fn key(self) -> &'static str {
        match self {
            TrainerClass::Forager => "forager",
            TrainerClass::Wrangler => "wrangler",
            TrainerClass::Stormcaller => "stormcaller",
            TrainerClass::Cartographer => "cartographer",
            TrainerClass::Mycologist => "mycologist",
            TrainerClass::Tidecaller => "tidecaller",
            TrainerClass::Cinderguard => "cinderguard",
            TrainerClass::Relichunter => "relichunter",
            TrainerClass::ThornWarden => "thorn_warden",
            TrainerClass::GaleWarden => "gale_warden",
            TrainerClass::TideWarden => "tide_warden",
            TrainerClass::StoneWarden => "stone_warden",
            TrainerClass::EmberWarden => "ember_warden",
        }
    }

    /// The signature composition a warden forces while its template
    /// override is active. Ordinary classes have none.
    pub fn signature_party(self) -> Option<PartyComposition> {
        self.is_boss().then(templates::warden_signature)
    }

    /// Whether this class belongs to the boss-eligible pool.
    pub fn is_boss(self) -> bool {
        matches!(
            self,
            TrainerClass::ThornWarden
                | TrainerClass::GaleWarden
                | TrainerClass::TideWarden
                | TrainerClass::StoneWarden
                | TrainerClass::EmberWarden
        )
    }

    /// All trainer classes, in declaration order.
    pub fn all() -> Vec<TrainerClass> {
        vec![
            TrainerClass::Forager,
            TrainerClass::Wrangler,
            TrainerClass::Stormcaller,
            TrainerClass::Cartographer,
            TrainerClass::Mycologist,
            TrainerClass::Tidecaller,
            TrainerClass::Cinderguard,
            TrainerClass::Relichunter,
            TrainerClass::ThornWarden,
            TrainerClass::GaleWarden,
            TrainerClass::TideWarden,
            TrainerClass::StoneWarden,
            TrainerClass::EmberWarden,
        ]
    }
}

/// Configuration for one trainer archetype.
///
/// Canonical configs live in the [`TrainerRegistry`]; encounters that need
/// a customized trainer clone a canonical config and mutate the clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// The archetype this config describes
    pub class: TrainerClass,
    /// Localization key for the trainer's displayed title
    pub name_key: String,
    /// Whether the class has male/female sprite variants
    pub has_genders: bool,
    /// Whether the class only appears as a double-battle pair
    pub double_only: bool,
    /// Default party composition for this class
    pub party: PartyComposition,
    /// Whether the class forces its own signature party over any
    /// externally assigned composition (warden classes do by default)
    pub class_template_override: bool,
}

impl TrainerConfig {
    /// Creates a config with the class defaults.
    pub fn new(class: TrainerClass, has_genders: bool, party: PartyComposition) -> Self {
        Self {
            class,
            name_key: format!("trainer.{}.title", class.key()),
            has_genders,
            double_only: false,
            party,
            class_template_override: class.is_boss(),
        }
    }

    /// Replaces this config's party composition.
    pub fn set_party(&mut self, party: PartyComposition) {
        self.party = party;
    }

    /// Disables the class's signature-party override so an externally
    /// assigned composition takes effect.
    pub fn clear_class_template_override(&mut self) {
        self.class_template_override = false;
    }

    /// Whether this trainer belongs to the boss-eligible pool.
    pub fn is_boss(&self) -> bool {
        self.class.is_boss()
    }

    /// The composition battle setup actually generates from.
    ///
    /// A warden with its template override active forces its signature
    /// party regardless of what was assigned; everyone else uses the
    /// assigned composition.
    pub fn effective_party(&self) -> PartyComposition {
        if self.class_template_override {
            if let Some(signature) = self.class.signature_party() {
                return signature;
            }
        }
        self.party.clone()
    }

    /// Derives the sprite atlas key for this trainer.
    ///
    /// Gendered classes get a `_m`/`_f` suffix; double-only classes use
    /// their paired sprite instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use emberwild::{TrainerRegistry, TrainerClass};
    ///
    /// let registry = TrainerRegistry::new();
    /// let config = registry.get(TrainerClass::Forager).unwrap();
    /// assert!(config.sprite_key(false).starts_with("forager"));
    /// ```
    pub fn sprite_key(&self, female: bool) -> String {
        if self.double_only {
            return format!("{}_double", self.class.key());
        }
        if self.has_genders {
            let suffix = if female { "f" } else { "m" };
            return format!("{}_{}", self.class.key(), suffix);
        }
        self.class.key().to_string()
    }
}

/// Canonical, immutable table of trainer configurations.
///
/// Built once per run. Mutation of canonical entries is impossible through
/// this API: [`TrainerRegistry::get`] returns a shared reference, and all
/// per-encounter customization happens on a [`Clone`] of the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerRegistry {
    configs: HashMap<TrainerClass, TrainerConfig>,
}

impl TrainerRegistry {
    /// Builds the canonical trainer table.
    pub fn new() -> Self {
        let mut configs = HashMap::new();

        // Ordinary trainers: small default parties, most classes gendered.
        let ordinary: [(TrainerClass, bool, PartyComposition); 8] = [
            (TrainerClass::Forager, true, templates::two_average()),
            (TrainerClass::Wrangler, true, templates::two_average()),
            (TrainerClass::Stormcaller, true, templates::three_average()),
            (TrainerClass::Cartographer, false, templates::two_average()),
            (TrainerClass::Mycologist, true, templates::three_average()),
            (TrainerClass::Tidecaller, true, templates::three_average()),
            (TrainerClass::Cinderguard, false, templates::two_average()),
            (TrainerClass::Relichunter, true, templates::three_average()),
        ];
        for (class, has_genders, party) in ordinary {
            configs.insert(class, TrainerConfig::new(class, has_genders, party));
        }

        // Wardens: signature parties, override enabled by default.
        let wardens: [(TrainerClass, bool); 5] = [
            (TrainerClass::ThornWarden, true),
            (TrainerClass::GaleWarden, true),
            (TrainerClass::TideWarden, false),
            (TrainerClass::StoneWarden, false),
            (TrainerClass::EmberWarden, true),
        ];
        for (class, has_genders) in wardens {
            configs.insert(
                class,
                TrainerConfig::new(class, has_genders, templates::warden_signature()),
            );
        }

        Self { configs }
    }

    /// Looks up the canonical config for a class.
    pub fn get(&self, class: TrainerClass) -> EmberwildResult<&TrainerConfig> {
        self.configs
            .get(&class)
            .ok_or_else(|| EmberwildError::UnknownTrainer(class.key().to_string()))
    }

    /// Number of registered trainer classes.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl Default for TrainerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_template_creation() {
        let band = PartyTemplate::new(4, PartyMemberStrength::Strong);
        assert_eq!(band.size, 4);
        assert_eq!(band.strength, PartyMemberStrength::Strong);
        assert!(!band.same_species);
        assert!(!band.balanced);

        let band = band.balanced().same_species();
        assert!(band.same_species);
        assert!(band.balanced);
    }

    #[test]
    fn test_composition_total_size() {
        let single = PartyComposition::Single(PartyTemplate::new(3, PartyMemberStrength::Average));
        assert_eq!(single.total_size(), 3);

        let compound = PartyComposition::Compound(vec![
            PartyTemplate::new(1, PartyMemberStrength::Stronger),
            PartyTemplate::new(4, PartyMemberStrength::Average),
        ]);
        assert_eq!(compound.total_size(), 5);
        assert_eq!(compound.bands().len(), 2);
    }

    #[test]
    fn test_strength_level_adjustments_monotonic() {
        let bands = [
            PartyMemberStrength::Weaker,
            PartyMemberStrength::Weak,
            PartyMemberStrength::Average,
            PartyMemberStrength::Strong,
            PartyMemberStrength::Stronger,
        ];
        for pair in bands.windows(2) {
            assert!(pair[0].level_adjustment() < pair[1].level_adjustment());
        }
        assert_eq!(PartyMemberStrength::Average.level_adjustment(), 0);
    }

    #[test]
    fn test_registry_covers_all_classes() {
        let registry = TrainerRegistry::new();
        assert_eq!(registry.len(), TrainerClass::all().len());
        for class in TrainerClass::all() {
            let config = registry.get(class).unwrap();
            assert_eq!(config.class, class);
        }
    }

    #[test]
    fn test_warden_configs_have_override_enabled() {
        let registry = TrainerRegistry::new();
        for class in TrainerClass::all() {
            let config = registry.get(class).unwrap();
            assert_eq!(config.class_template_override, class.is_boss());
        }
    }

    #[test]
    fn test_clone_and_mutate_leaves_canonical_untouched() {
        let registry = TrainerRegistry::new();
        let mut customized = registry.get(TrainerClass::ThornWarden).unwrap().clone();
        customized.set_party(templates::elite_six());
        customized.clear_class_template_override();

        let canonical = registry.get(TrainerClass::ThornWarden).unwrap();
        assert!(canonical.class_template_override);
        assert_ne!(canonical.party, customized.party);
    }

    #[test]
    fn test_effective_party_honors_override() {
        let registry = TrainerRegistry::new();

        // An un-cleared warden ignores an externally assigned party.
        let mut warden = registry.get(TrainerClass::ThornWarden).unwrap().clone();
        warden.set_party(templates::two_average());
        assert_eq!(warden.effective_party(), templates::warden_signature());

        // Clearing the override lets the assigned party through.
        warden.clear_class_template_override();
        assert_eq!(warden.effective_party(), templates::two_average());

        // Ordinary classes never force a signature party.
        let mut ordinary = registry.get(TrainerClass::Forager).unwrap().clone();
        ordinary.class_template_override = true;
        assert_eq!(ordinary.effective_party(), ordinary.party);
    }

    #[test]
    fn test_sprite_key_gender_suffix() {
        let registry = TrainerRegistry::new();
        let gendered = registry.get(TrainerClass::Forager).unwrap();
        assert_eq!(gendered.sprite_key(false), "forager_m");
        assert_eq!(gendered.sprite_key(true), "forager_f");

        let ungendered = registry.get(TrainerClass::Cartographer).unwrap();
        assert_eq!(ungendered.sprite_key(false), "cartographer");
        assert_eq!(ungendered.sprite_key(true), "cartographer");
    }

    #[test]
    fn test_sprite_key_double_only() {
        let registry = TrainerRegistry::new();
        let mut config = registry.get(TrainerClass::Wrangler).unwrap().clone();
        config.double_only = true;
        assert_eq!(config.sprite_key(true), "wrangler_double");
    }
}
