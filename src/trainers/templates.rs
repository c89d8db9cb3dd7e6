//! # Party Template Presets
//!
//! The standard party compositions handed to trainers. Encounters that
//! need a bespoke composition build one from [`PartyTemplate`] bands
//! directly; everything else uses these presets.

use super::{PartyComposition, PartyMemberStrength, PartyTemplate};

/// Two average members; the default for light ordinary trainers.
pub fn two_average() -> PartyComposition {
    PartyComposition::Single(PartyTemplate::new(2, PartyMemberStrength::Average))
}

/// Three average members; the default for most ordinary trainers.
pub fn three_average() -> PartyComposition {
    PartyComposition::Single(PartyTemplate::new(3, PartyMemberStrength::Average))
}

/// A warden's signature party: a strong balanced core behind a stronger
/// lead. Used when a warden spawns through normal wave progression.
pub fn warden_signature() -> PartyComposition {
    PartyComposition::Compound(vec![
        PartyTemplate::new(1, PartyMemberStrength::Stronger),
        PartyTemplate::new(3, PartyMemberStrength::Strong).balanced(),
    ])
}

/// The maximal six-member composition, equivalent to an endgame champion's
/// team. Nothing generated through wave progression exceeds it.
pub fn elite_six() -> PartyComposition {
    PartyComposition::Compound(vec![
        PartyTemplate::new(4, PartyMemberStrength::Strong).balanced(),
        PartyTemplate::new(2, PartyMemberStrength::Stronger),
    ])
}

/// The hard challenger's composition: one stronger lead plus a
/// wave-scaled number of average members.
pub fn stronger_lead(average_members: u32) -> PartyComposition {
    PartyComposition::Compound(vec![
        PartyTemplate::new(1, PartyMemberStrength::Stronger),
        PartyTemplate::new(average_members, PartyMemberStrength::Average),
    ])
}
