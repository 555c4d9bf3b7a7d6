//! Name tables for the NPCs stamped onto generated floors.

use super::seed::SeededRng;

pub(super) const TRAINER_NAMES: &[&str] =
    &["Hiker Dale", "Camper Ines", "Picnicker Rosa", "Spelunker Bo", "Ace Trainer Wren"];
pub(super) const HEALER_NAMES: &[&str] = &["Nurse Joy", "Nurse Mila", "Medic Oren"];
pub(super) const MERCHANT_NAMES: &[&str] = &["Clerk Pascal", "Trader Nima", "Peddler Lou"];
pub(super) const BOSS_NAMES: &[&str] = &["Leader Brock", "Leader Sabrina", "Elite Kaede"];

pub(super) fn pick_name(rng: &mut SeededRng, roster: &[&str]) -> String {
    rng.pick(roster).map_or_else(|| "Stranger".to_string(), |name| (*name).to_string())
}
