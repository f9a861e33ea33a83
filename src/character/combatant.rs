use super::buffs::Buff;

/// Anything that can be hit, healed or buffed: party members and enemies.
pub trait Combatant {
    fn combatant_id(&self) -> &str;

    /// Defense including active buffs.
    fn effective_defense(&self) -> u32;

    /// Applies the defense curve, returns health actually removed.
    fn take_damage(&mut self, amount: u32) -> u32;

    /// Subtracts `amount` without mitigation, returns health actually removed.
    fn take_true_damage(&mut self, amount: u32) -> u32;

    /// Returns health actually restored.
    fn heal(&mut self, amount: u32) -> u32;

    fn is_alive(&self) -> bool;

    fn add_buff(&mut self, buff: Buff);
}
