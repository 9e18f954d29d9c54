//! The battle book: every live battle, keyed by id.

use std::collections::HashMap;

use duelhub_protocol::{BattleId, PlayerId};

use crate::{Battle, BattleError};

/// Owns all live battles.
#[derive(Debug, Default)]
pub struct BattleBook {
    battles: HashMap<BattleId, Battle>,
}

impl BattleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a battle between two players and returns its id.
    ///
    /// # Errors
    /// Returns [`BattleError::SameParticipant`] if both are the same player.
    pub fn create(
        &mut self,
        player_one: PlayerId,
        player_two: PlayerId,
    ) -> Result<BattleId, BattleError> {
        let battle_id = BattleId::generate();
        let battle = Battle::new(battle_id.clone(), player_one, player_two)?;
        tracing::info!(
            %battle_id,
            player_one = %battle.player_one(),
            player_two = %battle.player_two(),
            "battle created"
        );
        self.battles.insert(battle_id.clone(), battle);
        Ok(battle_id)
    }

    /// Looks up a battle.
    pub fn get(&self, battle_id: &BattleId) -> Result<&Battle, BattleError> {
        self.battles
            .get(battle_id)
            .ok_or_else(|| BattleError::NotFound(battle_id.clone()))
    }

    /// Looks up a battle for mutation.
    pub fn get_mut(
        &mut self,
        battle_id: &BattleId,
    ) -> Result<&mut Battle, BattleError> {
        self.battles
            .get_mut(battle_id)
            .ok_or_else(|| BattleError::NotFound(battle_id.clone()))
    }

    /// Removes a battle, returning it if it existed.
    pub fn remove(&mut self, battle_id: &BattleId) -> Option<Battle> {
        let removed = self.battles.remove(battle_id);
        if removed.is_some() {
            tracing::info!(%battle_id, "battle removed");
        }
        removed
    }

    pub fn contains(&self, battle_id: &BattleId) -> bool {
        self.battles.contains_key(battle_id)
    }

    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    #[test]
    fn test_create_generates_distinct_ids() {
        let mut book = BattleBook::new();
        let a = book.create(pid("p1"), pid("p2")).unwrap();
        let b = book.create(pid("p3"), pid("p4")).unwrap();
        assert_ne!(a, b);
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(&a).unwrap().player_one(), &pid("p1"));
    }

    #[test]
    fn test_create_same_player_inserts_nothing() {
        let mut book = BattleBook::new();
        assert!(book.create(pid("p1"), pid("p1")).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_get_missing_returns_not_found() {
        let book = BattleBook::new();
        assert!(matches!(
            book.get(&BattleId::new("nope")),
            Err(BattleError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_then_lookup_fails() {
        let mut book = BattleBook::new();
        let id = book.create(pid("p1"), pid("p2")).unwrap();
        assert!(book.remove(&id).is_some());
        assert!(!book.contains(&id));
        assert!(book.remove(&id).is_none());
    }
}
