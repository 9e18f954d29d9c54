//! Outstanding duel offers.

use std::collections::HashMap;
use std::time::Instant;

use duelhub_protocol::Address;

use crate::SessionError;

/// One pending offer from `challenger` to `target`.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub challenger: Address,
    pub target: Address,
    pub created_at: Instant,
}

/// Pending challenges keyed by the ordered pair `(challenger, target)`.
///
/// At most one challenge per pair. Challenges never expire.
#[derive(Debug, Default)]
pub struct ChallengeBook {
    challenges: HashMap<(Address, Address), Challenge>,
}

impl ChallengeBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a challenge, replacing any earlier one for the same pair.
    ///
    /// Returns the replaced challenge.
    pub fn offer(
        &mut self,
        challenger: Address,
        target: Address,
    ) -> Option<Challenge> {
        let challenge = Challenge {
            challenger: challenger.clone(),
            target: target.clone(),
            created_at: Instant::now(),
        };
        let prior = self.challenges.insert((challenger, target), challenge);
        if let Some(prior) = &prior {
            tracing::debug!(
                challenger = %prior.challenger,
                target = %prior.target,
                "challenge replaced"
            );
        }
        prior
    }

    /// Looks up the challenge for a pair without removing it.
    pub fn get(
        &self,
        challenger: &Address,
        target: &Address,
    ) -> Option<&Challenge> {
        self.challenges.get(&(challenger.clone(), target.clone()))
    }

    /// Removes and returns the challenge for a pair.
    ///
    /// # Errors
    /// Returns [`SessionError::ChallengeNotFound`] if there is none.
    pub fn take(
        &mut self,
        challenger: &Address,
        target: &Address,
    ) -> Result<Challenge, SessionError> {
        self.challenges
            .remove(&(challenger.clone(), target.clone()))
            .ok_or_else(|| SessionError::ChallengeNotFound {
                challenger: challenger.clone(),
                target: target.clone(),
            })
    }

    /// Number of pending challenges.
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    /// Returns `true` if no challenges are pending.
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::from(s)
    }

    #[test]
    fn test_offer_then_take_removes_challenge() {
        let mut book = ChallengeBook::new();
        assert!(book.offer(addr("0xa"), addr("0xb")).is_none());

        let taken = book.take(&addr("0xa"), &addr("0xb")).unwrap();
        assert_eq!(taken.challenger, addr("0xa"));
        assert_eq!(taken.target, addr("0xb"));
        assert!(book.is_empty());
    }

    #[test]
    fn test_offer_same_pair_replaces_prior() {
        let mut book = ChallengeBook::new();
        book.offer(addr("0xa"), addr("0xb"));
        let first = book.get(&addr("0xa"), &addr("0xb")).unwrap().created_at;

        let prior = book.offer(addr("0xa"), addr("0xb")).unwrap();
        assert_eq!(prior.created_at, first);
        assert_eq!(book.len(), 1);
        assert!(book.get(&addr("0xa"), &addr("0xb")).unwrap().created_at >= first);
    }

    #[test]
    fn test_pairs_are_ordered() {
        let mut book = ChallengeBook::new();
        book.offer(addr("0xa"), addr("0xb"));
        book.offer(addr("0xb"), addr("0xa"));
        assert_eq!(book.len(), 2);

        book.take(&addr("0xb"), &addr("0xa")).unwrap();
        assert!(book.get(&addr("0xa"), &addr("0xb")).is_some());
    }

    #[test]
    fn test_take_missing_returns_error() {
        let mut book = ChallengeBook::new();
        let err = book.take(&addr("0xa"), &addr("0xb")).unwrap_err();
        assert!(matches!(err, SessionError::ChallengeNotFound { .. }));
    }
}
