pub mod decision_log;
pub mod profiles;
pub mod spring;
pub mod swipe;

pub use decision_log::DecisionLog;
pub use profiles::{load_profiles, mock_profiles, Profile};
pub use swipe::{
    classify_release, next_card_scale, CardFrame, CommitListener, DerivedTransform, GestureEvent,
    Offset, Resolution, SwipeCardController, SwipeConfig, SwipePhase,
};

use serde::{Deserialize, Serialize};

/// Cursor steps taken on every commit. The card that was previewed as
/// "next" is consumed together with the committed one.
pub const DECK_ADVANCE: usize = 2;

/// Anything that can sit in a deck. The swipe controller only needs an id.
pub trait Candidate {
    fn id(&self) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Pass
    Left,
    /// Like
    Right,
}

impl SwipeDirection {
    /// Sign of the horizontal axis this direction moves along.
    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SwipeDirection::Left => "pass",
            SwipeDirection::Right => "like",
        }
    }
}

/// Ordered candidates plus the two presentation cursors.
#[derive(Debug, Clone)]
pub struct Deck<C> {
    candidates: Vec<C>,
    current_index: usize,
    next_index: usize,
}

impl<C> Deck<C> {
    pub fn new(candidates: Vec<C>) -> Self {
        Self {
            candidates,
            current_index: 0,
            next_index: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[C] {
        &self.candidates
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.candidates.get(index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// The card on top, if the deck is not exhausted.
    pub fn current(&self) -> Option<&C> {
        self.get(self.current_index)
    }

    /// The card shown underneath the current one.
    pub fn next(&self) -> Option<&C> {
        self.get(self.next_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }

    pub fn advance(&mut self) {
        self.current_index += DECK_ADVANCE;
        self.next_index += DECK_ADVANCE;
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
        self.next_index = 1;
    }
}

/// Statistics about decisions made during the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionStatistics {
    pub total_candidates: usize,
    pub liked: usize,
    pub passed: usize,
}

impl DecisionStatistics {
    pub fn decided(&self) -> usize {
        self.liked + self.passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod deck_tests {
        use super::*;

        #[test]
        fn test_deck_new() {
            let deck = Deck::new(vec!["a", "b", "c"]);

            assert_eq!(deck.len(), 3);
            assert_eq!(deck.current_index(), 0);
            assert_eq!(deck.next_index(), 1);
            assert_eq!(deck.current(), Some(&"a"));
            assert_eq!(deck.next(), Some(&"b"));
            assert!(!deck.is_exhausted());
        }

        #[test]
        fn test_deck_advance_moves_both_cursors_by_two() {
            let mut deck = Deck::new(vec![1, 2, 3, 4, 5]);
            deck.advance();

            assert_eq!(deck.current_index(), 2);
            assert_eq!(deck.next_index(), 3);
            assert_eq!(deck.current(), Some(&3));
            assert_eq!(deck.next(), Some(&4));
        }

        #[test]
        fn test_deck_exhausted_after_passing_the_end() {
            let mut deck = Deck::new(vec![1, 2]);
            deck.advance();

            assert!(deck.is_exhausted());
            assert_eq!(deck.current(), None);
            assert_eq!(deck.next(), None);
        }

        #[test]
        fn test_deck_last_card_has_no_next() {
            let mut deck = Deck::new(vec![1, 2, 3]);
            deck.advance();

            assert_eq!(deck.current(), Some(&3));
            assert_eq!(deck.next(), None);
            assert!(!deck.is_exhausted());
        }

        #[test]
        fn test_deck_reset() {
            let mut deck = Deck::new(vec![1, 2]);
            deck.advance();
            deck.advance();
            deck.reset();

            assert_eq!(deck.current_index(), 0);
            assert_eq!(deck.next_index(), 1);
            assert_eq!(deck.current(), Some(&1));
        }

        #[test]
        fn test_empty_deck_is_exhausted() {
            let deck: Deck<u64> = Deck::new(vec![]);
            assert!(deck.is_empty());
            assert!(deck.is_exhausted());
        }
    }

    #[test]
    fn test_direction_sign_and_label() {
        assert_eq!(SwipeDirection::Left.sign(), -1.0);
        assert_eq!(SwipeDirection::Right.sign(), 1.0);
        assert_eq!(SwipeDirection::Left.label(), "pass");
        assert_eq!(SwipeDirection::Right.label(), "like");
    }

    #[test]
    fn test_statistics_decided() {
        let stats = DecisionStatistics {
            total_candidates: 10,
            liked: 3,
            passed: 2,
        };
        assert_eq!(stats.decided(), 5);
    }
}
