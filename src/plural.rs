//! Finite-state acceptor for English y-pluralization.
//!
//! Accepts vowel-stem + `ys` (`boys`) and consonant-stem + `ies` (`ponies`),
//! and rejects the crossed forms (`ponys`, `boies`). Ordinary `+s` plurals such
//! as `cats` never reach [`State::Accept`].

use serde::{Deserialize, Serialize};

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Start,
    Vowel,
    Consonant,
    VowelY,
    ConsonantY,
    ConsonantI,
    ConsonantIe,
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Vowel,
    Consonant,
    Other,
}

impl CharClass {
    pub fn of(ch: char) -> Self {
        if VOWELS.contains(&ch) {
            CharClass::Vowel
        } else if ch.is_alphabetic() {
            CharClass::Consonant
        } else {
            CharClass::Other
        }
    }

    fn resume(self) -> State {
        match self {
            CharClass::Vowel => State::Vowel,
            CharClass::Consonant => State::Consonant,
            CharClass::Other => State::Reject,
        }
    }
}

impl State {
    /// The transition function. Total over every state and character.
    pub fn next(self, ch: char) -> State {
        let class = CharClass::of(ch);
        match (self, ch) {
            (State::Reject, _) => State::Reject,

            (State::Start, _) => class.resume(),
            (State::Vowel, 'y') => State::VowelY,
            (State::Vowel, _) => class.resume(),
            (State::Consonant, 'y') => State::ConsonantY,
            (State::Consonant, 'i') => State::ConsonantI,
            (State::Consonant, _) => class.resume(),

            (State::VowelY, 's') => State::Accept,
            (State::ConsonantY, 's') => State::Reject,
            (State::ConsonantI, 'e') => State::ConsonantIe,
            (State::ConsonantIe, 's') => State::Accept,

            // A suffix that did not materialize, or more input after acceptance.
            (
                State::VowelY
                | State::ConsonantY
                | State::ConsonantI
                | State::ConsonantIe
                | State::Accept,
                _,
            ) => class.resume(),
        }
    }

    pub fn is_accepting(self) -> bool {
        self == State::Accept
    }
}

/// Returns true if `word` is a regularly formed y-plural.
pub fn accepts(word: &str) -> bool {
    word.chars().fold(State::Start, State::next).is_accepting()
}

/// Every character of `word` paired with the state entered after reading it.
pub fn trace(word: &str) -> Vec<(char, State)> {
    word.chars()
        .scan(State::Start, |state, ch| {
            *state = state.next(ch);
            Some((ch, *state))
        })
        .collect()
}

/// Stepwise driver for callers that feed characters one at a time.
#[derive(Debug, Clone)]
pub struct PluralAcceptor {
    state: State,
}

impl Default for PluralAcceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl PluralAcceptor {
    pub fn new() -> Self {
        Self { state: State::Start }
    }

    pub fn reset(&mut self) {
        self.state = State::Start;
    }

    pub fn step(&mut self, ch: char) -> State {
        let next = self.state.next(ch);
        tracing::trace!(from = ?self.state, ch = %ch, to = ?next, "transition");
        self.state = next;
        next
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_accepting(&self) -> bool {
        self.state.is_accepting()
    }

    /// Resets, feeds every character of `word`, and reports the verdict.
    pub fn run(&mut self, word: &str) -> bool {
        self.reset();
        for ch in word.chars() {
            self.step(ch);
        }
        self.is_accepting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_y_plurals() {
        for word in ["boys", "toys", "ponies", "skies", "puppies"] {
            assert!(accepts(word), "{} should be accepted", word);
        }
    }

    #[test]
    fn test_crossed_forms_rejected() {
        for word in ["boies", "ponys", "toies"] {
            assert!(!accepts(word), "{} should be rejected", word);
        }
    }

    #[test]
    fn test_plain_plural_and_empty_rejected() {
        assert!(!accepts("cats"));
        assert!(!accepts(""));
        assert!(!accepts("boyss"));
    }

    #[test]
    fn test_non_alphabetic_rejects() {
        assert!(!accepts("boy5s"));
        assert!(!accepts("3boys"));
        assert!(!accepts("boys!"));
        assert!(!accepts("pon-ies"));
    }

    #[test]
    fn test_suffix_states_resume() {
        // "boyish": the y is not followed by s, tracking resumes.
        let steps = trace("boyish");
        let states: Vec<State> = steps.iter().map(|&(_, s)| s).collect();
        assert_eq!(
            states,
            vec![
                State::Consonant,
                State::Vowel,
                State::VowelY,
                State::Vowel,
                State::Consonant,
                State::Consonant,
            ]
        );
        assert!(!accepts("boyish"));
    }

    #[test]
    fn test_ponys_sticks_in_reject() {
        let last = trace("ponysies").last().map(|&(_, s)| s);
        assert_eq!(last, Some(State::Reject));
    }

    #[test]
    fn test_uppercase_vowels_are_consonants() {
        assert_eq!(CharClass::of('A'), CharClass::Consonant);
        // "TOYS" never sees a lowercase y after a vowel.
        assert!(!accepts("TOYS"));
    }

    #[test]
    fn test_stepwise_acceptor_resets() {
        let mut fsa = PluralAcceptor::new();
        assert!(fsa.run("ponies"));
        assert_eq!(fsa.state(), State::Accept);
        assert!(!fsa.run("cats"));
        assert!(fsa.run("boys"));
        fsa.reset();
        assert_eq!(fsa.state(), State::Start);
        assert!(!fsa.is_accepting());
    }

    proptest! {
        #[test]
        fn prop_accepts_matches_stepwise(word in "[a-z0-9]{0,12}") {
            let mut fsa = PluralAcceptor::new();
            prop_assert_eq!(accepts(&word), fsa.run(&word));
            prop_assert_eq!(accepts(&word), accepts(&word));
        }

        #[test]
        fn prop_accepted_words_end_in_s(word in "[a-z]{0,12}") {
            if accepts(&word) {
                prop_assert!(word.ends_with("ys") || word.ends_with("ies"));
            }
        }
    }
}
