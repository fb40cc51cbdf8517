use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Flashcard;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::shuffle::shuffle;

/// Matches the card flip transition of the view.
pub const DEFAULT_FLIP_TRANSITION: Duration = Duration::from_millis(400);

/// A flip animation that is still running. Toggles that arrive before it
/// expires are dropped.
#[derive(Debug, Clone, Copy)]
pub struct FlipGuard {
    window: Duration,
    busy_until: Option<Instant>,
}

impl FlipGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            busy_until: None,
        }
    }

    pub fn is_busy(&self, now: Instant) -> bool {
        matches!(self.busy_until, Some(until) if now < until)
    }

    /// Starts a transition at `now` unless one is already running.
    fn try_begin(&mut self, now: Instant) -> bool {
        if self.is_busy(now) {
            return false;
        }
        self.busy_until = Some(now + self.window);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CardRow {
    pub prompt: String,
    pub active: bool,
}

/// Everything the view needs to draw the deck.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DeckView {
    pub prompt: String,
    pub reveal: String,
    pub revealed: bool,
    pub counter: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub progress_percent: u8,
    pub announcement: String,
    pub sidebar: Vec<CardRow>,
}

pub struct FlashcardDeck<R = StdRng> {
    catalog: Vec<Flashcard>,
    cards: Vec<Flashcard>,
    cursor: Cursor,
    revealed: bool,
    flip: FlipGuard,
    rng: R,
}

impl FlashcardDeck<StdRng> {
    pub fn new(catalog: Vec<Flashcard>, flip_transition: Duration) -> Self {
        Self::with_rng(catalog, flip_transition, StdRng::from_entropy())
    }
}

impl<R: Rng> FlashcardDeck<R> {
    /// A deck in catalog order, showing the first card's prompt.
    pub fn with_rng(catalog: Vec<Flashcard>, flip_transition: Duration, rng: R) -> Self {
        Self {
            cursor: Cursor::new(catalog.len()),
            cards: catalog.clone(),
            catalog,
            revealed: false,
            flip: FlipGuard::new(flip_transition),
            rng,
        }
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn position(&self) -> Option<usize> {
        self.cursor.position()
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cursor.position().and_then(|p| self.cards.get(p))
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Flips the current card unless a flip is still animating.
    /// Returns whether the flip happened.
    pub fn toggle_reveal(&mut self, now: Instant) -> bool {
        if self.current().is_none() {
            return false;
        }
        if !self.flip.try_begin(now) {
            log::debug!("Ignoring flip, transition still running");
            return false;
        }
        self.revealed = !self.revealed;
        true
    }

    pub fn next(&mut self) -> bool {
        let moved = self.cursor.next();
        if moved {
            self.revealed = false;
        }
        moved
    }

    pub fn prev(&mut self) -> bool {
        let moved = self.cursor.prev();
        if moved {
            self.revealed = false;
        }
        moved
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        self.cursor.jump_to(index)?;
        self.revealed = false;
        Ok(())
    }

    /// Replaces the working deck with a fresh shuffle of the catalog and goes
    /// back to the first card.
    pub fn shuffle(&mut self) {
        self.cards = shuffle(&self.catalog, &mut self.rng);
        self.cursor.reset(self.cards.len());
        self.revealed = false;
        log::debug!("Shuffled {} flashcards", self.cards.len());
    }

    pub fn view(&self) -> DeckView {
        let position = self.cursor.position();
        let (prompt, reveal) = match self.current() {
            Some(card) => (card.prompt.clone(), card.reveal.clone()),
            None => (String::new(), String::new()),
        };
        let announcement = match position {
            Some(p) => format!("Card {} of {}: {}", p + 1, self.cards.len(), prompt),
            None => String::new(),
        };

        DeckView {
            prompt,
            reveal,
            revealed: self.revealed,
            counter: self.cursor.label(),
            can_go_back: self.cursor.can_go_back(),
            can_go_forward: self.cursor.can_go_forward(),
            progress_percent: self.cursor.progress_percent(),
            announcement,
            sidebar: self
                .cards
                .iter()
                .enumerate()
                .map(|(i, card)| CardRow {
                    prompt: card.prompt.clone(),
                    active: Some(i) == position,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_flashcards;

    fn deck() -> FlashcardDeck {
        FlashcardDeck::with_rng(
            builtin_flashcards(),
            DEFAULT_FLIP_TRANSITION,
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn revealed_card_shows_prompt_again_after_navigation() {
        let mut deck = deck();
        let t0 = Instant::now();
        assert!(deck.toggle_reveal(t0));
        assert!(deck.view().revealed);

        assert!(deck.next());
        assert!(deck.prev());
        let view = deck.view();
        assert!(!view.revealed);
        assert_eq!(view.prompt, "What does CPU stand for?");
    }

    #[test]
    fn flips_inside_the_transition_are_ignored() {
        let mut deck = deck();
        let t0 = Instant::now();
        assert!(deck.toggle_reveal(t0));
        assert!(!deck.toggle_reveal(t0 + Duration::from_millis(100)));
        assert!(deck.is_revealed());

        assert!(deck.toggle_reveal(t0 + DEFAULT_FLIP_TRANSITION));
        assert!(!deck.is_revealed());
    }

    #[test]
    fn select_and_shuffle_hide_the_answer() {
        let mut deck = deck();
        let t0 = Instant::now();
        deck.toggle_reveal(t0);
        deck.select(5).unwrap();
        assert!(!deck.is_revealed());
        assert_eq!(deck.position(), Some(5));

        deck.toggle_reveal(t0 + Duration::from_secs(1));
        deck.shuffle();
        assert!(!deck.is_revealed());
        assert_eq!(deck.position(), Some(0));
        assert_eq!(deck.cards().len(), 10);
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut deck = deck();
        deck.select(3).unwrap();
        assert!(deck.select(10).is_err());
        assert_eq!(deck.position(), Some(3));
    }

    #[test]
    fn view_reflects_cursor() {
        let mut deck = deck();
        deck.select(9).unwrap();
        let view = deck.view();
        assert_eq!(view.counter, "10 / 10");
        assert!(view.can_go_back);
        assert!(!view.can_go_forward);
        assert_eq!(view.progress_percent, 100);
        assert_eq!(
            view.announcement,
            "Card 10 of 10: What is the goal of debugging?"
        );
        assert!(view.sidebar[9].active);
        assert_eq!(view.sidebar.iter().filter(|row| row.active).count(), 1);
    }

    #[test]
    fn empty_deck_cannot_flip() {
        let mut deck = FlashcardDeck::with_rng(
            Vec::new(),
            DEFAULT_FLIP_TRANSITION,
            StdRng::seed_from_u64(1),
        );
        assert!(!deck.toggle_reveal(Instant::now()));
        assert_eq!(deck.view().counter, "");
    }
}
