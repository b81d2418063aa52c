/*
Game: Swiss Jass, Schieber variant
Four players in two fixed partnerships (seats 0+2 and 1+3) play nine tricks
with a 36-card deck. The seat left of the dealer declares the trump mode or
pushes the choice to their partner, then leads the first trick.
Rules: https://en.wikipedia.org/wiki/Jass#Schieber
*/

use enum_iterator::all;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::cards::{
    card_points, create_deck, rank_strength, trump_order, Card, Rank, Suit, TrumpCall, TrumpMode,
    LAST_TRICK_BONUS, PLAYER_COUNT, TOTAL_POINTS, TRICKS_PER_ROUND,
};

/// Contract violations. Every variant is a caller bug: the engine rejects
/// the call outright and never repairs or retries bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JassError {
    #[error("seat {seat} played {card}, which is not legal in the current trick")]
    InvalidMove { seat: usize, card: Card },
    #[error("seat {seat} acted out of turn, seat {expected} is next")]
    OutOfTurn { seat: usize, expected: usize },
    #[error("seat {seat} cannot declare trump: {reason}")]
    IllegalTrumpDeclaration { seat: usize, reason: &'static str },
    #[error("payoffs requested before the round completed")]
    PrematureQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GameState {
    #[default]
    DeclareTrump,
    Play,
    Complete,
}

/// Winning seat and point value of a resolved trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickOutcome {
    pub winner: usize,
    pub points: i32,
}

/// One finished trick. `cards` are in play order, so `cards[k]` was played
/// by seat `(leader + k) % 4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTrick {
    pub leader: usize,
    pub cards: [Card; PLAYER_COUNT],
    pub winner: usize,
    pub points: i32,
}

/// Perfect-information snapshot for debugging and analysis. Legality and
/// scoring never read one of these; they work on the live state directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub hands: [Vec<Card>; PLAYER_COUNT],
    pub played_cards: Vec<Card>,
    pub trump: Option<TrumpMode>,
    pub current_player: usize,
    pub current_trick: Vec<(usize, Card)>,
    pub legal_actions: Vec<Card>,
}

/// A single round of Schieber: one deal, a trump declaration, nine tricks.
/// The struct owns every hand and trick; there are no live references
/// between players, tricks, and the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JassGame {
    pub hands: [Vec<Card>; PLAYER_COUNT],
    pub dealer: usize,
    pub current_player: usize,
    pub state: GameState,
    pub trump: Option<TrumpMode>,
    pushed: bool,
    pub current_trick: Vec<(usize, Card)>,
    pub tricks: Vec<CompletedTrick>,
}

impl JassGame {
    pub fn new() -> Self {
        Self::from_seed(thread_rng().gen())
    }

    /// Deal a reproducible round: the same seed always yields the same hands.
    pub fn from_seed(seed: u64) -> Self {
        let mut game = Self {
            dealer: 3,
            ..Default::default()
        };
        game.deal(&mut StdRng::seed_from_u64(seed));
        game
    }

    /// The seat left of the dealer: first asked for trump, leads trick one.
    pub fn forehand(&self) -> usize {
        (self.dealer + 1) % PLAYER_COUNT
    }

    fn deal(&mut self, rng: &mut impl Rng) {
        let mut deck = create_deck();
        deck.shuffle(rng);
        for _ in 0..TRICKS_PER_ROUND {
            for hand in &mut self.hands {
                hand.push(deck.pop().expect("the deck should have enough cards"));
            }
        }
        assert!(deck.is_empty(), "deck should be all dealt");
        self.current_player = self.forehand();
    }

    /// The declaration action space: all six modes, plus a push while the
    /// forehand still holds the choice.
    pub fn legal_trump_calls(&self) -> Vec<TrumpCall> {
        if self.state != GameState::DeclareTrump {
            return vec![];
        }
        let mut calls: Vec<TrumpCall> = all::<TrumpMode>().map(TrumpCall::Declare).collect();
        if !self.pushed {
            calls.push(TrumpCall::Push);
        }
        calls
    }

    pub fn declare_trump(&mut self, seat: usize, call: TrumpCall) -> Result<(), JassError> {
        if self.state != GameState::DeclareTrump {
            return Err(JassError::IllegalTrumpDeclaration {
                seat,
                reason: "the round is already under way",
            });
        }
        if seat != self.current_player {
            return Err(JassError::OutOfTurn {
                seat,
                expected: self.current_player,
            });
        }
        match call {
            TrumpCall::Push => {
                if self.pushed {
                    return Err(JassError::IllegalTrumpDeclaration {
                        seat,
                        reason: "the partner cannot push back",
                    });
                }
                self.pushed = true;
                self.current_player = (seat + 2) % PLAYER_COUNT;
                debug!(seat, partner = self.current_player, "trump choice pushed");
                Ok(())
            }
            TrumpCall::Declare(mode) => {
                self.trump = Some(mode);
                self.state = GameState::Play;
                // the forehand leads trick one no matter which partner declared
                self.current_player = self.forehand();
                debug!(seat, %mode, "trump declared");
                Ok(())
            }
        }
    }

    /// Legal cards for the seat whose turn it is. Empty outside of play.
    pub fn legal_actions(&self) -> Vec<Card> {
        match (self.state, self.trump) {
            (GameState::Play, Some(trump)) => {
                let table: Vec<Card> = self.current_trick.iter().map(|&(_, card)| card).collect();
                playable_cards(&self.hands[self.current_player], &table, trump)
            }
            _ => vec![],
        }
    }

    /// Play `card` for `seat`. Returns the trick outcome when this card was
    /// the fourth of the trick.
    pub fn proceed(&mut self, seat: usize, card: Card) -> Result<Option<TrickOutcome>, JassError> {
        if self.state != GameState::Play {
            return Err(JassError::InvalidMove { seat, card });
        }
        if seat != self.current_player {
            return Err(JassError::OutOfTurn {
                seat,
                expected: self.current_player,
            });
        }
        if !self.legal_actions().contains(&card) {
            return Err(JassError::InvalidMove { seat, card });
        }
        self.hands[seat].retain(|c| *c != card);
        self.current_trick.push((seat, card));
        if self.current_trick.len() == PLAYER_COUNT {
            Ok(Some(self.resolve_trick()))
        } else {
            self.current_player = (seat + 1) % PLAYER_COUNT;
            Ok(None)
        }
    }

    fn resolve_trick(&mut self) -> TrickOutcome {
        let trump = self.trump.expect("trump is declared before any card is played");
        let winner = trick_winner(trump, &self.current_trick);
        let cards: Vec<Card> = self.current_trick.iter().map(|&(_, card)| card).collect();
        let last_trick = self.tricks.len() + 1 == TRICKS_PER_ROUND;
        let points = trick_points(trump, &cards, last_trick);
        self.tricks.push(CompletedTrick {
            leader: self.current_trick[0].0,
            cards: [cards[0], cards[1], cards[2], cards[3]],
            winner,
            points,
        });
        self.current_trick.clear();
        // winner of the trick leads
        self.current_player = winner;
        debug!(winner, points, trick = self.tricks.len(), "trick resolved");
        if self.tricks.len() == TRICKS_PER_ROUND {
            self.state = GameState::Complete;
            debug!(points = ?self.team_points(), "round complete");
        }
        TrickOutcome { winner, points }
    }

    pub fn is_terminal(&self) -> bool {
        self.state == GameState::Complete
    }

    /// Points taken so far by the partnerships, seats 0+2 and seats 1+3.
    pub fn team_points(&self) -> [i32; 2] {
        let mut points = [0, 0];
        for trick in &self.tricks {
            points[trick.winner % 2] += trick.points;
        }
        points
    }

    /// Zero-sum payoff per seat: the team point differential normalized by
    /// the round total, positive for the partnership of seats 0 and 2.
    pub fn payoffs(&self) -> Result<[f64; 4], JassError> {
        if self.state != GameState::Complete {
            return Err(JassError::PrematureQuery);
        }
        let points = self.team_points();
        let payoff = (points[0] - points[1]) as f64 / TOTAL_POINTS as f64;
        Ok([payoff, -payoff, payoff, -payoff])
    }

    /// Every card no longer in a hand, in play order.
    pub fn played_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.tricks.iter().flat_map(|trick| trick.cards).collect();
        cards.extend(self.current_trick.iter().map(|&(_, card)| card));
        cards
    }

    pub fn perfect_information(&self) -> Observation {
        Observation {
            hands: self.hands.clone(),
            played_cards: self.played_cards(),
            trump: self.trump,
            current_player: self.current_player,
            current_trick: self.current_trick.clone(),
            legal_actions: self.legal_actions(),
        }
    }
}

/// Cards from `hand` that may legally be played with `table` already laid.
/// Pure function of its arguments; never empty for a non-empty hand.
pub fn playable_cards(hand: &[Card], table: &[Card], trump: TrumpMode) -> Vec<Card> {
    // leading the trick: anything goes
    if table.is_empty() {
        return hand.to_vec();
    }
    let lead_suit = table[0].suit;
    let lead_cards: Vec<Card> = hand.iter().filter(|c| c.suit == lead_suit).copied().collect();

    let trump_suit = match trump.trump_suit() {
        Some(suit) => suit,
        // obenabe and uneufe: plain follow-the-led-suit
        None => {
            return if lead_cards.is_empty() {
                hand.to_vec()
            } else {
                lead_cards
            };
        }
    };
    let trump_cards: Vec<Card> = hand.iter().filter(|c| c.suit == trump_suit).copied().collect();

    if lead_suit == trump_suit {
        if trump_cards.is_empty() {
            return hand.to_vec();
        }
        // holding the trump jack as the only trump, a player may discard instead
        if trump_cards.len() == 1 && trump_cards[0].rank == Rank::Jack {
            return hand.to_vec();
        }
        return trump_cards;
    }

    // weakest trump already on the table; the leader's card is not trump here
    let lowest_trump_played = table[1..]
        .iter()
        .filter(|c| c.suit == trump_suit)
        .min_by_key(|c| trump_order(c.rank))
        .copied();

    let lowest = match lowest_trump_played {
        Some(card) => card,
        None => {
            // no trump laid yet: follow suit or trump in, free choice
            return if lead_cards.is_empty() {
                hand.to_vec()
            } else {
                let mut cards = lead_cards;
                cards.extend(trump_cards);
                cards
            };
        }
    };

    // a hand of nothing but trump may always play
    if trump_cards.len() == hand.len() {
        return hand.to_vec();
    }
    if lead_cards.is_empty() {
        // anything except undertrumping
        hand.iter()
            .filter(|c| c.suit != trump_suit || trump_order(c.rank) > trump_order(lowest.rank))
            .copied()
            .collect()
    } else {
        // follow suit, or beat the trump already laid
        let mut cards = lead_cards;
        cards.extend(
            trump_cards
                .iter()
                .filter(|c| trump_order(c.rank) > trump_order(lowest.rank)),
        );
        cards
    }
}

/// Strength of a card within a trick: trump beats the led suit, the led suit
/// beats everything else, and a card that can never win maps to -1.
pub fn value_for_card(trump: TrumpMode, lead_suit: Suit, card: Card) -> i32 {
    if let Some(trump_suit) = trump.trump_suit() {
        if card.suit == trump_suit {
            return 100 + trump_order(card.rank);
        }
    }
    if card.suit == lead_suit {
        return rank_strength(trump, card.suit, card.rank);
    }
    -1
}

/// Winning seat of a completed trick. Ties are impossible: candidate cards
/// share a suit and no two cards of one suit have the same rank.
pub fn trick_winner(trump: TrumpMode, trick: &[(usize, Card)]) -> usize {
    let lead_suit = trick[0].1.suit;
    trick
        .iter()
        .max_by_key(|&&(_, card)| value_for_card(trump, lead_suit, card))
        .map(|&(seat, _)| seat)
        .expect("a completed trick has four cards")
}

/// Point value of a completed trick, with the bonus for the round's last one.
pub fn trick_points(trump: TrumpMode, cards: &[Card], last_trick: bool) -> i32 {
    let points: i32 = cards.iter().map(|&card| card_points(trump, card)).sum();
    if last_trick {
        points + LAST_TRICK_BONUS
    } else {
        points
    }
}
