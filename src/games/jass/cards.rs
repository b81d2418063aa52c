use std::fmt;

use enum_iterator::{all, Sequence};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const PLAYER_COUNT: usize = 4;
pub const DECK_SIZE: usize = 36;
pub const TRICKS_PER_ROUND: usize = DECK_SIZE / PLAYER_COUNT;
pub const LAST_TRICK_BONUS: i32 = 5;
/// Card points plus the last-trick bonus always add up to this per round.
pub const TOTAL_POINTS: i32 = 157;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Suit {
    Diamonds,
    Hearts,
    Spades,
    Clubs,
}

pub fn suit_offset(suit: Suit) -> i32 {
    match suit {
        Suit::Diamonds => 0,
        Suit::Hearts => 1,
        Suit::Spades => 2,
        Suit::Clubs => 3,
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
            Suit::Clubs => "C",
        };
        write!(f, "{}", letter)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Rank {
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// Position of a rank in the plain ascending order, weakest first.
pub fn natural_order(rank: Rank) -> i32 {
    rank as i32
}

/// Position of a rank within the trump suit, weakest first. The Jack is the
/// strongest trump and the nine the second strongest.
pub fn trump_order(rank: Rank) -> i32 {
    match rank {
        Rank::Six => 0,
        Rank::Seven => 1,
        Rank::Eight => 2,
        Rank::Ten => 3,
        Rank::Queen => 4,
        Rank::King => 5,
        Rank::Ace => 6,
        Rank::Nine => 7,
        Rank::Jack => 8,
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        write!(f, "{}", letter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i32,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            id: suit_offset(suit) * 9 + natural_order(rank),
            suit,
            rank,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

static DECK: Lazy<Vec<Card>> = Lazy::new(|| {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in all::<Suit>() {
        for rank in all::<Rank>() {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
});

/// The canonical unshuffled 36-card deck.
pub fn create_deck() -> Vec<Card> {
    DECK.clone()
}

/// How trick comparisons and card points work for the round. Four suit
/// trumps plus the two trump-less modes: obenabe (highest card of the led
/// suit wins) and uneufe (lowest card of the led suit wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrumpMode {
    Diamonds,
    Hearts,
    Spades,
    Clubs,
    TopDown,
    BottomUp,
}

impl TrumpMode {
    pub fn trump_suit(&self) -> Option<Suit> {
        match self {
            TrumpMode::Diamonds => Some(Suit::Diamonds),
            TrumpMode::Hearts => Some(Suit::Hearts),
            TrumpMode::Spades => Some(Suit::Spades),
            TrumpMode::Clubs => Some(Suit::Clubs),
            TrumpMode::TopDown | TrumpMode::BottomUp => None,
        }
    }
}

impl fmt::Display for TrumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrumpMode::Diamonds => "diamonds",
            TrumpMode::Hearts => "hearts",
            TrumpMode::Spades => "spades",
            TrumpMode::Clubs => "clubs",
            TrumpMode::TopDown => "obenabe",
            TrumpMode::BottomUp => "uneufe",
        };
        write!(f, "{}", name)
    }
}

/// What the asked seat says during trump declaration. Pushing hands the
/// choice to the partner, so a round's trump is always a real `TrumpMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrumpCall {
    Declare(TrumpMode),
    Push,
}

/// Comparison strength of a rank for the given mode and suit, higher wins.
/// Uneufe plays upside down: the six is the strongest card of a suit.
pub fn rank_strength(mode: TrumpMode, suit: Suit, rank: Rank) -> i32 {
    match mode {
        TrumpMode::TopDown => natural_order(rank),
        TrumpMode::BottomUp => 8 - natural_order(rank),
        _ if mode.trump_suit() == Some(suit) => trump_order(rank),
        _ => natural_order(rank),
    }
}

/// Point value of a card under the given mode.
pub fn card_points(mode: TrumpMode, card: Card) -> i32 {
    match mode {
        TrumpMode::TopDown => match card.rank {
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::Eight => 8,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            _ => 0,
        },
        TrumpMode::BottomUp => match card.rank {
            Rank::Six => 11,
            Rank::Ten => 10,
            Rank::Eight => 8,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            _ => 0,
        },
        _ if mode.trump_suit() == Some(card.suit) => match card.rank {
            Rank::Jack => 20,
            Rank::Nine => 14,
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            _ => 0,
        },
        _ => match card.rank {
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            _ => 0,
        },
    }
}
