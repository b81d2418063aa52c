pub mod cards;
pub mod game;

// Re-export the main types
pub use cards::{
    card_points, create_deck, rank_strength, trump_order, Card, Rank, Suit, TrumpCall, TrumpMode,
    DECK_SIZE, LAST_TRICK_BONUS, PLAYER_COUNT, TOTAL_POINTS, TRICKS_PER_ROUND,
};
pub use game::{
    playable_cards, trick_points, trick_winner, value_for_card, CompletedTrick, GameState,
    JassError, JassGame, Observation, TrickOutcome,
};
