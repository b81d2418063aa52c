use std::env;
use std::time::Instant;

use colored::Colorize;
use jasstable_rs::games::jass::{GameState, JassGame, TOTAL_POINTS};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let rounds: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10_000);
    let base_seed: u64 = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(0);

    let start = Instant::now();
    let mut wins = [0u64; 2];
    let mut draws = 0u64;
    let mut point_totals = [0i64; 2];
    for round in 0..rounds {
        let game = random_round(base_seed.wrapping_add(round));
        let points = game.team_points();
        point_totals[0] += points[0] as i64;
        point_totals[1] += points[1] as i64;
        let payoffs = game.payoffs().expect("the round is complete");
        if payoffs[0] > 0.0 {
            wins[0] += 1;
        } else if payoffs[0] < 0.0 {
            wins[1] += 1;
        } else {
            draws += 1;
        }
    }
    let duration = start.elapsed();

    println!(
        "{}",
        format!("played {} random rounds in {:?}", rounds, duration).green()
    );
    println!(
        "team 0+2 won {}, team 1+3 won {}, {} drawn",
        wins[0].to_string().bold(),
        wins[1].to_string().bold(),
        draws
    );
    println!(
        "average points per round: {:.1} vs {:.1}",
        point_totals[0] as f64 / rounds as f64,
        point_totals[1] as f64 / rounds as f64
    );
}

/// Play one full round with uniformly random trump and card choices,
/// checking the round point total on the way out.
fn random_round(seed: u64) -> JassGame {
    let mut game = JassGame::from_seed(seed);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

    while game.state == GameState::DeclareTrump {
        let calls = game.legal_trump_calls();
        let call = *calls
            .choose(&mut rng)
            .expect("a trump call is always available");
        game.declare_trump(game.current_player, call)
            .expect("a listed trump call is legal");
    }
    while !game.is_terminal() {
        let actions = game.legal_actions();
        let card = *actions
            .choose(&mut rng)
            .expect("a live round always has a legal card");
        game.proceed(game.current_player, card)
            .expect("a card from legal_actions is accepted");
    }

    let points = game.team_points();
    assert_eq!(
        points[0] + points[1],
        TOTAL_POINTS,
        "round {} was not worth {} points",
        seed,
        TOTAL_POINTS
    );
    game
}
