//! Match command - play a batch of games between two AI seats
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), report_results()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use boop_core::Player;
use boop_tournament::{play_match, AiConfig, MatchConfig, MatchResult, PlayerType};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Player one: alpha-beta, minimax, greedy or random
    #[arg(long, default_value = "alpha-beta")]
    pub one: PlayerType,

    /// Player two: alpha-beta, minimax, greedy or random
    #[arg(long, default_value = "random")]
    pub two: PlayerType,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Search depth (alpha-beta and minimax)
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Think time per move in milliseconds
    #[arg(long, default_value = "100")]
    pub think_ms: u64,

    /// Half-moves before a game is called a tie
    #[arg(long, default_value = "1000")]
    pub turn_limit: u32,

    /// Run games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Match settings JSON file (overrides games, think time, turn limit and parallel)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build the match settings (file or flags)
/// 2. Play the match
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;
    let one = AiConfig {
        player_type: args.one,
        depth: args.depth,
        seed: None,
    };
    let two = AiConfig {
        player_type: args.two,
        depth: args.depth,
        seed: None,
    };

    let results = play_match(&one, &two, &config)?;

    report_results(&results, &one, &two, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Match settings from `--config` when given, else from the flags. An
/// explicit `--seed` wins over the file's seed.
fn build_config(args: &MatchArgs, seed: Option<u64>) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig {
            games: args.games,
            think_time_ms: args.think_ms,
            turn_limit: args.turn_limit,
            parallel: args.parallel,
            seed: None,
        },
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn report_results(results: &MatchResult, one: &AiConfig, two: &AiConfig, json: bool) -> Result<()> {
    if json {
        print_json_results(results, one, two)
    } else {
        print_text_results(results, one, two);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json_results(results: &MatchResult, one: &AiConfig, two: &AiConfig) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        player_one: &'a AiConfig,
        player_two: &'a AiConfig,
        one_win_rate: f64,
        two_win_rate: f64,
        #[serde(flatten)]
        results: &'a MatchResult,
    }

    let output = JsonOutput {
        player_one: one,
        player_two: two,
        one_win_rate: results.win_rate(Player::One),
        two_win_rate: results.win_rate(Player::Two),
        results,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text_results(results: &MatchResult, one: &AiConfig, two: &AiConfig) {
    println!("\n=== Match Results ===");
    println!("Player 1:    {} (depth {})", one.player_type, one.depth);
    println!("Player 2:    {} (depth {})", two.player_type, two.depth);
    println!("Total games: {}", results.games_played);
    println!(
        "P1 wins:     {} ({:.1}%)",
        results.one_wins,
        results.win_rate(Player::One) * 100.0
    );
    println!(
        "P2 wins:     {} ({:.1}%)",
        results.two_wins,
        results.win_rate(Player::Two) * 100.0
    );
    println!("Ties:        {} ({:.1}%)", results.ties, results.tie_rate() * 100.0);
    println!("Avg length:  {:.1} half-moves", results.avg_half_moves);
    println!(
        "Avg think:   P1 {:.1} ms, P2 {:.1} ms",
        results.avg_think_ms_one, results.avg_think_ms_two
    );

    println!("\nGame details:");
    for (index, game) in results.games.iter().enumerate() {
        println!(
            "  Game {}: {} in {} half-moves{}",
            index + 1,
            boop_tournament::describe_winner(game.winner),
            game.half_moves,
            if game.hit_turn_cap { " (turn limit)" } else { "" }
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: MatchArgs,
    }

    fn parse(argv: &[&str]) -> MatchArgs {
        Wrapper::parse_from(std::iter::once("boop").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_flags_build_config() {
        let args = parse(&["--games", "3", "--think-ms", "20", "--parallel"]);
        let config = build_config(&args, Some(5)).unwrap();
        assert_eq!(config.games, 3);
        assert_eq!(config.think_time_ms, 20);
        assert_eq!(config.turn_limit, 1000);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_player_types_parse() {
        let args = parse(&["--one", "minimax", "--two", "greedy"]);
        assert_eq!(args.one, PlayerType::Minimax);
        assert_eq!(args.two, PlayerType::Greedy);
        assert!(Wrapper::try_parse_from(["boop", "--one", "mcts"]).is_err());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let args = parse(&["--config", "/nonexistent/match.json"]);
        assert!(build_config(&args, None).is_err());
    }
}
