//! Human seat: reads moves from a terminal

use std::io::{self, BufRead, Write};

use boop_core::{Deadline, GameState, Move, Policy};

use crate::render::render;

/// Where typed moves come from. Stdin is read unlocked so two human seats
/// can share it.
pub trait LineSource {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineSource for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl LineSource for &[u8] {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Prompts for moves until a legal one is entered. Ignores the deadline.
pub struct HumanPolicy<R, W> {
    input: R,
    output: W,
}

impl HumanPolicy<io::Stdin, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: LineSource, W: Write> HumanPolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, state: &GameState) -> io::Result<Option<String>> {
        write!(self.output, "{} ({}) > ", state.next_mover(), state.phase())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn read_move(&mut self, state: &GameState, moves: &[Move]) -> io::Result<Option<Move>> {
        writeln!(self.output, "\n{}", render(state))?;

        loop {
            let Some(line) = self.prompt(state)? else {
                return Ok(None);
            };

            match line.trim() {
                "quit" | "q" => return Ok(None),
                "moves" | "?" => {
                    let listing: Vec<String> = moves.iter().map(Move::to_string).collect();
                    writeln!(self.output, "{}", listing.join(", "))?;
                }
                text => match state.parse_move(text) {
                    Ok(mv) if moves.contains(&mv) => return Ok(Some(mv)),
                    Ok(mv) => writeln!(self.output, "{mv} is not available here")?,
                    Err(err) => writeln!(self.output, "{err}")?,
                },
            }
        }
    }
}

impl<R: LineSource, W: Write> Policy for HumanPolicy<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn choose_move(&mut self, state: &GameState, moves: &[Move], _deadline: &Deadline) -> Option<Move> {
        if moves.is_empty() {
            return None;
        }
        match self.read_move(state, moves) {
            Ok(mv) => mv,
            Err(err) => {
                tracing::error!("failed to read move: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (Option<Move>, String) {
        let state = GameState::new();
        let moves = state.legal_moves();
        let mut output = Vec::new();
        let mv = HumanPolicy::new(input.as_bytes(), &mut output).choose_move(&state, &moves, &Deadline::from_millis(0));
        (mv, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_reprompts_until_legal() {
        let (mv, output) = ask("zz9\nrc3\nbc3\n");
        assert_eq!(mv, Some("bc3".parse().unwrap()));
        assert!(output.contains("malformed move `zz9`"));
        assert!(output.contains("no cat left in reserve"));
        assert_eq!(output.matches("Player 1 (place) > ").count(), 3);
    }

    #[test]
    fn test_lists_moves_on_request() {
        let (mv, output) = ask("moves\nba1\n");
        assert_eq!(mv, Some("ba1".parse().unwrap()));
        assert!(output.contains("ba1, ba2"));
    }

    #[test]
    fn test_quit_and_end_of_input() {
        assert_eq!(ask("quit\n").0, None);
        assert_eq!(ask("").0, None);
    }
}
