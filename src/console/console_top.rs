//! Line-oriented console front end and command loop.
//!
//! Plays the role a board UI plays for the engine: it turns text commands
//! into `(row, col)` clicks, calls the engine, and prints what changed.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::console::console_config::ConsoleConfig;
use crate::errors::{ConfigError, ConsoleError};
use crate::game_state::checkers_types::*;
use crate::game_state::game_state::MoveOutcome;
use crate::utils::render_game_state::render_game_state;

const HELP_TEXT: &str = "commands: click <row> <col> | select <row> <col> | move <row> <col> | \
deselect | reset | moves | show | position <string> | fen | state | help | quit";

pub fn run_stdio_loop(config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let mut console = ConsoleState::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    console.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

pub struct ConsoleState {
    game: CheckersGame,
    show_board_after_move: bool,
}

impl ConsoleState {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            game: config.build_game()?,
            show_board_after_move: config.show_board_after_move,
        })
    }

    pub fn game(&self) -> &CheckersGame {
        &self.game
    }

    /// Feed commands from `input` until `quit` or end of input. Lines that are
    /// not UTF-8 get an error reply; read and write failures end the session.
    pub fn run(&mut self, mut input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }

            let quit = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_command(line, out)?,
                Err(err) => {
                    warn!(%err, "skipping non-utf-8 input line");
                    writeln!(out, "error: input is not valid utf-8")?;
                    false
                }
            };
            out.flush()?;
            if quit {
                return Ok(());
            }
        }
    }

    /// Run one command. Returns `Ok(true)` when the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "click" | "select" | "move" => {
                let Some((row, col)) = parse_coordinates(&mut parts) else {
                    writeln!(out, "error: {cmd} expects <row> <col>")?;
                    return Ok(false);
                };
                match cmd {
                    "click" => self.handle_click(row, col, out)?,
                    "select" => self.handle_select(row, col, out)?,
                    _ => self.handle_move(row, col, out)?,
                }
            }
            "deselect" => {
                self.game.deselect_piece();
                writeln!(out, "ok")?;
            }
            "reset" => {
                self.game.reset();
                writeln!(out, "ok")?;
            }
            "moves" => {
                let all = self.game.all_legal_moves();
                if all.is_empty() {
                    writeln!(out, "no legal moves")?;
                }
                for (from, moves) in all {
                    writeln!(out, "{from}: {}", format_moves(&moves))?;
                }
            }
            "show" => {
                writeln!(out, "{}", render_game_state(&self.game))?;
            }
            "position" => {
                let text = trimmed["position".len()..].trim();
                match CheckersGame::from_position_str(text) {
                    Ok(game) => {
                        self.game = game;
                        writeln!(out, "ok")?;
                    }
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            "fen" => {
                writeln!(out, "{}", self.game.position_string())?;
            }
            "state" => match self.game.snapshot().to_json() {
                Ok(json) => writeln!(out, "{json}")?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            "help" => {
                writeln!(out, "{HELP_TEXT}")?;
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                writeln!(out, "error: unknown command '{cmd}'")?;
            }
        }

        Ok(false)
    }

    fn handle_click(&mut self, row: i32, col: i32, out: &mut impl Write) -> io::Result<()> {
        let player_before = self.game.current_player();
        let board_before = self.game.board().clone();

        if !self.game.click(row, col) {
            writeln!(out, "deselected")?;
            return Ok(());
        }

        if self.game.board() == &board_before {
            writeln!(
                out,
                "selected ({row}, {col}): {}",
                format_moves(self.game.valid_moves())
            )?;
            return Ok(());
        }

        if self.game.is_game_over() {
            self.report_game_over(out)?;
        } else if self.game.current_player() != player_before {
            writeln!(out, "moved; {} to move", self.game.current_player())?;
        } else {
            self.report_continuation(out)?;
        }
        self.maybe_show_board(out)
    }

    fn handle_select(&mut self, row: i32, col: i32, out: &mut impl Write) -> io::Result<()> {
        match self.game.try_select_piece(row, col) {
            Ok(moves) => {
                let listed = format_moves(moves);
                writeln!(out, "selected ({row}, {col}): {listed}")
            }
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn handle_move(&mut self, row: i32, col: i32, out: &mut impl Write) -> io::Result<()> {
        match self.game.try_make_move(row, col) {
            Ok(report) => {
                match report.outcome {
                    MoveOutcome::TurnPassed => {
                        writeln!(out, "moved; {} to move", self.game.current_player())?
                    }
                    MoveOutcome::ContinueJumping => self.report_continuation(out)?,
                    MoveOutcome::GameOver { .. } => self.report_game_over(out)?,
                }
                self.maybe_show_board(out)
            }
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn report_continuation(&self, out: &mut impl Write) -> io::Result<()> {
        match self.game.selected_piece() {
            Some(piece) => writeln!(
                out,
                "moved; continue jumping from {piece}: {}",
                format_moves(self.game.valid_moves())
            ),
            None => writeln!(out, "moved"),
        }
    }

    fn report_game_over(&self, out: &mut impl Write) -> io::Result<()> {
        match self.game.winner() {
            Some(winner) => writeln!(out, "moved; game over, {winner} wins"),
            None => writeln!(out, "moved"),
        }
    }

    fn maybe_show_board(&self, out: &mut impl Write) -> io::Result<()> {
        if self.show_board_after_move {
            writeln!(out, "{}", render_game_state(&self.game))?;
        }
        Ok(())
    }
}

fn parse_coordinates<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<(i32, i32)> {
    let row = parts.next()?.parse::<i32>().ok()?;
    let col = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

fn format_moves(moves: &[Move]) -> String {
    if moves.is_empty() {
        return "none".to_owned();
    }

    moves
        .iter()
        .map(|mv| match mv.capture {
            Some(over) => format!("{} x {over}", mv.destination()),
            None => mv.destination().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
