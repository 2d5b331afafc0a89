use crate::core::{Board, Mark, CELL_COUNT};
use crate::error::{Error, Result};
use crate::player::PlayerController;
use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Cursor, Read, Stdin, Stdout, Write};
use tracing::{debug, warn};

/// 一行ずつ読める入力元
///
/// `Stdin` locks only for the duration of each read, so any number of human
/// players can share the process's standard input.
pub trait LineInput {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineInput for Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<R: Read> LineInput for BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// 行入力でマス番号を受け取るプレイヤー
pub struct HumanPlayer<R, W> {
    mark: Mark,
    name: String,
    input: RefCell<R>,
    output: RefCell<W>,
}

impl HumanPlayer<Stdin, Stdout> {
    pub fn stdin(mark: Mark, name: &str) -> Self {
        Self::new(mark, name, io::stdin(), io::stdout())
    }
}

impl<R: LineInput, W: Write> HumanPlayer<R, W> {
    pub fn new(mark: Mark, name: &str, input: R, output: W) -> Self {
        Self {
            mark,
            name: name.to_string(),
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

/// 入力文字列を合法手に変換する
pub fn parse_move(input: &str, board: &Board) -> Result<usize> {
    let trimmed = input.trim();
    let position: usize = trimmed.parse().map_err(|_| Error::InvalidInput {
        input: trimmed.to_string(),
    })?;

    if position >= CELL_COUNT {
        return Err(Error::InvalidPosition { position });
    }
    if !board.legal_moves().contains(&position) {
        return Err(Error::InvalidMove { position });
    }
    Ok(position)
}

impl<R: LineInput, W: Write> PlayerController for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(&self, board: &Board) -> Option<usize> {
        let mut input = self.input.borrow_mut();
        let mut output = self.output.borrow_mut();

        loop {
            write!(output, "{}'s turn. Input move (0-8): ", self.mark).ok()?;
            output.flush().ok()?;

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    debug!(player = %self.name, "input closed");
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(player = %self.name, error = %e, "failed to read move");
                    return None;
                }
            }

            match parse_move(&line, board) {
                Ok(position) => return Some(position),
                Err(e) => {
                    debug!(player = %self.name, error = %e, "rejected input");
                    writeln!(output, "Invalid square.").ok()?;
                }
            }
        }
    }
}
