//! Line-oriented transport speaking the Halite v1 text protocol.
//!
//! Startup sends our player id, the board dimensions, the production of
//! every cell and one initial frame. Each turn then brings a frame encoded as
//! run-length owner pairs followed by every cell's strength, all on one line.

use std::{
    io::{self, BufRead, Write},
    str::{FromStr, SplitWhitespace},
};

use katamari_core::{Cell, GridError, Move, PlayerId, Session};
use katamari_world::Grid;
use thiserror::Error;

/// Errors raised while talking to the game engine.
#[derive(Debug, Error)]
pub(crate) enum ProtocolError {
    /// Reading from or writing to the engine failed.
    #[error("engine connection failed: {0}")]
    Io(#[from] io::Error),
    /// The engine closed the stream during startup.
    #[error("input ended while waiting for the {0}")]
    UnexpectedEof(&'static str),
    /// A line ended before every expected value was read.
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    /// A value could not be parsed.
    #[error("could not parse {field} from `{value}`")]
    InvalidNumber {
        /// Field being read.
        field: &'static str,
        /// Offending token.
        value: String,
    },
    /// Owner runs described more cells than the board holds.
    #[error("owner runs cover {covered} cells but the board has {expected}")]
    OwnerRunOverflow {
        /// Cells covered once the offending run was applied.
        covered: usize,
        /// Cells on the board.
        expected: usize,
    },
    /// The decoded cells do not form a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Everything learned during startup.
#[derive(Clone, Debug)]
pub(crate) struct Handshake {
    /// Player id and board dimensions.
    pub(crate) session: Session,
    /// Board as it stands before the first turn.
    pub(crate) grid: Grid,
}

/// Connection to the game engine over a pair of byte streams.
#[derive(Debug)]
pub(crate) struct Connection<R, W> {
    reader: R,
    writer: W,
    line: String,
    width: u16,
    height: u16,
    productions: Vec<u8>,
}

impl<R: BufRead, W: Write> Connection<R, W> {
    /// Wraps the engine's output stream and our reply stream.
    pub(crate) fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: String::new(),
            width: 0,
            height: 0,
            productions: Vec::new(),
        }
    }

    /// Reads the startup messages up to and including the initial frame.
    pub(crate) fn handshake(&mut self) -> Result<Handshake, ProtocolError> {
        self.read_line("player id")?;
        let player = parse_next::<u8>(&mut self.line.split_whitespace(), "player id")?;

        self.read_line("board dimensions")?;
        let mut tokens = self.line.split_whitespace();
        let width = parse_next::<u16>(&mut tokens, "board width")?;
        let height = parse_next::<u16>(&mut tokens, "board height")?;
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height }.into());
        }
        self.width = width;
        self.height = height;

        self.read_line("productions")?;
        let cell_count = usize::from(width) * usize::from(height);
        let mut tokens = self.line.split_whitespace();
        self.productions = (0..cell_count)
            .map(|_| parse_next::<u8>(&mut tokens, "production"))
            .collect::<Result<_, _>>()?;

        let grid = self
            .next_frame()?
            .ok_or(ProtocolError::UnexpectedEof("initial frame"))?;

        Ok(Handshake {
            session: Session::new(PlayerId::new(player), width, height),
            grid,
        })
    }

    /// Announces the bot's name, completing the startup exchange.
    pub(crate) fn send_name(&mut self, name: &str) -> Result<(), ProtocolError> {
        writeln!(self.writer, "{name}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Reads the next frame, or `None` once the engine closes the stream.
    pub(crate) fn next_frame(&mut self) -> Result<Option<Grid>, ProtocolError> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }

        let cell_count = self.productions.len();
        let mut tokens = self.line.split_whitespace();

        let mut owners = Vec::with_capacity(cell_count);
        while owners.len() < cell_count {
            let run = parse_next::<usize>(&mut tokens, "owner run length")?;
            let owner = parse_next::<u8>(&mut tokens, "owner")?;
            let covered = owners.len() + run;
            if covered > cell_count {
                return Err(ProtocolError::OwnerRunOverflow {
                    covered,
                    expected: cell_count,
                });
            }
            owners.resize(covered, PlayerId::new(owner));
        }

        let cells = owners
            .into_iter()
            .zip(&self.productions)
            .map(|(owner, production)| {
                let strength = parse_next::<u8>(&mut tokens, "strength")?;
                Ok(Cell::new(owner, strength, *production))
            })
            .collect::<Result<Vec<_>, ProtocolError>>()?;

        Ok(Some(Grid::new(self.width, self.height, cells)?))
    }

    /// Sends one turn's moves as `x y direction` triples on a single line.
    pub(crate) fn send_moves(&mut self, moves: &[Move]) -> Result<(), ProtocolError> {
        let mut line = String::with_capacity(moves.len() * 8);
        for planned in moves {
            if !line.is_empty() {
                line.push(' ');
            }
            let source = planned.source();
            line.push_str(&format!(
                "{} {} {}",
                source.x(),
                source.y(),
                planned.direction().code()
            ));
        }
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_line(&mut self, expected: &'static str) -> Result<(), ProtocolError> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Err(ProtocolError::UnexpectedEof(expected));
        }
        Ok(())
    }
}

fn parse_next<T: FromStr>(
    tokens: &mut SplitWhitespace<'_>,
    field: &'static str,
) -> Result<T, ProtocolError> {
    let token = tokens.next().ok_or(ProtocolError::MissingValue(field))?;
    token.parse().map_err(|_| ProtocolError::InvalidNumber {
        field,
        value: token.to_owned(),
    })
}
