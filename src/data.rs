// Historical observation dataset.
//
// Each record is one move from an archived game, seen from the acting
// player's perspective: the twelve hole counts at the time of the move, the
// hole that was played (1-based, as recorded), and whether the acting player
// went on to win that game. Training sweeps the records in file order, so
// the loader preserves it.
//
// Line format, whitespace separated:
//   p1 p2 p3 p4 p5 p6  o1 o2 o3 o4 o5 o6  move  W|L
// Blank lines and lines starting with `#` are skipped.

use crate::board::HOLES_PER_SIDE;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {reason}")]
    BadRecord { line: usize, reason: String },
    #[error("move {mv} out of range 1..={HOLES_PER_SIDE}")]
    MoveOutOfRange { mv: u8 },
}

/// One archived move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Acting player's holes at the time of the move, in sowing order.
    pub player_holes: [u8; HOLES_PER_SIDE],
    /// Opponent's holes at the time of the move, in sowing order.
    pub opponent_holes: [u8; HOLES_PER_SIDE],
    /// The hole played, 1-based as recorded in the archive. Private so the
    /// range invariant cannot be bypassed.
    mv: u8,
    /// Whether the acting player won the game this move came from.
    pub won: bool,
}

impl Observation {
    /// `mv` is the 1-based hole the acting player chose.
    pub fn new(
        player_holes: [u8; HOLES_PER_SIDE],
        opponent_holes: [u8; HOLES_PER_SIDE],
        mv: u8,
        won: bool,
    ) -> Result<Self, DatasetError> {
        if mv == 0 || mv as usize > HOLES_PER_SIDE {
            return Err(DatasetError::MoveOutOfRange { mv });
        }
        Ok(Self {
            player_holes,
            opponent_holes,
            mv,
            won,
        })
    }

    /// The hole played, 1-based as recorded.
    pub fn mv(&self) -> u8 {
        self.mv
    }

    /// The played hole as a 0-based action index, always below
    /// `HOLES_PER_SIDE`.
    #[inline]
    pub fn move_index(&self) -> usize {
        self.mv as usize - 1
    }
}

/// Ordered collection of observations. Iteration order is record order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        fs::read_to_string(path)?.parse()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }
}

impl FromStr for Dataset {
    type Err = DatasetError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut observations = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            observations.push(parse_record(trimmed, line)?);
        }
        Ok(Self { observations })
    }
}

fn parse_record(record: &str, line: usize) -> Result<Observation, DatasetError> {
    let bad = |reason: String| DatasetError::BadRecord { line, reason };

    let fields: Vec<&str> = record.split_whitespace().collect();
    if fields.len() != 2 * HOLES_PER_SIDE + 2 {
        return Err(bad(format!(
            "expected {} fields, found {}",
            2 * HOLES_PER_SIDE + 2,
            fields.len()
        )));
    }

    let mut counts = [0u8; 2 * HOLES_PER_SIDE];
    for (slot, field) in counts.iter_mut().zip(&fields) {
        *slot = field
            .parse()
            .map_err(|_| bad(format!("invalid hole count `{field}`")))?;
    }

    let mv: u8 = fields[2 * HOLES_PER_SIDE]
        .parse()
        .map_err(|_| bad(format!("invalid move `{}`", fields[2 * HOLES_PER_SIDE])))?;

    let won = match fields[2 * HOLES_PER_SIDE + 1] {
        "W" => true,
        "L" => false,
        other => return Err(bad(format!("invalid outcome `{other}`, expected W or L"))),
    };

    let mut player_holes = [0u8; HOLES_PER_SIDE];
    let mut opponent_holes = [0u8; HOLES_PER_SIDE];
    player_holes.copy_from_slice(&counts[..HOLES_PER_SIDE]);
    opponent_holes.copy_from_slice(&counts[HOLES_PER_SIDE..]);

    Observation::new(player_holes, opponent_holes, mv, won).map_err(|e| bad(e.to_string()))
}
