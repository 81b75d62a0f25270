// Awele board representation and rules.
//
// The board is a cycle of twelve holes, six per side. A move takes all seeds
// from one of the mover's holes and sows them counter-clockwise, one per hole,
// skipping the origin hole when the sowing wraps all the way around. If the
// last seed lands in an opponent hole holding two or three seeds afterwards,
// that hole is captured, chaining backwards through qualifying opponent holes.
//
// Two classical restrictions apply:
// - grand slam: a capture that would take every opponent seed is forfeited
//   (the move stands, the seeds stay),
// - feed rule: a move that leaves the opponent with no seeds at all is
//   illegal.
//
// `play` never mutates: it returns the capture yield together with the
// resulting board, so the search can simulate freely.

use thiserror::Error;

/// Holes per player side.
pub const HOLES_PER_SIDE: usize = 6;
/// Holes on the whole board.
pub const TOTAL_HOLES: usize = 2 * HOLES_PER_SIDE;
/// Seeds in each hole at the start of a game.
pub const SEEDS_PER_HOLE: u8 = 4;
/// Seeds in play at the start of a game.
pub const TOTAL_SEEDS: u8 = SEEDS_PER_HOLE * TOTAL_HOLES as u8;
/// Captured seeds needed to win (more than half of the seeds in play).
pub const WINNING_SCORE: u8 = 25;
/// Once at most this many seeds remain on the board the game is scored as is.
pub const STARVATION_LIMIT: u8 = 6;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Row index into the board arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// A move rejected by the rules. Recovered locally by every caller; an
/// illegal move only ever costs the branch that tried it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("hole index {0} is out of range")]
    OutOfRange(usize),
    #[error("hole {0} is empty")]
    EmptyHole(usize),
    #[error("playing hole {0} would leave the opponent without seeds")]
    Starving(usize),
}

/// A hole configuration that cannot come from a real game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{total} seeds on the board, at most {TOTAL_SEEDS} are possible")]
    SeedOverflow { total: u16 },
}

/// Full game state: both rows of holes, captured seeds per player, and the
/// side to move. Cheap to clone; simulation works on copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    holes: [[u8; HOLES_PER_SIDE]; 2],
    captured: [u8; 2],
    to_move: Side,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position: four seeds in every hole, first player to
    /// move.
    pub fn new() -> Self {
        Self {
            holes: [[SEEDS_PER_HOLE; HOLES_PER_SIDE]; 2],
            captured: [0; 2],
            to_move: Side::First,
        }
    }

    /// Build a board from explicit hole counts, e.g. when replaying a
    /// historical observation. `own` is the row of `to_move`; captured
    /// counts start at zero. Rejects layouts holding more seeds than a real
    /// game can.
    pub fn from_holes(
        own: [u8; HOLES_PER_SIDE],
        opponent: [u8; HOLES_PER_SIDE],
        to_move: Side,
    ) -> Result<Self, BoardError> {
        let total: u16 = own.iter().chain(opponent.iter()).map(|&s| s as u16).sum();
        if total > TOTAL_SEEDS as u16 {
            return Err(BoardError::SeedOverflow { total });
        }
        let mut holes = [[0; HOLES_PER_SIDE]; 2];
        holes[to_move.index()] = own;
        holes[to_move.opponent().index()] = opponent;
        Ok(Self {
            holes,
            captured: [0; 2],
            to_move,
        })
    }

    #[inline]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Hole counts of one side, ordered in sowing direction.
    #[inline]
    pub fn holes(&self, side: Side) -> [u8; HOLES_PER_SIDE] {
        self.holes[side.index()]
    }

    #[inline]
    pub fn captured(&self, side: Side) -> u8 {
        self.captured[side.index()]
    }

    /// Seeds still on the board (not yet captured by either player).
    pub fn seeds_on_board(&self) -> u8 {
        self.holes.iter().flatten().sum()
    }

    #[inline]
    fn pit(&self, global: usize) -> u8 {
        self.holes[global / HOLES_PER_SIDE][global % HOLES_PER_SIDE]
    }

    #[inline]
    fn pit_mut(&mut self, global: usize) -> &mut u8 {
        &mut self.holes[global / HOLES_PER_SIDE][global % HOLES_PER_SIDE]
    }

    /// Simulate `side` playing `hole`. Returns the capture yield and the
    /// resulting board, in which the opponent is to move. `side` does not
    /// have to match `to_move`; the search probes opponent replies from
    /// either perspective.
    pub fn play(&self, side: Side, hole: usize) -> Result<(u8, Board), MoveError> {
        if hole >= HOLES_PER_SIDE {
            return Err(MoveError::OutOfRange(hole));
        }
        let origin = side.index() * HOLES_PER_SIDE + hole;
        let seeds = self.pit(origin);
        if seeds == 0 {
            return Err(MoveError::EmptyHole(hole));
        }

        let mut next = self.clone();
        *next.pit_mut(origin) = 0;

        // Sow counter-clockwise, never back into the origin hole.
        let mut remaining = seeds;
        let mut pos = origin;
        while remaining > 0 {
            pos = (pos + 1) % TOTAL_HOLES;
            if pos == origin {
                continue;
            }
            *next.pit_mut(pos) += 1;
            remaining -= 1;
        }

        // Walk backwards from the last sown hole through opponent holes left
        // at two or three seeds.
        let opponent = side.opponent();
        let mut chain = [0usize; HOLES_PER_SIDE];
        let mut chain_len = 0;
        let mut gain: u8 = 0;
        let mut p = pos;
        while p / HOLES_PER_SIDE == opponent.index() {
            let count = next.pit(p);
            if count != 2 && count != 3 {
                break;
            }
            chain[chain_len] = p;
            chain_len += 1;
            gain += count;
            p = (p + TOTAL_HOLES - 1) % TOTAL_HOLES;
        }

        // Grand slam: taking every opponent seed forfeits the capture.
        let opponent_seeds: u8 = next.holes[opponent.index()].iter().sum();
        if gain > 0 && gain < opponent_seeds {
            for &captured_pit in &chain[..chain_len] {
                *next.pit_mut(captured_pit) = 0;
            }
            next.captured[side.index()] += gain;
        } else {
            gain = 0;
        }

        // Feed rule: the opponent must be left with something to play.
        if next.holes[opponent.index()].iter().all(|&s| s == 0) {
            return Err(MoveError::Starving(hole));
        }

        next.to_move = opponent;
        Ok((gain, next))
    }
}
