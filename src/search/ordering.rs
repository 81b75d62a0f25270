// Candidate move ranking.
//
// At every node the legal moves are scored with a cheap one-ply heuristic:
// immediate capture yield, the learned value of the resulting position, and
// the best capture the opponent could answer with. On top of that the
// search's own hints bias the order: the principal-variation move from the
// previous deepening pass gets a bonus large enough to dominate everything,
// killer moves a smaller one. Ties break toward the lower hole index so the
// search stays deterministic.
//
// Illegal moves are kept in the list, marked with negative infinity; they
// sort to the bottom and the search skips them.

use crate::board::{Board, Side, HOLES_PER_SIDE};
use crate::search::encoding::encode_board;
use crate::search::engine::SearchConfig;
use crate::search::evaluation::capture_threat;
use crate::search::knowledge::KnowledgeBase;
use smallvec::SmallVec;

/// A move with its ordering heuristic. `f64::NEG_INFINITY` marks an illegal
/// move.
#[derive(Debug, Clone, Copy)]
pub struct CandidateMove {
    pub hole: usize,
    pub heuristic: f64,
}

impl CandidateMove {
    #[inline]
    pub fn is_legal(&self) -> bool {
        self.heuristic != f64::NEG_INFINITY
    }
}

/// Killer slots per ply.
pub const KILLER_SLOTS: usize = 2;

/// Ordering hints accumulated by the search: the best root move per
/// completed deepening pass, and the last two cutoff moves per ply. Reset at
/// the start of every decision.
#[derive(Debug, Clone)]
pub struct SearchHints {
    principal: Vec<Option<usize>>,
    killers: Vec<[Option<usize>; KILLER_SLOTS]>,
}

impl SearchHints {
    pub fn new(max_depth: usize) -> Self {
        Self {
            principal: vec![None; max_depth + 1],
            killers: vec![[None; KILLER_SLOTS]; max_depth + 1],
        }
    }

    pub fn reset(&mut self) {
        self.principal.fill(None);
        self.killers.fill([None; KILLER_SLOTS]);
    }

    /// Principal-variation move recorded when `depth` completed.
    pub fn principal(&self, depth: usize) -> Option<usize> {
        self.principal.get(depth).copied().flatten()
    }

    pub fn record_principal(&mut self, depth: usize, hole: usize) {
        if let Some(slot) = self.principal.get_mut(depth) {
            *slot = Some(hole);
        }
    }

    pub fn killers(&self, ply: usize) -> [Option<usize>; KILLER_SLOTS] {
        self.killers
            .get(ply)
            .copied()
            .unwrap_or([None; KILLER_SLOTS])
    }

    /// Promote a cutoff move to killer slot 0, demoting the previous one,
    /// unless it already sits in slot 0.
    pub fn record_killer(&mut self, ply: usize, hole: usize) {
        if let Some(slots) = self.killers.get_mut(ply) {
            if slots[0] == Some(hole) {
                return;
            }
            slots[1] = slots[0];
            slots[0] = Some(hole);
        }
    }
}

/// Rank the moves of `side`, best first. Every hole appears exactly once;
/// illegal holes carry negative infinity and sort last.
pub fn rank_moves(
    board: &Board,
    side: Side,
    kb: &KnowledgeBase,
    config: &SearchConfig,
    pv: Option<usize>,
    killers: [Option<usize>; KILLER_SLOTS],
) -> SmallVec<[CandidateMove; HOLES_PER_SIDE]> {
    let mut candidates: SmallVec<[CandidateMove; HOLES_PER_SIDE]> = SmallVec::new();

    for hole in 0..HOLES_PER_SIDE {
        let heuristic = match board.play(side, hole) {
            Err(_) => f64::NEG_INFINITY,
            Ok((gain, next)) => {
                let mut h = gain as f64 * config.capture_bonus
                    + config.lambda * kb.best_value(encode_board(&next));
                if config.use_threat_lookahead {
                    h -= capture_threat(&next, side.opponent());
                }
                if pv == Some(hole) {
                    h += config.principal_variation_bonus;
                }
                if killers.contains(&Some(hole)) {
                    h += config.killer_move_bonus;
                }
                h
            }
        };
        candidates.push(CandidateMove { hole, heuristic });
    }

    candidates.sort_by(|a, b| {
        b.heuristic
            .total_cmp(&a.heuristic)
            .then(a.hole.cmp(&b.hole))
    });
    candidates
}
