// Iterative-deepening alpha-beta search.
//
// One decision runs full searches at depth 1, 2, ... up to the configured
// maximum, each pass overwriting the per-hole score vector; the deepest
// pass's vector is what the caller gets. Shallower passes are not wasted:
// the best root move of each pass seeds the next pass's move ordering, and
// cutoff moves feed the killer slots.
//
// Root children are always searched with the full window. Interior pruning
// and the transposition table only ever cut work, never change a root
// score, so the returned vector equals what an exhaustive minimax to the
// same depth would produce.

use crate::board::{Board, Side, HOLES_PER_SIDE, STARVATION_LIMIT, WINNING_SCORE};
use crate::search::encoding::encode_board;
use crate::search::evaluation::evaluate;
use crate::search::knowledge::KnowledgeBase;
use crate::search::ordering::{rank_moves, SearchHints, KILLER_SLOTS};
use crate::search::transposition::{NodeRole, SearchKey, TranspositionTable};

/// Per-hole scores for one decision. Higher is better; negative infinity
/// marks an illegal move.
pub type DecisionScores = [f64; HOLES_PER_SIDE];

/// Search weights and feature toggles. One engine, tuned by configuration;
/// the defaults are the strongest hand-tuned set.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Iterative deepening limit, in plies.
    pub max_depth: usize,
    /// Move-ordering weight per immediately captured seed.
    pub capture_bonus: f64,
    /// Weight of the learned value, in ordering and evaluation.
    pub lambda: f64,
    /// Board seed count at or below which the vantage is amplified.
    pub endgame_threshold: u8,
    /// Vantage amplification in the endgame.
    pub endgame_multiplier: f64,
    /// Evaluation penalty per seed the opponent can capture next move.
    pub opponent_capture_penalty: f64,
    /// Evaluation bonus per own hole at one or two seeds.
    pub latent_capture_bonus: f64,
    /// Evaluation penalty per opponent hole at one or two seeds.
    pub latent_capture_penalty: f64,
    /// Ordering bonus for the principal-variation move. Must dominate every
    /// heuristic term.
    pub principal_variation_bonus: f64,
    /// Ordering bonus for killer moves. Below the PV bonus, above anything
    /// the heuristic itself can produce.
    pub killer_move_bonus: f64,
    pub use_principal_variation: bool,
    pub use_killer_moves: bool,
    pub use_threat_lookahead: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            capture_bonus: 3.5,
            lambda: 2.2,
            endgame_threshold: 12,
            endgame_multiplier: 1.8,
            opponent_capture_penalty: 1.7,
            latent_capture_bonus: 0.4,
            latent_capture_penalty: 0.4,
            principal_variation_bonus: 100_000.0,
            killer_move_bonus: 50_000.0,
            use_principal_variation: true,
            use_killer_moves: true,
            use_threat_lookahead: true,
        }
    }
}

/// A game is over once a player has banked a winning majority or the board
/// has starved below the playable minimum.
pub fn is_terminal(board: &Board) -> bool {
    board.captured(Side::First) >= WINNING_SCORE
        || board.captured(Side::Second) >= WINNING_SCORE
        || board.seeds_on_board() <= STARVATION_LIMIT
}

/// The search driver. Owns its transposition table and ordering hints; the
/// knowledge base is injected per call so one trained table can serve any
/// number of engines.
#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    table: TranspositionTable,
    hints: SearchHints,
    nodes: u64,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        let hints = SearchHints::new(config.max_depth);
        Self {
            config,
            table: TranspositionTable::new(),
            hints,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited by the most recent decision.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Per-game reset: cached results and hints from a previous game do not
    /// carry over.
    pub fn new_game(&mut self) {
        self.table.clear();
        self.hints.reset();
    }

    /// Score every hole of the side to move. Illegal holes score negative
    /// infinity; among legal holes, higher is better. The vector comes from
    /// the deepest completed iterative-deepening pass.
    pub fn decide(&mut self, board: &Board, kb: &KnowledgeBase) -> DecisionScores {
        self.hints.reset();
        self.nodes = 0;
        let root = board.to_move();
        let mut scores = [f64::NEG_INFINITY; HOLES_PER_SIDE];

        for depth in 1..=self.config.max_depth {
            let pv = if self.config.use_principal_variation {
                self.hints.principal(depth - 1)
            } else {
                None
            };
            let killers = self.ply_killers(0);
            let ranked = rank_moves(board, root, kb, &self.config, pv, killers);

            let mut depth_scores = [f64::NEG_INFINITY; HOLES_PER_SIDE];
            let mut best: Option<(usize, f64)> = None;

            for candidate in &ranked {
                if !candidate.is_legal() {
                    continue;
                }
                let Ok((_, child)) = board.play(root, candidate.hole) else {
                    continue;
                };
                // Full window for every root child: the caller compares the
                // scores across moves, so each must be exact.
                let value = self.alpha_beta(
                    &child,
                    kb,
                    root,
                    1,
                    depth,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                    false,
                );
                depth_scores[candidate.hole] = value;
                if best.map_or(true, |(_, score)| value > score) {
                    best = Some((candidate.hole, value));
                }
            }

            if let Some((hole, value)) = best {
                self.hints.record_principal(depth, hole);
                log::debug!(
                    "depth {depth}: hole {hole} scores {value:.3}, {} nodes, tt hit rate {:.2}",
                    self.nodes,
                    self.table.hit_rate()
                );
            }
            scores = depth_scores;
        }
        scores
    }

    fn ply_killers(&self, ply: usize) -> [Option<usize>; KILLER_SLOTS] {
        if self.config.use_killer_moves {
            self.hints.killers(ply)
        } else {
            [None; KILLER_SLOTS]
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        board: &Board,
        kb: &KnowledgeBase,
        root: Side,
        ply: usize,
        target_depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        self.nodes += 1;
        if ply >= target_depth || is_terminal(board) {
            return evaluate(board, root, kb, &self.config);
        }

        let key = SearchKey {
            state: encode_board(board),
            remaining_depth: (target_depth - ply) as u8,
            side_to_move: board.to_move(),
            role: if maximizing {
                NodeRole::Maximizing
            } else {
                NodeRole::Minimizing
            },
        };
        if let Some(entry) = self.table.probe(&key) {
            if entry.lower >= beta || entry.upper <= alpha {
                return entry.value;
            }
            alpha = alpha.max(entry.lower);
            beta = beta.min(entry.upper);
        }
        // The window this node is actually searched in; the stored result is
        // classified against it.
        let (alpha0, beta0) = (alpha, beta);

        let side = board.to_move();
        let killers = self.ply_killers(ply);
        let ranked = rank_moves(board, side, kb, &self.config, None, killers);

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for candidate in &ranked {
            if !candidate.is_legal() {
                // Sorted descending: everything after the first illegal
                // candidate is illegal too.
                break;
            }
            let Ok((_, child)) = board.play(side, candidate.hole) else {
                continue;
            };
            let value =
                self.alpha_beta(&child, kb, root, ply + 1, target_depth, alpha, beta, !maximizing);

            if maximizing {
                if value > best {
                    best = value;
                    best_move = Some(candidate.hole);
                }
                alpha = alpha.max(best);
            } else {
                if value < best {
                    best = value;
                    best_move = Some(candidate.hole);
                }
                beta = beta.min(best);
            }
            if alpha >= beta {
                if self.config.use_killer_moves {
                    if let Some(hole) = best_move {
                        self.hints.record_killer(ply, hole);
                    }
                }
                break;
            }
        }

        self.table.store(key, best, alpha0, beta0);
        best
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}
