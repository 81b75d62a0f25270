// Static position evaluation, always from the search root player's point of
// view.
//
// The backbone is the vantage: captured-seed difference, amplified once the
// board runs low on seeds and converting the lead starts to matter more than
// position. Around it: the learned value of the position, a penalty for the
// best capture the opponent has ready, and a small term for holes sitting at
// one or two seeds, which feed future capture chains on both sides.

use crate::board::{Board, Side, HOLES_PER_SIDE};
use crate::search::encoding::encode_board;
use crate::search::engine::SearchConfig;
use crate::search::knowledge::KnowledgeBase;

/// Best single-move capture yield `side` could take right now. One ply, no
/// recursion; illegal moves are skipped.
pub fn capture_threat(board: &Board, side: Side) -> f64 {
    let mut best: u8 = 0;
    for hole in 0..HOLES_PER_SIDE {
        if let Ok((gain, _)) = board.play(side, hole) {
            best = best.max(gain);
        }
    }
    best as f64
}

/// Holes of `side` holding one or two seeds: each is one sown seed away from
/// becoming capturable, which is what multi-capture chains are built from.
fn latent_capture_holes(board: &Board, side: Side) -> usize {
    board
        .holes(side)
        .iter()
        .filter(|&&seeds| seeds == 1 || seeds == 2)
        .count()
}

/// Score a position for `root`. Higher is better for the root player.
pub fn evaluate(board: &Board, root: Side, kb: &KnowledgeBase, config: &SearchConfig) -> f64 {
    let opponent = root.opponent();

    let mut vantage = board.captured(root) as f64 - board.captured(opponent) as f64;
    if board.seeds_on_board() <= config.endgame_threshold {
        vantage *= config.endgame_multiplier;
    }

    let learned = config.lambda * kb.best_value(encode_board(board));

    let threat_penalty = if config.use_threat_lookahead {
        config.opponent_capture_penalty * capture_threat(board, opponent)
    } else {
        0.0
    };

    let own_latent = latent_capture_holes(board, root) as f64;
    let opponent_latent = latent_capture_holes(board, opponent) as f64;

    vantage + learned - threat_penalty + config.latent_capture_bonus * own_latent
        - config.latent_capture_penalty * opponent_latent
}
