//! Cross-checks of the pruned search against a plain exhaustive minimax.
//!
//! The engine promises that its per-hole score vector is exactly what an
//! unpruned minimax to the same depth would produce; the transposition
//! table, move ordering and killer slots affect only how much work is
//! done. The reference implementation here mirrors the engine's terminal
//! handling and evaluation but searches every child with no window.

use awele_engine::board::{Board, Side, HOLES_PER_SIDE};
use awele_engine::bot::AweleBot;
use awele_engine::data::Dataset;
use awele_engine::search::engine::is_terminal;
use awele_engine::search::evaluation::evaluate;
use awele_engine::search::{KnowledgeBase, SearchConfig, SearchEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn legal_holes(board: &Board) -> Vec<usize> {
    let side = board.to_move();
    (0..HOLES_PER_SIDE)
        .filter(|&hole| board.play(side, hole).is_ok())
        .collect()
}

/// A position reached by a random playout from the opening.
fn random_position(rng: &mut StdRng, plies: usize) -> Board {
    let mut board = Board::new();
    for _ in 0..plies {
        if is_terminal(&board) {
            break;
        }
        let legal = legal_holes(&board);
        if legal.is_empty() {
            break;
        }
        let hole = legal[rng.gen_range(0..legal.len())];
        let (_, next) = board
            .play(board.to_move(), hole)
            .unwrap_or_else(|e| panic!("legal move rejected: {e}"));
        board = next;
    }
    board
}

fn minimax(
    board: &Board,
    kb: &KnowledgeBase,
    config: &SearchConfig,
    root: Side,
    ply: usize,
    target: usize,
    maximizing: bool,
) -> f64 {
    if ply >= target || is_terminal(board) {
        return evaluate(board, root, kb, config);
    }
    let side = board.to_move();
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for hole in 0..HOLES_PER_SIDE {
        let Ok((_, child)) = board.play(side, hole) else {
            continue;
        };
        let value = minimax(&child, kb, config, root, ply + 1, target, !maximizing);
        if maximizing {
            best = best.max(value);
        } else {
            best = best.min(value);
        }
    }
    best
}

fn reference_scores(
    board: &Board,
    kb: &KnowledgeBase,
    config: &SearchConfig,
    depth: usize,
) -> [f64; HOLES_PER_SIDE] {
    let root = board.to_move();
    let mut scores = [f64::NEG_INFINITY; HOLES_PER_SIDE];
    for hole in 0..HOLES_PER_SIDE {
        if let Ok((_, child)) = board.play(root, hole) {
            scores[hole] = minimax(&child, kb, config, root, 1, depth, false);
        }
    }
    scores
}

fn trained_knowledge() -> KnowledgeBase {
    let dataset: Dataset = "\
        4 4 4 4 4 4 4 4 4 4 4 4 1 W\n\
        4 4 4 4 4 4 4 4 4 4 4 4 3 L\n\
        5 0 4 4 5 5 4 4 5 5 0 4 1 W\n\
        1 1 5 1 1 0 1 1 8 4 4 4 3 W\n\
        0 2 6 4 4 4 5 5 0 5 5 4 6 L\n"
        .parse()
        .unwrap_or_else(|e| panic!("bad inline dataset: {e}"));
    let mut kb = KnowledgeBase::new();
    kb.train(
        dataset.observations(),
        &awele_engine::TrainingParams::default(),
    );
    kb
}

#[test]
fn pruned_search_matches_plain_minimax() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0xA3E1E);
    let kb = KnowledgeBase::new();

    for round in 0..40 {
        let board = random_position(&mut rng, round % 25);
        if legal_holes(&board).is_empty() {
            continue;
        }
        for depth in 1..=3 {
            let config = SearchConfig {
                max_depth: depth,
                ..SearchConfig::default()
            };
            let expected = reference_scores(&board, &kb, &config, depth);
            let got = SearchEngine::with_config(config).decide(&board, &kb);
            assert_eq!(got, expected, "round {round} depth {depth}: {board:?}");
        }
    }
}

#[test]
fn pruned_search_matches_minimax_with_learned_values() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let kb = trained_knowledge();
    let config = SearchConfig::default();

    for round in 0..15 {
        let board = random_position(&mut rng, 3 + round);
        if legal_holes(&board).is_empty() {
            continue;
        }
        let expected = reference_scores(&board, &kb, &config, config.max_depth);
        let got = SearchEngine::with_config(config.clone()).decide(&board, &kb);
        assert_eq!(got, expected, "round {round}: {board:?}");
    }
}

#[test]
fn table_warmed_across_positions_stays_exact() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0xCAFE);
    let kb = KnowledgeBase::new();
    let config = SearchConfig::default();
    let mut warm = SearchEngine::with_config(config.clone());

    // One engine follows a whole game; every decision must still match a
    // cold engine and the reference.
    let mut board = Board::new();
    for _ in 0..30 {
        if is_terminal(&board) {
            break;
        }
        let legal = legal_holes(&board);
        if legal.is_empty() {
            break;
        }
        let expected = reference_scores(&board, &kb, &config, config.max_depth);
        let from_warm = warm.decide(&board, &kb);
        let from_cold = SearchEngine::with_config(config.clone()).decide(&board, &kb);
        assert_eq!(from_warm, expected, "{board:?}");
        assert_eq!(from_cold, expected, "{board:?}");

        let hole = legal[rng.gen_range(0..legal.len())];
        let (_, next) = board
            .play(board.to_move(), hole)
            .unwrap_or_else(|e| panic!("legal move rejected: {e}"));
        board = next;
    }
}

#[test]
fn illegal_holes_score_negative_infinity() {
    init_logging();
    let board = Board::from_holes([0, 3, 0, 2, 0, 1], [4, 4, 4, 4, 4, 4], Side::First)
        .unwrap_or_else(|e| panic!("{e}"));
    let kb = KnowledgeBase::new();
    let scores = SearchEngine::new().decide(&board, &kb);

    for hole in [0, 2, 4] {
        assert_eq!(scores[hole], f64::NEG_INFINITY);
    }
    for hole in [1, 3, 5] {
        assert!(scores[hole].is_finite());
    }
}

#[test]
fn trained_bot_plays_a_full_game_legally() {
    init_logging();
    let mut first = AweleBot::new();
    let mut second = AweleBot::new();
    let dataset: Dataset = "4 4 4 4 4 4 4 4 4 4 4 4 1 W\n4 4 4 4 4 4 4 4 4 4 4 4 6 L\n"
        .parse()
        .unwrap_or_else(|e| panic!("bad inline dataset: {e}"));
    first.train(&dataset);
    first.new_game();
    second.new_game();

    let mut board = Board::new();
    for _ in 0..120 {
        if is_terminal(&board) || legal_holes(&board).is_empty() {
            break;
        }
        let bot = match board.to_move() {
            Side::First => &mut first,
            Side::Second => &mut second,
        };
        let hole = bot
            .choose_move(&board)
            .unwrap_or_else(|| panic!("no move chosen on {board:?}"));
        let (_, next) = board
            .play(board.to_move(), hole)
            .unwrap_or_else(|e| panic!("bot chose an illegal move: {e}"));
        board = next;
    }
}
