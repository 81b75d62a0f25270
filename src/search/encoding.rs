// Positional state encoding.
//
// The knowledge base keys positions by a fixed-radix fold of the twelve hole
// counts: the acting player's holes first, then the opponent's, each digit in
// base 30 (comfortably above any occupancy a real game produces). The key
// deliberately ignores captured totals and whose turn it is, so value
// estimates learned from archived games generalize across move order.
//
// Training and lookup must go through the same function; that is the whole
// contract.

use crate::board::{Board, HOLES_PER_SIDE};

/// Radix of the positional encoding. Must stay above the largest hole
/// occupancy ever encoded; 30 leaves headroom over anything reachable from
/// 48 seeds in practice. 30^12 still fits a u64.
pub const ENCODING_RADIX: u64 = 30;

/// Fold two hole rows into a single key. Pure and total.
pub fn encode(own: &[u8; HOLES_PER_SIDE], opponent: &[u8; HOLES_PER_SIDE]) -> u64 {
    own.iter()
        .chain(opponent.iter())
        .fold(0u64, |code, &seeds| code * ENCODING_RADIX + seeds as u64)
}

/// Encode a board from its side-to-move perspective, matching how archived
/// observations are recorded (acting player's holes first).
pub fn encode_board(board: &Board) -> u64 {
    let side = board.to_move();
    encode(&board.holes(side), &board.holes(side.opponent()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;

    #[test]
    fn encoding_is_deterministic() {
        let own = [4, 0, 2, 7, 1, 4];
        let opponent = [0, 0, 3, 4, 4, 5];
        assert_eq!(encode(&own, &opponent), encode(&own, &opponent));
    }

    #[test]
    fn identical_rows_share_a_key() {
        let a = ([1, 2, 3, 4, 5, 6], [6, 5, 4, 3, 2, 1]);
        let b = ([1, 2, 3, 4, 5, 6], [6, 5, 4, 3, 2, 1]);
        assert_eq!(encode(&a.0, &a.1), encode(&b.0, &b.1));
    }

    #[test]
    fn swapped_rows_differ() {
        let own = [1, 2, 3, 4, 5, 6];
        let opponent = [6, 5, 4, 3, 2, 1];
        assert_ne!(encode(&own, &opponent), encode(&opponent, &own));
    }

    #[test]
    fn single_seed_shift_changes_the_key() {
        let base = [4, 4, 4, 4, 4, 4];
        let mut shifted = base;
        shifted[3] = 5;
        assert_ne!(encode(&base, &base), encode(&shifted, &base));
    }

    #[test]
    fn empty_board_encodes_to_zero() {
        assert_eq!(encode(&[0; 6], &[0; 6]), 0);
    }

    #[test]
    fn board_encoding_follows_the_side_to_move() {
        let first = Board::from_holes([1, 0, 0, 0, 0, 0], [0, 0, 0, 0, 0, 2], Side::First).unwrap();
        let second =
            Board::from_holes([1, 0, 0, 0, 0, 0], [0, 0, 0, 0, 0, 2], Side::Second).unwrap();

        // Both boards see the same rows from their mover's perspective, so
        // they share a knowledge key even though the absolute position
        // differs.
        assert_eq!(encode_board(&first), encode_board(&second));
    }

    #[test]
    fn captured_seeds_do_not_affect_the_key() {
        let board = Board::new();
        let (_, after) = board.play(Side::First, 2).unwrap();
        let rebuilt = Board::from_holes(
            after.holes(after.to_move()),
            after.holes(after.to_move().opponent()),
            after.to_move(),
        )
        .unwrap();
        assert_eq!(encode_board(&after), encode_board(&rebuilt));
    }
}
