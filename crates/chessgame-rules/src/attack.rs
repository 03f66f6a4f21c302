//! Attack detection.
//!
//! Pure queries over a [`Board`]: no state is toggled to simulate a
//! removed piece, callers pass the handle to exclude instead.

use crate::board::{Board, BoardError, Piece, PieceId};
use chessgame_core::{Color, PieceKind, Tile};

pub(crate) const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Returns true if any piece of `defender`'s opponent attacks `tile`.
///
/// A piece matching `excluding` is transparent to every scan, which is
/// how pin detection asks "would the king be attacked without this
/// piece on the board".
pub fn is_tile_attacked(
    board: &Board,
    tile: Tile,
    defender: Color,
    excluding: Option<PieceId>,
) -> bool {
    for &(dx, dy) in &ROOK_DIRS {
        if let Some(piece) = first_on_ray(board, tile, dx, dy, excluding) {
            if piece.color != defender
                && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen)
            {
                return true;
            }
        }
    }

    for &(dx, dy) in &BISHOP_DIRS {
        if let Some(piece) = first_on_ray(board, tile, dx, dy, excluding) {
            if piece.color != defender
                && matches!(piece.kind, PieceKind::Bishop | PieceKind::Queen)
            {
                return true;
            }
        }
    }

    for &(dx, dy) in &KNIGHT_OFFSETS {
        if let Some(piece) = occupant_at(board, tile, dx, dy, excluding) {
            if piece.color != defender && piece.kind == PieceKind::Knight {
                return true;
            }
        }
    }

    for &(dx, dy) in &KING_OFFSETS {
        if let Some(piece) = occupant_at(board, tile, dx, dy, excluding) {
            if piece.color != defender && piece.kind == PieceKind::King {
                return true;
            }
        }
    }

    // Enemy pawns attack from the defender's forward diagonals.
    for dx in [-1i8, 1] {
        if let Some(piece) = occupant_at(board, tile, dx, defender.forward_dir(), excluding) {
            if piece.color != defender && piece.kind == PieceKind::Pawn {
                return true;
            }
        }
    }

    false
}

/// Returns true if `color`'s king is attacked.
///
/// Fails with [`BoardError::MissingKing`] if no king of that color is
/// tracked, which would violate the game lifecycle invariant.
pub fn is_king_attacked(board: &Board, color: Color) -> Result<bool, BoardError> {
    let king_id = board.king(color).ok_or(BoardError::MissingKing(color))?;
    let pos = board
        .piece(king_id)
        .map(|king| king.pos)
        .ok_or(BoardError::MissingKing(color))?;
    Ok(is_tile_attacked(board, pos, color, None))
}

/// Walks a ray from `from` and returns the first non-excluded occupant.
fn first_on_ray<'a>(
    board: &'a Board,
    from: Tile,
    dx: i8,
    dy: i8,
    excluding: Option<PieceId>,
) -> Option<&'a Piece> {
    let mut cur = from;
    while let Some(next) = cur.offset(dx, dy) {
        cur = next;
        if let Some(id) = board.occupant(cur) {
            if Some(id) == excluding {
                continue;
            }
            return board.piece(id);
        }
    }
    None
}

fn occupant_at<'a>(
    board: &'a Board,
    from: Tile,
    dx: i8,
    dy: i8,
    excluding: Option<PieceId>,
) -> Option<&'a Piece> {
    let tile = from.offset(dx, dy)?;
    let id = board.occupant(tile)?;
    if Some(id) == excluding {
        return None;
    }
    board.piece(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_attacks_along_open_file() {
        let mut board = Board::empty();
        board.place(PieceKind::Rook, Color::Black, Tile::at(4, 0));
        assert!(is_tile_attacked(&board, Tile::at(4, 7), Color::White, None));
        assert!(!is_tile_attacked(&board, Tile::at(5, 7), Color::White, None));
    }

    #[test]
    fn blocker_stops_the_ray() {
        let mut board = Board::empty();
        board.place(PieceKind::Rook, Color::Black, Tile::at(4, 0));
        let blocker = board.place(PieceKind::Pawn, Color::White, Tile::at(4, 3));

        assert!(!is_tile_attacked(&board, Tile::at(4, 7), Color::White, None));
        // The excluded blocker is transparent.
        assert!(is_tile_attacked(
            &board,
            Tile::at(4, 7),
            Color::White,
            Some(blocker)
        ));
    }

    #[test]
    fn bishop_and_queen_attack_diagonals() {
        let mut board = Board::empty();
        board.place(PieceKind::Bishop, Color::White, Tile::at(0, 0));
        assert!(is_tile_attacked(&board, Tile::at(7, 7), Color::Black, None));

        let mut board = Board::empty();
        board.place(PieceKind::Queen, Color::White, Tile::at(3, 3));
        assert!(is_tile_attacked(&board, Tile::at(6, 0), Color::Black, None));
        assert!(is_tile_attacked(&board, Tile::at(3, 7), Color::Black, None));
    }

    #[test]
    fn knight_attacks_l_offsets() {
        let mut board = Board::empty();
        board.place(PieceKind::Knight, Color::Black, Tile::at(3, 3));
        assert!(is_tile_attacked(&board, Tile::at(4, 5), Color::White, None));
        assert!(is_tile_attacked(&board, Tile::at(1, 2), Color::White, None));
        assert!(!is_tile_attacked(&board, Tile::at(3, 4), Color::White, None));
    }

    #[test]
    fn king_attacks_adjacent_tiles() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::Black, Tile::at(2, 2));
        assert!(is_tile_attacked(&board, Tile::at(3, 3), Color::White, None));
        assert!(!is_tile_attacked(&board, Tile::at(4, 4), Color::White, None));
    }

    #[test]
    fn pawns_attack_forward_diagonals_only() {
        // Black pawns advance toward rank 7.
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Color::Black, Tile::at(3, 3));
        assert!(is_tile_attacked(&board, Tile::at(2, 4), Color::White, None));
        assert!(is_tile_attacked(&board, Tile::at(4, 4), Color::White, None));
        assert!(!is_tile_attacked(&board, Tile::at(3, 4), Color::White, None));
        assert!(!is_tile_attacked(&board, Tile::at(2, 2), Color::White, None));

        // White pawns advance toward rank 0.
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Color::White, Tile::at(3, 3));
        assert!(is_tile_attacked(&board, Tile::at(2, 2), Color::Black, None));
        assert!(is_tile_attacked(&board, Tile::at(4, 2), Color::Black, None));
        assert!(!is_tile_attacked(&board, Tile::at(2, 4), Color::Black, None));
    }

    #[test]
    fn king_attacked_query() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, Tile::at(4, 7));
        board.place(PieceKind::Rook, Color::Black, Tile::at(4, 0));
        assert_eq!(is_king_attacked(&board, Color::White), Ok(true));

        assert_eq!(
            is_king_attacked(&board, Color::Black),
            Err(BoardError::MissingKing(Color::Black))
        );
    }

    #[test]
    fn allies_do_not_attack() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, Tile::at(4, 7));
        board.place(PieceKind::Rook, Color::White, Tile::at(4, 0));
        assert_eq!(is_king_attacked(&board, Color::White), Ok(false));
    }
}
