//! Move generation.
//!
//! [`available_moves`] computes the legal destination tiles for one
//! piece: type-specific candidates first, then king-safety filtering
//! (pins, check resolution, castling path rules).

use crate::attack::{is_tile_attacked, BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS};
use crate::board::{Board, Piece, PieceId};
use chessgame_core::{Color, PieceKind, Tile};

/// A list of destination tiles with a fixed maximum capacity.
///
/// A single piece has at most 27 destinations (a queen in the open), so
/// a fixed-size array avoids heap allocations during generation.
#[derive(Clone)]
pub struct MoveList {
    tiles: [Tile; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Upper bound on destinations for a single piece.
    pub const MAX_MOVES: usize = 32;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            tiles: [Tile::at(0, 0); Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a destination to the list.
    #[inline]
    pub fn push(&mut self, tile: Tile) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.tiles[self.len] = tile;
        self.len += 1;
    }

    /// Returns the number of destinations.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the destinations.
    #[inline]
    pub fn as_slice(&self) -> &[Tile] {
        &self.tiles[..self.len]
    }

    /// Returns true if `tile` is in the list.
    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.as_slice().contains(&tile)
    }

    /// Retains only destinations for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Tile) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(self.tiles[read]) {
                self.tiles[write] = self.tiles[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Computes the legal destination tiles for the piece behind `id`.
///
/// Returns an empty list for a captured handle. Boards without a
/// tracked king of the mover's color (setup positions) skip the
/// king-safety filters.
pub fn available_moves(board: &Board, id: PieceId) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.piece(id) else {
        return moves;
    };
    let color = piece.color;

    let king_pos = board
        .king(color)
        .and_then(|king_id| board.piece(king_id))
        .map(|king| king.pos);
    let in_check = match king_pos {
        Some(pos) => is_tile_attacked(board, pos, color, None),
        None => false,
    };

    if piece.kind != PieceKind::King {
        if let Some(pos) = king_pos {
            // A piece whose absence exposes the king is pinned and may
            // not move at all this ply (not even along the pin line).
            if !in_check && is_tile_attacked(board, pos, color, Some(id)) {
                return moves;
            }
        }
    }

    match piece.kind {
        PieceKind::King => {
            king_moves(board, id, piece, in_check, &mut moves);
            return moves;
        }
        PieceKind::Queen => {
            sliding_moves(board, piece, &ROOK_DIRS, &mut moves);
            sliding_moves(board, piece, &BISHOP_DIRS, &mut moves);
        }
        PieceKind::Rook => sliding_moves(board, piece, &ROOK_DIRS, &mut moves),
        PieceKind::Bishop => sliding_moves(board, piece, &BISHOP_DIRS, &mut moves),
        PieceKind::Knight => leaper_moves(board, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Pawn => pawn_moves(board, piece, &mut moves),
    }

    // Under check only check-resolving destinations survive.
    if in_check {
        moves.retain(|to| !leaves_king_attacked(board, id, to, color));
    } else if let Some(target) = piece.en_passant_target {
        // En passant vacates a second tile, which the pin filter cannot
        // see; verify that one destination by simulation.
        if moves.contains(target) && leaves_king_attacked(board, id, target, color) {
            moves.retain(|to| to != target);
        }
    }

    moves
}

fn king_moves(board: &Board, id: PieceId, king: &Piece, in_check: bool, moves: &mut MoveList) {
    leaper_moves(board, king, &KING_OFFSETS, moves);
    // Every step is verified by simulation so the king cannot hide in
    // its own shadow from a slider.
    moves.retain(|to| !leaves_king_attacked(board, id, to, king.color));

    if !king.has_moved && !in_check {
        castling_moves(board, king, moves);
    }
}

/// Scans east and west for a castling rook.
///
/// A side qualifies when the first occupied tile outward is a
/// never-moved ally rook and the two tiles the king would cross are not
/// attacked. The rook's own tile is the generated destination, matching
/// the king-onto-rook input convention of
/// [`Board::move_piece`](crate::Board::move_piece).
fn castling_moves(board: &Board, king: &Piece, moves: &mut MoveList) {
    for dir in [1i8, -1] {
        let mut rook_tile = None;
        let mut cur = king.pos;
        while let Some(next) = cur.offset(dir, 0) {
            cur = next;
            if let Some(other) = board.occupant(cur).and_then(|other| board.piece(other)) {
                if other.color == king.color
                    && other.kind == PieceKind::Rook
                    && !other.has_moved
                {
                    rook_tile = Some(cur);
                }
                break;
            }
        }
        let Some(rook_tile) = rook_tile else {
            continue;
        };

        let path_safe = (1..=2).all(|step| {
            king.pos
                .offset(dir * step, 0)
                .map(|tile| !is_tile_attacked(board, tile, king.color, None))
                .unwrap_or(false)
        });
        if path_safe {
            moves.push(rook_tile);
        }
    }
}

fn sliding_moves(board: &Board, piece: &Piece, dirs: &[(i8, i8)], moves: &mut MoveList) {
    for &(dx, dy) in dirs {
        let mut cur = piece.pos;
        while let Some(next) = cur.offset(dx, dy) {
            cur = next;
            match board.occupant(cur).and_then(|other| board.piece(other)) {
                Some(other) if other.color == piece.color => break,
                Some(_) => {
                    moves.push(cur);
                    break;
                }
                None => moves.push(cur),
            }
        }
    }
}

fn leaper_moves(board: &Board, piece: &Piece, offsets: &[(i8, i8)], moves: &mut MoveList) {
    for &(dx, dy) in offsets {
        let Some(to) = piece.pos.offset(dx, dy) else {
            continue;
        };
        let ally = board
            .occupant(to)
            .and_then(|other| board.piece(other))
            .is_some_and(|other| other.color == piece.color);
        if !ally {
            moves.push(to);
        }
    }
}

fn pawn_moves(board: &Board, pawn: &Piece, moves: &mut MoveList) {
    let fwd = pawn.color.forward_dir();

    if let Some(one) = pawn.pos.offset(0, fwd) {
        if board.occupant(one).is_none() {
            moves.push(one);
            if !pawn.has_moved {
                if let Some(two) = one.offset(0, fwd) {
                    if board.occupant(two).is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for dx in [-1i8, 1] {
        let Some(diag) = pawn.pos.offset(dx, fwd) else {
            continue;
        };
        let enemy = board
            .occupant(diag)
            .and_then(|other| board.piece(other))
            .is_some_and(|other| other.color != pawn.color);
        if enemy {
            moves.push(diag);
        }
    }

    if let Some(target) = pawn.en_passant_target {
        moves.push(target);
    }
}

/// Simulates moving the piece to `to` on a cloned board and reports
/// whether the mover's king ends up attacked.
fn leaves_king_attacked(board: &Board, id: PieceId, to: Tile, color: Color) -> bool {
    let mut sim = board.clone();
    sim.apply_for_simulation(id, to);
    sim.king(color)
        .and_then(|king_id| sim.piece(king_id))
        .is_some_and(|king| is_tile_attacked(&sim, king.pos, color, None))
}
