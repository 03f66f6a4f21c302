//! Board state and move application.
//!
//! The board owns every piece in an arena: pieces are addressed through
//! stable [`PieceId`] handles, the 8x8 grid stores optional handles, and
//! captured pieces leave an empty slot behind so handles are never
//! reused within a game.

use chessgame_core::{Color, PieceKind, Tile};
use thiserror::Error;

/// Errors raised by board queries and mutations.
///
/// All of these indicate caller bugs rather than user-facing rule
/// violations: the orchestration layer only applies moves drawn from
/// [`available_moves`](crate::available_moves).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i8, y: i8 },

    #[error("no piece on source tile {0}")]
    EmptySource(Tile),

    #[error("move from {from} to {to} would capture a same-color piece")]
    SelfCapture { from: Tile, to: Tile },

    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("a promotion choice is pending and must be resolved first")]
    PromotionPending,

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("{0} is not a valid promotion choice")]
    InvalidPromotionChoice(PieceKind),
}

/// Stable handle to a piece in the board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u32);

impl PieceId {
    /// Returns the arena index of this handle.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One chess piece: identity plus the per-game history the rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Mutable only on promotion.
    pub kind: PieceKind,
    pub color: Color,
    /// Kept equal to the grid cell holding this piece.
    pub pos: Tile,
    /// Set the first time the piece moves; gates castling and the pawn
    /// double step.
    pub has_moved: bool,
    /// Armed on a pawn when an enemy pawn double-steps past it; valid
    /// for at most one ply.
    pub en_passant_target: Option<Tile>,
}

/// The 8x8 board: single source of truth for occupancy.
#[derive(Debug, Clone)]
pub struct Board {
    slots: Vec<Option<Piece>>,
    grid: [Option<PieceId>; 64],
    kings: [Option<PieceId>; 2],
    ep_armed: Vec<PieceId>,
    promoted: Option<PieceId>,
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            slots: Vec::new(),
            grid: [None; 64],
            kings: [None; 2],
            ep_armed: Vec::new(),
            promoted: None,
        }
    }

    /// Creates the standard starting position.
    ///
    /// Black's back row sits on rank 0 and White's on rank 7; queens on
    /// file 3, kings on file 4.
    pub fn standard() -> Self {
        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (x, &kind) in BACK_ROW.iter().enumerate() {
            let x = x as u8;
            board.place(kind, Color::Black, Tile::at(x, 0));
            board.place(PieceKind::Pawn, Color::Black, Tile::at(x, 1));
            board.place(PieceKind::Pawn, Color::White, Tile::at(x, 6));
            board.place(kind, Color::White, Tile::at(x, 7));
        }
        board
    }

    /// Places a new piece on an empty tile and returns its handle.
    ///
    /// Kings are registered as the tracked king for their color.
    pub fn place(&mut self, kind: PieceKind, color: Color, tile: Tile) -> PieceId {
        debug_assert!(self.grid[tile.index()].is_none());
        let id = PieceId(self.slots.len() as u32);
        self.slots.push(Some(Piece {
            kind,
            color,
            pos: tile,
            has_moved: false,
            en_passant_target: None,
        }));
        self.grid[tile.index()] = Some(id);
        if kind == PieceKind::King {
            self.kings[color.index()] = Some(id);
        }
        id
    }

    /// Returns true iff both coordinates lie in 0-7.
    #[inline]
    pub fn is_in_bound(&self, x: i8, y: i8) -> bool {
        Tile::new(x, y).is_some()
    }

    /// Returns the occupant of `(x, y)`, or an error for coordinates
    /// outside the board.
    pub fn get_piece(&self, x: i8, y: i8) -> Result<Option<PieceId>, BoardError> {
        let tile = Tile::new(x, y).ok_or(BoardError::OutOfBounds { x, y })?;
        Ok(self.grid[tile.index()])
    }

    /// Returns the occupant of a tile.
    #[inline]
    pub fn occupant(&self, tile: Tile) -> Option<PieceId> {
        self.grid[tile.index()]
    }

    /// Returns the piece behind a handle, or `None` if it was captured.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.slots.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// Iterates over all pieces still on the board.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (PieceId(i as u32), p)))
    }

    /// Returns the tracked king of a color, if one is on the board.
    #[inline]
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.kings[color.index()]
    }

    /// Returns the pawn awaiting a promotion choice, if any.
    ///
    /// While this is set, [`move_piece`](Board::move_piece) refuses all
    /// moves; resolve via [`promote`](Board::promote).
    #[inline]
    pub fn promoted_piece(&self) -> Option<PieceId> {
        self.promoted
    }

    /// Moves the piece on `(x1, y1)` to `(x2, y2)`.
    ///
    /// Special moves use the legacy input conventions:
    /// - a pawn moving onto its armed en passant target additionally
    ///   captures the pawn one rank behind the destination;
    /// - a king moving onto a same-color rook castles: the king ends two
    ///   tiles toward the rook and the rook jumps to the far side of it.
    ///
    /// Afterwards every armed en passant flag is cleared (they last one
    /// ply), the mover is marked as moved, new en passant targets are
    /// armed on enemy pawns adjacent to a double-stepped pawn, and a
    /// pawn reaching its promotion rank is parked as the pending
    /// promotion.
    pub fn move_piece(&mut self, x1: i8, y1: i8, x2: i8, y2: i8) -> Result<(), BoardError> {
        if self.promoted.is_some() {
            return Err(BoardError::PromotionPending);
        }
        let from = Tile::new(x1, y1).ok_or(BoardError::OutOfBounds { x: x1, y: y1 })?;
        let to = Tile::new(x2, y2).ok_or(BoardError::OutOfBounds { x: x2, y: y2 })?;

        let mover_id = self.grid[from.index()].ok_or(BoardError::EmptySource(from))?;
        let (kind, color, ep_target) = {
            let mover = self.piece_ref(mover_id);
            (mover.kind, mover.color, mover.en_passant_target)
        };

        if kind == PieceKind::Pawn && ep_target == Some(to) {
            // En passant: the captured pawn sits one rank behind the
            // destination, toward the mover's own side.
            if let Some(behind) = to.offset(0, -color.forward_dir()) {
                if let Some(captured) = self.grid[behind.index()] {
                    self.remove(captured);
                }
            }
            self.relocate(mover_id, from, to);
        } else if let Some(target_id) = self.grid[to.index()] {
            let target = self.piece_ref(target_id);
            if target.color == color && kind == PieceKind::King && target.kind == PieceKind::Rook {
                self.castle(mover_id, target_id, from, to)?;
            } else if target.color == color {
                return Err(BoardError::SelfCapture { from, to });
            } else {
                self.remove(target_id);
                self.relocate(mover_id, from, to);
            }
        } else {
            self.relocate(mover_id, from, to);
        }

        // En passant flags are valid for at most one ply.
        self.clear_en_passant();

        {
            let mover = self.piece_mut(mover_id);
            mover.has_moved = true;
            mover.en_passant_target = None;
        }

        if kind == PieceKind::Pawn && (y2 - y1).abs() == 2 {
            self.arm_en_passant(mover_id, from, to);
        }

        let mover = self.piece_ref(mover_id);
        if mover.kind == PieceKind::Pawn && mover.pos.y() == color.promotion_rank() {
            self.promoted = Some(mover_id);
        }

        Ok(())
    }

    /// Resolves the pending promotion by reassigning the pawn's kind.
    pub fn promote(&mut self, kind: PieceKind) -> Result<(), BoardError> {
        let id = self.promoted.ok_or(BoardError::NoPromotionPending)?;
        if !kind.is_promotion_choice() {
            return Err(BoardError::InvalidPromotionChoice(kind));
        }
        self.piece_mut(id).kind = kind;
        self.promoted = None;
        Ok(())
    }

    /// Applies a candidate move without legality checks or promotion
    /// bookkeeping. Used on cloned boards for check simulation.
    pub(crate) fn apply_for_simulation(&mut self, id: PieceId, to: Tile) {
        let (kind, color, ep_target, from) = {
            let mover = self.piece_ref(id);
            (mover.kind, mover.color, mover.en_passant_target, mover.pos)
        };
        if kind == PieceKind::Pawn && ep_target == Some(to) {
            if let Some(behind) = to.offset(0, -color.forward_dir()) {
                if let Some(captured) = self.grid[behind.index()] {
                    self.remove(captured);
                }
            }
        } else if let Some(target_id) = self.grid[to.index()] {
            self.remove(target_id);
        }
        self.relocate(id, from, to);
    }

    fn castle(
        &mut self,
        king_id: PieceId,
        rook_id: PieceId,
        king_from: Tile,
        rook_from: Tile,
    ) -> Result<(), BoardError> {
        let dir: i8 = if rook_from.x() > king_from.x() { 1 } else { -1 };
        // A king too close to the edge cannot land two tiles over; such
        // an input never comes out of move generation.
        let king_to = king_from.offset(2 * dir, 0).ok_or(BoardError::SelfCapture {
            from: king_from,
            to: rook_from,
        })?;
        let rook_to = king_to.offset(-dir, 0).ok_or(BoardError::SelfCapture {
            from: king_from,
            to: rook_from,
        })?;

        // The king's destination may be the rook's source tile, so both
        // source cells are vacated before either destination is set.
        self.grid[king_from.index()] = None;
        self.grid[rook_from.index()] = None;
        self.grid[king_to.index()] = Some(king_id);
        self.grid[rook_to.index()] = Some(rook_id);

        let king = self.piece_mut(king_id);
        king.pos = king_to;
        king.has_moved = true;
        let rook = self.piece_mut(rook_id);
        rook.pos = rook_to;
        rook.has_moved = true;
        Ok(())
    }

    /// Arms en passant on enemy pawns horizontally adjacent to a pawn
    /// that just double-stepped; the target is the skipped tile.
    fn arm_en_passant(&mut self, mover_id: PieceId, from: Tile, to: Tile) {
        let color = self.piece_ref(mover_id).color;
        let skipped = Tile::at(to.x(), (from.y() + to.y()) / 2);
        for dx in [-1i8, 1] {
            let Some(side) = to.offset(dx, 0) else {
                continue;
            };
            let Some(id) = self.grid[side.index()] else {
                continue;
            };
            let neighbor = self.piece_mut(id);
            if neighbor.color != color && neighbor.kind == PieceKind::Pawn {
                neighbor.en_passant_target = Some(skipped);
                self.ep_armed.push(id);
            }
        }
    }

    fn clear_en_passant(&mut self) {
        for id in std::mem::take(&mut self.ep_armed) {
            if let Some(piece) = self.slots[id.index()].as_mut() {
                piece.en_passant_target = None;
            }
        }
    }

    fn remove(&mut self, id: PieceId) {
        let pos = self.piece_ref(id).pos;
        self.grid[pos.index()] = None;
        self.slots[id.index()] = None;
        for king in &mut self.kings {
            if *king == Some(id) {
                *king = None;
            }
        }
    }

    fn relocate(&mut self, id: PieceId, from: Tile, to: Tile) {
        debug_assert_eq!(self.grid[from.index()], Some(id));
        debug_assert!(self.grid[to.index()].is_none());
        self.grid[from.index()] = None;
        self.grid[to.index()] = Some(id);
        self.piece_mut(id).pos = to;
    }

    fn piece_ref(&self, id: PieceId) -> &Piece {
        self.slots[id.index()]
            .as_ref()
            .expect("grid handles always point at live pieces")
    }

    fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        self.slots[id.index()]
            .as_mut()
            .expect("grid handles always point at live pieces")
    }
}
