//! Core types for the chessgame rules engine.
//!
//! This crate provides the fundamental types shared by the engine and
//! its consumers (rendering, input mapping):
//! - [`Color`] for the two players
//! - [`PieceKind`] for the six piece kinds
//! - [`Tile`] for board coordinates

mod color;
mod kind;
mod tile;

pub use color::Color;
pub use kind::PieceKind;
pub use tile::Tile;
