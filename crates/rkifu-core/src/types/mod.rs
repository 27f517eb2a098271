//! 基本型
//!
//! 升目は (筋, 段) の組で持ち、筋は表示上右から左へ 1〜9、段は上から下へ 1〜9。

mod color;
mod hand;
mod moves;
mod piece;
mod square;

pub use color::Color;
pub use hand::Hand;
pub use moves::{Move, MoveParseError};
pub use piece::{Piece, PieceType};
pub use square::Square;
