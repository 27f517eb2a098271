//! 将棋の局面モデル・合法性判定・局面指紋（Packed256）
//!
//! - `types`: 手番・升・駒・手駒・指し手などの基本型
//! - `position`: 局面本体、指し手の適用、王手/合法性判定、SFEN入出力
//! - `packed`: 局面を256bitに可逆圧縮する `Packed256`
//! - `error`: エラー分類（`ErrorCategory`）

pub mod error;
pub mod packed;
pub mod position;
pub mod types;

pub use error::ErrorCategory;
pub use packed::{pack_position, unpack_position, PackError, Packed256};
pub use position::{LegalityError, MoveError, Position, SfenError, SFEN_HIRATE};
pub use types::{Color, Hand, Move, Piece, PieceType, Square};
