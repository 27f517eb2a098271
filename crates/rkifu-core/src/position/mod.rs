//! 局面表現モジュール
//!
//! 盤面・手駒・手番を値として保持し、指し手の適用と合法性判定を行う。
//!
//! - `Position`: 局面（`Clone` で完全に独立した複製になる）
//! - `apply`: 指し手の適用（検証してから変更する）
//! - `is_in_check` / `is_legal`: 王手・王手放置の判定
//! - SFEN形式の解析・出力

mod attack;
mod pos;
mod sfen;

pub use attack::LegalityError;
pub use pos::{MoveError, Position};
pub use sfen::{SfenError, SFEN_HIRATE};
