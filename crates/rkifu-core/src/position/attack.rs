//! 王手・合法性判定
//!
//! 合法手生成は行わず、「指定した升に相手の駒が利いているか」だけを駒種ごとの
//! 動きの幾何で判定する。走り駒（香・飛・角）は間の升に駒があれば利かない。

use crate::error::ErrorCategory;
use crate::types::{Color, Piece, PieceType, Square};

use super::pos::Position;

/// 合法性判定エラー
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalityError {
    #[error("{0:?} king is missing")]
    MissingKing(Color),
}

impl LegalityError {
    /// エラー分類
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::Codec
    }
}

impl Position {
    /// `color` の玉に相手の駒が利いているか
    pub fn is_in_check(&self, color: Color) -> Result<bool, LegalityError> {
        let king = self
            .king_square(color)
            .ok_or(LegalityError::MissingKing(color))?;
        Ok(self
            .pieces()
            .any(|(from, pc)| pc.color != color && self.attacks(from, pc, king)))
    }

    /// 直前に指した側（手番でない側）の玉に王手がかかっていなければ合法
    pub fn is_legal(&self) -> Result<bool, LegalityError> {
        Ok(!self.is_in_check(self.side_to_move().opponent())?)
    }

    /// `from` にある `piece` が `target` に利いているか
    fn attacks(&self, from: Square, piece: Piece, target: Square) -> bool {
        let fwd = piece.color.forward();
        let df = target.file() as i8 - from.file() as i8;
        let dr = target.rank() as i8 - from.rank() as i8;
        if (df, dr) == (0, 0) {
            return false;
        }

        if piece.moves_like_gold() {
            return gold_step(df, dr, fwd);
        }
        match (piece.kind, piece.promoted) {
            (PieceType::Pawn, _) => df == 0 && dr == fwd,
            (PieceType::Lance, _) => df == 0 && dr * fwd > 0 && self.path_clear(from, target),
            (PieceType::Knight, _) => df.abs() == 1 && dr == 2 * fwd,
            (PieceType::Silver, _) => {
                (dr == fwd && df.abs() <= 1) || (dr == -fwd && df.abs() == 1)
            }
            (PieceType::King, _) => df.abs() <= 1 && dr.abs() <= 1,
            (PieceType::Rook, promoted) => {
                ((df == 0 || dr == 0) && self.path_clear(from, target))
                    || (promoted && df.abs() == 1 && dr.abs() == 1)
            }
            (PieceType::Bishop, promoted) => {
                (df.abs() == dr.abs() && self.path_clear(from, target))
                    || (promoted && df.abs() + dr.abs() == 1)
            }
            (PieceType::Gold, _) => gold_step(df, dr, fwd),
        }
    }

    /// 直線上の `from` と `to` の間（両端を除く）が空いているか
    fn path_clear(&self, from: Square, to: Square) -> bool {
        let step_f = (to.file() as i8 - from.file() as i8).signum();
        let step_r = (to.rank() as i8 - from.rank() as i8).signum();
        let mut file = from.file() as i8 + step_f;
        let mut rank = from.rank() as i8 + step_r;
        while let Some(sq) = Square::from_signed(file, rank) {
            if sq == to {
                return true;
            }
            if self.piece_on(sq).is_some() {
                return false;
            }
            file += step_f;
            rank += step_r;
        }
        false
    }
}

/// 金の動き: 前・斜め前・横・真後ろ
#[inline]
fn gold_step(df: i8, dr: i8, fwd: i8) -> bool {
    (dr == fwd && df.abs() <= 1) || (dr == 0 && df.abs() == 1) || (dr == -fwd && df == 0)
}
