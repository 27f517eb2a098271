//! 指し手（Move）

use std::fmt;

use super::{PieceType, Square};

/// 指し手
///
/// 盤上の移動と駒打ちの2種類。移動元の検証は `Position::apply` が行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// 盤上の駒を動かす
    Board {
        from: Square,
        to: Square,
        promote: bool,
    },
    /// 手駒を打つ
    Drop { kind: PieceType, to: Square },
}

/// USI形式の指し手の解析エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move length: {0:?}")]
    Length(String),
    #[error("invalid square in move: {0:?}")]
    Square(String),
    #[error("invalid drop piece in move: {0:?}")]
    DropPiece(String),
}

impl Move {
    /// 移動先
    #[inline]
    pub const fn to(self) -> Square {
        match self {
            Move::Board { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    /// 駒打ちかどうか
    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// USI形式の文字列に変換
    pub fn to_usi(self) -> String {
        self.to_string()
    }

    /// USI形式の文字列からMoveに変換
    ///
    /// - 移動: `"7g7f"`, `"8h2b+"`
    /// - 駒打ち: `"P*5e"`
    pub fn from_usi(s: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = s.chars().collect();
        let square = |a: char, b: char| {
            Square::from_usi(&format!("{a}{b}")).ok_or_else(|| MoveParseError::Square(s.to_string()))
        };

        match chars.as_slice() {
            [p, '*', f, r] => {
                let kind = p
                    .is_ascii_uppercase()
                    .then(|| PieceType::from_sfen_char(*p))
                    .flatten()
                    .filter(|pt| pt.hand_index().is_some())
                    .ok_or_else(|| MoveParseError::DropPiece(s.to_string()))?;
                Ok(Move::Drop {
                    kind,
                    to: square(*f, *r)?,
                })
            }
            [ff, fr, tf, tr] => Ok(Move::Board {
                from: square(*ff, *fr)?,
                to: square(*tf, *tr)?,
                promote: false,
            }),
            [ff, fr, tf, tr, '+'] => Ok(Move::Board {
                from: square(*ff, *fr)?,
                to: square(*tf, *tr)?,
                promote: true,
            }),
            _ => Err(MoveParseError::Length(s.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Board { from, to, promote } => {
                write!(f, "{from}{to}")?;
                if promote {
                    f.write_str("+")?;
                }
                Ok(())
            }
            Move::Drop { kind, to } => write!(f, "{}*{to}", kind.to_sfen_char()),
        }
    }
}
