//! SFEN形式の解析・出力
//!
//! 形式は `<盤面> <b|w> <手駒|-> <手数>` の4フィールド固定。
//! 盤面は1段目から9段目を `/` で区切り、各段は9筋から1筋の順に並べる。

use crate::error::ErrorCategory;
use crate::types::{Color, Piece, PieceType, Square};

use super::pos::Position;

/// 平手初期局面のSFEN
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// SFENパースエラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SfenError {
    #[error("sfen must have 4 fields, got {0}")]
    FieldCount(usize),
    #[error("board must have 9 ranks, got {0}")]
    RankCount(usize),
    #[error("rank {rank} does not have 9 files")]
    FileCount { rank: usize },
    #[error("unknown sfen piece {0:?}")]
    UnknownPiece(char),
    #[error("dangling promotion marker in rank {rank}")]
    DanglingPromotion { rank: usize },
    #[error("piece {0:?} cannot be promoted")]
    InvalidPromotion(char),
    #[error("invalid hand: {0}")]
    Hand(String),
    #[error("invalid side to move: {0}")]
    SideToMove(String),
    #[error("invalid move number: {0}")]
    MoveNumber(String),
}

impl SfenError {
    /// エラー分類
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::StructuralParse
    }
}

impl Position {
    /// SFEN文字列から局面を生成（手数は読み捨てる）
    pub fn from_sfen(sfen: &str) -> Result<Position, SfenError> {
        Self::from_sfen_with_ply(sfen).map(|(pos, _)| pos)
    }

    /// SFEN文字列から局面と手数を生成
    pub fn from_sfen_with_ply(sfen: &str) -> Result<(Position, u32), SfenError> {
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        let [board, side, hand, ply] = parts.as_slice() else {
            return Err(SfenError::FieldCount(parts.len()));
        };

        let mut pos = Position::empty();
        parse_board(&mut pos, board)?;

        match *side {
            "b" => pos.set_side_to_move(Color::Black),
            "w" => pos.set_side_to_move(Color::White),
            other => return Err(SfenError::SideToMove(other.to_string())),
        }

        parse_hand(&mut pos, hand)?;

        let ply: u32 = ply
            .parse()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| SfenError::MoveNumber(ply.to_string()))?;

        Ok((pos, ply))
    }

    /// 現局面のSFEN文字列を取得
    pub fn to_sfen(&self, move_number: u32) -> String {
        let mut result = String::new();

        // 1. 盤面
        for rank in 1..=9u8 {
            if rank > 1 {
                result.push('/');
            }
            let mut empty_count = 0;
            for file in (1..=9u8).rev() {
                let piece = Square::new(file, rank).and_then(|sq| self.piece_on(sq));
                match piece {
                    None => empty_count += 1,
                    Some(pc) => {
                        if empty_count > 0 {
                            result.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        result.push_str(&pc.to_sfen());
                    }
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
        }

        // 2. 手番
        result.push(' ');
        result.push(self.side_to_move().to_sfen_char());

        // 3. 手駒（先手→後手、それぞれ飛角金銀桂香歩の順）
        result.push(' ');
        let mut hand_str = String::new();
        for color in Color::ALL {
            for pt in PieceType::SFEN_HAND_ORDER {
                let count = self.hand(color).count(pt);
                if count == 0 {
                    continue;
                }
                if count > 1 {
                    hand_str.push_str(&count.to_string());
                }
                hand_str.push_str(&Piece::new(pt, color).to_sfen());
            }
        }
        if hand_str.is_empty() {
            result.push('-');
        } else {
            result.push_str(&hand_str);
        }

        // 4. 手数
        result.push(' ');
        result.push_str(&move_number.to_string());

        result
    }
}

/// SFEN駒文字を駒に変換（大文字=先手、小文字=後手）
fn sfen_piece(c: char) -> Option<Piece> {
    let kind = PieceType::from_sfen_char(c)?;
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    Some(Piece::new(kind, color))
}

fn parse_board(pos: &mut Position, board: &str) -> Result<(), SfenError> {
    let ranks: Vec<&str> = board.split('/').collect();
    if ranks.len() != 9 {
        return Err(SfenError::RankCount(ranks.len()));
    }

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = i + 1;
        // 9筋から数えて埋まった筋の数
        let mut filled = 0usize;
        let mut chars = rank_str.chars();
        while let Some(c) = chars.next() {
            if let Some(n) = c.to_digit(10).filter(|n| (1..=9).contains(n)) {
                filled += n as usize;
                if filled > 9 {
                    return Err(SfenError::FileCount { rank });
                }
                continue;
            }

            let (c, promoted) = if c == '+' {
                let next = chars.next().ok_or(SfenError::DanglingPromotion { rank })?;
                (next, true)
            } else {
                (c, false)
            };
            let mut piece = sfen_piece(c).ok_or(SfenError::UnknownPiece(c))?;
            if promoted {
                if !piece.kind.can_promote() {
                    return Err(SfenError::InvalidPromotion(c));
                }
                piece.promoted = true;
            }

            if filled >= 9 {
                return Err(SfenError::FileCount { rank });
            }
            let file = 9 - filled as u8;
            let sq = Square::new(file, rank as u8).ok_or(SfenError::FileCount { rank })?;
            pos.put_piece(sq, piece);
            filled += 1;
        }
        if filled != 9 {
            return Err(SfenError::FileCount { rank });
        }
    }
    Ok(())
}

fn parse_hand(pos: &mut Position, hand: &str) -> Result<(), SfenError> {
    if hand == "-" {
        return Ok(());
    }
    if hand.is_empty() {
        return Err(SfenError::Hand(hand.to_string()));
    }

    let mut count: Option<u8> = None;
    for c in hand.chars() {
        if let Some(d) = c.to_digit(10) {
            let next = count
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(d as u8))
                .ok_or_else(|| SfenError::Hand(hand.to_string()))?;
            count = Some(next);
            continue;
        }

        let piece = sfen_piece(c).ok_or_else(|| SfenError::Hand(hand.to_string()))?;
        let n = count.take().unwrap_or(1);
        if n == 0 {
            return Err(SfenError::Hand(hand.to_string()));
        }
        // 玉は手駒にできない
        pos.hand_mut(piece.color)
            .add_n(piece.kind, n)
            .ok_or_else(|| SfenError::Hand(hand.to_string()))?;
    }
    if count.is_some() {
        return Err(SfenError::Hand(hand.to_string()));
    }
    Ok(())
}
